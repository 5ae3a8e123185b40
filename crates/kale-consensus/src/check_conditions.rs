use crate::conditions::Condition;
use crate::opcodes::ConditionOpcode;
use crate::validation_error::ErrorCode;
use kale_protocol::{Bytes32, CoinRecord};
use std::collections::HashSet;

/// Checks one condition of a spend against the current chain state. The time
/// and height locks pass when the chain has reached at least the asserted
/// bound; `prev_transaction_block_height` and `timestamp` refer to the
/// previous transaction block.
fn check_condition(
    c: &Condition,
    unspent: &CoinRecord,
    coin_announcements: &HashSet<Bytes32>,
    puzzle_announcements: &HashSet<Bytes32>,
    prev_transaction_block_height: u32,
    timestamp: u64,
) -> Result<(), ErrorCode> {
    match c {
        Condition::AssertMyCoinId(id) => {
            if unspent.coin.coin_id() != *id {
                return Err(ErrorCode::AssertMyCoinIdFailed);
            }
        }
        Condition::AssertMyParentId(id) => {
            if unspent.coin.parent_coin_info != *id {
                return Err(ErrorCode::AssertMyParentIdFailed);
            }
        }
        Condition::AssertMyPuzzlehash(puzzle_hash) => {
            if unspent.coin.puzzle_hash != *puzzle_hash {
                return Err(ErrorCode::AssertMyPuzzleHashFailed);
            }
        }
        Condition::AssertMyAmount(amount) => {
            if unspent.coin.amount != *amount {
                return Err(ErrorCode::AssertMyAmountFailed);
            }
        }
        Condition::AssertCoinAnnouncement(id) => {
            if !coin_announcements.contains(id) {
                return Err(ErrorCode::AssertAnnounceConsumedFailed);
            }
        }
        Condition::AssertPuzzleAnnouncement(id) => {
            if !puzzle_announcements.contains(id) {
                return Err(ErrorCode::AssertAnnounceConsumedFailed);
            }
        }
        Condition::AssertHeightAbsolute(height) => {
            if prev_transaction_block_height < *height {
                return Err(ErrorCode::AssertHeightAbsoluteFailed);
            }
        }
        Condition::AssertHeightRelative(height) => {
            let lock = u64::from(*height) + u64::from(unspent.confirmed_block_index);
            if u64::from(prev_transaction_block_height) < lock {
                return Err(ErrorCode::AssertHeightRelativeFailed);
            }
        }
        Condition::AssertSecondsAbsolute(seconds) => {
            if timestamp < *seconds {
                return Err(ErrorCode::AssertSecondsAbsoluteFailed);
            }
        }
        Condition::AssertSecondsRelative(seconds) => {
            // a lock past the end of the clock can never be satisfied
            let lock = seconds
                .checked_add(unspent.timestamp)
                .ok_or(ErrorCode::AssertSecondsRelativeFailed)?;
            if timestamp < lock {
                return Err(ErrorCode::AssertSecondsRelativeFailed);
            }
        }
        // effects, signatures and unknown conditions are verified elsewhere
        Condition::AggSigUnsafe(..)
        | Condition::AggSigMe(..)
        | Condition::CreateCoin(..)
        | Condition::ReserveFee(..)
        | Condition::CreateCoinAnnouncement(..)
        | Condition::CreatePuzzleAnnouncement(..)
        | Condition::Unknown(..) => {}
    }
    Ok(())
}

/// Checks all conditions of one spent coin against current state, stopping at
/// the first failure. The announcement sets hold the names of announcements
/// created within the same block.
pub fn check_conditions(
    unspent: &CoinRecord,
    coin_announcements: &HashSet<Bytes32>,
    puzzle_announcements: &HashSet<Bytes32>,
    conditions: &[(ConditionOpcode, Vec<Condition>)],
    prev_transaction_block_height: u32,
    timestamp: u64,
) -> Result<(), ErrorCode> {
    for (_, con_list) in conditions {
        for c in con_list {
            check_condition(
                c,
                unspent,
                coin_announcements,
                puzzle_announcements,
                prev_transaction_block_height,
                timestamp,
            )?;
        }
    }
    Ok(())
}
