use crate::condition_sanitizers::{parse_amount, sanitize_announce_msg, sanitize_hash};
use crate::opcodes::{
    condition_cost, parse_opcode, ConditionOpcode, AGG_SIG_ME, AGG_SIG_UNSAFE,
    ASSERT_COIN_ANNOUNCEMENT, ASSERT_HEIGHT_ABSOLUTE, ASSERT_HEIGHT_RELATIVE, ASSERT_MY_AMOUNT,
    ASSERT_MY_COIN_ID, ASSERT_MY_PARENT_ID, ASSERT_MY_PUZZLEHASH, ASSERT_PUZZLE_ANNOUNCEMENT,
    ASSERT_SECONDS_ABSOLUTE, ASSERT_SECONDS_RELATIVE, CREATE_COIN, CREATE_COIN_ANNOUNCEMENT,
    CREATE_PUZZLE_ANNOUNCEMENT, RESERVE_FEE, UNKNOWN,
};
use crate::sanitize_int::{sanitize_uint, SanitizedUint};
use crate::validation_error::{check_nil, first, rest, ErrorCode, ValidationErr};
use clvmr::allocator::{Allocator, NodePtr, SExp};
use clvmr::cost::Cost;
use kale_protocol::{Bytes, Bytes32, Bytes48};

// A condition is a list whose first element is the opcode atom and whose tail
// holds the arguments:

// (<condition-opcode> <arg1> <arg2> ...)

// different conditions have different number and types of arguments. Known
// conditions reject both missing and trailing arguments; conditions under the
// UNKNOWN pseudo-opcode keep their arguments as-is.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    // pubkey (48 bytes) and message (<= 1024 bytes)
    AggSigUnsafe(Bytes48, Bytes),
    AggSigMe(Bytes48, Bytes),
    // puzzle hash (32 bytes) and amount of the coin being created
    CreateCoin(Bytes32, u64),
    // fee amount to reserve from this spend
    ReserveFee(u64),
    // message (<= 1024 bytes)
    CreateCoinAnnouncement(Bytes),
    CreatePuzzleAnnouncement(Bytes),
    // announcement ID (hash, 32 bytes)
    AssertCoinAnnouncement(Bytes32),
    AssertPuzzleAnnouncement(Bytes32),
    // ID (hash, 32 bytes)
    AssertMyCoinId(Bytes32),
    AssertMyParentId(Bytes32),
    AssertMyPuzzlehash(Bytes32),
    // amount
    AssertMyAmount(u64),
    // seconds
    AssertSecondsRelative(u64),
    AssertSecondsAbsolute(u64),
    // block height
    AssertHeightRelative(u32),
    AssertHeightAbsolute(u32),
    // a condition we accept without understanding; holds the raw argument
    // atoms
    Unknown(Vec<Bytes>),
}

impl Condition {
    pub fn opcode(&self) -> ConditionOpcode {
        match self {
            Condition::AggSigUnsafe(..) => AGG_SIG_UNSAFE,
            Condition::AggSigMe(..) => AGG_SIG_ME,
            Condition::CreateCoin(..) => CREATE_COIN,
            Condition::ReserveFee(..) => RESERVE_FEE,
            Condition::CreateCoinAnnouncement(..) => CREATE_COIN_ANNOUNCEMENT,
            Condition::CreatePuzzleAnnouncement(..) => CREATE_PUZZLE_ANNOUNCEMENT,
            Condition::AssertCoinAnnouncement(..) => ASSERT_COIN_ANNOUNCEMENT,
            Condition::AssertPuzzleAnnouncement(..) => ASSERT_PUZZLE_ANNOUNCEMENT,
            Condition::AssertMyCoinId(..) => ASSERT_MY_COIN_ID,
            Condition::AssertMyParentId(..) => ASSERT_MY_PARENT_ID,
            Condition::AssertMyPuzzlehash(..) => ASSERT_MY_PUZZLEHASH,
            Condition::AssertMyAmount(..) => ASSERT_MY_AMOUNT,
            Condition::AssertSecondsRelative(..) => ASSERT_SECONDS_RELATIVE,
            Condition::AssertSecondsAbsolute(..) => ASSERT_SECONDS_ABSOLUTE,
            Condition::AssertHeightRelative(..) => ASSERT_HEIGHT_RELATIVE,
            Condition::AssertHeightAbsolute(..) => ASSERT_HEIGHT_ABSOLUTE,
            Condition::Unknown(..) => UNKNOWN,
        }
    }
}

/// Parses the argument list of a known condition. Exactly the expected
/// arguments must be present; a non-nil terminator or trailing elements fail
/// the parse. Returns None when the condition is inherently satisfied (a
/// time- or height lock of zero or less) and there is no need to keep it.
pub fn parse_args(
    a: &Allocator,
    mut c: NodePtr,
    op: ConditionOpcode,
) -> Result<Option<Condition>, ValidationErr> {
    match op {
        AGG_SIG_UNSAFE | AGG_SIG_ME => {
            let pubkey = sanitize_hash::<48>(a, first(a, c)?, ErrorCode::InvalidPublicKey)?;
            c = rest(a, c)?;
            let message = sanitize_announce_msg(a, first(a, c)?, ErrorCode::InvalidMessage)?;
            // AGG_SIG_* take two parameters
            check_nil(a, rest(a, c)?)?;
            if op == AGG_SIG_UNSAFE {
                Ok(Some(Condition::AggSigUnsafe(pubkey, message)))
            } else {
                Ok(Some(Condition::AggSigMe(pubkey, message)))
            }
        }
        CREATE_COIN => {
            let puzzle_hash = sanitize_hash::<32>(a, first(a, c)?, ErrorCode::InvalidPuzzleHash)?;
            c = rest(a, c)?;
            let amount = parse_amount(a, first(a, c)?, ErrorCode::InvalidCoinAmount)?;
            check_nil(a, rest(a, c)?)?;
            Ok(Some(Condition::CreateCoin(puzzle_hash, amount)))
        }
        RESERVE_FEE => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let fee = parse_amount(a, node, ErrorCode::InvalidCoinAmount)?;
            Ok(Some(Condition::ReserveFee(fee)))
        }
        CREATE_COIN_ANNOUNCEMENT => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let msg = sanitize_announce_msg(a, node, ErrorCode::InvalidCoinAnnouncement)?;
            Ok(Some(Condition::CreateCoinAnnouncement(msg)))
        }
        CREATE_PUZZLE_ANNOUNCEMENT => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let msg = sanitize_announce_msg(a, node, ErrorCode::InvalidPuzzleAnnouncement)?;
            Ok(Some(Condition::CreatePuzzleAnnouncement(msg)))
        }
        ASSERT_COIN_ANNOUNCEMENT => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let id = sanitize_hash::<32>(a, node, ErrorCode::InvalidCoinAnnouncement)?;
            Ok(Some(Condition::AssertCoinAnnouncement(id)))
        }
        ASSERT_PUZZLE_ANNOUNCEMENT => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let id = sanitize_hash::<32>(a, node, ErrorCode::InvalidPuzzleAnnouncement)?;
            Ok(Some(Condition::AssertPuzzleAnnouncement(id)))
        }
        ASSERT_MY_COIN_ID => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let id = sanitize_hash::<32>(a, node, ErrorCode::AssertMyCoinIdFailed)?;
            Ok(Some(Condition::AssertMyCoinId(id)))
        }
        ASSERT_MY_PARENT_ID => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let id = sanitize_hash::<32>(a, node, ErrorCode::AssertMyParentIdFailed)?;
            Ok(Some(Condition::AssertMyParentId(id)))
        }
        ASSERT_MY_PUZZLEHASH => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let id = sanitize_hash::<32>(a, node, ErrorCode::AssertMyPuzzleHashFailed)?;
            Ok(Some(Condition::AssertMyPuzzlehash(id)))
        }
        ASSERT_MY_AMOUNT => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let amount = parse_amount(a, node, ErrorCode::AssertMyAmountFailed)?;
            Ok(Some(Condition::AssertMyAmount(amount)))
        }
        ASSERT_SECONDS_RELATIVE => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let code = ErrorCode::AssertSecondsRelativeFailed;
            match sanitize_uint(a, node, 8, code)? {
                SanitizedUint::PositiveOverflow => Err(ValidationErr(node, code)),
                // a lock of zero or less is inherently satisfied
                SanitizedUint::Negative | SanitizedUint::Ok(0) => Ok(None),
                SanitizedUint::Ok(r) => Ok(Some(Condition::AssertSecondsRelative(r))),
            }
        }
        ASSERT_SECONDS_ABSOLUTE => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let code = ErrorCode::AssertSecondsAbsoluteFailed;
            match sanitize_uint(a, node, 8, code)? {
                SanitizedUint::PositiveOverflow => Err(ValidationErr(node, code)),
                SanitizedUint::Negative | SanitizedUint::Ok(0) => Ok(None),
                SanitizedUint::Ok(r) => Ok(Some(Condition::AssertSecondsAbsolute(r))),
            }
        }
        ASSERT_HEIGHT_RELATIVE => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let code = ErrorCode::AssertHeightRelativeFailed;
            match sanitize_uint(a, node, 4, code)? {
                SanitizedUint::PositiveOverflow => Err(ValidationErr(node, code)),
                SanitizedUint::Negative | SanitizedUint::Ok(0) => Ok(None),
                SanitizedUint::Ok(r) => Ok(Some(Condition::AssertHeightRelative(r as u32))),
            }
        }
        ASSERT_HEIGHT_ABSOLUTE => {
            let node = first(a, c)?;
            check_nil(a, rest(a, c)?)?;
            let code = ErrorCode::AssertHeightAbsoluteFailed;
            match sanitize_uint(a, node, 4, code)? {
                SanitizedUint::PositiveOverflow => Err(ValidationErr(node, code)),
                SanitizedUint::Negative | SanitizedUint::Ok(0) => Ok(None),
                SanitizedUint::Ok(r) => Ok(Some(Condition::AssertHeightAbsolute(r as u32))),
            }
        }
        _ => Err(ValidationErr(c, ErrorCode::InvalidConditionOpcode)),
    }
}

/// Collects the elements of a (possibly improper) list as atoms, stopping
/// silently at the first non-pair tail or non-atom element.
pub fn as_atom_list(a: &Allocator, mut n: NodePtr) -> Vec<Bytes> {
    let mut ret = Vec::<Bytes>::new();
    while let SExp::Pair(left, right) = a.sexp(n) {
        match a.sexp(left) {
            SExp::Atom => ret.push(a.atom(left).as_ref().into()),
            SExp::Pair(..) => break,
        }
        n = right;
    }
    ret
}

/// Parses one condition from a spend's condition list, returning its cost and
/// the parsed form, or None in place of a condition that is inherently
/// satisfied. In safe mode (the mempool dialect) unrecognized opcodes fail
/// the parse; otherwise they are kept under the UNKNOWN pseudo-opcode with
/// their raw arguments and zero cost.
pub fn parse_condition(
    a: &Allocator,
    c: NodePtr,
    safe_mode: bool,
) -> Result<(Cost, Option<Condition>), ValidationErr> {
    let op_node = first(a, c)?;
    match parse_opcode(a, op_node) {
        Some(op) => Ok((condition_cost(op), parse_args(a, rest(a, c)?, op)?)),
        None if safe_mode => Err(ValidationErr(op_node, ErrorCode::InvalidConditionOpcode)),
        None => Ok((0, Some(Condition::Unknown(as_atom_list(a, rest(a, c)?))))),
    }
}

/// Groups a spend's conditions by opcode. The mapping is insertion ordered:
/// opcodes appear in the order first seen and each opcode's conditions keep
/// their relative order. An empty input produces an empty mapping.
pub fn conditions_by_opcode(
    conditions: Vec<Condition>,
) -> Vec<(ConditionOpcode, Vec<Condition>)> {
    let mut ret = Vec::<(ConditionOpcode, Vec<Condition>)>::new();
    for c in conditions {
        let op = c.opcode();
        match ret.iter_mut().find(|(o, _)| *o == op) {
            Some((_, list)) => list.push(c),
            None => ret.push((op, vec![c])),
        }
    }
    ret
}
