use clvmr::allocator::{Allocator, NodePtr, SExp};
use clvmr::cost::Cost;

pub type ConditionOpcode = u8;

// UNKNOWN is ascii "0". It is a pseudo-opcode: conditions whose opcode we
// don't recognize are carried under it when not in mempool mode
pub const UNKNOWN: ConditionOpcode = 48;

// AGG_SIG is ascii "1"
pub const AGG_SIG_UNSAFE: ConditionOpcode = 49;
pub const AGG_SIG_ME: ConditionOpcode = 50;

// the conditions below reserve coin amounts and have to be accounted for in
// output totals
pub const CREATE_COIN: ConditionOpcode = 51;
pub const RESERVE_FEE: ConditionOpcode = 52;

// the conditions below deal with announcements, for inter-coin communication
pub const CREATE_COIN_ANNOUNCEMENT: ConditionOpcode = 60;
pub const ASSERT_COIN_ANNOUNCEMENT: ConditionOpcode = 61;
pub const CREATE_PUZZLE_ANNOUNCEMENT: ConditionOpcode = 62;
pub const ASSERT_PUZZLE_ANNOUNCEMENT: ConditionOpcode = 63;

// the conditions below let coins inquire about themselves
pub const ASSERT_MY_COIN_ID: ConditionOpcode = 70;
pub const ASSERT_MY_PARENT_ID: ConditionOpcode = 71;
pub const ASSERT_MY_PUZZLEHASH: ConditionOpcode = 72;
pub const ASSERT_MY_AMOUNT: ConditionOpcode = 73;

// the conditions below ensure that we're "far enough" in the future
// wall-clock time
pub const ASSERT_SECONDS_RELATIVE: ConditionOpcode = 80;
pub const ASSERT_SECONDS_ABSOLUTE: ConditionOpcode = 81;

// block index
pub const ASSERT_HEIGHT_RELATIVE: ConditionOpcode = 82;
pub const ASSERT_HEIGHT_ABSOLUTE: ConditionOpcode = 83;

pub const AGG_SIG_COST: Cost = 1_200_000;
pub const CREATE_COIN_COST: Cost = 1_800_000;

/// The cost a condition charges against the block's budget. Assertions are
/// free; only signature checks and coin creation represent real work.
pub fn condition_cost(op: ConditionOpcode) -> Cost {
    match op {
        AGG_SIG_UNSAFE | AGG_SIG_ME => AGG_SIG_COST,
        CREATE_COIN => CREATE_COIN_COST,
        _ => 0,
    }
}

/// Matches the opcode atom against the recognized set. Pairs, multi-byte
/// atoms and unassigned bytes (including the UNKNOWN placeholder itself) all
/// return None.
pub fn parse_opcode(a: &Allocator, op: NodePtr) -> Option<ConditionOpcode> {
    let buf = match a.sexp(op) {
        SExp::Atom => a.atom(op),
        SExp::Pair(..) => return None,
    };
    let buf = buf.as_ref();
    if buf.len() != 1 {
        return None;
    }

    match buf[0] {
        AGG_SIG_UNSAFE
        | AGG_SIG_ME
        | CREATE_COIN
        | RESERVE_FEE
        | CREATE_COIN_ANNOUNCEMENT
        | ASSERT_COIN_ANNOUNCEMENT
        | CREATE_PUZZLE_ANNOUNCEMENT
        | ASSERT_PUZZLE_ANNOUNCEMENT
        | ASSERT_MY_COIN_ID
        | ASSERT_MY_PARENT_ID
        | ASSERT_MY_PUZZLEHASH
        | ASSERT_MY_AMOUNT
        | ASSERT_SECONDS_RELATIVE
        | ASSERT_SECONDS_ABSOLUTE
        | ASSERT_HEIGHT_RELATIVE
        | ASSERT_HEIGHT_ABSOLUTE => Some(buf[0]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn opcode_tester(a: &mut Allocator, val: &[u8]) -> Option<ConditionOpcode> {
        let v = a.new_atom(val).unwrap();
        parse_opcode(a, v)
    }

    #[rstest]
    // leading zeros are not allowed, it makes it a different value
    #[case(&[ASSERT_HEIGHT_ABSOLUTE, 0], None)]
    #[case(&[0, ASSERT_HEIGHT_ABSOLUTE], None)]
    #[case(&[0], None)]
    // the UNKNOWN placeholder is not a wire opcode
    #[case(&[UNKNOWN], None)]
    // unassigned bytes
    #[case(&[1], None)]
    #[case(&[64], None)]
    #[case(&[84], None)]
    // all condition codes
    #[case(&[AGG_SIG_UNSAFE], Some(AGG_SIG_UNSAFE))]
    #[case(&[AGG_SIG_ME], Some(AGG_SIG_ME))]
    #[case(&[CREATE_COIN], Some(CREATE_COIN))]
    #[case(&[RESERVE_FEE], Some(RESERVE_FEE))]
    #[case(&[CREATE_COIN_ANNOUNCEMENT], Some(CREATE_COIN_ANNOUNCEMENT))]
    #[case(&[ASSERT_COIN_ANNOUNCEMENT], Some(ASSERT_COIN_ANNOUNCEMENT))]
    #[case(&[CREATE_PUZZLE_ANNOUNCEMENT], Some(CREATE_PUZZLE_ANNOUNCEMENT))]
    #[case(&[ASSERT_PUZZLE_ANNOUNCEMENT], Some(ASSERT_PUZZLE_ANNOUNCEMENT))]
    #[case(&[ASSERT_MY_COIN_ID], Some(ASSERT_MY_COIN_ID))]
    #[case(&[ASSERT_MY_PARENT_ID], Some(ASSERT_MY_PARENT_ID))]
    #[case(&[ASSERT_MY_PUZZLEHASH], Some(ASSERT_MY_PUZZLEHASH))]
    #[case(&[ASSERT_MY_AMOUNT], Some(ASSERT_MY_AMOUNT))]
    #[case(&[ASSERT_SECONDS_RELATIVE], Some(ASSERT_SECONDS_RELATIVE))]
    #[case(&[ASSERT_SECONDS_ABSOLUTE], Some(ASSERT_SECONDS_ABSOLUTE))]
    #[case(&[ASSERT_HEIGHT_RELATIVE], Some(ASSERT_HEIGHT_RELATIVE))]
    #[case(&[ASSERT_HEIGHT_ABSOLUTE], Some(ASSERT_HEIGHT_ABSOLUTE))]
    fn test_parse_opcode(#[case] input: &[u8], #[case] expected: Option<ConditionOpcode>) {
        let mut a = Allocator::new();
        assert_eq!(opcode_tester(&mut a, input), expected);
    }

    #[test]
    fn test_parse_invalid_opcode() {
        // a pair is never a valid condition opcode
        let mut a = Allocator::new();
        let v1 = a.new_atom(&[0]).unwrap();
        let v2 = a.new_atom(&[0]).unwrap();
        let p = a.new_pair(v1, v2).unwrap();
        assert_eq!(parse_opcode(&a, p), None);
    }

    #[test]
    fn test_condition_cost() {
        assert_eq!(condition_cost(AGG_SIG_UNSAFE), AGG_SIG_COST);
        assert_eq!(condition_cost(AGG_SIG_ME), AGG_SIG_COST);
        assert_eq!(condition_cost(CREATE_COIN), CREATE_COIN_COST);
        assert_eq!(condition_cost(RESERVE_FEE), 0);
        assert_eq!(condition_cost(ASSERT_SECONDS_ABSOLUTE), 0);
        assert_eq!(condition_cost(UNKNOWN), 0);
    }
}
