use clvmr::allocator::{Allocator, Atom, NodePtr, SExp};
use clvmr::error::EvalErr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCode {
    InvalidCondition,
    InvalidConditionOpcode,
    InvalidParentId,
    InvalidPuzzleHash,
    InvalidPublicKey,
    InvalidMessage,
    InvalidCoinAmount,
    InvalidCoinAnnouncement,
    InvalidPuzzleAnnouncement,
    AssertMyCoinIdFailed,
    AssertMyParentIdFailed,
    AssertMyPuzzleHashFailed,
    AssertMyAmountFailed,
    AssertAnnounceConsumedFailed,
    AssertHeightRelativeFailed,
    AssertHeightAbsoluteFailed,
    AssertSecondsRelativeFailed,
    AssertSecondsAbsoluteFailed,
    BlockCostExceedsMax,
    GeneratorRuntimeError,
}

// wire values shared with the original node implementation
impl From<ErrorCode> for u32 {
    fn from(err: ErrorCode) -> u32 {
        match err {
            ErrorCode::InvalidCondition
            | ErrorCode::InvalidConditionOpcode
            | ErrorCode::InvalidParentId
            | ErrorCode::InvalidPuzzleHash
            | ErrorCode::InvalidPublicKey
            | ErrorCode::InvalidMessage
            | ErrorCode::InvalidCoinAmount
            | ErrorCode::InvalidCoinAnnouncement
            | ErrorCode::InvalidPuzzleAnnouncement => 10,
            ErrorCode::AssertMyCoinIdFailed => 11,
            ErrorCode::AssertAnnounceConsumedFailed => 12,
            ErrorCode::AssertHeightRelativeFailed => 13,
            ErrorCode::AssertHeightAbsoluteFailed => 14,
            ErrorCode::AssertSecondsAbsoluteFailed => 15,
            ErrorCode::BlockCostExceedsMax => 23,
            ErrorCode::AssertSecondsRelativeFailed => 105,
            ErrorCode::AssertMyParentIdFailed => 114,
            ErrorCode::AssertMyPuzzleHashFailed => 115,
            ErrorCode::AssertMyAmountFailed => 116,
            ErrorCode::GeneratorRuntimeError => 117,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("validation error: {1:?}")]
pub struct ValidationErr(pub NodePtr, pub ErrorCode);

impl From<EvalErr> for ValidationErr {
    fn from(v: EvalErr) -> Self {
        match v {
            EvalErr::CostExceeded => ValidationErr(NodePtr::NIL, ErrorCode::BlockCostExceedsMax),
            _ => ValidationErr(NodePtr::NIL, ErrorCode::GeneratorRuntimeError),
        }
    }
}

impl From<std::io::Error> for ValidationErr {
    fn from(_: std::io::Error) -> Self {
        ValidationErr(NodePtr::NIL, ErrorCode::GeneratorRuntimeError)
    }
}

// helper functions that fail with ValidationErr
pub fn first(a: &Allocator, n: NodePtr) -> Result<NodePtr, ValidationErr> {
    match a.sexp(n) {
        SExp::Pair(left, _) => Ok(left),
        SExp::Atom => Err(ValidationErr(n, ErrorCode::InvalidCondition)),
    }
}

pub fn rest(a: &Allocator, n: NodePtr) -> Result<NodePtr, ValidationErr> {
    match a.sexp(n) {
        SExp::Pair(_, right) => Ok(right),
        SExp::Atom => Err(ValidationErr(n, ErrorCode::InvalidCondition)),
    }
}

pub fn next(a: &Allocator, n: NodePtr) -> Result<Option<(NodePtr, NodePtr)>, ValidationErr> {
    match a.sexp(n) {
        SExp::Pair(left, right) => Ok(Some((left, right))),
        SExp::Atom => {
            // this is expected to be a valid list terminator
            if a.atom_len(n) == 0 {
                Ok(None)
            } else {
                Err(ValidationErr(n, ErrorCode::InvalidCondition))
            }
        }
    }
}

pub fn atom(a: &Allocator, n: NodePtr, code: ErrorCode) -> Result<Atom<'_>, ValidationErr> {
    match a.sexp(n) {
        SExp::Atom => Ok(a.atom(n)),
        SExp::Pair(..) => Err(ValidationErr(n, code)),
    }
}

pub fn check_nil(a: &Allocator, n: NodePtr) -> Result<(), ValidationErr> {
    if atom(a, n, ErrorCode::InvalidCondition)?.as_ref().is_empty() {
        Ok(())
    } else {
        Err(ValidationErr(n, ErrorCode::InvalidCondition))
    }
}
