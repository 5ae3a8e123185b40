use crate::sanitize_int::{sanitize_uint, SanitizedUint};
use crate::validation_error::{atom, ErrorCode, ValidationErr};
use clvmr::allocator::{Allocator, NodePtr};
use kale_protocol::{Bytes, BytesImpl};

pub fn sanitize_hash<const N: usize>(
    a: &Allocator,
    n: NodePtr,
    code: ErrorCode,
) -> Result<BytesImpl<N>, ValidationErr> {
    let buf = atom(a, n, code)?;
    BytesImpl::try_from(buf.as_ref()).map_err(|_| ValidationErr(n, code))
}

pub fn parse_amount(a: &Allocator, n: NodePtr, code: ErrorCode) -> Result<u64, ValidationErr> {
    // amounts are not allowed to be negative or to exceed 2^64. i.e. 8 bytes
    match sanitize_uint(a, n, 8, code)? {
        SanitizedUint::Negative | SanitizedUint::PositiveOverflow => {
            Err(ValidationErr(n, code))
        }
        SanitizedUint::Ok(r) => Ok(r),
    }
}

pub fn sanitize_announce_msg(
    a: &Allocator,
    n: NodePtr,
    code: ErrorCode,
) -> Result<Bytes, ValidationErr> {
    let buf = atom(a, n, code)?;
    let buf = buf.as_ref();

    if buf.len() > 1024 {
        Err(ValidationErr(n, code))
    } else {
        Ok(buf.into())
    }
}
