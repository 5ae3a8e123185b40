use crate::validation_error::{atom, ErrorCode, ValidationErr};
use clvmr::allocator::{Allocator, NodePtr};
use clvmr::op_utils::u64_from_bytes;

#[derive(PartialEq, Eq, Debug)]
pub enum SanitizedUint {
    Ok(u64),
    PositiveOverflow,
    Negative,
}

/// Decodes an atom as a two's complement big-endian integer and classifies it
/// against an unsigned bound of `max_size` bytes. Decoding is total: any byte
/// string denotes some integer, and redundant leading zero bytes are
/// tolerated. The bound applies to the decoded value, not its encoding.
pub fn sanitize_uint(
    a: &Allocator,
    n: NodePtr,
    max_size: usize,
    code: ErrorCode,
) -> Result<SanitizedUint, ValidationErr> {
    assert!(max_size <= 8);

    let buf = atom(a, n, code)?;
    let buf = buf.as_ref();

    if buf.is_empty() {
        return Ok(SanitizedUint::Ok(0));
    }

    if (buf[0] & 0x80) != 0 {
        return Ok(SanitizedUint::Negative);
    }

    // strip leading zeros before measuring the magnitude
    let magnitude = match buf.iter().position(|&b| b != 0) {
        Some(i) => &buf[i..],
        None => return Ok(SanitizedUint::Ok(0)),
    };

    if magnitude.len() > max_size {
        return Ok(SanitizedUint::PositiveOverflow);
    }

    Ok(SanitizedUint::Ok(u64_from_bytes(magnitude)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn uint_tester(buf: &[u8], max_size: usize) -> SanitizedUint {
        let mut a = Allocator::new();
        let n = a.new_atom(buf).unwrap();
        sanitize_uint(&a, n, max_size, ErrorCode::InvalidCoinAmount).unwrap()
    }

    #[rstest]
    // the empty atom is zero, and so are all-zero buffers
    #[case(&[], SanitizedUint::Ok(0))]
    #[case(&[0], SanitizedUint::Ok(0))]
    #[case(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 0], SanitizedUint::Ok(0))]
    // the sign bit makes the value negative, regardless of magnitude
    #[case(&[0x80], SanitizedUint::Negative)]
    #[case(&[0xff], SanitizedUint::Negative)]
    #[case(&[0xff, 0, 0, 0, 0, 0, 0, 0, 0], SanitizedUint::Negative)]
    // leading zeros are sometimes necessary to keep a value positive
    #[case(&[0, 0xff], SanitizedUint::Ok(0xff))]
    // and redundant ones are tolerated
    #[case(&[0, 0, 0, 0xff], SanitizedUint::Ok(0xff))]
    #[case(&[0, 0, 0, 0x7f], SanitizedUint::Ok(0x7f))]
    // ordinary values
    #[case(&[1], SanitizedUint::Ok(1))]
    #[case(&[0x7f], SanitizedUint::Ok(0x7f))]
    #[case(&[0x01, 0x02, 0x03], SanitizedUint::Ok(0x0001_0203))]
    #[case(&[0, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff], SanitizedUint::Ok(u64::MAX))]
    // more than 8 bytes of magnitude never fits
    #[case(&[0x7f, 0, 0, 0, 0, 0, 0, 0, 0], SanitizedUint::PositiveOverflow)]
    #[case(&[0, 0x80, 0, 0, 0, 0, 0, 0, 0, 0], SanitizedUint::PositiveOverflow)]
    fn test_sanitize_uint_u64(#[case] buf: &[u8], #[case] expect: SanitizedUint) {
        assert_eq!(uint_tester(buf, 8), expect);
    }

    #[rstest]
    // 4-byte bound, as used for block heights
    #[case(&[0x7f, 0xff, 0xff, 0xff], SanitizedUint::Ok(0x7fff_ffff))]
    #[case(&[0, 0xff, 0xff, 0xff, 0xff], SanitizedUint::Ok(0xffff_ffff))]
    #[case(&[0x01, 0, 0, 0, 0], SanitizedUint::PositiveOverflow)]
    #[case(&[0x80, 0, 0, 0], SanitizedUint::Negative)]
    fn test_sanitize_uint_u32(#[case] buf: &[u8], #[case] expect: SanitizedUint) {
        assert_eq!(uint_tester(buf, 4), expect);
    }

    #[test]
    fn test_pair_is_rejected() {
        let mut a = Allocator::new();
        let one = a.new_atom(&[1]).unwrap();
        let pair = a.new_pair(one, one).unwrap();
        assert_eq!(
            sanitize_uint(&a, pair, 8, ErrorCode::InvalidCoinAmount).unwrap_err(),
            ValidationErr(pair, ErrorCode::InvalidCoinAmount)
        );
    }
}
