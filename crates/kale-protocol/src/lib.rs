mod bytes;
mod coin;
mod coin_record;

pub use crate::bytes::{Bytes, Bytes32, Bytes48, BytesImpl};
pub use crate::coin::Coin;
pub use crate::coin_record::CoinRecord;
