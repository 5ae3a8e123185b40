#[cfg(feature = "consensus")]
pub use kale_consensus as consensus;

#[cfg(feature = "protocol")]
pub use kale_protocol as protocol;
