use thiserror::Error;

use crate::{ActorID, Protocol};

/// Address encoding and conversion errors.
///
/// Every error is deterministic, the same input always fails with the same
/// variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The text or bytes could not be parsed as an address at all.
    #[error("invalid address format: {0}")]
    InvalidFormat(String),

    /// The protocol indicator is not one of the known protocols.
    #[error("unknown address protocol: {0}")]
    InvalidProtocol(String),

    /// The payload length does not match what the protocol requires.
    #[error("invalid payload length {length} for {protocol} address")]
    InvalidLength { protocol: Protocol, length: usize },

    /// The checksum embedded in the text does not match the recomputed one.
    #[error(
        "checksum mismatch, expected {} but found {}",
        hex::encode(.expected),
        hex::encode(.found)
    )]
    ChecksumMismatch { expected: [u8; 4], found: [u8; 4] },

    /// The address is valid but belongs to a protocol that cannot be converted.
    #[error("expected a {expected} address, found a {found} address")]
    WrongProtocol { expected: Protocol, found: Protocol },

    /// The delegated address does not belong to the requested namespace.
    #[error("expected delegated namespace {expected}, found namespace {found}")]
    WrongNamespace { expected: ActorID, found: ActorID },
}

/// Result Type. Errors are always [`Error`](crate::Error).
pub type Result<T> = std::result::Result<T, Error>;
