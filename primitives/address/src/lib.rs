//! Filecoin address primitives.
//!
//! Addresses of every protocol (`f0` to `f4`) can be moved between their
//! text and binary forms. Ethereum addresses map to and from delegated
//! addresses in the [`EAM_NAMESPACE`], see [`delegated_from_eth`] and
//! [`eth_from_delegated`].
//!
//! References:
//! * <https://spec.filecoin.io/appendix/address/>
//! * <https://github.com/filecoin-project/FIPs/blob/master/FIPS/fip-0048.md>

mod address;
mod base32;
pub mod checksum;
mod error;
mod eth;
mod text;

pub use address::{
    Address, DelegatedAddress, Network, Payload, Protocol, BLS_PUB_LEN, MAX_SUBADDRESS_LEN,
    PAYLOAD_HASH_LEN,
};
pub use error::{Error, Result};
pub use eth::{delegated_from_eth, eth_from_delegated, EthAddress, EAM_NAMESPACE, ETH_ADDRESS_LEN};
pub use text::{decode_text, encode_text, validate, MAX_ADDRESS_LEN};

/// Identifier for Actors, includes builtin and initialized actors
pub type ActorID = u64;
