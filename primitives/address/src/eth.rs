//! Mapping between Ethereum addresses and delegated (`f410f`) addresses.
//!
//! Ethereum addresses live in the namespace of the Ethereum Address Manager
//! actor, their 20 bytes are used verbatim as the subaddress.

use core::{fmt, str::FromStr};

use tracing::debug;

use crate::{text::decode_text, ActorID, Address, Error, Network, Payload, Protocol, Result};

/// Actor ID of the Ethereum Address Manager, the namespace of every
/// Ethereum-mapped delegated address.
pub const EAM_NAMESPACE: ActorID = 10;

/// Length of an Ethereum address in bytes.
pub const ETH_ADDRESS_LEN: usize = 20;

/// Length of the `0x` prefixed hex form of an Ethereum address.
const ETH_ADDRESS_TEXT_LEN: usize = 2 + 2 * ETH_ADDRESS_LEN;

/// A 20-byte Ethereum address.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Deserialize, ::serde::Serialize),
    serde(into = "String", try_from = "String")
)]
pub struct EthAddress(pub [u8; ETH_ADDRESS_LEN]);

impl EthAddress {
    /// Maps the address into the delegated address space of `network`.
    pub fn to_delegated(&self, network: Network) -> Address {
        Address::from_eth(self, network)
    }
}

impl FromStr for EthAddress {
    type Err = Error;

    /// Parses `0x` (or `0X`) followed by exactly 40 hex digits of any case.
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != ETH_ADDRESS_TEXT_LEN {
            return Err(Error::InvalidFormat(format!(
                "Ethereum address must be {ETH_ADDRESS_TEXT_LEN} characters long, found {}",
                s.len()
            )));
        }

        // Working on bytes, a multi-byte character must not break the split.
        let (prefix, digits) = s.as_bytes().split_at(2);
        if prefix != b"0x" && prefix != b"0X" {
            return Err(Error::InvalidFormat(
                "Ethereum address must start with 0x".to_string(),
            ));
        }

        let mut bytes = [0; ETH_ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|err| Error::InvalidFormat(format!("Ethereum address is not hex: {err}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<EthAddress> for String {
    fn from(address: EthAddress) -> Self {
        address.to_string()
    }
}

impl TryFrom<String> for EthAddress {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<&Address> for EthAddress {
    type Error = Error;

    /// Only delegated addresses in the [`EAM_NAMESPACE`] with a 20-byte
    /// subaddress map back to Ethereum.
    fn try_from(address: &Address) -> Result<Self> {
        let Payload::Delegated(delegated) = address.payload() else {
            return Err(Error::WrongProtocol {
                expected: Protocol::Delegated,
                found: address.protocol(),
            });
        };
        if delegated.namespace() != EAM_NAMESPACE {
            return Err(Error::WrongNamespace {
                expected: EAM_NAMESPACE,
                found: delegated.namespace(),
            });
        }

        let subaddress = delegated.subaddress();
        subaddress
            .try_into()
            .map(Self)
            .map_err(|_| Error::InvalidLength {
                protocol: Protocol::Delegated,
                length: subaddress.len(),
            })
    }
}

impl Address {
    /// Creates the delegated address of an Ethereum address.
    pub fn from_eth(eth: &EthAddress, network: Network) -> Self {
        let delegated = crate::DelegatedAddress::new(EAM_NAMESPACE, &eth.0)
            .expect("Ethereum addresses always fit the delegated subaddress");
        Self::new(network, Payload::Delegated(delegated))
    }
}

/// Converts an `0x` Ethereum address into the text form of its delegated
/// address on `network`.
pub fn delegated_from_eth(eth_hex: &str, network: Network) -> Result<String> {
    let eth: EthAddress = eth_hex.parse()?;
    let delegated = eth.to_delegated(network);
    debug!(%eth, %network, "mapped Ethereum address");
    Ok(delegated.to_string())
}

/// Converts the text form of a delegated address into its lowercase `0x`
/// Ethereum address.
pub fn eth_from_delegated(text: &str) -> Result<String> {
    let address = decode_text(text)?;
    let eth = EthAddress::try_from(&address)?;
    debug!(network = %address.network(), %eth, "unmapped delegated address");
    Ok(eth.to_string())
}
