use core::{fmt, str::FromStr};

pub use payload::{DelegatedAddress, Payload};

use crate::{ActorID, Error, Result};

mod payload;

/// Hash length of payload for SECP and Actor addresses.
pub const PAYLOAD_HASH_LEN: usize = 20;

/// BLS public key length used for validation of BLS addresses.
pub const BLS_PUB_LEN: usize = 48;

/// Max length of f4 sub addresses.
pub const MAX_SUBADDRESS_LEN: usize = 54;

/// Network the address belongs to. Only shows up in the text form, the
/// binary form does not carry it.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "clap", derive(::clap::ValueEnum))]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Deserialize, ::serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum Network {
    /// `f` prefixed addresses.
    #[default]
    Mainnet,
    /// `t` prefixed addresses.
    Testnet,
}

impl Network {
    /// Returns the single character prefix of the text form.
    pub fn prefix(&self) -> char {
        match self {
            Network::Mainnet => 'f',
            Network::Testnet => 't',
        }
    }

    /// Parses a text form prefix, ignoring case.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_lowercase() {
            'f' => Some(Network::Mainnet),
            't' => Some(Network::Testnet),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "f" => Ok(Network::Mainnet),
            "testnet" | "t" => Ok(Network::Testnet),
            _ => Err(Error::InvalidFormat(format!("unknown network {s:?}"))),
        }
    }
}

/// Address protocols, the discriminant is the protocol byte.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Protocol {
    /// ID protocol addressing.
    ID = 0,
    /// SECP256K1 key addressing.
    Secp256k1 = 1,
    /// Actor protocol addressing.
    Actor = 2,
    /// BLS key addressing.
    BLS = 3,
    /// Namespaced addressing for foreign runtimes.
    Delegated = 4,
}

impl Protocol {
    /// Parses the protocol digit of the text form.
    pub fn from_digit(digit: char) -> Result<Self> {
        let value = digit
            .to_digit(10)
            .ok_or_else(|| Error::InvalidProtocol(format!("{digit:?}")))?;
        Self::try_from(value as u8)
    }

    /// Returns the protocol digit of the text form.
    pub fn digit(&self) -> char {
        (b'0' + *self as u8) as char
    }
}

impl TryFrom<u8> for Protocol {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Protocol::ID),
            1 => Ok(Protocol::Secp256k1),
            2 => Ok(Protocol::Actor),
            3 => Ok(Protocol::BLS),
            4 => Ok(Protocol::Delegated),
            _ => Err(Error::InvalidProtocol(value.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Protocol::ID => "ID",
            Protocol::Secp256k1 => "SECP256K1",
            Protocol::Actor => "Actor",
            Protocol::BLS => "BLS",
            Protocol::Delegated => "Delegated",
        };
        f.write_str(name)
    }
}

/// Address is the struct that defines the protocol and data payload conversion from either
/// a public key or value
///
/// Addresses can only be built through constructors that check the payload,
/// so every value can be encoded.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Deserialize, ::serde::Serialize),
    serde(into = "String", try_from = "String")
)]
pub struct Address {
    network: Network,
    payload: Payload,
}

impl Address {
    /// Creates an address from an already validated payload.
    pub fn new(network: Network, payload: Payload) -> Self {
        Self { network, payload }
    }

    /// Generates a new ID address.
    pub fn new_id(network: Network, id: u64) -> Self {
        Self::new(network, Payload::ID(id))
    }

    /// Generates a new SECP256K1 address from a public key hash.
    pub fn new_secp256k1(network: Network, hash: &[u8]) -> Result<Self> {
        Payload::from_raw_bytes(Protocol::Secp256k1, hash)
            .map(|payload| Self::new(network, payload))
    }

    /// Generates a new Actor address from the actor data hash.
    pub fn new_actor(network: Network, hash: &[u8]) -> Result<Self> {
        Payload::from_raw_bytes(Protocol::Actor, hash).map(|payload| Self::new(network, payload))
    }

    /// Generates a new BLS address from a BLS public key.
    pub fn new_bls(network: Network, key: &[u8]) -> Result<Self> {
        Payload::from_raw_bytes(Protocol::BLS, key).map(|payload| Self::new(network, payload))
    }

    /// Generates a new delegated address from a namespace and a subaddress.
    pub fn new_delegated(network: Network, namespace: ActorID, subaddress: &[u8]) -> Result<Self> {
        DelegatedAddress::new(namespace, subaddress)
            .map(|delegated| Self::new(network, Payload::Delegated(delegated)))
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn protocol(&self) -> Protocol {
        self.payload.protocol()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the same address on another network.
    pub fn with_network(self, network: Network) -> Self {
        Self { network, ..self }
    }

    /// Returns the actor ID of an ID address.
    pub fn id(&self) -> Result<ActorID> {
        match self.payload {
            Payload::ID(id) => Ok(id),
            _ => Err(Error::WrongProtocol {
                expected: Protocol::ID,
                found: self.protocol(),
            }),
        }
    }

    /// Binary form of the address, the protocol byte followed by the payload.
    /// There is no checksum nor network in this form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![self.protocol() as u8];
        bytes.extend(self.payload.to_raw_bytes());
        bytes
    }

    /// Parses the binary form of an address. The network is not part of the
    /// bytes and has to be supplied.
    pub fn from_bytes(bytes: &[u8], network: Network) -> Result<Self> {
        let (&protocol, raw) = bytes
            .split_first()
            .ok_or_else(|| Error::InvalidFormat("empty address bytes".to_string()))?;
        let protocol = Protocol::try_from(protocol)?;
        Payload::from_raw_bytes(protocol, raw).map(|payload| Self::new(network, payload))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::text::encode_text(self))
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::text::decode_text(s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
