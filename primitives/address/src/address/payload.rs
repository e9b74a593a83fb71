use integer_encoding::VarInt;

use crate::{
    address::{BLS_PUB_LEN, MAX_SUBADDRESS_LEN, PAYLOAD_HASH_LEN},
    ActorID, Error, Protocol, Result,
};

/// A "delegated" (f4) address.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DelegatedAddress {
    namespace: ActorID,
    length: usize,
    buffer: [u8; MAX_SUBADDRESS_LEN],
}

impl DelegatedAddress {
    /// Create a new delegated address from a namespace and a subaddress.
    ///
    /// The subaddress must be between 1 and [`MAX_SUBADDRESS_LEN`] bytes long.
    pub fn new(namespace: ActorID, subaddress: &[u8]) -> Result<Self> {
        let length = subaddress.len();
        if length == 0 || length > MAX_SUBADDRESS_LEN {
            return Err(Error::InvalidLength {
                protocol: Protocol::Delegated,
                length,
            });
        }

        let mut buffer = [0; MAX_SUBADDRESS_LEN];
        buffer[..length].copy_from_slice(subaddress);
        Ok(Self {
            namespace,
            length,
            buffer,
        })
    }

    /// Returns the actor ID of the namespace manager.
    pub fn namespace(&self) -> ActorID {
        self.namespace
    }

    /// Returns the subaddress bytes.
    pub fn subaddress(&self) -> &[u8] {
        &self.buffer[..self.length]
    }
}

/// Payload is the data of the Address. Variants are the supported Address protocols.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Payload {
    /// f0: ID protocol address.
    ID(u64),
    /// f1: SECP256K1 key address, 20 byte hash of PublicKey.
    Secp256k1([u8; PAYLOAD_HASH_LEN]),
    /// f2: Actor protocol address, 20 byte hash of actor data.
    Actor([u8; PAYLOAD_HASH_LEN]),
    /// f3: BLS key address, full 48 byte public key.
    BLS([u8; BLS_PUB_LEN]),
    /// f4: Delegated address, a namespace with an arbitrary subaddress.
    Delegated(DelegatedAddress),
}

impl Payload {
    /// Returns the protocol this payload belongs to.
    pub fn protocol(&self) -> Protocol {
        match self {
            Payload::ID(_) => Protocol::ID,
            Payload::Secp256k1(_) => Protocol::Secp256k1,
            Payload::Actor(_) => Protocol::Actor,
            Payload::BLS(_) => Protocol::BLS,
            Payload::Delegated(_) => Protocol::Delegated,
        }
    }

    /// Binary form of the payload, without the protocol byte.
    ///
    /// IDs and delegated namespaces are written as unsigned LEB128 varints.
    pub fn to_raw_bytes(&self) -> Vec<u8> {
        match self {
            Payload::ID(id) => id.encode_var_vec(),
            Payload::Secp256k1(hash) | Payload::Actor(hash) => hash.to_vec(),
            Payload::BLS(key) => key.to_vec(),
            Payload::Delegated(delegated) => {
                let mut bytes = delegated.namespace.encode_var_vec();
                bytes.extend_from_slice(delegated.subaddress());
                bytes
            }
        }
    }

    /// Parses the binary form of a payload for the given protocol.
    pub fn from_raw_bytes(protocol: Protocol, bytes: &[u8]) -> Result<Self> {
        let invalid_length = || Error::InvalidLength {
            protocol,
            length: bytes.len(),
        };

        let payload = match protocol {
            Protocol::ID => {
                let (id, read) = read_varint(bytes)?;
                if read != bytes.len() {
                    return Err(invalid_length());
                }
                Payload::ID(id)
            }
            Protocol::Secp256k1 => {
                Payload::Secp256k1(bytes.try_into().map_err(|_| invalid_length())?)
            }
            Protocol::Actor => Payload::Actor(bytes.try_into().map_err(|_| invalid_length())?),
            Protocol::BLS => Payload::BLS(bytes.try_into().map_err(|_| invalid_length())?),
            Protocol::Delegated => {
                let (namespace, read) = read_varint(bytes)?;
                Payload::Delegated(DelegatedAddress::new(namespace, &bytes[read..])?)
            }
        };

        Ok(payload)
    }
}

/// Reads a minimally encoded varint, returning the value and the number of
/// bytes consumed.
fn read_varint(bytes: &[u8]) -> Result<(u64, usize)> {
    let (value, read) = u64::decode_var(bytes)
        .ok_or_else(|| Error::InvalidFormat("truncated or overflowing varint".to_string()))?;
    if read != value.required_space() {
        return Err(Error::InvalidFormat(
            "varint is not minimally encoded".to_string(),
        ));
    }
    Ok((value, read))
}
