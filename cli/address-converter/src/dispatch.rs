use primitives_address::{
    delegated_from_eth, eth_from_delegated, validate, Error as AddressError, Network,
};
use tracing::debug;

use crate::error::Error;

type Predicate = fn(&str) -> bool;
type Handler = fn(&str, Network) -> Result<String, Error>;

/// Input formats, checked in order. The first matching predicate picks the
/// handler.
const ROUTES: &[(&str, Predicate, Handler)] = &[
    ("ethereum", is_eth, eth_to_delegated),
    ("delegated", is_delegated, delegated_to_eth),
    ("filecoin", is_filecoin, not_delegated),
];

/// Converts an Ethereum address into a delegated address on `network`, or a
/// delegated address into an Ethereum address.
pub(crate) fn convert(input: &str, network: Network) -> Result<String, Error> {
    let address = input.trim();
    if address.is_empty() {
        return Err(Error::EmptyAddress(AddressError::InvalidFormat(
            "address is empty".to_string(),
        )));
    }

    for (format, matches, handle) in ROUTES {
        if matches(address) {
            debug!(%address, format, "detected address format");
            return handle(address, network);
        }
    }

    Err(Error::UnknownFormat(address.to_string()))
}

fn is_eth(address: &str) -> bool {
    address.starts_with("0x") || address.starts_with("0X")
}

fn is_delegated(address: &str) -> bool {
    address.get(..5).is_some_and(|prefix| {
        prefix.eq_ignore_ascii_case("f410f") || prefix.eq_ignore_ascii_case("t410f")
    })
}

fn is_filecoin(address: &str) -> bool {
    address.starts_with(['f', 't', 'F', 'T'])
}

fn eth_to_delegated(address: &str, network: Network) -> Result<String, Error> {
    delegated_from_eth(address, network).map_err(Error::InvalidEthAddress)
}

/// The network of the output follows the input, `network` is not used.
fn delegated_to_eth(address: &str, _network: Network) -> Result<String, Error> {
    eth_from_delegated(address).map_err(Error::InvalidDelegatedAddress)
}

fn not_delegated(address: &str, _network: Network) -> Result<String, Error> {
    if validate(address) {
        Err(Error::NotDelegated)
    } else {
        Err(Error::InvalidAddress(address.to_string()))
    }
}
