//! Text form of the addresses.
//!
//! ```text
//! <network><protocol><body>
//!
//! f0  <decimal id>
//! f1  base32(20-byte key hash ‖ checksum)
//! f2  base32(20-byte actor hash ‖ checksum)
//! f3  base32(48-byte BLS key ‖ checksum)
//! f4  <decimal namespace> f base32(subaddress ‖ checksum)
//! ```
//!
//! The checksum always covers the binary form, see [`Address::to_bytes`].

use tracing::trace;

use crate::{
    base32,
    checksum::{checksum, CHECKSUM_HASH_LEN},
    Address, DelegatedAddress, Error, Network, Payload, Protocol, Result, MAX_SUBADDRESS_LEN,
};

/// Number of decimal digits in [`u64::MAX`].
const MAX_U64_DIGITS: usize = 20;

/// Separates the namespace from the subaddress in delegated addresses.
const DELEGATED_SEPARATOR: char = 'f';

/// Longest possible address text, a delegated address with the largest
/// namespace and subaddress.
pub const MAX_ADDRESS_LEN: usize =
    2 + MAX_U64_DIGITS + 1 + ((MAX_SUBADDRESS_LEN + CHECKSUM_HASH_LEN) * 8).div_ceil(5);

/// Encodes an address into its canonical, lowercase text form.
pub fn encode_text(address: &Address) -> String {
    let mut text = String::with_capacity(MAX_ADDRESS_LEN);
    text.push(address.network().prefix());
    text.push(address.protocol().digit());

    match address.payload() {
        Payload::ID(id) => text.push_str(&id.to_string()),
        Payload::Secp256k1(_) | Payload::Actor(_) | Payload::BLS(_) => {
            text.push_str(&checked_body(address, &address.payload().to_raw_bytes()));
        }
        Payload::Delegated(delegated) => {
            text.push_str(&delegated.namespace().to_string());
            text.push(DELEGATED_SEPARATOR);
            text.push_str(&checked_body(address, delegated.subaddress()));
        }
    }

    text
}

/// base32(`data` ‖ checksum of the address bytes).
fn checked_body(address: &Address, data: &[u8]) -> String {
    let mut body = data.to_vec();
    body.extend_from_slice(&checksum(&address.to_bytes()));
    base32::encode(&body)
}

/// Decodes an address from its text form.
///
/// The network prefix and the base32 body are case-insensitive.
pub fn decode_text(text: &str) -> Result<Address> {
    if text.is_empty() {
        return Err(Error::InvalidFormat("address is empty".to_string()));
    }
    if !text.is_ascii() {
        return Err(Error::InvalidFormat(
            "address contains non-ASCII characters".to_string(),
        ));
    }
    if text.len() > MAX_ADDRESS_LEN {
        return Err(Error::InvalidFormat(format!(
            "address is {} characters long, the maximum is {MAX_ADDRESS_LEN}",
            text.len()
        )));
    }

    // Past the ASCII check every char is a single byte, slicing is safe.
    let mut chars = text.chars();
    let network = chars
        .next()
        .and_then(Network::from_prefix)
        .ok_or_else(|| Error::InvalidFormat(format!("unknown network prefix in {text:?}")))?;
    let protocol = chars
        .next()
        .ok_or_else(|| Error::InvalidFormat("address is missing the protocol".to_string()))
        .and_then(Protocol::from_digit)?;
    let body = &text[2..];
    trace!(%network, %protocol, "decoding address body");

    let (payload, found) = match protocol {
        Protocol::ID => (Payload::ID(parse_decimal(body)?), None),
        Protocol::Secp256k1 | Protocol::Actor | Protocol::BLS => {
            let (data, found) = split_checksum(protocol, body)?;
            (Payload::from_raw_bytes(protocol, &data)?, Some(found))
        }
        Protocol::Delegated => {
            let (namespace, body) = split_delegated(body)?;
            let namespace = parse_decimal(namespace)?;
            let (subaddress, found) = split_checksum(protocol, body)?;
            let delegated = DelegatedAddress::new(namespace, &subaddress)?;
            (Payload::Delegated(delegated), Some(found))
        }
    };

    let address = Address::new(network, payload);
    if let Some(found) = found {
        let expected = checksum(&address.to_bytes());
        if expected != found {
            return Err(Error::ChecksumMismatch { expected, found });
        }
    }

    Ok(address)
}

/// Returns whether `text` decodes into an address of any protocol.
pub fn validate(text: &str) -> bool {
    decode_text(text).is_ok()
}

/// Decodes a base32 body into the payload data and the trailing checksum.
fn split_checksum(protocol: Protocol, body: &str) -> Result<(Vec<u8>, [u8; CHECKSUM_HASH_LEN])> {
    let mut data = base32::decode(body)?;
    if data.len() < CHECKSUM_HASH_LEN {
        return Err(Error::InvalidLength {
            protocol,
            length: 0,
        });
    }

    let mut found = [0; CHECKSUM_HASH_LEN];
    found.copy_from_slice(&data[data.len() - CHECKSUM_HASH_LEN..]);
    data.truncate(data.len() - CHECKSUM_HASH_LEN);
    Ok((data, found))
}

/// Splits `<namespace>f<base32>` at the separator.
fn split_delegated(body: &str) -> Result<(&str, &str)> {
    let separator = body
        .find(|c: char| !c.is_ascii_digit())
        .filter(|&at| body[at..].starts_with(['f', 'F']))
        .ok_or_else(|| {
            Error::InvalidFormat(format!(
                "delegated address must be <namespace>{DELEGATED_SEPARATOR}<subaddress>"
            ))
        })?;

    Ok((&body[..separator], &body[separator + 1..]))
}

/// Parses a canonical decimal `u64`, digits only and without leading zeros.
fn parse_decimal(digits: &str) -> Result<u64> {
    if digits.is_empty() || digits.len() > MAX_U64_DIGITS {
        return Err(Error::InvalidFormat(format!(
            "expected 1 to {MAX_U64_DIGITS} decimal digits, found {digits:?}"
        )));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidFormat(format!(
            "{digits:?} is not a decimal number"
        )));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(Error::InvalidFormat(format!("{digits:?} has leading zeros")));
    }

    digits
        .parse()
        .map_err(|_| Error::InvalidFormat(format!("{digits:?} does not fit in 64 bits")))
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rstest::rstest;

    use super::{decode_text, encode_text, validate, MAX_ADDRESS_LEN};
    use crate::{base32, Address, Error, Network, Payload, Protocol};

    const ETH_DELEGATED: &str = "f410fguptud5pzd7zpvjvt54tuds5kidntoyn3oivr6y";
    const SECP256K1: &str = "f1aebagbafaydqqcikbmga2dqpcaireeyuokqsccy";
    const ACTOR: &str = "f2aebagbafaydqqcikbmga2dqpcaireeyu6f3drwq";
    const BLS: &str = "f3aaaqeayeaudaocajbifqydiob4ibceqtcqkrmfyydenbwha5dypsaijcemsckjrhfausukzmfuxc7xayzmkq";

    fn sequential<const N: usize>(start: u8) -> [u8; N] {
        core::array::from_fn(|i| start + i as u8)
    }

    #[rstest]
    #[case(SECP256K1, Address::new_secp256k1(Network::Mainnet, &sequential::<20>(1)).unwrap())]
    #[case(ACTOR, Address::new_actor(Network::Mainnet, &sequential::<20>(1)).unwrap())]
    #[case(BLS, Address::new_bls(Network::Mainnet, &sequential::<48>(0)).unwrap())]
    #[case("f01024", Address::new_id(Network::Mainnet, 1024))]
    #[case("t00", Address::new_id(Network::Testnet, 0))]
    #[case("f018446744073709551615", Address::new_id(Network::Mainnet, u64::MAX))]
    #[case(
        ETH_DELEGATED,
        Address::new_delegated(
            Network::Mainnet,
            10,
            &hex!("351F3A0FAfc8fF97d5359f793A0e5d5206D9BB0D")
        ).unwrap()
    )]
    #[case(
        "t410faaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaonc6iji",
        Address::new_delegated(Network::Testnet, 10, &[0; 20]).unwrap()
    )]
    #[case("f432faebagooc3nqa", Address::new_delegated(Network::Mainnet, 32, &[1, 2, 3]).unwrap())]
    fn known_addresses(#[case] text: &str, #[case] address: Address) {
        assert_eq!(decode_text(text).unwrap(), address);
        assert_eq!(encode_text(&address), text);
        assert_eq!(address.to_string(), text);
    }

    #[test]
    fn decode_ignores_case() {
        let upper = ETH_DELEGATED.to_ascii_uppercase();
        let address = decode_text(&upper).unwrap();

        assert_eq!(address.protocol(), Protocol::Delegated);
        assert_eq!(encode_text(&address), ETH_DELEGATED);
    }

    #[rstest]
    #[case("")]
    #[case("f")]
    #[case("x1aebagbafaydqqcikbmga2dqpcaireeyuokqsccy")]
    #[case("0x351F3A0FAfc8fF97d5359f793A0e5d5206D9BB0D")]
    #[case("f1aebagbafaydqqcikbmga2dqpcaireeyuokqscc8")]
    #[case("f1aebagbafaydqqcikbmga2dqpcaireeyuokqsccy=")]
    #[case("f01024a")]
    #[case("f001024")]
    #[case("f0")]
    #[case("f018446744073709551616")]
    #[case("f4guptud5pzd7zpvjvt54tuds5kidntoyn3oivr6y")]
    #[case("f410xguptud5pzd7zpvjvt54tuds5kidntoyn3oivr6y")]
    #[case("f1aébagbafaydqqcikbmga2dqpcaireeyuokqsccy")]
    fn invalid_format(#[case] text: &str) {
        assert!(
            matches!(decode_text(text), Err(Error::InvalidFormat(_))),
            "{text:?} should be malformed"
        );
        assert!(!validate(text));
    }

    #[test]
    fn too_long() {
        let text = format!("f1{}", "a".repeat(MAX_ADDRESS_LEN));
        assert!(matches!(decode_text(&text), Err(Error::InvalidFormat(_))));
    }

    #[rstest]
    #[case("f5aebagbafaydqqcikbmga2dqpcaireeyuokqsccy")]
    #[case("t9aebagbafaydqqcikbmga2dqpcaireeyuokqsccy")]
    #[case("fzaebagbafaydqqcikbmga2dqpcaireeyuokqsccy")]
    fn invalid_protocol(#[case] text: &str) {
        assert!(matches!(decode_text(text), Err(Error::InvalidProtocol(_))));
    }

    #[rstest]
    // 19 byte hash.
    #[case(format!("f1{}", base32::encode(&[0; 23])), Protocol::Secp256k1, 19)]
    // Shorter than the checksum.
    #[case("f2aaaa".to_string(), Protocol::Actor, 0)]
    // A SECP256K1 sized key under the BLS protocol.
    #[case(format!("f3{}", &SECP256K1[2..]), Protocol::BLS, 20)]
    // Only a checksum, no subaddress.
    #[case(format!("f410f{}", base32::encode(&[0; 4])), Protocol::Delegated, 0)]
    #[case(format!("f410f{}", base32::encode(&[0; 59])), Protocol::Delegated, 55)]
    fn invalid_length(#[case] text: String, #[case] protocol: Protocol, #[case] length: usize) {
        assert_eq!(
            decode_text(&text),
            Err(Error::InvalidLength { protocol, length })
        );
    }

    #[test]
    fn wrong_network_prefix_changes_nothing_but_network() {
        let testnet = format!("t{}", &SECP256K1[1..]);
        let address = decode_text(&testnet).unwrap();

        assert_eq!(address.network(), Network::Testnet);
        assert_eq!(address, decode_text(SECP256K1).unwrap().with_network(Network::Testnet));
    }

    #[test]
    fn checksum_mismatch_on_protocol_swap() {
        // Same body, but the checksum covers the protocol byte.
        let swapped = format!("f2{}", &SECP256K1[2..]);
        assert!(matches!(
            decode_text(&swapped),
            Err(Error::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn checksum_mismatch_on_namespace_swap() {
        let swapped = ETH_DELEGATED.replacen("f410f", "f411f", 1);
        assert!(matches!(
            decode_text(&swapped),
            Err(Error::ChecksumMismatch { .. })
        ));
    }

    #[rstest]
    #[case(SECP256K1, 2)]
    #[case(BLS, 2)]
    #[case(ETH_DELEGATED, 5)]
    fn every_bit_flip_breaks_the_checksum(#[case] text: &str, #[case] header: usize) {
        let body = base32::decode(&text[header..]).unwrap();

        for bit in 0..body.len() * 8 {
            let mut flipped = body.clone();
            flipped[bit / 8] ^= 1 << (bit % 8);
            let tampered = format!("{}{}", &text[..header], base32::encode(&flipped));

            assert!(
                matches!(decode_text(&tampered), Err(Error::ChecksumMismatch { .. })),
                "flipping bit {bit} of {text} went unnoticed"
            );
        }
    }

    #[test]
    fn random_addresses_round_trip() {
        for _ in 0..32 {
            let network = if rand::random() {
                Network::Mainnet
            } else {
                Network::Testnet
            };
            let subaddress_len = 1 + rand::random::<usize>() % crate::MAX_SUBADDRESS_LEN;
            let subaddress: Vec<u8> = (0..subaddress_len).map(|_| rand::random()).collect();

            let addresses = [
                Address::new_id(network, rand::random()),
                Address::new_secp256k1(network, &rand::random::<[u8; 20]>()).unwrap(),
                Address::new_actor(network, &rand::random::<[u8; 20]>()).unwrap(),
                Address::new(network, Payload::BLS(core::array::from_fn(|_| rand::random()))),
                Address::new_delegated(network, rand::random(), &subaddress).unwrap(),
            ];

            for address in addresses {
                let text = encode_text(&address);
                assert!(text.len() <= MAX_ADDRESS_LEN);
                assert_eq!(text, text.to_ascii_lowercase());
                assert_eq!(decode_text(&text).unwrap(), address);
                assert_eq!(encode_text(&address), text);
            }
        }
    }

    #[test]
    fn validate_accepts_every_protocol() {
        for text in [SECP256K1, ACTOR, BLS, ETH_DELEGATED, "f01024"] {
            assert!(validate(text), "{text} should be valid");
        }
    }
}
