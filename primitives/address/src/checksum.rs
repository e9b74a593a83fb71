use blake2b_simd::Params;

/// Length of the checksum appended to the text form of an address.
pub const CHECKSUM_HASH_LEN: usize = 4;

/// Computes the address checksum, a 4-byte BLAKE2b digest of the binary
/// address form (protocol byte followed by the payload).
pub fn checksum(ingest: &[u8]) -> [u8; CHECKSUM_HASH_LEN] {
    let hash = Params::new().hash_length(CHECKSUM_HASH_LEN).hash(ingest);

    let mut checksum = [0; CHECKSUM_HASH_LEN];
    checksum.copy_from_slice(hash.as_bytes());
    checksum
}

/// Returns whether `expected` is the checksum of `ingest`.
pub fn validate_checksum(ingest: &[u8], expected: &[u8]) -> bool {
    checksum(ingest).as_slice() == expected
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::{checksum, validate_checksum};

    #[test]
    fn delegated_eth_checksum() {
        // Protocol 4, namespace 10, then the Ethereum address.
        let mut ingest = vec![4, 10];
        ingest.extend_from_slice(&hex!("351F3A0FAfc8fF97d5359f793A0e5d5206D9BB0D"));

        assert_eq!(checksum(&ingest), hex!("db9158fb"));
        assert!(validate_checksum(&ingest, &hex!("db9158fb")));
    }

    #[test]
    fn secp256k1_checksum() {
        let mut ingest = vec![1];
        ingest.extend(1..=20u8);

        assert_eq!(checksum(&ingest), hex!("72a1210b"));
    }

    #[test]
    fn rejects_other_checksums() {
        let ingest = [1, 2, 3];
        let mut wrong = checksum(&ingest);
        wrong[0] ^= 1;

        assert!(!validate_checksum(&ingest, &wrong));
        assert!(!validate_checksum(&ingest, &[]));
    }
}
