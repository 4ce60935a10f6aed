//! # Flight Key Derivation
//!
//! `key = keccak256(airline ‖ nonce)` with the airline as its 20 raw bytes and
//! the nonce left-padded to a 32-byte big-endian word. Any observer holding a
//! `FlightRegistered` event can recompute the key without a ledger lookup.

use sha3::{Digest, Keccak256};
use shared_types::{Address, FlightKey, Hash};

/// Keccak-256 of arbitrary bytes.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Deterministic composite key for an airline's `nonce`-th flight.
#[must_use]
pub fn flight_key(airline: &Address, nonce: u64) -> FlightKey {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&nonce.to_be_bytes());

    let mut hasher = Keccak256::new();
    hasher.update(airline);
    hasher.update(word);
    let result = hasher.finalize();
    let mut key = [0u8; 32];
    key.copy_from_slice(&result);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_empty() {
        assert_eq!(
            hex::encode(keccak256(&[])),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_flight_key_is_pure() {
        let airline = [7u8; 20];
        assert_eq!(flight_key(&airline, 1), flight_key(&airline, 1));
    }

    #[test]
    fn test_flight_key_matches_packed_encoding() {
        let airline = [7u8; 20];
        let mut packed = airline.to_vec();
        let mut nonce = [0u8; 32];
        nonce[31] = 1;
        packed.extend_from_slice(&nonce);

        assert_eq!(flight_key(&airline, 1), keccak256(&packed));
    }

    #[test]
    fn test_flight_key_distinct_per_nonce_and_airline() {
        let a = [1u8; 20];
        let b = [2u8; 20];
        assert_ne!(flight_key(&a, 1), flight_key(&a, 2));
        assert_ne!(flight_key(&a, 1), flight_key(&b, 1));
    }
}
