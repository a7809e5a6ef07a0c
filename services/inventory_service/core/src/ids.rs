//! Surrogate id generation (C1, first half).
//!
//! Ids are K-sortable: they embed a timestamp prefix so lexicographic
//! order matches creation order, without ever consulting storage. This is
//! the same shape KSUID gives the original Go service
//! (`github.com/segmentio/ksuid`, see `domain/lot.go`'s
//! `ksuid.New().String()`): a timestamp component followed by random
//! bytes, base62-encoded to a fixed width. Reimplemented directly here
//! rather than pulled in as an unverified third-party binding.

use rand::RngCore;

const BASE62_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const TIMESTAMP_BYTES: usize = 4;
const PAYLOAD_BYTES: usize = 16;
const ENCODED_LEN: usize = 27;
/// Rebased epoch so the useful range comfortably covers this century,
/// mirroring segmentio/ksuid's own non-Unix epoch.
const ID_EPOCH: i64 = 1_400_000_000;

/// Generate a new 27-character, base62, K-sortable surrogate id.
///
/// Entities store ids as plain strings (matching the original service's
/// string-typed primary keys); this is the only place the encoding lives.
pub fn new_surrogate_id() -> String {
    let now = chrono::Utc::now().timestamp();
    let ts = (now - ID_EPOCH).max(0) as u32;

    let mut buf = [0u8; TIMESTAMP_BYTES + PAYLOAD_BYTES];
    buf[..TIMESTAMP_BYTES].copy_from_slice(&ts.to_be_bytes());
    rand::thread_rng().fill_bytes(&mut buf[TIMESTAMP_BYTES..]);

    base62_encode(&buf)
}

fn base62_encode(bytes: &[u8]) -> String {
    let mut digits = bytes.to_vec();
    let mut out = Vec::with_capacity(ENCODED_LEN);

    while digits.iter().any(|&b| b != 0) {
        let mut remainder: u32 = 0;
        for byte in digits.iter_mut() {
            let acc = (remainder << 8) | *byte as u32;
            *byte = (acc / 62) as u8;
            remainder = acc % 62;
        }
        out.push(BASE62_ALPHABET[remainder as usize]);
    }
    while out.len() < ENCODED_LEN {
        out.push(BASE62_ALPHABET[0]);
    }
    out.reverse();
    String::from_utf8(out).expect("base62 alphabet is ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_twenty_seven_chars() {
        assert_eq!(new_surrogate_id().len(), ENCODED_LEN);
    }

    #[test]
    fn is_unique_across_calls() {
        let a = new_surrogate_id();
        let b = new_surrogate_id();
        assert_ne!(a, b);
    }

    #[test]
    fn only_uses_base62_alphabet() {
        let id = new_surrogate_id();
        assert!(id.bytes().all(|b| BASE62_ALPHABET.contains(&b)));
    }
}
