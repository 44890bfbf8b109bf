//! Base58Check text codec for key material.
//!
//! Byte strings are rendered as big-endian base-58 big integers with a
//! trailing checksum: the first four bytes of RIPEMD-160 over
//! `payload ‖ suffix`, where `suffix` is the two-letter curve tag. Binding
//! the tag into the hash means a K1 key string cannot be reinterpreted as an
//! R1 key string even when the raw payload bytes would pass a curve-agnostic
//! checksum.

use ripemd::{Digest, Ripemd160};

use crate::errors::Base58Error;

/// The 58-symbol alphabet, excluding the visually ambiguous `0OIl`.
const BASE58_CHARS: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Width of the checksum carried at the end of the encoded value.
const CHECKSUM_LEN: usize = 4;

/// Reverse map from ASCII byte to base-58 digit; `-1` for bytes outside the
/// alphabet.
const BASE58_MAP: [i8; 256] = create_base58_map();

const fn create_base58_map() -> [i8; 256] {
    let mut map = [-1i8; 256];
    let mut i = 0;
    while i < BASE58_CHARS.len() {
        map[BASE58_CHARS[i] as usize] = i as i8;
        i += 1;
    }
    map
}

/// Encodes a big-endian byte string as base-58, mapping each leading zero
/// byte to a leading `'1'`.
fn binary_to_base58(bignum: &[u8]) -> String {
    // digits accumulate least-significant first
    let mut digits: Vec<u32> = Vec::new();
    for &byte in bignum {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            let x = (*digit << 8) + carry;
            *digit = x % 58;
            carry = x / 58;
        }
        while carry > 0 {
            digits.push(carry % 58);
            carry /= 58;
        }
    }

    let mut out: Vec<u8> = bignum
        .iter()
        .take_while(|&&byte| byte == 0)
        .map(|_| b'1')
        .collect();
    out.extend(digits.iter().rev().map(|&d| BASE58_CHARS[d as usize]));

    String::from_utf8(out).expect("alphabet is ASCII")
}

/// Decodes a base-58 string into a fixed-width big-endian buffer of `size`
/// bytes.
fn base58_to_binary(size: usize, s: &str) -> Result<Vec<u8>, Base58Error> {
    // little-endian while accumulating, reversed at the end
    let mut result = vec![0u8; size];
    for ch in s.chars() {
        let digit = if ch.is_ascii() {
            BASE58_MAP[ch as usize]
        } else {
            -1
        };
        if digit < 0 {
            return Err(Base58Error::InvalidCharacter(ch));
        }

        let mut carry = digit as u32;
        for byte in result.iter_mut() {
            let x = (*byte as u32) * 58 + carry;
            *byte = (x & 0xff) as u8;
            carry = x >> 8;
        }
        if carry != 0 {
            return Err(Base58Error::OutOfRange);
        }
    }
    result.reverse();
    Ok(result)
}

/// First four bytes of RIPEMD-160 over `payload ‖ suffix`.
fn checksum(payload: &[u8], suffix: &str) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Ripemd160::new();
    hasher.update(payload);
    hasher.update(suffix.as_bytes());
    let digest = hasher.finalize();

    let mut carried = [0u8; CHECKSUM_LEN];
    carried.copy_from_slice(&digest[..CHECKSUM_LEN]);
    carried
}

/// Encodes `payload` with its checksum as `prefix` + base-58 text.
///
/// `suffix` is the two-letter curve tag ("K1" or "R1") bound into the
/// checksum; `prefix` is the human-readable key prefix (e.g. `PVT_K1_`).
pub fn key_to_string(payload: &[u8], suffix: &str, prefix: &str) -> String {
    let digest = checksum(payload, suffix);

    let mut whole = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    whole.extend_from_slice(payload);
    whole.extend_from_slice(&digest);

    format!("{prefix}{}", binary_to_base58(&whole))
}

/// Decodes the base-58 portion of a key string (prefix already stripped)
/// into exactly `payload_len` bytes, validating the carried checksum against
/// `suffix`.
pub fn string_to_key(s: &str, payload_len: usize, suffix: &str) -> Result<Vec<u8>, Base58Error> {
    let mut whole = base58_to_binary(payload_len + CHECKSUM_LEN, s)?;
    let carried: [u8; CHECKSUM_LEN] = whole[payload_len..]
        .try_into()
        .expect("tail is CHECKSUM_LEN bytes");
    whole.truncate(payload_len);

    if checksum(&whole, suffix) != carried {
        return Err(Base58Error::ChecksumMismatch);
    }

    Ok(whole)
}
