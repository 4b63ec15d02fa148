// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Quark proof-of-work hash
//!
//! Quark chains nine rounds of six SHA-3 finalist and candidate functions
//! (BLAKE, Blue Midnight Wish, Grøstl, JH, Keccak and Skein, all in their
//! 512-bit variants). Three of the rounds pick their function from bit 3 of
//! the first byte of the previous digest. The result is truncated to 256
//! bits and used as the block hash.
//!

use sha3::{Digest, Keccak512};

pub mod blake;
pub mod bmw;
pub mod groestl;
pub mod jh;
pub mod skein;

/// Length of every intermediate digest.
pub const DIGEST_LEN: usize = 64;

/// Keccak-512 with the original (pre-FIPS 202) padding.
pub fn keccak512(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&Keccak512::digest(data));
    out
}

#[inline]
fn selector(digest: &[u8; DIGEST_LEN]) -> bool {
    digest[0] & 8 != 0
}

/// Computes the full 512-bit Quark digest of `data`.
pub fn quark512(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut h = blake::blake512(data);
    h = bmw::bmw512(&h);
    h = if selector(&h) { groestl::groestl512(&h) } else { skein::skein512(&h) };
    h = groestl::groestl512(&h);
    h = jh::jh512(&h);
    h = if selector(&h) { blake::blake512(&h) } else { bmw::bmw512(&h) };
    h = keccak512(&h);
    h = skein::skein512(&h);
    if selector(&h) { keccak512(&h) } else { jh::jh512(&h) }
}

/// Computes the Quark hash of `data`, the first 256 bits of [quark512].
pub fn quark(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&quark512(data)[..32]);
    out
}

#[inline]
pub(crate) fn read_u64_be(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_be_bytes(buf)
}

#[inline]
pub(crate) fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(buf)
}
