// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! JH-512
//!
//! A straightforward rendition of the bijective function E8 over 4-bit
//! elements. The round constants are derived from the first constant by
//! running the 6-dimensional round function with an all-zero constant.
//!

use super::DIGEST_LEN;

const BLOCK_LEN: usize = 64;
const STATE_LEN: usize = 128;
const ROUNDS: usize = 42;

const S0: [u8; 16] = [9, 0, 4, 11, 13, 12, 3, 15, 1, 10, 2, 6, 7, 5, 8, 14];
const S1: [u8; 16] = [3, 12, 6, 13, 5, 7, 1, 9, 15, 2, 0, 4, 11, 10, 14, 8];

const C0: [u8; 32] = [
    0x6a, 0x09, 0xe6, 0x67, 0xf3, 0xbc, 0xc9, 0x08, 0xb2, 0xfb, 0x13, 0x66, 0xea, 0x95, 0x7d, 0x3e,
    0x3a, 0xde, 0xc1, 0x75, 0x12, 0x77, 0x50, 0x99, 0xda, 0x2f, 0x59, 0x0b, 0x06, 0x67, 0x32, 0x2a,
];

#[inline]
fn mul2(a: u8) -> u8 {
    let a = a << 1;
    if a & 0x10 != 0 { a ^ 0x13 } else { a }
}

/// One round over `state.len()` nibbles. `constant` holds one bit per nibble
/// choosing the S-box.
fn round(state: &[u8], constant: &[u8]) -> Vec<u8> {
    let n = state.len();
    let v: Vec<u8> = state
        .iter()
        .zip(constant)
        .map(|(&a, &c)| if c != 0 { S1[a as usize] } else { S0[a as usize] })
        .collect();

    // Linear transformation L
    let mut w = vec![0u8; n];
    for i in 0..n / 2 {
        let (a, b) = (v[2 * i], v[2 * i + 1]);
        let d = b ^ mul2(a);
        let c = a ^ mul2(d);
        w[2 * i] = c;
        w[2 * i + 1] = d;
    }

    // Permutation P = phi . P' . pi
    for i in 0..n / 4 {
        w.swap(4 * i + 2, 4 * i + 3);
    }
    let mut q = vec![0u8; n];
    for i in 0..n / 2 {
        q[i] = w[2 * i];
        q[i + n / 2] = w[2 * i + 1];
    }
    for i in (n / 2..n).step_by(2) {
        q.swap(i, i + 1);
    }
    q
}

fn bits_of(bytes: &[u8]) -> Vec<u8> {
    (0..bytes.len() * 8).map(|i| (bytes[i / 8] >> (7 - i % 8)) & 1).collect()
}

fn round_constants() -> Vec<Vec<u8>> {
    let mut constants = Vec::with_capacity(ROUNDS);
    let mut bits = bits_of(&C0);
    let zero = [0u8; 64];
    for _ in 0..ROUNDS {
        let nibbles: Vec<u8> = bits.chunks(4).map(|b| b[0] << 3 | b[1] << 2 | b[2] << 1 | b[3]).collect();
        let next = round(&nibbles, &zero);
        constants.push(bits);
        bits = next.iter().flat_map(|e| (0..4).rev().map(move |s| (e >> s) & 1)).collect();
    }
    constants
}

fn e8(state: &[u8; STATE_LEN], constants: &[Vec<u8>]) -> [u8; STATE_LEN] {
    let h = bits_of(state);
    let mut q = vec![0u8; 256];
    for i in 0..128 {
        q[2 * i] = h[i] << 3 | h[i + 256] << 2 | h[i + 512] << 1 | h[i + 768];
        q[2 * i + 1] = h[i + 128] << 3 | h[i + 384] << 2 | h[i + 640] << 1 | h[i + 896];
    }

    for constant in constants {
        q = round(&q, constant);
    }

    let mut bits = [0u8; STATE_LEN * 8];
    for i in 0..128 {
        let e = q[2 * i];
        bits[i] = e >> 3 & 1;
        bits[i + 256] = e >> 2 & 1;
        bits[i + 512] = e >> 1 & 1;
        bits[i + 768] = e & 1;
        let e = q[2 * i + 1];
        bits[i + 128] = e >> 3 & 1;
        bits[i + 384] = e >> 2 & 1;
        bits[i + 640] = e >> 1 & 1;
        bits[i + 896] = e & 1;
    }

    let mut out = [0u8; STATE_LEN];
    for (i, bit) in bits.iter().enumerate() {
        out[i / 8] |= bit << (7 - i % 8);
    }
    out
}

/// The compression function F8.
fn f8(h: &mut [u8; STATE_LEN], block: &[u8], constants: &[Vec<u8>]) {
    for (s, m) in h.iter_mut().zip(block) {
        *s ^= m;
    }
    *h = e8(h, constants);
    for (s, m) in h[BLOCK_LEN..].iter_mut().zip(block) {
        *s ^= m;
    }
}

/// Computes the JH-512 digest of `data`.
pub fn jh512(data: &[u8]) -> [u8; DIGEST_LEN] {
    let constants = round_constants();

    let mut h = [0u8; STATE_LEN];
    h[0] = 0x02;
    f8(&mut h, &[0u8; BLOCK_LEN], &constants);

    // At least one full block of padding when the message is block aligned,
    // otherwise the padding runs into the following block.
    let rem = data.len() % BLOCK_LEN;
    let padded_len = if rem == 0 {
        data.len() + BLOCK_LEN
    } else {
        data.len() - rem + 2 * BLOCK_LEN
    };
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    padded[data.len()] = 0x80;
    let bit_len = data.len() as u128 * 8;
    padded[padded_len - 16..].copy_from_slice(&bit_len.to_be_bytes());

    for block in padded.chunks(BLOCK_LEN) {
        f8(&mut h, block, &constants);
    }

    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&h[BLOCK_LEN..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::quark::tests::hex64;

    #[test]
    fn constants_start_from_c0() {
        let constants = round_constants();
        assert_eq!(constants.len(), ROUNDS);
        assert_eq!(constants[0], bits_of(&C0));
        assert_eq!(constants[0].len(), 256);
    }

    #[test]
    fn empty_message() {
        assert_eq!(
            jh512(b"")[..],
            hex64("90ecf2f76f9d2c8017d979ad5ab96b87d58fc8fc4b83060f3f900774faa2c8fabe69c5f4ff1ec2b61d6b316941cedee117fb04b1f4c5bc1b919ae841c50eec4f")[..]
        );
    }

    #[test]
    fn digest_sized_message() {
        let mut data = [0u8; 64];
        for (i, b) in data.iter_mut().enumerate() {
            *b = i as u8;
        }
        assert_eq!(
            jh512(&data)[..],
            hex64("483560d10cadec86db6f390f6267e12f99594587d44c202902e8e4bb6c70c6c7fdff6b19965650e15e240bcfcefe4e5051567ef96c758b800efdcaf50a5d5bbd")[..]
        );
    }
}
