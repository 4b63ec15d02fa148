// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! BLAKE-512
//!

use super::{read_u64_be, DIGEST_LEN};

const BLOCK_LEN: usize = 128;

const IV: [u64; 8] = [
    0x6A09E667F3BCC908, 0xBB67AE8584CAA73B, 0x3C6EF372FE94F82B, 0xA54FF53A5F1D36F1,
    0x510E527FADE682D1, 0x9B05688C2B3E6C1F, 0x1F83D9ABFB41BD6B, 0x5BE0CD19137E2179,
];

const C: [u64; 16] = [
    0x243F6A8885A308D3, 0x13198A2E03707344, 0xA4093822299F31D0, 0x082EFA98EC4E6C89,
    0x452821E638D01377, 0xBE5466CF34E90C6C, 0xC0AC29B7C97C50DD, 0x3F84D5B5B5470917,
    0x9216D5D98979FB1B, 0xD1310BA698DFB5AC, 0x2FFD72DBD01ADFB7, 0xB8E1AFED6A267E96,
    0xBA7C9045F12C7F99, 0x24A19947B3916CF7, 0x0801F2E2858EFC16, 0x636920D871574E69,
];

const SIGMA: [[usize; 16]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

#[allow(clippy::too_many_arguments)]
#[inline]
fn g(v: &mut [u64; 16], m: &[u64; 16], s: &[usize; 16], a: usize, b: usize, c: usize, d: usize, i: usize) {
    let (x, y) = (s[2 * i], s[2 * i + 1]);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[x] ^ C[y]);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(25);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[y] ^ C[x]);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(11);
}

/// `counter` is the number of message bits hashed up to and including
/// this block, or zero for a block holding only padding.
fn compress(h: &mut [u64; 8], block: &[u8], counter: u128) {
    let mut m = [0u64; 16];
    for (i, word) in m.iter_mut().enumerate() {
        *word = read_u64_be(&block[8 * i..]);
    }

    let low = counter as u64;
    let high = (counter >> 64) as u64;
    let mut v = [0u64; 16];
    v[..8].copy_from_slice(&h[..]);
    v[8..12].copy_from_slice(&C[..4]);
    v[12] = low ^ C[4];
    v[13] = low ^ C[5];
    v[14] = high ^ C[6];
    v[15] = high ^ C[7];

    for round in 0..16 {
        let s = &SIGMA[round % 10];
        g(&mut v, &m, s, 0, 4, 8, 12, 0);
        g(&mut v, &m, s, 1, 5, 9, 13, 1);
        g(&mut v, &m, s, 2, 6, 10, 14, 2);
        g(&mut v, &m, s, 3, 7, 11, 15, 3);
        g(&mut v, &m, s, 0, 5, 10, 15, 4);
        g(&mut v, &m, s, 1, 6, 11, 12, 5);
        g(&mut v, &m, s, 2, 7, 8, 13, 6);
        g(&mut v, &m, s, 3, 4, 9, 14, 7);
    }

    for i in 0..8 {
        h[i] ^= v[i] ^ v[i + 8];
    }
}

/// Computes the BLAKE-512 digest of `data`.
pub fn blake512(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut h = IV;
    let bit_len = data.len() as u128 * 8;

    let mut counter = 0u128;
    let mut rest = data;
    while rest.len() >= BLOCK_LEN {
        counter += (BLOCK_LEN * 8) as u128;
        compress(&mut h, &rest[..BLOCK_LEN], counter);
        rest = &rest[BLOCK_LEN..];
    }

    let rem = rest.len();
    let mut block = [0u8; BLOCK_LEN];
    block[..rem].copy_from_slice(rest);
    block[rem] = 0x80;
    if rem <= 111 {
        block[111] |= 0x01;
        block[112..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&mut h, &block, if rem == 0 { 0 } else { bit_len });
    } else {
        // The length does not fit, spill into a padding-only block.
        compress(&mut h, &block, bit_len);
        let mut last = [0u8; BLOCK_LEN];
        last[111] = 0x01;
        last[112..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&mut h, &last, 0);
    }

    let mut out = [0u8; DIGEST_LEN];
    for (chunk, word) in out.chunks_mut(8).zip(h.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::blake512;
    use crate::util::quark::tests::hex64;

    #[test]
    fn empty_message() {
        assert_eq!(
            blake512(b"")[..],
            hex64("a8cfbbd73726062df0c6864dda65defe58ef0cc52a5625090fa17601e1eecd1b628e94f396ae402a00acc9eab77b4d4c2e852aaaa25a636d80af3fc7913ef5b8")[..]
        );
    }

    #[test]
    fn short_message() {
        assert_eq!(
            blake512(b"abc")[..],
            hex64("14266c7c704a3b58fb421ee69fd005fcc6eeff742136be67435df995b7c986e7cbde4dbde135e7689c354d2bc5b8d260536c554b4f84c118e61efc576fed7cd3")[..]
        );
    }

    #[test]
    fn multi_block_message() {
        assert_eq!(
            blake512(&[0u8; 200])[..],
            hex64("e7026cb2fc4e25fec5179cb40a2565597ee683094a7fabd370c13d1ca1ee70b685644e86c26662fc031ba2e7240f1e277a55f4fae70669ed5017247db3549b4a")[..]
        );
    }
}
