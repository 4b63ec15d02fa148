// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Skein-512-512
//!
//! Threefish-512 in UBI chaining mode, version 1.3 of the Skein paper.
//!

use super::{read_u64_le, DIGEST_LEN};

const BLOCK_LEN: usize = 64;
const KEY_SCHEDULE_PARITY: u64 = 0x1BD11BDAA9FC1A22;

const TYPE_MESSAGE: u64 = 48;
const TYPE_OUTPUT: u64 = 63;

/// Chaining value after processing the configuration block for a 512-bit
/// output.
const IV: [u64; 8] = [
    0x4903ADFF749C51CE, 0x0D95DE399746DF03, 0x8FD1934127C79BCE, 0x9A255629FF352CB1,
    0x5DB62599DF6CA7B0, 0xEABE394CA9D5C3F4, 0x991112C71A75B523, 0xAE18A40B660FCC33,
];

const ROTATIONS: [[u32; 4]; 8] = [
    [46, 36, 19, 37],
    [33, 27, 14, 42],
    [17, 49, 36, 39],
    [44, 9, 54, 56],
    [39, 30, 34, 24],
    [13, 50, 10, 17],
    [25, 29, 39, 43],
    [8, 35, 56, 22],
];

const PERMUTATION: [usize; 8] = [2, 1, 4, 7, 6, 5, 0, 3];

fn threefish(key: &[u64; 8], tweak: [u64; 2], plain: &[u64; 8]) -> [u64; 8] {
    let mut k = [0u64; 9];
    k[..8].copy_from_slice(key);
    k[8] = key.iter().fold(KEY_SCHEDULE_PARITY, |acc, w| acc ^ w);
    let t = [tweak[0], tweak[1], tweak[0] ^ tweak[1]];

    let subkey = |s: usize| -> [u64; 8] {
        let mut ks = [0u64; 8];
        for (i, w) in ks.iter_mut().enumerate() {
            *w = k[(s + i) % 9];
        }
        ks[5] = ks[5].wrapping_add(t[s % 3]);
        ks[6] = ks[6].wrapping_add(t[(s + 1) % 3]);
        ks[7] = ks[7].wrapping_add(s as u64);
        ks
    };

    let mut v = *plain;
    for d in 0..72 {
        if d % 4 == 0 {
            let ks = subkey(d / 4);
            for i in 0..8 {
                v[i] = v[i].wrapping_add(ks[i]);
            }
        }
        let mut f = [0u64; 8];
        for j in 0..4 {
            let y0 = v[2 * j].wrapping_add(v[2 * j + 1]);
            f[2 * j] = y0;
            f[2 * j + 1] = v[2 * j + 1].rotate_left(ROTATIONS[d % 8][j]) ^ y0;
        }
        for i in 0..8 {
            v[i] = f[PERMUTATION[i]];
        }
    }
    let ks = subkey(18);
    for i in 0..8 {
        v[i] = v[i].wrapping_add(ks[i]);
    }
    v
}

/// Unique Block Iteration over `msg` with block type `kind`.
fn ubi(mut g: [u64; 8], msg: &[u8], kind: u64) -> [u64; 8] {
    let blocks = std::cmp::max(1, (msg.len() + BLOCK_LEN - 1) / BLOCK_LEN);
    let mut m = [0u64; 8];
    for b in 0..blocks {
        let start = b * BLOCK_LEN;
        let end = std::cmp::min(msg.len(), start + BLOCK_LEN);
        let mut block = [0u8; BLOCK_LEN];
        if start < end {
            block[..end - start].copy_from_slice(&msg[start..end]);
        }
        for (i, w) in m.iter_mut().enumerate() {
            *w = read_u64_le(&block[8 * i..]);
        }

        let mut t1 = kind << 56;
        if b == 0 {
            t1 |= 1 << 62;
        }
        if b == blocks - 1 {
            t1 |= 1 << 63;
        }
        let c = threefish(&g, [end as u64, t1], &m);
        for i in 0..8 {
            g[i] = c[i] ^ m[i];
        }
    }
    g
}

/// Computes the Skein-512-512 digest of `data`.
pub fn skein512(data: &[u8]) -> [u8; DIGEST_LEN] {
    let g = ubi(IV, data, TYPE_MESSAGE);
    let g = ubi(g, &[0u8; 8], TYPE_OUTPUT);

    let mut out = [0u8; DIGEST_LEN];
    for (chunk, word) in out.chunks_mut(8).zip(g.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::quark::tests::hex64;

    const TYPE_CONFIG: u64 = 4;

    fn config_block() -> [u8; 32] {
        let mut cfg = [0u8; 32];
        cfg[..4].copy_from_slice(&0x33414853u32.to_le_bytes());
        cfg[4..6].copy_from_slice(&1u16.to_le_bytes());
        cfg[8..16].copy_from_slice(&(DIGEST_LEN as u64 * 8).to_le_bytes());
        cfg
    }

    #[test]
    fn iv_from_config_block() {
        assert_eq!(ubi([0u64; 8], &config_block(), TYPE_CONFIG), IV);
    }

    #[test]
    fn empty_message() {
        assert_eq!(
            skein512(b"")[..],
            hex64("bc5b4c50925519c290cc634277ae3d6257212395cba733bbad37a4af0fa06af41fca7903d06564fea7a2d3730dbdb80c1f85562dfcc070334ea4d1d9e72cba7a")[..]
        );
    }

    #[test]
    fn short_message() {
        assert_eq!(
            skein512(b"abc")[..],
            hex64("8f5dd9ec798152668e35129496b029a960c9a9b88662f7f9482f110b31f9f93893ecfb25c009baad9e46737197d5630379816a886aa05526d3a70df272d96e75")[..]
        );
    }

    #[test]
    fn multi_block_message() {
        assert_eq!(
            skein512(&[0u8; 200])[..],
            hex64("19625ba64a1d089b71dfb99db4eb5f72288e8ce6c0ba168cbb666a27a46a1045db920d2a7abd6c8372ddb8e2cfef7fbc065aedcc2c6c53a33b38342ebf949319")[..]
        );
    }
}
