// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Blue Midnight Wish, 512-bit variant
//!

use super::{read_u64_le, DIGEST_LEN};

const BLOCK_LEN: usize = 128;

#[inline] fn s0(x: u64) -> u64 { (x >> 1) ^ (x << 3) ^ x.rotate_left(4) ^ x.rotate_left(37) }
#[inline] fn s1(x: u64) -> u64 { (x >> 1) ^ (x << 2) ^ x.rotate_left(13) ^ x.rotate_left(43) }
#[inline] fn s2(x: u64) -> u64 { (x >> 2) ^ (x << 1) ^ x.rotate_left(19) ^ x.rotate_left(53) }
#[inline] fn s3(x: u64) -> u64 { (x >> 2) ^ (x << 2) ^ x.rotate_left(28) ^ x.rotate_left(59) }
#[inline] fn s4(x: u64) -> u64 { (x >> 1) ^ x }
#[inline] fn s5(x: u64) -> u64 { (x >> 2) ^ x }

const ROTATIONS: [u32; 8] = [0, 5, 11, 27, 32, 37, 43, 53];

fn initial_state() -> [u64; 16] {
    let mut h = [0u64; 16];
    for (i, word) in h.iter_mut().enumerate() {
        *word = 0x8081828384858687u64.wrapping_add(i as u64 * 0x0808080808080808);
    }
    h
}

fn final_state() -> [u64; 16] {
    let mut h = [0u64; 16];
    for (i, word) in h.iter_mut().enumerate() {
        *word = 0xaaaaaaaaaaaaaaa0 + i as u64;
    }
    h
}

fn compress(h: &[u64; 16], m: &[u64; 16]) -> [u64; 16] {
    let mut x = [0u64; 16];
    for i in 0..16 {
        x[i] = m[i] ^ h[i];
    }

    let w = [
        x[5].wrapping_sub(x[7]).wrapping_add(x[10]).wrapping_add(x[13]).wrapping_add(x[14]),
        x[6].wrapping_sub(x[8]).wrapping_add(x[11]).wrapping_add(x[14]).wrapping_sub(x[15]),
        x[0].wrapping_add(x[7]).wrapping_add(x[9]).wrapping_sub(x[12]).wrapping_add(x[15]),
        x[0].wrapping_sub(x[1]).wrapping_add(x[8]).wrapping_sub(x[10]).wrapping_add(x[13]),
        x[1].wrapping_add(x[2]).wrapping_add(x[9]).wrapping_sub(x[11]).wrapping_sub(x[14]),
        x[3].wrapping_sub(x[2]).wrapping_add(x[10]).wrapping_sub(x[12]).wrapping_add(x[15]),
        x[4].wrapping_sub(x[0]).wrapping_sub(x[3]).wrapping_sub(x[11]).wrapping_add(x[13]),
        x[1].wrapping_sub(x[4]).wrapping_sub(x[5]).wrapping_sub(x[12]).wrapping_sub(x[14]),
        x[2].wrapping_sub(x[5]).wrapping_sub(x[6]).wrapping_add(x[13]).wrapping_sub(x[15]),
        x[0].wrapping_sub(x[3]).wrapping_add(x[6]).wrapping_sub(x[7]).wrapping_add(x[14]),
        x[8].wrapping_sub(x[1]).wrapping_sub(x[4]).wrapping_sub(x[7]).wrapping_add(x[15]),
        x[8].wrapping_sub(x[0]).wrapping_sub(x[2]).wrapping_sub(x[5]).wrapping_add(x[9]),
        x[1].wrapping_add(x[3]).wrapping_sub(x[6]).wrapping_sub(x[9]).wrapping_add(x[10]),
        x[2].wrapping_add(x[4]).wrapping_add(x[7]).wrapping_add(x[10]).wrapping_add(x[11]),
        x[3].wrapping_sub(x[5]).wrapping_add(x[8]).wrapping_sub(x[11]).wrapping_sub(x[12]),
        x[12].wrapping_sub(x[4]).wrapping_sub(x[6]).wrapping_sub(x[9]).wrapping_add(x[13]),
    ];

    let mut q = [0u64; 32];
    for j in 0..16 {
        let s = match j % 5 {
            0 => s0(w[j]),
            1 => s1(w[j]),
            2 => s2(w[j]),
            3 => s3(w[j]),
            _ => s4(w[j]),
        };
        q[j] = s.wrapping_add(h[(j + 1) % 16]);
    }

    let add_element = |j: usize| -> u64 {
        let k = ((j + 16) as u64).wrapping_mul(0x0555555555555555);
        let rot = |i: usize| m[i % 16].rotate_left((i % 16) as u32 + 1);
        rot(j).wrapping_add(rot(j + 3)).wrapping_sub(rot(j + 10)).wrapping_add(k) ^ h[(j + 7) % 16]
    };

    for j in 16..32 {
        let mut acc = 0u64;
        if j < 18 {
            for i in 0..16 {
                let v = q[j - 16 + i];
                acc = acc.wrapping_add(match i % 4 {
                    0 => s1(v),
                    1 => s2(v),
                    2 => s3(v),
                    _ => s0(v),
                });
            }
        } else {
            for i in 0..14 {
                let v = q[j - 16 + i];
                acc = acc.wrapping_add(if i % 2 == 0 { v } else { v.rotate_left(ROTATIONS[(i + 1) / 2]) });
            }
            acc = acc.wrapping_add(s4(q[j - 2])).wrapping_add(s5(q[j - 1]));
        }
        q[j] = acc.wrapping_add(add_element(j - 16));
    }

    let xl = q[16..24].iter().fold(0u64, |a, v| a ^ v);
    let xh = q[24..32].iter().fold(xl, |a, v| a ^ v);

    let mut out = [0u64; 16];
    out[0] = ((xh << 5) ^ (q[16] >> 5) ^ m[0]).wrapping_add(xl ^ q[24] ^ q[0]);
    out[1] = ((xh >> 7) ^ (q[17] << 8) ^ m[1]).wrapping_add(xl ^ q[25] ^ q[1]);
    out[2] = ((xh >> 5) ^ (q[18] << 5) ^ m[2]).wrapping_add(xl ^ q[26] ^ q[2]);
    out[3] = ((xh >> 1) ^ (q[19] << 5) ^ m[3]).wrapping_add(xl ^ q[27] ^ q[3]);
    out[4] = ((xh >> 3) ^ q[20] ^ m[4]).wrapping_add(xl ^ q[28] ^ q[4]);
    out[5] = ((xh << 6) ^ (q[21] >> 6) ^ m[5]).wrapping_add(xl ^ q[29] ^ q[5]);
    out[6] = ((xh >> 4) ^ (q[22] << 6) ^ m[6]).wrapping_add(xl ^ q[30] ^ q[6]);
    out[7] = ((xh >> 11) ^ (q[23] << 2) ^ m[7]).wrapping_add(xl ^ q[31] ^ q[7]);
    out[8] = out[4].rotate_left(9).wrapping_add(xh ^ q[24] ^ m[8]).wrapping_add((xl << 8) ^ q[23] ^ q[8]);
    out[9] = out[5].rotate_left(10).wrapping_add(xh ^ q[25] ^ m[9]).wrapping_add((xl >> 6) ^ q[16] ^ q[9]);
    out[10] = out[6].rotate_left(11).wrapping_add(xh ^ q[26] ^ m[10]).wrapping_add((xl << 6) ^ q[17] ^ q[10]);
    out[11] = out[7].rotate_left(12).wrapping_add(xh ^ q[27] ^ m[11]).wrapping_add((xl << 4) ^ q[18] ^ q[11]);
    out[12] = out[0].rotate_left(13).wrapping_add(xh ^ q[28] ^ m[12]).wrapping_add((xl >> 3) ^ q[19] ^ q[12]);
    out[13] = out[1].rotate_left(14).wrapping_add(xh ^ q[29] ^ m[13]).wrapping_add((xl >> 4) ^ q[20] ^ q[13]);
    out[14] = out[2].rotate_left(15).wrapping_add(xh ^ q[30] ^ m[14]).wrapping_add((xl >> 7) ^ q[21] ^ q[14]);
    out[15] = out[3].rotate_left(16).wrapping_add(xh ^ q[31] ^ m[15]).wrapping_add((xl >> 2) ^ q[22] ^ q[15]);
    out
}

/// Computes the BMW-512 digest of `data`.
pub fn bmw512(data: &[u8]) -> [u8; DIGEST_LEN] {
    let bit_len = (data.len() as u64).wrapping_mul(8);
    let mut padded = data.to_vec();
    padded.push(0x80);
    while padded.len() % BLOCK_LEN != BLOCK_LEN - 8 {
        padded.push(0);
    }
    padded.extend_from_slice(&bit_len.to_le_bytes());

    let mut h = initial_state();
    let mut m = [0u64; 16];
    for block in padded.chunks(BLOCK_LEN) {
        for (i, word) in m.iter_mut().enumerate() {
            *word = read_u64_le(&block[8 * i..]);
        }
        h = compress(&h, &m);
    }
    h = compress(&final_state(), &h);

    let mut out = [0u8; DIGEST_LEN];
    for (chunk, word) in out.chunks_mut(8).zip(h[8..].iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}
