// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Grøstl-512
//!
//! The state is a matrix of 8 rows and 16 columns, filled column by column
//! from the byte string.
//!

use super::DIGEST_LEN;

const BLOCK_LEN: usize = 128;
const ROWS: usize = 8;
const COLS: usize = 16;
const ROUNDS: u8 = 14;

type State = [[u8; COLS]; ROWS];

const SBOX: [u8; 256] = [
    0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab, 0x76,
    0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4, 0x72, 0xc0,
    0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71, 0xd8, 0x31, 0x15,
    0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2, 0xeb, 0x27, 0xb2, 0x75,
    0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6, 0xb3, 0x29, 0xe3, 0x2f, 0x84,
    0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb, 0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf,
    0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45, 0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8,
    0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5, 0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2,
    0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44, 0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73,
    0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a, 0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb,
    0xe0, 0x32, 0x3a, 0x0a, 0x49, 0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79,
    0xe7, 0xc8, 0x37, 0x6d, 0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08,
    0xba, 0x78, 0x25, 0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a,
    0x70, 0x3e, 0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e,
    0xe1, 0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
    0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb, 0x16,
];

const SHIFTS_P: [usize; ROWS] = [0, 1, 2, 3, 4, 5, 6, 11];
const SHIFTS_Q: [usize; ROWS] = [1, 3, 5, 11, 0, 2, 4, 6];
const CIRCULANT: [u8; ROWS] = [2, 2, 3, 4, 5, 3, 5, 7];

#[derive(Copy, Clone, PartialEq, Eq)]
enum Permutation {
    P,
    Q,
}

/// Multiplication in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1.
fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut r = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            r ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= 0x1b;
        }
        b >>= 1;
    }
    r
}

fn to_state(bytes: &[u8; BLOCK_LEN]) -> State {
    let mut s = [[0u8; COLS]; ROWS];
    for (k, b) in bytes.iter().enumerate() {
        s[k % ROWS][k / ROWS] = *b;
    }
    s
}

fn from_state(s: &State) -> [u8; BLOCK_LEN] {
    let mut bytes = [0u8; BLOCK_LEN];
    for (k, b) in bytes.iter_mut().enumerate() {
        *b = s[k % ROWS][k / ROWS];
    }
    bytes
}

fn permute(input: &[u8; BLOCK_LEN], which: Permutation) -> [u8; BLOCK_LEN] {
    let mut a = to_state(input);
    let shifts = match which {
        Permutation::P => &SHIFTS_P,
        Permutation::Q => &SHIFTS_Q,
    };

    for round in 0..ROUNDS {
        // AddRoundConstant
        match which {
            Permutation::P => {
                for c in 0..COLS {
                    a[0][c] ^= ((c as u8) << 4) ^ round;
                }
            }
            Permutation::Q => {
                for row in a.iter_mut().take(ROWS - 1) {
                    for b in row.iter_mut() {
                        *b ^= 0xff;
                    }
                }
                for c in 0..COLS {
                    a[ROWS - 1][c] ^= ((c as u8) << 4) ^ 0xff ^ round;
                }
            }
        }

        // SubBytes and ShiftBytes
        let mut shifted = [[0u8; COLS]; ROWS];
        for r in 0..ROWS {
            for c in 0..COLS {
                shifted[r][c] = SBOX[a[r][(c + shifts[r]) % COLS] as usize];
            }
        }

        // MixBytes
        for c in 0..COLS {
            for i in 0..ROWS {
                let mut acc = 0u8;
                for j in 0..ROWS {
                    acc ^= gmul(shifted[j][c], CIRCULANT[(j + ROWS - i) % ROWS]);
                }
                a[i][c] = acc;
            }
        }
    }
    from_state(&a)
}

/// Computes the Grøstl-512 digest of `data`.
pub fn groestl512(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut padded = data.to_vec();
    padded.push(0x80);
    while padded.len() % BLOCK_LEN != BLOCK_LEN - 8 {
        padded.push(0);
    }
    let blocks = ((padded.len() + 8) / BLOCK_LEN) as u64;
    padded.extend_from_slice(&blocks.to_be_bytes());

    let mut h = [0u8; BLOCK_LEN];
    h[BLOCK_LEN - 2] = 0x02;

    let mut m = [0u8; BLOCK_LEN];
    let mut x = [0u8; BLOCK_LEN];
    for block in padded.chunks(BLOCK_LEN) {
        m.copy_from_slice(block);
        for k in 0..BLOCK_LEN {
            x[k] = h[k] ^ m[k];
        }
        let p = permute(&x, Permutation::P);
        let q = permute(&m, Permutation::Q);
        for k in 0..BLOCK_LEN {
            h[k] ^= p[k] ^ q[k];
        }
    }

    let p = permute(&h, Permutation::P);
    let mut out = [0u8; DIGEST_LEN];
    for (k, b) in out.iter_mut().enumerate() {
        *b = h[DIGEST_LEN + k] ^ p[DIGEST_LEN + k];
    }
    out
}
