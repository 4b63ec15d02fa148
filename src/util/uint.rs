// Rust Bitcoin Library
// Written in 2014 by
//   Andrew Poelstra <apoelstra@wpsoftware.net>
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! Big unsigned integer types
//!
//! A 256-bit unsigned integer used for proof-of-work targets. Only the
//! operations needed to compare a block hash against its compact target
//! are provided.
//!

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Shl, Shr};

/// Little-endian large integer type
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Uint256(pub [u64; 4]);

impl Uint256 {
    /// Create a zero-valued integer
    pub fn zero() -> Uint256 {
        Uint256([0; 4])
    }

    /// The largest representable value
    pub fn max_value() -> Uint256 {
        Uint256([u64::max_value(); 4])
    }

    /// Create an object from a given unsigned 64-bit integer
    pub fn from_u64(init: u64) -> Uint256 {
        Uint256([init, 0, 0, 0])
    }

    /// Interprets 32 little-endian bytes, as stored inside a block hash.
    pub fn from_le_bytes(bytes: [u8; 32]) -> Uint256 {
        let mut ret = [0u64; 4];
        for (i, word) in ret.iter_mut().enumerate() {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes[8 * i..8 * i + 8]);
            *word = u64::from_le_bytes(buf);
        }
        Uint256(ret)
    }

    /// Returns the low 64 bits
    pub fn low_u64(&self) -> u64 {
        self.0[0]
    }

    /// Whether the value is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|w| *w == 0)
    }

    /// Return the least number of bits needed to represent the number
    pub fn bits(&self) -> usize {
        for i in 1..4 {
            if self.0[4 - i] > 0 {
                return (0x40 * (4 - i + 1)) - self.0[4 - i].leading_zeros() as usize;
            }
        }
        0x40 - self.0[0].leading_zeros() as usize
    }

    /// Decodes the compact `nBits` representation of a target. Returns `None`
    /// for encodings that are negative or overflow 256 bits.
    pub fn from_compact(bits: u32) -> Option<Uint256> {
        let size = (bits >> 24) as usize;
        let mut word = bits & 0x007f_ffff;

        let negative = word != 0 && (bits & 0x0080_0000) != 0;
        let overflow = word != 0
            && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
        if negative || overflow {
            return None;
        }

        if size <= 3 {
            word >>= 8 * (3 - size);
            Some(Uint256::from_u64(word as u64))
        } else {
            Some(Uint256::from_u64(word as u64) << (8 * (size - 3)))
        }
    }

    /// Encodes the value in the compact `nBits` representation.
    pub fn to_compact(&self) -> u32 {
        let mut size = (self.bits() + 7) / 8;
        let mut compact = if size <= 3 {
            (self.low_u64() << (8 * (3 - size))) as u32
        } else {
            (*self >> (8 * (size - 3))).low_u64() as u32
        };
        if compact & 0x0080_0000 != 0 {
            compact >>= 8;
            size += 1;
        }
        compact | (size as u32) << 24
    }
}

impl Shl<usize> for Uint256 {
    type Output = Uint256;

    fn shl(self, shift: usize) -> Uint256 {
        let Uint256(ref original) = self;
        let mut ret = [0u64; 4];
        let word_shift = shift / 64;
        let bit_shift = shift % 64;
        for i in 0..4 {
            // Shift
            if bit_shift < 64 && i + word_shift < 4 {
                ret[i + word_shift] |= original[i] << bit_shift;
            }
            // Carry
            if bit_shift > 0 && i + word_shift + 1 < 4 {
                ret[i + word_shift + 1] |= original[i] >> (64 - bit_shift);
            }
        }
        Uint256(ret)
    }
}

impl Shr<usize> for Uint256 {
    type Output = Uint256;

    fn shr(self, shift: usize) -> Uint256 {
        let Uint256(ref original) = self;
        let mut ret = [0u64; 4];
        let word_shift = shift / 64;
        let bit_shift = shift % 64;
        for i in word_shift..4 {
            // Shift
            ret[i - word_shift] |= original[i] >> bit_shift;
            // Carry
            if bit_shift > 0 && i > word_shift {
                ret[i - word_shift - 1] |= original[i] << (64 - bit_shift);
            }
        }
        Uint256(ret)
    }
}

impl Ord for Uint256 {
    fn cmp(&self, other: &Uint256) -> Ordering {
        // Most significant word first
        for i in (0..4).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Uint256 {
    fn partial_cmp(&self, other: &Uint256) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::LowerHex for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for word in self.0.iter().rev() {
            write!(f, "{:016x}", word)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:x}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::Uint256;

    #[test]
    fn uint256_bits_test() {
        assert_eq!(Uint256::from_u64(255).bits(), 8);
        assert_eq!(Uint256::from_u64(256).bits(), 9);
        assert_eq!(Uint256::from_u64(300).bits(), 9);
        assert_eq!(Uint256::from_u64(60000).bits(), 16);
        assert_eq!(Uint256::from_u64(70000).bits(), 17);

        let mut shl = Uint256::from_u64(70000);
        shl = shl << 100;
        assert_eq!(shl.bits(), 117);
        shl = shl << 100;
        assert_eq!(shl.bits(), 217);
        shl = shl << 100;
        assert_eq!(shl.bits(), 0);

        assert_eq!(Uint256::max_value().bits(), 256);
        assert_eq!(Uint256::zero().bits(), 0);
    }

    #[test]
    fn uint256_shift_test() {
        let init = Uint256::from_u64(0xDEADBEEFDEADBEEF);
        let add = Uint256([0, 0xDEADBEEFDEADBEEF, 0, 0]);
        assert_eq!(init << 64, add);
        assert_eq!(add >> 64, init);
        assert_eq!(init << 4, Uint256([0xEADBEEFDEADBEEF0, 0xD, 0, 0]));
        assert_eq!(Uint256([0xEADBEEFDEADBEEF0, 0xD, 0, 0]) >> 4, init);
        assert_eq!(Uint256::max_value() >> 255, Uint256::from_u64(1));
    }

    #[test]
    fn uint256_cmp_test() {
        let small = Uint256([10u64, 0, 0, 0]);
        let big = Uint256([0x8C8C3EE70C644118u64, 0x0209E7378231E632, 0, 0]);
        let bigger = Uint256([0x9C8C3EE70C644118u64, 0x0209E7378231E632, 0, 0]);
        let biggest = Uint256([0x5C8C3EE70C644118u64, 0x0209E7378231E632, 0, 1]);

        assert!(small < big);
        assert!(big < bigger);
        assert!(bigger < biggest);
        assert!(bigger <= biggest);
        assert!(biggest <= biggest);
        assert!(bigger >= big);
        assert!(bigger >= small);
        assert!(small <= small);
    }

    #[test]
    fn compact_test() {
        let target = Uint256::from_compact(0x1d00ffff).unwrap();
        assert_eq!(target, Uint256([0, 0, 0, 0xffff_0000]));
        assert_eq!(target.to_compact(), 0x1d00ffff);

        let regtest = Uint256::from_compact(0x207fffff).unwrap();
        assert_eq!(regtest, Uint256([0, 0, 0, 0x7fff_ff00_0000_0000]));

        // The loosest limit encodes as the regtest difficulty.
        assert_eq!((Uint256::max_value() >> 1).to_compact(), 0x207fffff);
        assert_eq!(Uint256::from_compact(0x1e0ffff0).unwrap().to_compact(), 0x1e0ffff0);

        assert_eq!(Uint256::from_compact(0x01003456), Some(Uint256::zero()));
        assert_eq!(Uint256::from_compact(0x02123456), Some(Uint256::from_u64(0x1234)));
        assert_eq!(Uint256::from_compact(0x04923456), None);
        assert_eq!(Uint256::from_compact(0xff123456), None);
    }

    #[test]
    fn le_bytes_test() {
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        bytes[31] = 0x80;
        let value = Uint256::from_le_bytes(bytes);
        assert_eq!(value.0, [1, 0, 0, 0x8000_0000_0000_0000]);
        assert_eq!(value.bits(), 256);
        assert!(!value.is_zero());
    }
}
