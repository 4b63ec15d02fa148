// Rust Bitcoin Library
// Written in 2014 by
//     Andrew Poelstra <apoelstra@wpsoftware.net>
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

//! Consensus-encodable types
//!
//! This is basically a replacement of the `Encodable` trait which does
//! normalization for endianness, etc., to ensure that the encoding
//! matches the one used by the reference node for hashing.
//!
//! Only the encoding direction is provided: every hash computed by this
//! library (transaction ids, merkle roots, block header hashes and signed
//! message hashes) is taken over these bytes.
//!

use std::io;

use hashes::hex::ToHex;

use crate::blockdata::transaction::{TxIn, TxOut, Transaction};

/// Encode an object into a vector
pub fn serialize<T: Encodable + ?Sized>(data: &T) -> Vec<u8> {
    let mut encoder = Vec::new();
    let len = data.consensus_encode(&mut encoder).expect("in-memory writers don't error");
    debug_assert_eq!(len, encoder.len());
    encoder
}

/// Encode an object into a hex-encoded string
pub fn serialize_hex<T: Encodable + ?Sized>(data: &T) -> String {
    serialize(data)[..].to_hex()
}

/// Data which can be encoded in a consensus-consistent way
pub trait Encodable {
    /// Encode an object with a well-defined format, should only ever error if
    /// the underlying `Write` errors. Returns the number of bytes written on
    /// success
    fn consensus_encode<W: io::Write>(&self, writer: W) -> Result<usize, io::Error>;
}

/// A variable-length unsigned integer
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Gets the length of this VarInt when encoded.
    /// Returns 1 for 0...0xFC, 3 for 0xFD...(2^16-1), 5 for 0x10000...(2^32-1),
    /// and 9 otherwise.
    #[inline]
    pub fn len(&self) -> usize {
        match self.0 {
            0..=0xFC => { 1 }
            0xFD..=0xFFFF => { 3 }
            0x10000..=0xFFFFFFFF => { 5 }
            _ => { 9 }
        }
    }
}

macro_rules! impl_int_encodable {
    ($ty:ident) => (
        impl Encodable for $ty {
            #[inline]
            fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, io::Error> {
                let bytes = self.to_le_bytes();
                s.write_all(&bytes)?;
                Ok(bytes.len())
            }
        }
    )
}

impl_int_encodable!(u8);
impl_int_encodable!(u16);
impl_int_encodable!(u32);
impl_int_encodable!(u64);
impl_int_encodable!(i32);
impl_int_encodable!(i64);

impl Encodable for VarInt {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, io::Error> {
        match self.0 {
            0..=0xFC => {
                (self.0 as u8).consensus_encode(s)?;
                Ok(1)
            },
            0xFD..=0xFFFF => {
                s.write_all(&[0xFD])?;
                (self.0 as u16).consensus_encode(s)?;
                Ok(3)
            },
            0x10000..=0xFFFFFFFF => {
                s.write_all(&[0xFE])?;
                (self.0 as u32).consensus_encode(s)?;
                Ok(5)
            },
            _ => {
                s.write_all(&[0xFF])?;
                (self.0 as u64).consensus_encode(s)?;
                Ok(9)
            },
        }
    }
}

impl Encodable for bool {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, s: S) -> Result<usize, io::Error> {
        (if *self { 1u8 } else { 0u8 }).consensus_encode(s)
    }
}

impl Encodable for str {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, io::Error> {
        let b = self.as_bytes();
        let vi_len = VarInt(b.len() as u64).consensus_encode(&mut s)?;
        s.write_all(b)?;
        Ok(vi_len + b.len())
    }
}

impl Encodable for String {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, s: S) -> Result<usize, io::Error> {
        self.as_str().consensus_encode(s)
    }
}

macro_rules! impl_array {
    ( $size:expr ) => (
        impl Encodable for [u8; $size] {
            #[inline]
            fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, io::Error> {
                s.write_all(&self[..])?;
                Ok(self.len())
            }
        }
    );
}

impl_array!(4);
impl_array!(20);
impl_array!(32);

impl Encodable for [u8] {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, io::Error> {
        let vi_len = VarInt(self.len() as u64).consensus_encode(&mut s)?;
        s.write_all(self)?;
        Ok(vi_len + self.len())
    }
}

impl Encodable for Vec<u8> {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, s: S) -> Result<usize, io::Error> {
        self[..].consensus_encode(s)
    }
}

macro_rules! impl_vec {
    ($type: ty) => {
        impl Encodable for Vec<$type> {
            #[inline]
            fn consensus_encode<S: io::Write>(&self, mut s: S) -> Result<usize, io::Error> {
                let mut len = 0;
                len += VarInt(self.len() as u64).consensus_encode(&mut s)?;
                for c in self.iter() {
                    len += c.consensus_encode(&mut s)?;
                }
                Ok(len)
            }
        }
    }
}

impl_vec!(TxIn);
impl_vec!(TxOut);
impl_vec!(Transaction);
