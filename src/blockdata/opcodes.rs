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

//! Opcodes
//!
//! The opcodes this library needs to build coinbase, pay-to-pubkey and
//! pay-to-pubkey-hash scripts. Scripts are never executed here.
//!

#![allow(non_camel_case_types)]

use std::fmt;

/// A script Opcode
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct All {
    code: u8,
}

impl All {
    /// Encode as a byte
    #[inline]
    pub fn into_u8(self) -> u8 {
        self.code
    }
}

impl From<u8> for All {
    #[inline]
    fn from(b: u8) -> All {
        All { code: b }
    }
}

impl fmt::Debug for All {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("OP_")?;
        match *self {
            all::OP_PUSHBYTES_0 => f.write_str("0"),
            All { code: x } if x < 0x4c => write!(f, "PUSHBYTES_{}", x),
            all::OP_PUSHDATA1 => f.write_str("PUSHDATA1"),
            all::OP_PUSHDATA2 => f.write_str("PUSHDATA2"),
            all::OP_PUSHDATA4 => f.write_str("PUSHDATA4"),
            all::OP_PUSHNUM_NEG1 => f.write_str("PUSHNUM_NEG1"),
            All { code: x } if x >= 0x51 && x <= 0x60 => write!(f, "PUSHNUM_{}", x - 0x50),
            all::OP_DUP => f.write_str("DUP"),
            all::OP_EQUAL => f.write_str("EQUAL"),
            all::OP_EQUALVERIFY => f.write_str("EQUALVERIFY"),
            all::OP_HASH160 => f.write_str("HASH160"),
            all::OP_CHECKSIG => f.write_str("CHECKSIG"),
            All { code: x } => write!(f, "UNKNOWN_{:#04x}", x),
        }
    }
}

/// Opcode constants
pub mod all {
    use super::All;

    /// Push an empty array onto the stack
    pub const OP_PUSHBYTES_0: All = All { code: 0x00 };
    /// Read the next byte as N; push the next N bytes as an array onto the stack
    pub const OP_PUSHDATA1: All = All { code: 0x4c };
    /// Read the next 2 bytes as N; push the next N bytes as an array onto the stack
    pub const OP_PUSHDATA2: All = All { code: 0x4d };
    /// Read the next 4 bytes as N; push the next N bytes as an array onto the stack
    pub const OP_PUSHDATA4: All = All { code: 0x4e };
    /// Push the array [0x81] onto the stack
    pub const OP_PUSHNUM_NEG1: All = All { code: 0x4f };
    /// Push the array [0x01] onto the stack
    pub const OP_PUSHNUM_1: All = All { code: 0x51 };
    /// Duplicates the top stack item
    pub const OP_DUP: All = All { code: 0x76 };
    /// Pushes 1 if the inputs are exactly equal, 0 otherwise
    pub const OP_EQUAL: All = All { code: 0x87 };
    /// Returns success if the inputs are exactly equal, failure otherwise
    pub const OP_EQUALVERIFY: All = All { code: 0x88 };
    /// RIPEMD160(SHA256) the top stack item
    pub const OP_HASH160: All = All { code: 0xa9 };
    /// <https://en.bitcoin.it/wiki/OP_CHECKSIG> pushing 1/0 for success/failure
    pub const OP_CHECKSIG: All = All { code: 0xac };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_names() {
        assert_eq!(format!("{:?}", all::OP_PUSHBYTES_0), "OP_0");
        assert_eq!(format!("{:?}", All::from(0x14)), "OP_PUSHBYTES_20");
        assert_eq!(format!("{:?}", All::from(0x54)), "OP_PUSHNUM_4");
        assert_eq!(format!("{:?}", all::OP_CHECKSIG), "OP_CHECKSIG");
        assert_eq!(format!("{:?}", All::from(0xff)), "OP_UNKNOWN_0xff");
        assert_eq!(all::OP_HASH160.into_u8(), 0xa9);
    }
}
