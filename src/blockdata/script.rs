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

//! Script
//!
//! Scripts define Bitcoin's digital signature scheme: a signature is formed
//! from a script (the second half of which is defined by a coin to be spent,
//! and the first half provided by the spending transaction), and is valid
//! iff the script leaves `TRUE` on the stack after being evaluated.
//! Bitcoin's script is a stack-based assembly language similar in spirit to
//! Forth.
//!
//! This module only builds and classifies scripts; it never evaluates them.
//!

use std::{fmt, io, ops};

use hashes::Hash;

use crate::blockdata::opcodes;
use crate::consensus::encode::Encodable;
use crate::hash_types::{PubkeyHash, ScriptHash};

#[derive(Clone, Default, PartialOrd, Ord, PartialEq, Eq, Hash)]
/// A Bitcoin script
pub struct Script(Box<[u8]>);

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Script(")?;
        fmt::LowerHex::fmt(self, f)?;
        f.write_str(")")
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::LowerHex for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &ch in self.0.iter() {
            write!(f, "{:02x}", ch)?;
        }
        Ok(())
    }
}

/// Helper to encode an integer in script format
fn build_scriptint(n: i64) -> Vec<u8> {
    if n == 0 { return vec![] }

    let neg = n < 0;

    let mut abs = if neg { -n } else { n } as usize;
    let mut v = vec![];
    while abs > 0xFF {
        v.push((abs & 0xFF) as u8);
        abs >>= 8;
    }
    // If the number's value causes the sign bit to be set, we need an extra
    // byte to get the correct value and correct sign bit
    if abs & 0x80 != 0 {
        v.push(abs as u8);
        v.push(if neg { 0x80u8 } else { 0u8 });
    }
    // Otherwise we just set the sign bit ourselves
    else {
        abs |= if neg { 0x80 } else { 0 };
        v.push(abs as u8);
    }
    v
}

impl Script {
    /// Creates a new empty script
    pub fn new() -> Script { Script(vec![].into_boxed_slice()) }

    /// Generates P2PKH-type of scriptPubkey
    pub fn new_p2pkh(pubkey_hash: &PubkeyHash) -> Script {
        Builder::new()
            .push_opcode(opcodes::all::OP_DUP)
            .push_opcode(opcodes::all::OP_HASH160)
            .push_slice(&pubkey_hash[..])
            .push_opcode(opcodes::all::OP_EQUALVERIFY)
            .push_opcode(opcodes::all::OP_CHECKSIG)
            .into_script()
    }

    /// Generates P2SH-type of scriptPubkey with a given hash of the redeem script
    pub fn new_p2sh(script_hash: &ScriptHash) -> Script {
        Builder::new()
            .push_opcode(opcodes::all::OP_HASH160)
            .push_slice(&script_hash[..])
            .push_opcode(opcodes::all::OP_EQUAL)
            .into_script()
    }

    /// Returns the script data
    pub fn as_bytes(&self) -> &[u8] { &*self.0 }

    /// Returns a copy of the script data
    pub fn to_bytes(&self) -> Vec<u8> { self.0.clone().into_vec() }

    /// The length in bytes of the script
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether the script is the empty script
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Checks whether a script pubkey is a p2sh output
    #[inline]
    pub fn is_p2sh(&self) -> bool {
        self.0.len() == 23
            && self.0[0] == opcodes::all::OP_HASH160.into_u8()
            && self.0[1] == 20
            && self.0[22] == opcodes::all::OP_EQUAL.into_u8()
    }

    /// Checks whether a script pubkey is a p2pkh output
    #[inline]
    pub fn is_p2pkh(&self) -> bool {
        self.0.len() == 25
            && self.0[0] == opcodes::all::OP_DUP.into_u8()
            && self.0[1] == opcodes::all::OP_HASH160.into_u8()
            && self.0[2] == 20
            && self.0[23] == opcodes::all::OP_EQUALVERIFY.into_u8()
            && self.0[24] == opcodes::all::OP_CHECKSIG.into_u8()
    }

    /// The hash committed to by a p2pkh output, if this is one
    pub fn p2pkh_hash(&self) -> Option<PubkeyHash> {
        if self.is_p2pkh() {
            PubkeyHash::from_slice(&self.0[3..23]).ok()
        } else {
            None
        }
    }
}

/// Creates a new script from an existing vector
impl From<Vec<u8>> for Script {
    fn from(v: Vec<u8>) -> Script { Script(v.into_boxed_slice()) }
}

impl ops::Index<ops::RangeFull> for Script {
    type Output = [u8];
    #[inline]
    fn index(&self, _: ops::RangeFull) -> &[u8] {
        &self.0[..]
    }
}

impl Encodable for Script {
    #[inline]
    fn consensus_encode<S: io::Write>(&self, s: S) -> Result<usize, io::Error> {
        self.0.consensus_encode(s)
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Default)]
/// An object which can be used to construct a script piece by piece
pub struct Builder(Vec<u8>);

impl Builder {
    /// Creates a new empty script
    pub fn new() -> Self {
        Builder(vec![])
    }

    /// The length in bytes of the script
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether the script is the empty script
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Adds instructions to push an integer onto the stack. Integers are
    /// encoded as little-endian signed-magnitude numbers, but there are
    /// dedicated opcodes to push some small integers.
    pub fn push_int(self, data: i64) -> Builder {
        // We can special-case -1, 1-16
        if data == -1 || (data >= 1 && data <= 16) {
            let opcode = opcodes::All::from(
                (data - 1 + opcodes::all::OP_PUSHNUM_1.into_u8() as i64) as u8
            );
            self.push_opcode(opcode)
        }
        // We can also special-case zero
        else if data == 0 {
            self.push_opcode(opcodes::all::OP_PUSHBYTES_0)
        }
        // Otherwise encode it as data
        else { self.push_scriptint(data) }
    }

    /// Adds instructions to push an integer onto the stack, using the explicit
    /// encoding regardless of the availability of dedicated opcodes.
    pub fn push_scriptint(self, data: i64) -> Builder {
        self.push_slice(&build_scriptint(data))
    }

    /// Adds instructions to push some arbitrary data onto the stack
    pub fn push_slice(mut self, data: &[u8]) -> Builder {
        // Start with a PUSH opcode
        match data.len() as u64 {
            n if n < opcodes::all::OP_PUSHDATA1.into_u8() as u64 => { self.0.push(n as u8); },
            n if n < 0x100 => {
                self.0.push(opcodes::all::OP_PUSHDATA1.into_u8());
                self.0.push(n as u8);
            },
            n if n < 0x10000 => {
                self.0.push(opcodes::all::OP_PUSHDATA2.into_u8());
                self.0.extend_from_slice(&(n as u16).to_le_bytes());
            },
            n if n < 0x100000000 => {
                self.0.push(opcodes::all::OP_PUSHDATA4.into_u8());
                self.0.extend_from_slice(&(n as u32).to_le_bytes());
            }
            _ => panic!("tried to put a 4bn+ sized object into a script!")
        }
        // Then push the raw bytes
        self.0.extend_from_slice(data);
        self
    }

    /// Adds a single opcode to the script
    pub fn push_opcode(mut self, data: opcodes::All) -> Builder {
        self.0.push(data.into_u8());
        self
    }

    /// Converts the `Builder` into an unmodifiable `Script`
    pub fn into_script(self) -> Script {
        Script(self.0.into_boxed_slice())
    }
}

#[cfg(test)]
mod test {
    use hashes::hex::FromHex;

    use super::*;
    use crate::consensus::encode::serialize;

    #[test]
    fn script() {
        let mut comp = vec![];
        let mut script = Builder::new();
        assert_eq!(&script.clone().into_script()[..], &comp[..]);

        // small ints
        script = script.push_int(1);  comp.push(81u8); assert_eq!(&script.clone().into_script()[..], &comp[..]);
        script = script.push_int(0);  comp.push(0u8);  assert_eq!(&script.clone().into_script()[..], &comp[..]);
        script = script.push_int(4);  comp.push(84u8); assert_eq!(&script.clone().into_script()[..], &comp[..]);
        script = script.push_int(-1); comp.push(79u8); assert_eq!(&script.clone().into_script()[..], &comp[..]);
        // forced scriptint
        script = script.push_scriptint(4); comp.extend([1u8, 4].iter().cloned()); assert_eq!(&script.clone().into_script()[..], &comp[..]);
        // big ints
        script = script.push_int(17); comp.extend([1u8, 17].iter().cloned()); assert_eq!(&script.clone().into_script()[..], &comp[..]);
        script = script.push_int(10000); comp.extend([2u8, 16, 39].iter().cloned()); assert_eq!(&script.clone().into_script()[..], &comp[..]);
        // notice the sign bit set here, hence the extra zero/128 at the end
        script = script.push_int(10000000); comp.extend([4u8, 128, 150, 152, 0].iter().cloned()); assert_eq!(&script.clone().into_script()[..], &comp[..]);
        script = script.push_int(-10000000); comp.extend([4u8, 128, 150, 152, 128].iter().cloned()); assert_eq!(&script.clone().into_script()[..], &comp[..]);

        // data
        script = script.push_slice("NRA4VR".as_bytes()); comp.extend([6u8, 78, 82, 65, 52, 86, 82].iter().cloned()); assert_eq!(&script.clone().into_script()[..], &comp[..]);

        // opcodes
        script = script.push_opcode(opcodes::all::OP_CHECKSIG); comp.push(0xACu8); assert_eq!(&script.clone().into_script()[..], &comp[..]);
        assert_eq!(script.len(), comp.len());
    }

    #[test]
    fn scriptint_round_trip() {
        assert_eq!(build_scriptint(-1), vec![0x81]);
        assert_eq!(build_scriptint(255), vec![255, 0]);
        assert_eq!(build_scriptint(256), vec![0, 1]);
        assert_eq!(build_scriptint(486604799), vec![0xff, 0xff, 0x00, 0x1d]);
    }

    #[test]
    fn long_pushes() {
        let data = vec![0x42u8; 80];
        let script = Builder::new().push_slice(&data).into_script();
        assert_eq!(&script.as_bytes()[..2], &[0x4c, 80][..]);
        assert_eq!(script.len(), 82);

        let data = vec![0x42u8; 300];
        let script = Builder::new().push_slice(&data).into_script();
        assert_eq!(&script.as_bytes()[..3], &[0x4d, 0x2c, 0x01][..]);
    }

    #[test]
    fn script_p2pkh() {
        let hash = PubkeyHash::from_hex("162c5ea71c0b23f5b9022ef047c4a86470a5b070").unwrap();
        let script = Script::new_p2pkh(&hash);
        assert_eq!(
            script.to_string(),
            "76a914162c5ea71c0b23f5b9022ef047c4a86470a5b07088ac"
        );
        assert!(script.is_p2pkh());
        assert!(!script.is_p2sh());
        assert_eq!(script.p2pkh_hash(), Some(hash));
        assert_eq!(serialize(&script)[0], 25);
    }

    #[test]
    fn script_p2sh() {
        let script = Script::from(Vec::from_hex("a914162c5ea71c0b23f5b9022ef047c4a86470a5b07087").unwrap());
        assert!(script.is_p2sh());
        assert!(!script.is_p2pkh());
        assert_eq!(script.p2pkh_hash(), None);
        assert!(Script::new().is_empty());
    }
}
