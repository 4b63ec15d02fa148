// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Signed messages
//!
//! Compact recoverable ECDSA signatures over a message prefixed with the
//! network's signed-message magic. The 65-byte form carries a header byte
//! `27 + recovery id (+ 4 if the key is compressed)` followed by `r || s`,
//! so the signer's public key can be recovered from the signature alone.
//!

use std::error;
use std::fmt;

use hashes::Hash;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{self, Message, Secp256k1, Signing, Verification};

use crate::consensus::encode::Encodable;
use crate::hash_types::SigHash;
use crate::util::key::{PrivateKey, PublicKey};

/// Text every signed message is prefixed with.
pub const MESSAGE_MAGIC: &str = "DarkNet Signed Message:\n";

/// Length of a serialized compact signature.
pub const COMPACT_SIGNATURE_LEN: usize = 65;

const HEADER_BASE: u8 = 27;

/// Hash committed to when signing `msg`: sha256d over the magic and the
/// message, each prefixed with its varint length.
pub fn signed_msg_hash(msg: &str) -> SigHash {
    let mut engine = SigHash::engine();
    // Writing into a hash engine never fails.
    let _ = MESSAGE_MAGIC.consensus_encode(&mut engine);
    let _ = msg.consensus_encode(&mut engine);
    SigHash::from_engine(engine)
}

/// A recoverable signature together with the compression flag of the key
/// that produced it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct MessageSignature {
    /// The inner recoverable signature
    pub signature: RecoverableSignature,
    /// Whether the signing key serializes compressed
    pub compressed: bool,
}

impl MessageSignature {
    /// Signs `msg_hash` with `key`.
    pub fn sign<C: Signing>(secp: &Secp256k1<C>, msg_hash: &SigHash, key: &PrivateKey) -> MessageSignature {
        let msg = Message::from_slice(&msg_hash[..]).expect("hashes are 32 bytes");
        MessageSignature {
            signature: secp.sign_ecdsa_recoverable(&msg, &key.key),
            compressed: key.compressed,
        }
    }

    /// Serialize to the 65-byte compact form.
    pub fn serialize(&self) -> [u8; COMPACT_SIGNATURE_LEN] {
        let (recid, raw) = self.signature.serialize_compact();
        let mut serialized = [0u8; COMPACT_SIGNATURE_LEN];
        serialized[0] = HEADER_BASE + recid.to_i32() as u8;
        if self.compressed {
            serialized[0] += 4;
        }
        serialized[1..].copy_from_slice(&raw[..]);
        serialized
    }

    /// Parse the 65-byte compact form.
    pub fn from_slice(bytes: &[u8]) -> Result<MessageSignature, Error> {
        if bytes.len() != COMPACT_SIGNATURE_LEN {
            return Err(Error::InvalidLength(bytes.len()));
        }
        let header = bytes[0];
        if header < HEADER_BASE || header > HEADER_BASE + 7 {
            return Err(Error::InvalidHeader(header));
        }
        let flags = header - HEADER_BASE;
        let recid = RecoveryId::from_i32((flags & 3) as i32)?;
        Ok(MessageSignature {
            signature: RecoverableSignature::from_compact(&bytes[1..], recid)?,
            compressed: flags & 4 != 0,
        })
    }

    /// Recovers the key that signed `msg_hash`, carrying the signature's
    /// compression flag.
    pub fn recover_pubkey<C: Verification>(
        &self,
        secp: &Secp256k1<C>,
        msg_hash: &SigHash,
    ) -> Result<PublicKey, Error> {
        let msg = Message::from_slice(&msg_hash[..])?;
        let key = secp.recover_ecdsa(&msg, &self.signature)?;
        Ok(PublicKey {
            compressed: self.compressed,
            key,
        })
    }
}

/// Signature error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A compact signature must be exactly 65 bytes
    InvalidLength(usize),
    /// Header byte outside 27..=34
    InvalidHeader(u8),
    /// secp256k1 error
    Secp256k1(secp256k1::Error),
}

#[doc(hidden)]
impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Error {
        Error::Secp256k1(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidLength(len) => write!(f, "compact signature of length {}", len),
            Error::InvalidHeader(h) => write!(f, "invalid compact signature header {}", h),
            Error::Secp256k1(ref e) => write!(f, "secp256k1 error: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Secp256k1(ref e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use hashes::hex::ToHex;
    use hashes::{sha256d, Hash};
    use secp256k1::Secp256k1;

    use super::*;
    use crate::network::constants::Network;
    use crate::test_helpers::decode_sk;

    fn key(compressed: bool) -> PrivateKey {
        let mut sk = PrivateKey::new(
            decode_sk("0101010101010101010101010101010101010101010101010101010101010101"),
            Network::Main,
        );
        sk.compressed = compressed;
        sk
    }

    #[test]
    fn message_hash_prefixes_magic() {
        let mut preimage = vec![MESSAGE_MAGIC.len() as u8];
        preimage.extend_from_slice(MESSAGE_MAGIC.as_bytes());
        preimage.push(5);
        preimage.extend_from_slice(b"hello");
        assert_eq!(
            signed_msg_hash("hello").into_inner(),
            sha256d::Hash::hash(&preimage).into_inner()
        );
        assert_ne!(signed_msg_hash("hello"), signed_msg_hash("hello "));
    }

    #[test]
    fn sign_and_recover() {
        let secp = Secp256k1::new();
        let hash = signed_msg_hash("masternode ping");
        for &compressed in &[true, false] {
            let sk = key(compressed);
            let sig = MessageSignature::sign(&secp, &hash, &sk);
            let bytes = sig.serialize();
            assert!(bytes[0] >= 27 && bytes[0] <= 34);
            assert_eq!(bytes[0] >= 31, compressed);

            let parsed = MessageSignature::from_slice(&bytes).unwrap();
            assert_eq!(parsed, sig);
            let recovered = parsed.recover_pubkey(&secp, &hash).unwrap();
            assert_eq!(recovered, sk.public_key(&secp));
            assert_eq!(recovered.compressed, compressed);

            let other = parsed.recover_pubkey(&secp, &signed_msg_hash("other")).unwrap();
            assert_ne!(other.to_bytes().to_hex(), recovered.to_bytes().to_hex());
        }
    }

    #[test]
    fn malformed_compact_signatures() {
        assert_eq!(MessageSignature::from_slice(&[27u8; 64]), Err(Error::InvalidLength(64)));
        assert_eq!(MessageSignature::from_slice(&[]), Err(Error::InvalidLength(0)));

        let secp = Secp256k1::new();
        let mut bytes = MessageSignature::sign(&secp, &signed_msg_hash("x"), &key(true)).serialize();
        bytes[0] = 26;
        assert_eq!(MessageSignature::from_slice(&bytes), Err(Error::InvalidHeader(26)));
        bytes[0] = 35;
        assert_eq!(MessageSignature::from_slice(&bytes), Err(Error::InvalidHeader(35)));
    }
}
