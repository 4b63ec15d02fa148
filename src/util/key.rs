// Rust Bitcoin Library
// Written in 2014 by
//     Andrew Poelstra <apoelstra@wpsoftware.net>
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//
// Changes for rust-basex is licensed as below.
// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.
//

//! Keys
//!
//! Public keys with their compression flag, and private keys in Wallet
//! Import Format under a network's secret-key prefix.
//!

use std::error;
use std::fmt;
use std::str::FromStr;

use hashes::hex::{FromHex, ToHex};
use hashes::Hash;
use secp256k1::{self, Secp256k1, Signing};

use crate::chainparams::Base58Prefixes;
use crate::hash_types::PubkeyHash;
use crate::network::constants::Network;

/// A key-related error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Base58 decoding error
    Base58(bs58::decode::Error),
    /// secp256k1-related error
    Secp256k1(secp256k1::Error),
    /// Hex decoding error
    Hex(hashes::hex::Error),
    /// Decoded WIF payload had an unexpected length
    InvalidLength(usize),
    /// WIF version byte is not the expected secret-key prefix
    InvalidVersion(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Base58(ref e) => write!(f, "base58 error: {}", e),
            Error::Secp256k1(ref e) => write!(f, "secp256k1 error: {}", e),
            Error::Hex(ref e) => write!(f, "hex error: {}", e),
            Error::InvalidLength(len) => write!(f, "invalid key payload length {}", len),
            Error::InvalidVersion(v) => write!(f, "invalid secret key version byte {}", v),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Base58(ref e) => Some(e),
            Error::Secp256k1(ref e) => Some(e),
            Error::Hex(ref e) => Some(e),
            Error::InvalidLength(_) | Error::InvalidVersion(_) => None,
        }
    }
}

#[doc(hidden)]
impl From<bs58::decode::Error> for Error {
    fn from(e: bs58::decode::Error) -> Error {
        Error::Base58(e)
    }
}

#[doc(hidden)]
impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Error {
        Error::Secp256k1(e)
    }
}

#[doc(hidden)]
impl From<hashes::hex::Error> for Error {
    fn from(e: hashes::hex::Error) -> Error {
        Error::Hex(e)
    }
}

/// A public key, serialized compressed or uncompressed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    /// Whether this public key should be serialized as compressed
    pub compressed: bool,
    /// The actual ECDSA key
    pub key: secp256k1::PublicKey,
}

impl PublicKey {
    /// Computes the public key as supposed to be used with this secret
    pub fn from_private_key<C: Signing>(secp: &Secp256k1<C>, sk: &PrivateKey) -> PublicKey {
        sk.public_key(secp)
    }

    /// Serialize the public key to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.compressed {
            self.key.serialize().to_vec()
        } else {
            self.key.serialize_uncompressed().to_vec()
        }
    }

    /// Deserialize a public key from a slice. The compression flag follows
    /// the encoding.
    pub fn from_slice(data: &[u8]) -> Result<PublicKey, Error> {
        let compressed = match data.len() {
            33 => true,
            65 => false,
            len => return Err(Error::InvalidLength(len)),
        };
        Ok(PublicKey {
            compressed,
            key: secp256k1::PublicKey::from_slice(data)?,
        })
    }

    /// The key identity: hash160 of the serialized key.
    pub fn pubkey_hash(&self) -> PubkeyHash {
        PubkeyHash::hash(&self.to_bytes())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_bytes().to_hex())
    }
}

impl FromStr for PublicKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<PublicKey, Error> {
        PublicKey::from_slice(&Vec::<u8>::from_hex(s)?)
    }
}

/// A secret key together with the WIF prefix of the network it belongs to.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    /// Whether this private key should be serialized as compressed
    pub compressed: bool,
    /// WIF version byte, the network's secret-key prefix
    pub prefix: u8,
    /// The actual ECDSA key
    pub key: secp256k1::SecretKey,
}

impl PrivateKey {
    /// Wraps a secret key for `network`, compressed.
    pub fn new(key: secp256k1::SecretKey, network: Network) -> PrivateKey {
        PrivateKey {
            compressed: true,
            prefix: Base58Prefixes::for_network(network).secret_key,
            key,
        }
    }

    /// Creates a public key from this private key
    pub fn public_key<C: Signing>(&self, secp: &Secp256k1<C>) -> PublicKey {
        PublicKey {
            compressed: self.compressed,
            key: secp256k1::PublicKey::from_secret_key(secp, &self.key),
        }
    }

    /// Serialize the private key to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.key[..].to_vec()
    }

    /// Format the private key to WIF format.
    pub fn fmt_wif(&self, fmt: &mut dyn fmt::Write) -> fmt::Result {
        let mut ret = [0; 34];
        ret[0] = self.prefix;
        ret[1..33].copy_from_slice(&self.key[..]);
        let len = if self.compressed {
            ret[33] = 1;
            34
        } else {
            33
        };
        fmt.write_str(&bs58::encode(&ret[..len]).with_check().into_string())
    }

    /// Get WIF encoding of this private key.
    pub fn to_wif(&self) -> String {
        let mut buf = String::new();
        // Writing into a String never fails.
        let _ = self.fmt_wif(&mut buf);
        buf
    }

    /// Parse WIF encoded private key, accepting any version byte.
    pub fn from_wif(wif: &str) -> Result<PrivateKey, Error> {
        let data = bs58::decode(wif).with_check(None).into_vec()?;

        let compressed = match data.len() {
            33 => false,
            34 if data[33] == 1 => true,
            len => return Err(Error::InvalidLength(len)),
        };

        Ok(PrivateKey {
            compressed,
            prefix: data[0],
            key: secp256k1::SecretKey::from_slice(&data[1..33])?,
        })
    }

    /// Parse WIF encoded private key, requiring the secret-key prefix of
    /// `network`.
    pub fn from_wif_for(wif: &str, network: Network) -> Result<PrivateKey, Error> {
        let key = PrivateKey::from_wif(wif)?;
        if key.prefix != Base58Prefixes::for_network(network).secret_key {
            return Err(Error::InvalidVersion(key.prefix));
        }
        Ok(key)
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_wif(f)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[private key data]")
    }
}

impl FromStr for PrivateKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<PrivateKey, Error> {
        PrivateKey::from_wif(s)
    }
}
