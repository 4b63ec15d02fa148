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

//! Addresses
//!
//! Support for base58 Basex addresses. The version byte of an address is
//! the pubkey or script prefix of the network it belongs to.
//!
//! # Example: creating a new address from a randomly-generated key pair
//!
//! ```rust
//!
//! use basex::network::constants::Network;
//! use basex::util::address::Address;
//! use basex::util::key;
//! use basex::secp256k1::Secp256k1;
//! use basex::secp256k1::rand::thread_rng;
//!
//! // Generate random key pair
//! let s = Secp256k1::new();
//! let public_key = key::PublicKey {
//!     compressed: true,
//!     key: s.generate_keypair(&mut thread_rng()).1,
//! };
//!
//! // Generate pay-to-pubkey-hash address
//! let address = Address::p2pkh(&public_key, Network::Main);
//! ```

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use hashes::Hash;

use crate::blockdata::script::Script;
use crate::chainparams::Base58Prefixes;
use crate::hash_types::{PubkeyHash, ScriptHash};
use crate::network::constants::Network;
use crate::util::key;

/// Why an address string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// Not valid base58check
    Base58(bs58::decode::Error),
    /// Decoded payload is not a version byte plus a 20-byte hash
    InvalidLength(usize),
    /// Version byte matches neither the pubkey nor the script prefix
    UnknownVersion(u8),
}

/// Address error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The string does not encode an address of the expected network
    Malformed(Reason),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Malformed(Reason::Base58(ref e)) => write!(f, "malformed address: base58: {}", e),
            Error::Malformed(Reason::InvalidLength(len)) => {
                write!(f, "malformed address: payload length {}", len)
            }
            Error::Malformed(Reason::UnknownVersion(v)) => {
                write!(f, "malformed address: unknown version byte {}", v)
            }
        }
    }
}

impl ::std::error::Error for Error {
    fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
        match *self {
            Error::Malformed(Reason::Base58(ref e)) => Some(e),
            _ => None,
        }
    }
}

#[doc(hidden)]
impl From<bs58::decode::Error> for Error {
    fn from(e: bs58::decode::Error) -> Error {
        Error::Malformed(Reason::Base58(e))
    }
}

/// The different types of addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressType {
    /// pay-to-pubkey-hash
    P2pkh,
    /// pay-to-script-hash
    P2sh,
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            AddressType::P2pkh => "p2pkh",
            AddressType::P2sh => "p2sh",
        })
    }
}

/// The method used to produce an address
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Payload {
    /// pay-to-pkhash address
    PubkeyHash(PubkeyHash),
    /// P2SH address
    ScriptHash(ScriptHash),
}

impl Payload {
    /// Get a [Payload] from an output script (scriptPubkey).
    pub fn from_script(script: &Script) -> Option<Payload> {
        let bytes = script.as_bytes();
        Some(if script.is_p2pkh() {
            Payload::PubkeyHash(PubkeyHash::from_slice(&bytes[3..23]).ok()?)
        } else if script.is_p2sh() {
            Payload::ScriptHash(ScriptHash::from_slice(&bytes[2..22]).ok()?)
        } else {
            return None;
        })
    }

    /// Generates a script pubkey spending to this [Payload].
    pub fn script_pubkey(&self) -> Script {
        match *self {
            Payload::PubkeyHash(ref hash) => Script::new_p2pkh(hash),
            Payload::ScriptHash(ref hash) => Script::new_p2sh(hash),
        }
    }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A Basex address
pub struct Address {
    /// The type of the address
    pub payload: Payload,
    /// The network on which this address is usable
    pub network: Network,
}

impl Address {
    /// Creates a pay to public key hash address from a public key. The
    /// key's compression flag selects the serialization that is hashed.
    #[inline]
    pub fn p2pkh(pk: &key::PublicKey, network: Network) -> Address {
        Address {
            network,
            payload: Payload::PubkeyHash(pk.pubkey_hash()),
        }
    }

    /// Creates a pay to script hash P2SH address from a script
    #[inline]
    pub fn p2sh(script: &Script, network: Network) -> Address {
        Address {
            network,
            payload: Payload::ScriptHash(ScriptHash::hash(&script[..])),
        }
    }

    /// Get the address type of the address.
    pub fn address_type(&self) -> AddressType {
        match self.payload {
            Payload::PubkeyHash(_) => AddressType::P2pkh,
            Payload::ScriptHash(_) => AddressType::P2sh,
        }
    }

    /// Get an [Address] from an output script (scriptPubkey).
    pub fn from_script(script: &Script, network: Network) -> Option<Address> {
        Some(Address {
            payload: Payload::from_script(script)?,
            network,
        })
    }

    /// Generates a script pubkey spending to this address
    pub fn script_pubkey(&self) -> Script {
        self.payload.script_pubkey()
    }

    /// Parses an address that must carry one of `network`'s prefixes.
    pub fn from_str_with_network(s: &str, network: Network) -> Result<Address, Error> {
        let data = bs58::decode(s).with_check(None).into_vec()?;
        if data.len() != 21 {
            return Err(Error::Malformed(Reason::InvalidLength(data.len())));
        }

        let prefixes = Base58Prefixes::for_network(network);
        let payload = match data[0] {
            v if v == prefixes.pubkey_address => {
                Payload::PubkeyHash(PubkeyHash::from_slice(&data[1..]).map_err(|_| Error::Malformed(Reason::InvalidLength(data.len())))?)
            }
            v if v == prefixes.script_address => {
                Payload::ScriptHash(ScriptHash::from_slice(&data[1..]).map_err(|_| Error::Malformed(Reason::InvalidLength(data.len())))?)
            }
            v => return Err(Error::Malformed(Reason::UnknownVersion(v))),
        };

        Ok(Address { payload, network })
    }
}

impl Display for Address {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        let prefixes = Base58Prefixes::for_network(self.network);
        let mut prefixed = [0; 21];
        match self.payload {
            Payload::PubkeyHash(ref hash) => {
                prefixed[0] = prefixes.pubkey_address;
                prefixed[1..].copy_from_slice(&hash[..]);
            }
            Payload::ScriptHash(ref hash) => {
                prefixed[0] = prefixes.script_address;
                prefixed[1..].copy_from_slice(&hash[..]);
            }
        }
        fmt.write_str(&bs58::encode(&prefixed[..]).with_check().into_string())
    }
}

/// Parses against the main prefixes first, then the testnet ones. Regtest
/// shares the testnet prefixes, so such addresses come back as
/// [Network::Test]; use [Address::from_str_with_network] to pin the network.
impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Address, Error> {
        match Address::from_str_with_network(s, Network::Main) {
            Err(Error::Malformed(Reason::UnknownVersion(_))) => Address::from_str_with_network(s, Network::Test),
            result => result,
        }
    }
}

impl ::std::fmt::Debug for Address {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "{}", self.to_string())
    }
}
