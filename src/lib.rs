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
// Changes for rust-basex is licensed as below.
// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.
//

//! # Rust Basex Library
//!
//! Consensus parameters and masternode trust primitives for the Basex
//! network: the four network parameter sets with their genesis blocks and
//! checkpoints, the Quark proof-of-work header hash, base58 addresses and
//! keys, compact recoverable message signatures, the spork-gated
//! masternode collateral schedule and the masternode housekeeping thread.
//!

#![crate_name = "basex"]
#![crate_type = "dylib"]
#![crate_type = "rlib"]

// Coding conventions
#![forbid(unsafe_code)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(dead_code)]
#![deny(unused_imports)]
#![deny(missing_docs)]

// Re-exported dependencies.
#[macro_use] pub extern crate bitcoin_hashes as hashes;
pub extern crate secp256k1;

#[macro_use] extern crate log;
extern crate bs58;
extern crate rand;
extern crate sha3;

#[cfg(feature = "serde")] #[macro_use] extern crate serde;
#[cfg(all(test, feature = "serde"))] extern crate serde_json;
#[cfg(all(test, feature = "serde"))] extern crate serde_test;

#[cfg(target_pointer_width = "16")]
compile_error!("rust-basex cannot be used on 16-bit architectures");

#[cfg(test)]
mod test_helpers;
#[macro_use]
mod internal_macros;
#[macro_use]
pub mod network;
pub mod blockdata;
pub mod util;
pub mod consensus;
pub mod chainparams;
pub mod masternode;
// Do not remove: required in order to get hash types implementation macros to work correctly
#[allow(unused_imports)]
pub mod hash_types;

pub use crate::hash_types::*;
pub use crate::blockdata::block::Block;
pub use crate::blockdata::block::BlockHeader;
pub use crate::blockdata::script::Script;
pub use crate::blockdata::transaction::Transaction;
pub use crate::blockdata::transaction::TxIn;
pub use crate::blockdata::transaction::TxOut;
pub use crate::blockdata::transaction::OutPoint;
pub use crate::chainparams::ChainParams;
pub use crate::chainparams::registry::ParamsRegistry;
pub use crate::consensus::encode::VarInt;
pub use crate::masternode::collateral::CollateralScheduler;
pub use crate::masternode::pool::Housekeeping;
pub use crate::masternode::signer::MasternodeSigner;
pub use crate::network::constants::Network;
pub use crate::util::address::Address;
pub use crate::util::amount::Amount;
pub use crate::util::key::PrivateKey;
pub use crate::util::key::PublicKey;
pub use crate::util::signature::MessageSignature;
