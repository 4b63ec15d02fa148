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

//! Network constants
//!
//! This module provides the network identities known to a Basex node and
//! the magic bytes which start every P2P message on each of them.
//!
//! # Example: encoding a network's magic bytes
//!
//! ```rust
//! use basex::network::constants::Network;
//! use basex::consensus::encode::serialize;
//!
//! let bytes = serialize(&Network::Main.magic());
//!
//! assert_eq!(&bytes[..], &[0x33, 0xbe, 0xfe, 0xd9]);
//! ```

use std::{error, fmt};

/// Error returned when a network name is not one of the known identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNetworkError(pub String);

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown network: {}", self.0)
    }
}

impl error::Error for ParseNetworkError {}

user_enum! {
    /// The network a node participates in
    #[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash)]
    pub enum Network {
        /// Production chain
        Main <-> "main",
        /// Public test chain
        Test <-> "test",
        /// Local regression test chain
        Regtest <-> "regtest",
        /// Parameters for unit tests; shares the main chain's data
        UnitTest <-> "unittest"
    }
}

impl Network {
    /// All known networks, in the order their parameter sets are built.
    pub const ALL: [Network; 4] = [Network::Main, Network::Test, Network::Regtest, Network::UnitTest];

    /// The four bytes that start every P2P message on this network.
    pub fn message_start(self) -> [u8; 4] {
        match self {
            Network::Main | Network::UnitTest => [0x33, 0xbe, 0xfe, 0xd9],
            Network::Test => [0x07, 0x09, 0xbe, 0xb4],
            Network::Regtest => [0xd9, 0xbc, 0xb4, 0x11],
        }
    }

    /// Return the network magic bytes, which should be encoded little-endian
    /// at the start of every message
    ///
    /// # Examples
    ///
    /// ```rust
    /// use basex::network::constants::Network;
    ///
    /// assert_eq!(Network::Test.magic(), 0xb4be0907);
    /// ```
    pub fn magic(self) -> u32 {
        u32::from_le_bytes(self.message_start())
    }

    /// Converts a magic number back to the network it marks. The unit test
    /// network is never returned since it shares the main chain's magic.
    pub fn from_magic(magic: u32) -> Option<Network> {
        [Network::Main, Network::Test, Network::Regtest]
            .iter()
            .cloned()
            .find(|n| n.magic() == magic)
    }

    /// Picks the network named by `-regtest` / `-testnet` style switches.
    /// Returns `None` when both switches are set.
    pub fn from_flags(regtest: bool, testnet: bool) -> Option<Network> {
        match (regtest, testnet) {
            (true, true) => None,
            (true, false) => Some(Network::Regtest),
            (false, true) => Some(Network::Test),
            (false, false) => Some(Network::Main),
        }
    }
}
