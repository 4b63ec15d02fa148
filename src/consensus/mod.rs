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

//! Consensus
//!
//! This module defines structures, functions, and traits which are needed to
//! conform to Basex consensus.
//!

pub mod encode;
pub mod params;

pub use self::encode::{Encodable, serialize, serialize_hex};
pub use self::params::Params;
