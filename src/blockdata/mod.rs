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

//! Blockdata
//!
//! This module defines structures and functions for storing the blocks and
//! transactions which make up the Basex system.
//!

pub mod constants;
pub mod opcodes;
pub mod script;
pub mod transaction;
pub mod block;
