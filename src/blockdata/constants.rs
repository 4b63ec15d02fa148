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
// Changes for rust-basex is licensed as below.
// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.
//

//! Blockdata constants
//!
//! This module provides various constants relating to the blockchain and
//! consensus code. In particular, it defines the genesis block and its
//! single transaction
//!

use crate::blockdata::block::{Block, BlockHeader};
use crate::blockdata::opcodes;
use crate::blockdata::script;
use crate::blockdata::transaction::{OutPoint, Transaction, TxIn, TxOut};
use crate::hash_types::TxMerkleNode;
use crate::network::constants::Network;

use hashes::Hash;

/// The maximum allowable sequence number
pub const MAX_SEQUENCE: u32 = 0xFFFFFFFF;
/// How many satoshis are in "one basex"
pub const COIN_VALUE: u64 = 100_000_000;

/// The text committed to by the genesis coinbase.
pub const GENESIS_TIMESTAMP: &str = "Basex timestamp 12/18/2018 @ 12:00am (UTC)";

/// Uncompressed key paid by the genesis coinbase output.
pub const GENESIS_OUTPUT_KEY: [u8; 65] = [
    0x04, 0x81, 0xe1, 0x0c, 0x8a, 0x1d, 0x8c, 0x2b, 0x5c, 0x18, 0x68, 0x49, 0x26, 0x5a, 0x50, 0x17,
    0xf9, 0x34, 0x4f, 0x02, 0xe2, 0x75, 0x41, 0x49, 0x3b, 0xb9, 0xff, 0xb3, 0xad, 0x5f, 0xf3, 0xca,
    0xe3, 0x25, 0x0b, 0x64, 0xbb, 0x25, 0xa7, 0xf8, 0xe6, 0xd5, 0xad, 0x06, 0x61, 0x4f, 0xf3, 0x7a,
    0xb5, 0xcc, 0x7d, 0xcb, 0x14, 0x09, 0x3e, 0x5b, 0x27, 0x89, 0x2b, 0xe4, 0x55, 0xae, 0x7b, 0x2b,
    0x2f,
];

/// Constructs and returns the coinbase (and only) transaction of the Basex genesis block
fn basex_genesis_tx() -> Transaction {
    // Base
    let mut ret = Transaction {
        version: 1,
        lock_time: 0,
        input: vec![],
        output: vec![],
    };

    // Inputs
    let in_script = script::Builder::new().push_scriptint(486604799)
                                          .push_scriptint(4)
                                          .push_slice(GENESIS_TIMESTAMP.as_bytes())
                                          .into_script();
    ret.input.push(TxIn {
        previous_output: OutPoint::null(),
        script_sig: in_script,
        sequence: MAX_SEQUENCE,
    });

    // Outputs
    let out_script = script::Builder::new()
        .push_slice(&GENESIS_OUTPUT_KEY[..])
        .push_opcode(opcodes::all::OP_CHECKSIG)
        .into_script();
    ret.output.push(TxOut {
        value: 0,
        script_pubkey: out_script
    });

    // end
    ret
}

/// Constructs and returns the genesis block. The unit test network shares
/// the main network's genesis.
pub fn genesis_block(network: Network) -> Block {
    let txdata = vec![basex_genesis_tx()];
    let merkle_root = TxMerkleNode::from_inner(txdata[0].txid().into_inner());

    let (time, bits, nonce) = match network {
        Network::Main | Network::UnitTest => (1545091200, 0x1e0ffff0, 1713089),
        Network::Test => (1545091210, 0x1e0ffff0, 948532),
        Network::Regtest => (1545091220, 0x207fffff, 2),
    };

    Block {
        header: BlockHeader {
            version: 1,
            prev_blockhash: Default::default(),
            merkle_root,
            time,
            bits,
            nonce,
        },
        txdata,
    }
}
