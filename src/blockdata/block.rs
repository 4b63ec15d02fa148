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

//! Blocks
//!
//! A block is a bundle of transactions with a proof-of-work attached,
//! which commits to an earlier block to form the blockchain. The header
//! hash, and therefore the proof-of-work, is the Quark hash of the
//! 80-byte serialized header.
//!

use std::error;
use std::fmt;

use hashes::{sha256d, Hash, HashEngine};

use crate::blockdata::transaction::Transaction;
use crate::consensus::encode::serialize;
use crate::hash_types::{BlockHash, TxMerkleNode};
use crate::util::quark;
use crate::util::uint::Uint256;

/// A block header, which contains all the block's information except
/// the actual transactions
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub struct BlockHeader {
    /// The protocol version. Should always be 1.
    pub version: i32,
    /// Reference to the previous block in the chain
    pub prev_blockhash: BlockHash,
    /// The root hash of the merkle tree of transactions in the block
    pub merkle_root: TxMerkleNode,
    /// The timestamp of the block, as claimed by the miner
    pub time: u32,
    /// The target value below which the blockhash must lie, encoded as a
    /// a float (with well-defined rounding, of course)
    pub bits: u32,
    /// The nonce, selected to obtain a low enough blockhash
    pub nonce: u32,
}
impl_consensus_encoding!(BlockHeader, version, prev_blockhash, merkle_root, time, bits, nonce);

/// Serialized size of a header.
pub const HEADER_SIZE: usize = 80;

impl BlockHeader {
    /// Return the block hash, the Quark hash of the serialized header.
    pub fn block_hash(&self) -> BlockHash {
        BlockHash::from_inner(quark::quark(&serialize(self)))
    }

    /// Computes the target [0, T] that a blockhash must land in to be valid.
    /// Negative or overflowing compact encodings yield a zero target, which
    /// no hash can meet.
    pub fn target(&self) -> Uint256 {
        Uint256::from_compact(self.bits).unwrap_or_else(Uint256::zero)
    }

    /// Checks that the target is within `pow_limit` and that the block hash
    /// meets it. Returns the block hash on success.
    pub fn validate_pow(&self, pow_limit: &Uint256) -> Result<BlockHash, Error> {
        let target = self.target();
        if target.is_zero() || target > *pow_limit {
            return Err(Error::BadTarget);
        }
        let hash = self.block_hash();
        if Uint256::from_le_bytes(hash.into_inner()) <= target {
            Ok(hash)
        } else {
            Err(Error::BadProofOfWork)
        }
    }
}

/// A block: a header together with its transactions
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Block {
    /// The block header
    pub header: BlockHeader,
    /// List of transactions contained in the block
    pub txdata: Vec<Transaction>,
}

impl Block {
    /// Return the block hash.
    pub fn block_hash(&self) -> BlockHash {
        self.header.block_hash()
    }

    /// Calculate the transaction merkle root. `None` for a block without
    /// transactions.
    pub fn compute_merkle_root(&self) -> Option<TxMerkleNode> {
        if self.txdata.is_empty() {
            return None;
        }
        let mut layer: Vec<sha256d::Hash> =
            self.txdata.iter().map(|tx| sha256d::Hash::from_inner(tx.txid().into_inner())).collect();
        while layer.len() > 1 {
            layer = layer
                .chunks(2)
                .map(|pair| {
                    let left = pair[0];
                    // An odd node is paired with itself.
                    let right = pair.get(1).copied().unwrap_or(left);
                    let mut engine = sha256d::Hash::engine();
                    engine.input(&left[..]);
                    engine.input(&right[..]);
                    sha256d::Hash::from_engine(engine)
                })
                .collect();
        }
        Some(TxMerkleNode::from_inner(layer[0].into_inner()))
    }

    /// Checks if the merkle root of the header matches the merkle root of
    /// the transaction list.
    pub fn check_merkle_root(&self) -> bool {
        self.compute_merkle_root() == Some(self.header.merkle_root)
    }
}

/// Proof-of-work failures
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// The header's compact target is malformed or easier than the limit
    BadTarget,
    /// The header hash is above its target
    BadProofOfWork,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::BadTarget => f.write_str("block target out of range"),
            Error::BadProofOfWork => f.write_str("block hash above target"),
        }
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
    use hashes::hex::FromHex;

    use super::*;
    use crate::blockdata::script::Script;
    use crate::blockdata::transaction::{TxIn, TxOut};
    use crate::consensus::encode::serialize;

    fn header() -> BlockHeader {
        BlockHeader {
            version: 1,
            prev_blockhash: Default::default(),
            merkle_root: Default::default(),
            time: 1545091220,
            bits: 0x207fffff,
            nonce: 0,
        }
    }

    fn tx(value: u64) -> Transaction {
        Transaction {
            version: 1,
            input: vec![TxIn::default()],
            output: vec![TxOut { value, script_pubkey: Script::new() }],
            lock_time: 0,
        }
    }

    #[test]
    fn header_is_eighty_bytes() {
        let bytes = serialize(&header());
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[..4], &[1, 0, 0, 0][..]);
        assert_eq!(&bytes[76..], &[0, 0, 0, 0][..]);
        assert_eq!(&bytes[72..76], &[0xff, 0xff, 0x7f, 0x20][..]);
    }

    #[test]
    fn target_of_malformed_bits_is_zero() {
        let mut h = header();
        h.bits = 0x04923456;
        assert!(h.target().is_zero());
        assert_eq!(h.validate_pow(&Uint256::max_value()), Err(Error::BadTarget));
    }

    #[test]
    fn target_above_limit_is_rejected() {
        let h = header();
        let limit = Uint256::from_compact(0x1d00ffff).unwrap();
        assert_eq!(h.validate_pow(&limit), Err(Error::BadTarget));
    }

    #[test]
    fn hard_target_fails_pow() {
        let mut h = header();
        h.bits = 0x03000001;
        assert_eq!(h.validate_pow(&Uint256::max_value()), Err(Error::BadProofOfWork));
    }

    #[test]
    fn merkle_root_of_single_tx_is_txid() {
        let block = Block { header: header(), txdata: vec![tx(1)] };
        let root = block.compute_merkle_root().unwrap();
        assert_eq!(root.into_inner(), block.txdata[0].txid().into_inner());
        assert!(!block.check_merkle_root());

        let empty = Block { header: header(), txdata: vec![] };
        assert_eq!(empty.compute_merkle_root(), None);
    }

    #[test]
    fn merkle_root_duplicates_odd_node() {
        let three = Block { header: header(), txdata: vec![tx(1), tx(2), tx(3)] };
        let four = Block { header: header(), txdata: vec![tx(1), tx(2), tx(3), tx(3)] };
        assert_eq!(three.compute_merkle_root(), four.compute_merkle_root());

        let mut engine = sha256d::Hash::engine();
        engine.input(&three.txdata[0].txid()[..]);
        engine.input(&three.txdata[1].txid()[..]);
        let left = sha256d::Hash::from_engine(engine);
        let two = Block { header: header(), txdata: vec![tx(1), tx(2)] };
        assert_eq!(two.compute_merkle_root().unwrap().into_inner(), left.into_inner());
    }

    #[test]
    fn block_hash_is_reversed_quark() {
        let h = header();
        let hash = h.block_hash();
        assert_eq!(hash.into_inner(), quark::quark(&serialize(&h)));
        let shown = BlockHash::from_hex(&hash.to_string()).unwrap();
        assert_eq!(shown, hash);
    }
}
