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

//! Bitcoin Transaction
//!
//! A transaction describes a transfer of money. It consumes previously-unspent
//! transaction outputs and produces new ones, satisfying the condition to spend
//! the old outputs (typically a digital signature with a specific key must be
//! provided) and defining the condition to spend the new ones. The use of digital
//! signatures ensures that coins cannot be spent by unauthorized parties.
//!
//! This module provides the structures and functions needed to support transactions.
//!

use hashes::Hash;

use crate::blockdata::script::Script;
use crate::consensus::encode::Encodable;
use crate::hash_types::Txid;
use crate::util::amount::Amount;

/// A reference to a transaction output
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct OutPoint {
    /// The referenced transaction's txid
    pub txid: Txid,
    /// The index of the referenced output in its transaction's vout
    pub vout: u32,
}
impl_consensus_encoding!(OutPoint, txid, vout);

impl OutPoint {
    /// Create a new [OutPoint].
    #[inline]
    pub fn new(txid: Txid, vout: u32) -> OutPoint {
        OutPoint { txid, vout }
    }

    /// Creates a "null" `OutPoint`.
    ///
    /// This value is used for coinbase transactions because they don't have
    /// any previous outputs.
    #[inline]
    pub fn null() -> OutPoint {
        OutPoint {
            txid: Default::default(),
            vout: u32::max_value(),
        }
    }

    /// Checks if an `OutPoint` is "null".
    #[inline]
    pub fn is_null(&self) -> bool {
        *self == OutPoint::null()
    }
}

impl Default for OutPoint {
    fn default() -> Self {
        OutPoint::null()
    }
}

/// A transaction input, which defines old coins to be consumed
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TxIn {
    /// The reference to the previous output that is being used an an input
    pub previous_output: OutPoint,
    /// The script which pushes values on the stack which will cause
    /// the referenced output's script to accept
    pub script_sig: Script,
    /// The sequence number, which suggests to miners which of two
    /// conflicting transactions should be preferred, or 0xFFFFFFFF
    /// to ignore this feature. This is generally never used since
    /// the miner behaviour cannot be enforced.
    pub sequence: u32,
}
impl_consensus_encoding!(TxIn, previous_output, script_sig, sequence);

impl Default for TxIn {
    fn default() -> TxIn {
        TxIn {
            previous_output: OutPoint::default(),
            script_sig: Script::new(),
            sequence: u32::max_value(),
        }
    }
}

/// A transaction output, which defines new coins to be created from old ones.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct TxOut {
    /// The value of the output, in satoshis
    pub value: u64,
    /// The script which must satisfy for the output to be spent
    pub script_pubkey: Script,
}
impl_consensus_encoding!(TxOut, value, script_pubkey);

impl TxOut {
    /// The value of the output as an [Amount].
    pub fn amount(&self) -> Amount {
        Amount::from_sat(self.value)
    }
}

/// A Bitcoin transaction, which describes an authenticated movement of coins
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Transaction {
    /// The protocol version, is currently expected to be 1.
    pub version: i32,
    /// List of inputs
    pub input: Vec<TxIn>,
    /// List of outputs
    pub output: Vec<TxOut>,
    /// Block number before which this transaction is valid, or 0 for
    /// valid immediately.
    pub lock_time: u32,
}
impl_consensus_encoding!(Transaction, version, input, output, lock_time);

impl Transaction {
    /// Computes the txid, the double SHA256 of the serialized transaction.
    pub fn txid(&self) -> Txid {
        let mut enc = Txid::engine();
        self.consensus_encode(&mut enc).expect("engines don't error");
        Txid::from_engine(enc)
    }

    /// Is this a coin base transaction?
    pub fn is_coin_base(&self) -> bool {
        self.input.len() == 1 && self.input[0].previous_output.is_null()
    }
}

#[cfg(test)]
mod tests {
    use hashes::hex::FromHex;

    use super::*;
    use crate::consensus::encode::serialize;

    #[test]
    fn test_outpoint() {
        let null = OutPoint::null();
        assert!(null.is_null());
        assert_eq!(null.vout, 0xffffffff);
        assert_eq!(
            serialize(&null),
            Vec::from_hex("0000000000000000000000000000000000000000000000000000000000000000ffffffff").unwrap()
        );
        assert!(!OutPoint::new(Txid::default(), 0).is_null());
    }

    #[test]
    fn test_txin_default() {
        let txin = TxIn::default();
        assert_eq!(txin.previous_output, OutPoint::default());
        assert_eq!(txin.script_sig, Script::new());
        assert_eq!(txin.sequence, 0xFFFFFFFF);
    }

    #[test]
    fn test_transaction_encoding() {
        let tx = Transaction {
            version: 1,
            input: vec![TxIn::default()],
            output: vec![TxOut { value: 5000, script_pubkey: Script::new() }],
            lock_time: 0,
        };
        let bytes = serialize(&tx);
        // version, 1 input (36 + 1 + 4), 1 output (8 + 1), lock_time
        assert_eq!(bytes.len(), 4 + 1 + 41 + 1 + 9 + 4);
        assert_eq!(&bytes[..5], &[1, 0, 0, 0, 1][..]);
        assert!(tx.is_coin_base());
        assert_eq!(tx.output[0].amount(), Amount::from_sat(5000));
        assert_ne!(tx.txid(), Txid::default());
    }
}
