// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Internal helpers for unit tests
//!
//!

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use secp256k1::SecretKey;

use crate::blockdata::transaction::Transaction;
use crate::hash_types::{BlockHash, Txid};
use crate::masternode::collateral::{Spork, SporkValues, TIERS};
use crate::masternode::pool::{
    ActiveMasternode, Collaborators, MasternodeList, MasternodeSync, PaymentList, TransactionLocks,
};
use crate::masternode::signer::{BlockIndex, ChainQuery};

pub fn decode_sk(sk_hex: &str) -> SecretKey {
    let sk = hex::decode(sk_hex).unwrap();
    SecretKey::from_slice(&sk[..]).unwrap()
}

/// Block index and transaction store backed by maps.
#[derive(Debug, Default)]
pub struct MockChain {
    heights: HashMap<BlockHash, u32>,
    transactions: HashMap<Txid, (Transaction, BlockHash)>,
}

impl MockChain {
    pub fn insert(&mut self, hash: BlockHash, height: u32) {
        self.heights.insert(hash, height);
    }

    pub fn add_transaction(&mut self, tx: Transaction, block: BlockHash) {
        self.transactions.insert(tx.txid(), (tx, block));
    }
}

impl BlockIndex for MockChain {
    fn height_of(&self, hash: &BlockHash) -> Option<u32> {
        self.heights.get(hash).copied()
    }
}

impl ChainQuery for MockChain {
    fn get_transaction(&self, txid: &Txid) -> Option<(Transaction, BlockHash)> {
        self.transactions.get(txid).cloned()
    }
}

/// Spork values indexed by tier.
#[derive(Debug, Clone)]
pub struct MockSporks {
    values: [i64; 16],
}

impl MockSporks {
    pub fn from_fn<F: Fn(usize) -> i64>(f: F) -> MockSporks {
        let mut values = [0i64; 16];
        for (i, value) in values.iter_mut().enumerate() {
            *value = f(i);
        }
        MockSporks { values }
    }

    pub fn set(&mut self, spork: Spork, value: i64) {
        let i = TIERS.iter().position(|&(s, _)| s == spork).unwrap();
        self.values[i] = value;
    }
}

impl SporkValues for MockSporks {
    fn spork_value(&self, spork: Spork) -> i64 {
        let i = TIERS.iter().position(|&(s, _)| s == spork).unwrap();
        self.values[i]
    }
}

/// Every housekeeping collaborator in one, counting calls.
#[derive(Debug, Default)]
pub struct MockNode {
    synced: AtomicBool,
    process: AtomicUsize,
    manage_status: AtomicUsize,
    check_and_remove: AtomicUsize,
    process_connections: AtomicUsize,
    clean_payment_list: AtomicUsize,
    clean_transaction_locks: AtomicUsize,
    thread_name: Mutex<Option<String>>,
}

impl MockNode {
    pub fn new() -> Arc<MockNode> {
        Arc::new(MockNode::default())
    }

    pub fn set_synced(&self, synced: bool) {
        self.synced.store(synced, Ordering::SeqCst);
    }

    pub fn process_calls(&self) -> usize {
        self.process.load(Ordering::SeqCst)
    }

    pub fn manage_status_calls(&self) -> usize {
        self.manage_status.load(Ordering::SeqCst)
    }

    /// Number of cleanups, after checking that every cleanup step ran
    /// equally often.
    pub fn cleanup_calls(&self) -> usize {
        let n = self.check_and_remove.load(Ordering::SeqCst);
        assert_eq!(self.process_connections.load(Ordering::SeqCst), n);
        assert_eq!(self.clean_payment_list.load(Ordering::SeqCst), n);
        assert_eq!(self.clean_transaction_locks.load(Ordering::SeqCst), n);
        n
    }

    pub fn thread_name(&self) -> Option<String> {
        self.thread_name.lock().unwrap().clone()
    }

    pub fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators {
            sync: self.clone(),
            active_masternode: self.clone(),
            masternodes: self.clone(),
            payments: self.clone(),
            locks: self.clone(),
        }
    }
}

impl MasternodeSync for MockNode {
    fn process(&self) {
        *self.thread_name.lock().unwrap() = thread::current().name().map(String::from);
        self.process.fetch_add(1, Ordering::SeqCst);
    }

    fn is_blockchain_synced(&self) -> bool {
        self.synced.load(Ordering::SeqCst)
    }
}

impl ActiveMasternode for MockNode {
    fn manage_status(&self) {
        self.manage_status.fetch_add(1, Ordering::SeqCst);
    }
}

impl MasternodeList for MockNode {
    fn check_and_remove(&self) {
        self.check_and_remove.fetch_add(1, Ordering::SeqCst);
    }

    fn process_connections(&self) {
        self.process_connections.fetch_add(1, Ordering::SeqCst);
    }
}

impl PaymentList for MockNode {
    fn clean_payment_list(&self) {
        self.clean_payment_list.fetch_add(1, Ordering::SeqCst);
    }
}

impl TransactionLocks for MockNode {
    fn clean_transaction_locks(&self) {
        self.clean_transaction_locks.fetch_add(1, Ordering::SeqCst);
    }
}
