// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Checkpoints
//!
//! Compiled-in block hashes at fixed heights, plus the data used to
//! estimate sync progress past the last of them.
//!

use hashes::hex::FromHex;

use crate::chainparams::Error;
use crate::hash_types::BlockHash;
use crate::masternode::signer::BlockIndex;
use crate::network::constants::Network;

/// Verifying blocks with signatures is this much slower than without.
const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

const MAIN_CHECKPOINTS: &[(u32, &str)] = &[
    (0, "0000099bdcabe0434fbb887b531e291a203cbc19514f7e6c214a1d8daa4b4500"),
    (500, "76b4fe8f6f1c6e3453d06c506f74f8ecca9b4f82bad660c97cedaabb84dca9e0"),
    (1000, "27ea8a8a3c78d9542a0a68aca598a8f937b121f217f13c58ea5b2edd08f8bfca"),
];

const TEST_CHECKPOINTS: &[(u32, &str)] = &[
    (0, "0000005350332f165ba8fc6241344517cee3c6a743b43b98f3eed0cd8316f318"),
];

const REGTEST_CHECKPOINTS: &[(u32, &str)] = &[
    (0, "36bd90d3e10336800ecfbb164a49f6bb5f52fcd89c0f4322dd5061d6835487fc"),
];

/// Checkpoint table of one network.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoints {
    entries: Vec<(u32, BlockHash)>,
    /// Unix time of the last checkpoint block
    pub last_checkpoint_time: u64,
    /// Transactions between genesis and the last checkpoint
    pub tx_count_at_checkpoint: u64,
    /// Expected transactions per day after the last checkpoint
    pub estimated_tx_per_day: f64,
}

impl Checkpoints {
    /// Builds a table, rejecting heights that do not strictly increase.
    pub fn new(
        entries: Vec<(u32, BlockHash)>,
        last_checkpoint_time: u64,
        tx_count_at_checkpoint: u64,
        estimated_tx_per_day: f64,
    ) -> Result<Checkpoints, Error> {
        for pair in entries.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(Error::InvalidCheckpoints(pair[1].0));
            }
        }
        Ok(Checkpoints {
            entries,
            last_checkpoint_time,
            tx_count_at_checkpoint,
            estimated_tx_per_day,
        })
    }

    /// The compiled-in table of `network`. The unit test network shares
    /// the main table.
    pub fn for_network(network: Network) -> Result<Checkpoints, Error> {
        let (table, time, tx_count, per_day) = match network {
            Network::Main | Network::UnitTest => (MAIN_CHECKPOINTS, 1545291737, 1804, 2000.0),
            Network::Test => (TEST_CHECKPOINTS, 1545091210, 0, 250.0),
            Network::Regtest => (REGTEST_CHECKPOINTS, 1545091220, 0, 100.0),
        };
        let entries = table
            .iter()
            .map(|&(height, hash)| {
                BlockHash::from_hex(hash)
                    .map(|hash| (height, hash))
                    .map_err(|_| Error::InvalidCheckpoints(height))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Checkpoints::new(entries, time, tx_count, per_day)
    }

    /// The checkpointed hash at `height`, if any. `None` leaves the height
    /// unconstrained.
    pub fn lookup(&self, height: u32) -> Option<BlockHash> {
        self.entries
            .binary_search_by_key(&height, |&(h, _)| h)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// False only when a checkpoint exists at `height` and `hash` differs.
    pub fn check_block(&self, height: u32, hash: &BlockHash) -> bool {
        self.lookup(height).map_or(true, |expected| expected == *hash)
    }

    /// Height of the last checkpoint, 0 for an empty table.
    pub fn total_blocks_estimate(&self) -> u32 {
        self.entries.last().map_or(0, |&(height, _)| height)
    }

    /// Iterates over the `(height, hash)` pairs in ascending height.
    pub fn iter(&self) -> impl Iterator<Item = &(u32, BlockHash)> {
        self.entries.iter()
    }

    /// The highest checkpoint whose block is known to `index`.
    pub fn last_checkpoint<B: BlockIndex + ?Sized>(&self, index: &B) -> Option<(u32, BlockHash)> {
        self.entries
            .iter()
            .rev()
            .find(|(_, hash)| index.height_of(hash).is_some())
            .copied()
    }

    /// Linear projection of the total transaction count at `timestamp`.
    pub fn estimated_tx_count(&self, timestamp: u64) -> f64 {
        let elapsed = timestamp.saturating_sub(self.last_checkpoint_time) as f64;
        self.tx_count_at_checkpoint as f64 + elapsed / SECONDS_PER_DAY * self.estimated_tx_per_day
    }

    /// Advisory fraction of verification work done for a tip with
    /// `chain_tx` transactions and timestamp `block_time`. Work past the
    /// last checkpoint weighs more when signatures are checked.
    pub fn guess_verification_progress(&self, chain_tx: u64, block_time: u64, now: u64, sigchecks: bool) -> f64 {
        let factor = if sigchecks { SIGCHECK_VERIFICATION_FACTOR } else { 1.0 };
        let per_day = self.estimated_tx_per_day;

        let (work_before, work_after) = if chain_tx <= self.tx_count_at_checkpoint {
            let cheap_before = chain_tx as f64;
            let cheap_after = (self.tx_count_at_checkpoint - chain_tx) as f64;
            let expensive_after = now.saturating_sub(self.last_checkpoint_time) as f64 / SECONDS_PER_DAY * per_day;
            (cheap_before, cheap_after + expensive_after * factor)
        } else {
            let cheap_before = self.tx_count_at_checkpoint as f64;
            let expensive_before = (chain_tx - self.tx_count_at_checkpoint) as f64;
            let expensive_after = now.saturating_sub(block_time) as f64 / SECONDS_PER_DAY * per_day;
            (cheap_before + expensive_before * factor, expensive_after * factor)
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 0.0;
        }
        work_before / total
    }
}

#[cfg(test)]
mod tests {
    use hashes::hex::ToHex;

    use super::*;
    use crate::test_helpers::MockChain;

    #[test]
    fn main_lookup() {
        let table = Checkpoints::for_network(Network::Main).unwrap();
        assert_eq!(table.lookup(0).unwrap().to_hex(), MAIN_CHECKPOINTS[0].1);
        assert_eq!(table.lookup(500).unwrap().to_hex(), MAIN_CHECKPOINTS[1].1);
        assert_eq!(table.lookup(1000).unwrap().to_hex(), MAIN_CHECKPOINTS[2].1);
        for &height in &[1, 499, 501, 999, 1001, u32::max_value()] {
            assert_eq!(table.lookup(height), None);
        }
        assert_eq!(table.total_blocks_estimate(), 1000);
        assert_eq!(table.iter().count(), 3);
        assert_eq!(Checkpoints::for_network(Network::UnitTest).unwrap(), table);
    }

    #[test]
    fn test_and_regtest_only_genesis() {
        let test = Checkpoints::for_network(Network::Test).unwrap();
        assert_eq!(test.iter().count(), 1);
        assert_eq!(test.last_checkpoint_time, 1545091210);
        assert_eq!(test.estimated_tx_per_day, 250.0);

        let regtest = Checkpoints::for_network(Network::Regtest).unwrap();
        assert_eq!(regtest.lookup(0).unwrap().to_hex(), REGTEST_CHECKPOINTS[0].1);
        assert_eq!(regtest.total_blocks_estimate(), 0);
    }

    #[test]
    fn check_block_against_table() {
        let table = Checkpoints::for_network(Network::Main).unwrap();
        let at_500 = table.lookup(500).unwrap();
        let at_1000 = table.lookup(1000).unwrap();
        assert!(table.check_block(500, &at_500));
        assert!(!table.check_block(500, &at_1000));
        assert!(table.check_block(501, &at_1000));
    }

    #[test]
    fn heights_must_ascend() {
        let hash = BlockHash::default();
        assert_eq!(
            Checkpoints::new(vec![(0, hash), (10, hash), (10, hash)], 0, 0, 1.0),
            Err(Error::InvalidCheckpoints(10))
        );
        assert_eq!(
            Checkpoints::new(vec![(5, hash), (4, hash)], 0, 0, 1.0),
            Err(Error::InvalidCheckpoints(4))
        );
        assert!(Checkpoints::new(vec![], 0, 0, 1.0).is_ok());
    }

    #[test]
    fn last_checkpoint_in_index() {
        let table = Checkpoints::for_network(Network::Main).unwrap();
        let mut index = MockChain::default();
        assert_eq!(table.last_checkpoint(&index), None);

        index.insert(table.lookup(0).unwrap(), 0);
        index.insert(table.lookup(500).unwrap(), 500);
        assert_eq!(table.last_checkpoint(&index), Some((500, table.lookup(500).unwrap())));
    }

    #[test]
    fn progress_estimates() {
        let table = Checkpoints::for_network(Network::Main).unwrap();
        assert_eq!(table.estimated_tx_count(table.last_checkpoint_time), 1804.0);
        assert_eq!(table.estimated_tx_count(table.last_checkpoint_time + 86_400), 3804.0);

        let now = table.last_checkpoint_time;
        assert_eq!(table.guess_verification_progress(902, now, now, true), 0.5);
        assert_eq!(table.guess_verification_progress(1804, now, now, true), 1.0);

        // Half a day behind past the checkpoint: 1000 expensive tx ahead.
        let tip_time = now + 86_400;
        let progress = table.guess_verification_progress(2804, tip_time, tip_time + 43_200, false);
        assert!((progress - 2804.0 / 3804.0).abs() < 1e-9);
        let weighted = table.guess_verification_progress(2804, tip_time, tip_time + 43_200, true);
        assert!((weighted - (1804.0 + 5000.0) / (1804.0 + 5000.0 + 5000.0)).abs() < 1e-9);

        let empty = Checkpoints::new(vec![], 0, 0, 0.0).unwrap();
        assert_eq!(empty.guess_verification_progress(0, 0, 0, true), 0.0);
    }
}
