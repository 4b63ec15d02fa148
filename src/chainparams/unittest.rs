// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Mutable unit test parameters
//!
//! Only compiled for tests or with the `test-params` feature. Production
//! code reads [ChainParams] through the registry and never sees this type.
//!

use std::ops::Deref;

use crate::chainparams::ChainParams;
use crate::network::constants::Network;

/// A unit test parameter set whose consensus knobs a test may turn.
#[derive(Debug, Clone)]
pub struct UnitTestParams {
    params: ChainParams,
}

impl UnitTestParams {
    /// Starts from the unit test network's parameters.
    pub fn new() -> UnitTestParams {
        UnitTestParams {
            params: ChainParams::new(Network::UnitTest),
        }
    }

    /// Sets the subsidy halving interval.
    pub fn set_subsidy_halving_interval(&mut self, interval: u32) {
        self.params.consensus.subsidy_halving_interval = interval;
    }

    /// Sets the upgraded-block count that enforces a new version.
    pub fn set_enforce_block_upgrade_majority(&mut self, majority: u32) {
        self.params.consensus.enforce_block_upgrade_majority = majority;
    }

    /// Sets the upgraded-block count that rejects outdated versions.
    pub fn set_reject_block_outdated_majority(&mut self, majority: u32) {
        self.params.consensus.reject_block_outdated_majority = majority;
    }

    /// Sets the window of the two majority rules.
    pub fn set_to_check_block_upgrade_majority(&mut self, window: u32) {
        self.params.consensus.to_check_block_upgrade_majority = window;
    }

    /// Turns default consistency checks on or off.
    pub fn set_default_consistency_checks(&mut self, enabled: bool) {
        self.params.default_consistency_checks = enabled;
    }

    /// Allows or forbids minimum difficulty blocks.
    pub fn set_allow_min_difficulty_blocks(&mut self, allowed: bool) {
        self.params.allow_min_difficulty_blocks = allowed;
    }

    /// Skips or enforces the proof-of-work check.
    pub fn set_skip_proof_of_work_check(&mut self, skip: bool) {
        self.params.skip_proof_of_work_check = skip;
    }
}

impl Default for UnitTestParams {
    fn default() -> Self {
        UnitTestParams::new()
    }
}

impl Deref for UnitTestParams {
    type Target = ChainParams;

    fn deref(&self) -> &ChainParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_change_only_their_field() {
        let mut params = UnitTestParams::default();
        let base = ChainParams::new(Network::UnitTest);

        params.set_subsidy_halving_interval(10);
        params.set_enforce_block_upgrade_majority(1);
        params.set_reject_block_outdated_majority(2);
        params.set_to_check_block_upgrade_majority(3);
        params.set_default_consistency_checks(false);
        params.set_allow_min_difficulty_blocks(true);
        params.set_skip_proof_of_work_check(true);

        assert_eq!(params.consensus.subsidy_halving_interval, 10);
        assert_eq!(params.consensus.enforce_block_upgrade_majority, 1);
        assert_eq!(params.consensus.reject_block_outdated_majority, 2);
        assert_eq!(params.consensus.to_check_block_upgrade_majority, 3);
        assert!(!params.default_consistency_checks);
        assert!(params.allow_min_difficulty_blocks);
        assert!(params.skip_proof_of_work_check);

        assert_eq!(params.network, Network::UnitTest);
        assert_eq!(params.genesis_hash, base.genesis_hash);
        assert_eq!(params.consensus.maturity, base.consensus.maturity);
        assert_eq!(params.default_port, base.default_port);
    }
}
