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

//! Consensus parameters
//!
//! This module provides predefined set of parameters for different chains.
//! The testnet set is derived from the main set, regtest from testnet and
//! the unit test set from main, each overriding only what differs.
//!

use crate::network::constants::Network;
use crate::util::amount::Amount;
use crate::util::uint::Uint256;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Parameters that influence chain consensus.
pub struct Params {
    /// Network for which parameters are valid.
    pub network: Network,
    /// Easiest allowed proof-of-work target.
    pub pow_limit: Uint256,
    /// Difficulty retarget timespan in seconds.
    pub target_timespan: u32,
    /// Expected time between blocks in seconds.
    pub target_spacing: u32,
    /// Blocks between subsidy halvings.
    pub subsidy_halving_interval: u32,
    /// Confirmations before a coinbase output can be spent.
    pub maturity: u32,
    /// Deepest reorganization the node accepts.
    pub max_reorganization_depth: u32,
    /// Upgraded blocks among the last `to_check_block_upgrade_majority`
    /// needed to enforce a new block version.
    pub enforce_block_upgrade_majority: u32,
    /// Upgraded blocks among the last `to_check_block_upgrade_majority`
    /// needed to reject outdated block versions.
    pub reject_block_outdated_majority: u32,
    /// Window used by the two majority rules above.
    pub to_check_block_upgrade_majority: u32,
    /// Default number of mining threads, 0 meaning one per core.
    pub miner_threads: u32,
    /// Last block that may be mined with proof of work.
    pub last_pow_block: u32,
    /// Height from which the stake modifier uses its updated computation.
    pub modifier_update_block: u32,
    /// Tolerated drift in the masternode count between peers.
    pub masternode_count_drift: u32,
    /// Cap on the value of a single output.
    pub max_money_out: Amount,
}

impl Params {
    /// Creates parameters set for the given network.
    pub fn new(network: Network) -> Self {
        match network {
            Network::Main => Params::main(),
            Network::Test => Params::testnet(),
            Network::Regtest => Params::regtest(),
            Network::UnitTest => Params {
                network: Network::UnitTest,
                ..Params::main()
            },
        }
    }

    fn main() -> Self {
        Params {
            network: Network::Main,
            pow_limit: Uint256::max_value() >> 1,
            target_timespan: 60,
            target_spacing: 2 * 60,
            subsidy_halving_interval: 1_050_000,
            maturity: 10,
            max_reorganization_depth: 100,
            enforce_block_upgrade_majority: 750,
            reject_block_outdated_majority: 950,
            to_check_block_upgrade_majority: 1000,
            miner_threads: 0,
            last_pow_block: 200,
            modifier_update_block: 1,
            masternode_count_drift: 20,
            max_money_out: Amount::from_coins(45_000_000),
        }
    }

    fn testnet() -> Self {
        Params {
            network: Network::Test,
            enforce_block_upgrade_majority: 51,
            reject_block_outdated_majority: 75,
            to_check_block_upgrade_majority: 100,
            maturity: 15,
            masternode_count_drift: 4,
            ..Params::main()
        }
    }

    fn regtest() -> Self {
        Params {
            network: Network::Regtest,
            subsidy_halving_interval: 150,
            enforce_block_upgrade_majority: 750,
            reject_block_outdated_majority: 950,
            to_check_block_upgrade_majority: 1000,
            miner_threads: 1,
            target_timespan: 24 * 60 * 60,
            ..Params::testnet()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Params;
    use crate::network::constants::Network;
    use crate::util::amount::Amount;

    #[test]
    fn testnet_overrides_main() {
        let main = Params::new(Network::Main);
        let test = Params::new(Network::Test);
        assert_eq!(test.maturity, 15);
        assert_eq!(test.enforce_block_upgrade_majority, 51);
        assert_eq!(test.masternode_count_drift, 4);
        assert_eq!(test.subsidy_halving_interval, main.subsidy_halving_interval);
        assert_eq!(test.pow_limit, main.pow_limit);
        assert_eq!(test.max_money_out, Amount::from_coins(45_000_000));
    }

    #[test]
    fn regtest_overrides_testnet() {
        let regtest = Params::new(Network::Regtest);
        assert_eq!(regtest.network, Network::Regtest);
        assert_eq!(regtest.subsidy_halving_interval, 150);
        assert_eq!(regtest.enforce_block_upgrade_majority, 750);
        assert_eq!(regtest.maturity, 15);
        assert_eq!(regtest.miner_threads, 1);
        assert_eq!(regtest.target_timespan, 86400);
    }

    #[test]
    fn unittest_copies_main() {
        let main = Params::new(Network::Main);
        let unit = Params::new(Network::UnitTest);
        assert_eq!(unit.network, Network::UnitTest);
        assert_eq!(Params { network: Network::Main, ..unit }, main);
        assert_eq!(main.pow_limit.to_compact(), 0x207fffff);
    }
}
