// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Parameter registry
//!
//! Holds the four parameter sets and the choice of the active network.
//! The node builds one registry at startup, selects a network before its
//! worker threads start, and passes the registry to whoever needs it.
//!

use std::sync::RwLock;

use crate::chainparams::checkpoints::Checkpoints;
use crate::chainparams::{ChainParams, Error};
use crate::network::constants::Network;

/// The parameter sets of every network and the active selection.
#[derive(Debug)]
pub struct ParamsRegistry {
    main: ChainParams,
    test: ChainParams,
    regtest: ChainParams,
    unittest: ChainParams,
    current: RwLock<Option<Network>>,
}

impl ParamsRegistry {
    /// Builds all parameter sets. Fails when any genesis block does not
    /// match its compiled-in hash; the node must not start in that case.
    pub fn new() -> Result<ParamsRegistry, Error> {
        Ok(ParamsRegistry {
            main: ChainParams::try_new(Network::Main)?,
            test: ChainParams::try_new(Network::Test)?,
            regtest: ChainParams::try_new(Network::Regtest)?,
            unittest: ChainParams::try_new(Network::UnitTest)?,
            current: RwLock::new(None),
        })
    }

    /// Makes `network` the active network. Once a network is active only
    /// the same network may be selected again, unless the active network
    /// is the unit test one.
    pub fn select(&self, network: Network) -> Result<&ChainParams, Error> {
        let mut current = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match *current {
            Some(active) if active != network && active != Network::UnitTest => {
                return Err(Error::AlreadySelected(active));
            }
            _ => {}
        }
        *current = Some(network);
        info!("Selected network {}", network);
        Ok(self.by_network(network))
    }

    /// Selects the network named by command-line style flags.
    pub fn select_from_flags(&self, regtest: bool, testnet: bool) -> Result<&ChainParams, Error> {
        let network = Network::from_flags(regtest, testnet).ok_or(Error::ConflictingNetworkFlags)?;
        self.select(network)
    }

    /// The active parameter set, if a network was selected.
    pub fn try_current(&self) -> Option<&ChainParams> {
        let current = match self.current.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        };
        current.map(|network| self.by_network(network))
    }

    /// The active parameter set.
    ///
    /// # Panics
    ///
    /// When no network was selected.
    pub fn current(&self) -> &ChainParams {
        match self.try_current() {
            Some(params) => params,
            None => panic!("chain parameters read before a network was selected"),
        }
    }

    /// The parameter set of `network`.
    pub fn by_network(&self, network: Network) -> &ChainParams {
        match network {
            Network::Main => &self.main,
            Network::Test => &self.test,
            Network::Regtest => &self.regtest,
            Network::UnitTest => &self.unittest,
        }
    }

    /// The checkpoint table of `network`.
    pub fn checkpoints_for(&self, network: Network) -> &Checkpoints {
        &self.by_network(network).checkpoints
    }
}
