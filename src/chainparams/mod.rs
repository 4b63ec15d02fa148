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

//! Chain parameters
//!
//! One [ChainParams] record per network. The testnet record is built from
//! the main record by struct update, regtest from testnet and the unit test
//! record from main. Construction hashes the genesis block and refuses to
//! produce a record whose hash differs from the compiled-in constant.
//!

use std::error;
use std::fmt;

use hashes::hex::{FromHex, ToHex};

use crate::blockdata::block::Block;
use crate::blockdata::constants::genesis_block;
use crate::consensus::params::Params;
use crate::hash_types::{BlockHash, TxMerkleNode};
use crate::network::constants::Network;

pub mod checkpoints;
pub mod registry;
pub mod seeds;
#[cfg(any(test, feature = "test-params"))]
pub mod unittest;

use self::checkpoints::Checkpoints;
use self::seeds::{DnsSeed, SeedAddress};

const MAIN_GENESIS_HASH: &str = "0000099bdcabe0434fbb887b531e291a203cbc19514f7e6c214a1d8daa4b4500";
const MAIN_MERKLE_ROOT: &str = "f2c162dc6c3ccb665e6f56b57f6b62c18377b2cc06b3709714362170699446fd";
const TEST_GENESIS_HASH: &str = "0000005350332f165ba8fc6241344517cee3c6a743b43b98f3eed0cd8316f318";
const REGTEST_GENESIS_HASH: &str = "36bd90d3e10336800ecfbb164a49f6bb5f52fcd89c0f4322dd5061d6835487fc";

const MAIN_ALERT_KEY: &str = "0448ba6d18f2109cb1773ee9097a768db2be4b922d38a8941322bed7385ef33e4445087057779d9905dedafabbf06bd28fd64b005b89b17cd66261e39977158f95";
const TEST_ALERT_KEY: &str = "04d9ef839f0b11f6c528cc26e9ed8cac8adc225c06ee4c6d9b27e9843642cd845f900e9775ff7bbd9ffd53d87e20c74a7f80c544567ba12096cc6f38defdedd8b6";

const MAIN_SPORK_KEY: &str = "04d3a1107216db463332fb1b3ebb53248ea8a4dc724186a9413e7bbad296d12c44701a8e224bbd462efddde53777e74c05b9d1a606f91c7bf0ca8c363261f453c3";
const TEST_SPORK_KEY: &str = "043cb47460a46b0af96a34ef5b9a38b73212ffdc667dbe93f0fbbb531627f50e2267c831c0c6e62ff701b6d00f098c1707fd34258c9f0e437c34f820c1d356b978";

/// Masternode payments start this long after the genesis timestamp.
const MASTERNODE_PAYMENTS_DELAY: u32 = 24 * 60 * 60;

/// Chain parameter errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The genesis block does not hash to the compiled-in constant
    GenesisMismatch {
        /// Network being built
        network: Network,
        /// Compiled-in hash
        expected: &'static str,
        /// Hash of the constructed genesis block
        computed: BlockHash,
    },
    /// The genesis merkle root differs from the compiled-in constant
    MerkleRootMismatch {
        /// Network being built
        network: Network,
        /// Compiled-in merkle root
        expected: &'static str,
        /// Merkle root of the constructed genesis block
        computed: TxMerkleNode,
    },
    /// Another network is already active
    AlreadySelected(Network),
    /// A checkpoint table is not strictly ascending, or a hash is not hex
    InvalidCheckpoints(u32),
    /// Both the regtest and the testnet flag were given
    ConflictingNetworkFlags,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::GenesisMismatch { network, expected, ref computed } => write!(
                f, "{} genesis hash {} does not match expected {}", network, computed, expected,
            ),
            Error::MerkleRootMismatch { network, expected, ref computed } => write!(
                f, "{} genesis merkle root {} does not match expected {}", network, computed, expected,
            ),
            Error::AlreadySelected(network) => write!(f, "network {} is already selected", network),
            Error::InvalidCheckpoints(height) => write!(f, "invalid checkpoint at height {}", height),
            Error::ConflictingNetworkFlags => f.write_str("regtest and testnet cannot both be selected"),
        }
    }
}

impl error::Error for Error {}

/// Base58 version prefixes of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Base58Prefixes {
    /// Pay-to-pubkey-hash address version byte
    pub pubkey_address: u8,
    /// Pay-to-script-hash address version byte
    pub script_address: u8,
    /// WIF private key version byte
    pub secret_key: u8,
    /// BIP32 extended public key prefix
    pub ext_public_key: [u8; 4],
    /// BIP32 extended private key prefix
    pub ext_secret_key: [u8; 4],
    /// BIP44 coin type, hardened
    pub ext_coin_type: [u8; 4],
}

impl Base58Prefixes {
    /// Main network prefixes: addresses start with `B`, scripts with `3`.
    pub const MAIN: Base58Prefixes = Base58Prefixes {
        pubkey_address: 25,
        script_address: 6,
        secret_key: 33,
        ext_public_key: [0x04, 0x88, 0xb2, 0x1e],
        ext_secret_key: [0x04, 0x88, 0xad, 0xe4],
        ext_coin_type: [0x80, 0x00, 0xa8, 0xcb],
    };

    /// Test network prefixes, shared by regtest: addresses start with `b`.
    pub const TEST: Base58Prefixes = Base58Prefixes {
        pubkey_address: 85,
        script_address: 12,
        secret_key: 92,
        ext_public_key: [0x04, 0x35, 0x87, 0xcf],
        ext_secret_key: [0x04, 0x35, 0x83, 0x94],
        ext_coin_type: [0x80, 0x00, 0x00, 0x01],
    };

    /// Prefixes used on `network`.
    pub fn for_network(network: Network) -> Base58Prefixes {
        match network {
            Network::Main | Network::UnitTest => Base58Prefixes::MAIN,
            Network::Test | Network::Regtest => Base58Prefixes::TEST,
        }
    }
}

/// Everything a node needs to know about one network.
#[derive(Debug, Clone)]
pub struct ChainParams {
    /// The network described
    pub network: Network,
    /// Magic bytes starting each P2P message
    pub message_start: [u8; 4],
    /// Uncompressed key authenticating network alerts
    pub alert_pubkey: Vec<u8>,
    /// Default P2P port
    pub default_port: u16,
    /// The genesis block
    pub genesis: Block,
    /// Hash of [ChainParams::genesis], checked at construction
    pub genesis_hash: BlockHash,
    /// Consensus numbers
    pub consensus: Params,
    /// Base58 version prefixes
    pub base58_prefixes: Base58Prefixes,
    /// DNS seeds
    pub dns_seeds: Vec<DnsSeed>,
    /// Fixed seed peers
    pub fixed_seeds: Vec<SeedAddress>,
    /// Checkpoints and sync estimate data
    pub checkpoints: Checkpoints,
    /// Hex public key authenticating spork messages
    pub spork_pubkey: &'static str,
    /// Placeholder payee used while building pool transactions
    pub masternode_pool_dummy_address: &'static str,
    /// Pool transaction size cap
    pub pool_max_transactions: u32,
    /// Confirmations before a budget finalization fee counts
    pub budget_fee_confirmations: u32,
    /// Time from which masternodes get paid
    pub start_masternode_payments: u32,
    /// Mining needs connected peers
    pub mining_requires_peers: bool,
    /// Minimum difficulty blocks are accepted
    pub allow_min_difficulty_blocks: bool,
    /// Consistency checks run by default
    pub default_consistency_checks: bool,
    /// Standard transaction rules are enforced
    pub require_standard: bool,
    /// Blocks may be mined on demand without peers
    pub mine_blocks_on_demand: bool,
    /// Proof of work is not checked
    pub skip_proof_of_work_check: bool,
    /// RPC still reports the deprecated `testnet` field
    pub testnet_to_be_deprecated_field_rpc: bool,
    /// Headers-first sync is active by default
    pub headers_first_syncing_active: bool,
}

impl ChainParams {
    /// Builds and checks the parameters of `network`.
    ///
    /// # Panics
    ///
    /// When the compiled-in genesis constants are inconsistent. Use
    /// [ChainParams::try_new] to get the error instead.
    pub fn new(network: Network) -> ChainParams {
        ChainParams::try_new(network).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Builds and checks the parameters of `network`.
    pub fn try_new(network: Network) -> Result<ChainParams, Error> {
        let params = match network {
            Network::Main => ChainParams::main()?,
            Network::Test => ChainParams::testnet()?,
            Network::Regtest => ChainParams::regtest()?,
            Network::UnitTest => ChainParams::unittest()?,
        };
        params.check_genesis()?;
        Ok(params)
    }

    fn check_genesis(&self) -> Result<(), Error> {
        let expected = match self.network {
            Network::Main | Network::UnitTest => MAIN_GENESIS_HASH,
            Network::Test => TEST_GENESIS_HASH,
            Network::Regtest => REGTEST_GENESIS_HASH,
        };
        if self.genesis_hash.to_hex() != expected {
            return Err(Error::GenesisMismatch {
                network: self.network,
                expected,
                computed: self.genesis_hash,
            });
        }
        if self.network == Network::Main && self.genesis.header.merkle_root.to_hex() != MAIN_MERKLE_ROOT {
            return Err(Error::MerkleRootMismatch {
                network: self.network,
                expected: MAIN_MERKLE_ROOT,
                computed: self.genesis.header.merkle_root,
            });
        }
        Ok(())
    }

    fn main() -> Result<ChainParams, Error> {
        let genesis = genesis_block(Network::Main);
        Ok(ChainParams {
            network: Network::Main,
            message_start: Network::Main.message_start(),
            alert_pubkey: hex_key(MAIN_ALERT_KEY),
            default_port: 43210,
            genesis_hash: genesis.block_hash(),
            start_masternode_payments: genesis.header.time + MASTERNODE_PAYMENTS_DELAY,
            genesis,
            consensus: Params::new(Network::Main),
            base58_prefixes: Base58Prefixes::MAIN,
            dns_seeds: vec![
                DnsSeed::new("basexcoin.io", "dnsseed1.basexcoin.io"),
                DnsSeed::new("basexcoin.io", "dnsseed2.basexcoin.io"),
                DnsSeed::new("95.213.200.76", "95.213.200.76"),
                DnsSeed::new("37.228.119.205", "37.228.119.205"),
            ],
            fixed_seeds: seeds::fixed_seeds(seeds::MAIN_FIXED_SEEDS),
            checkpoints: Checkpoints::for_network(Network::Main)?,
            spork_pubkey: MAIN_SPORK_KEY,
            masternode_pool_dummy_address: "BSJVWUkt6HtSCY2SaJ2akeyJUg8bg1hW3S",
            pool_max_transactions: 3,
            budget_fee_confirmations: 6,
            mining_requires_peers: true,
            allow_min_difficulty_blocks: false,
            default_consistency_checks: false,
            require_standard: true,
            mine_blocks_on_demand: false,
            skip_proof_of_work_check: false,
            testnet_to_be_deprecated_field_rpc: false,
            headers_first_syncing_active: false,
        })
    }

    fn testnet() -> Result<ChainParams, Error> {
        let genesis = genesis_block(Network::Test);
        Ok(ChainParams {
            network: Network::Test,
            message_start: Network::Test.message_start(),
            alert_pubkey: hex_key(TEST_ALERT_KEY),
            default_port: 43215,
            genesis_hash: genesis.block_hash(),
            start_masternode_payments: genesis.header.time + MASTERNODE_PAYMENTS_DELAY,
            genesis,
            consensus: Params::new(Network::Test),
            base58_prefixes: Base58Prefixes::TEST,
            dns_seeds: vec![],
            fixed_seeds: vec![],
            checkpoints: Checkpoints::for_network(Network::Test)?,
            spork_pubkey: TEST_SPORK_KEY,
            masternode_pool_dummy_address: "bbJ4Qad4xc77PpLzMx6rUegAs6aUPWkcUq",
            pool_max_transactions: 2,
            budget_fee_confirmations: 3,
            require_standard: false,
            testnet_to_be_deprecated_field_rpc: true,
            ..ChainParams::main()?
        })
    }

    fn regtest() -> Result<ChainParams, Error> {
        let genesis = genesis_block(Network::Regtest);
        Ok(ChainParams {
            network: Network::Regtest,
            message_start: Network::Regtest.message_start(),
            default_port: 43214,
            genesis_hash: genesis.block_hash(),
            genesis,
            consensus: Params::new(Network::Regtest),
            dns_seeds: vec![],
            fixed_seeds: vec![],
            checkpoints: Checkpoints::for_network(Network::Regtest)?,
            mining_requires_peers: false,
            allow_min_difficulty_blocks: true,
            default_consistency_checks: true,
            require_standard: false,
            mine_blocks_on_demand: true,
            testnet_to_be_deprecated_field_rpc: false,
            ..ChainParams::testnet()?
        })
    }

    fn unittest() -> Result<ChainParams, Error> {
        Ok(ChainParams {
            network: Network::UnitTest,
            default_port: 43212,
            consensus: Params::new(Network::UnitTest),
            dns_seeds: vec![],
            fixed_seeds: vec![],
            mining_requires_peers: false,
            default_consistency_checks: true,
            allow_min_difficulty_blocks: false,
            mine_blocks_on_demand: true,
            ..ChainParams::main()?
        })
    }

    /// Advisory estimate of the chain height at `timestamp`: the last
    /// checkpoint height plus the transactions the checkpoint data projects
    /// since then, each counted as one block. Never used for validation.
    pub fn estimated_height_for(&self, timestamp: u64) -> u32 {
        let checkpoints = &self.checkpoints;
        let projected = checkpoints.estimated_tx_count(timestamp) - checkpoints.tx_count_at_checkpoint as f64;
        let ahead = if projected > 0.0 { projected.min(f64::from(u32::max_value())) as u32 } else { 0 };
        checkpoints.total_blocks_estimate().saturating_add(ahead)
    }
}

fn hex_key(s: &str) -> Vec<u8> {
    // The keys above are compiled-in hex literals.
    Vec::<u8>::from_hex(s).unwrap_or_default()
}
