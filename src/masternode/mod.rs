// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Masternodes
//!
//! Collateral schedule, message signing and the housekeeping thread.
//!

pub mod collateral;
pub mod pool;
pub mod signer;

pub use self::collateral::{CollateralScheduler, Spork, SporkValues};
pub use self::pool::{Housekeeping, HousekeepingConfig, HousekeepingHandle};
pub use self::signer::{BlockIndex, ChainQuery, MasternodeSigner};
