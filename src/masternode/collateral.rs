// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Masternode collateral schedule
//!
//! Sixteen collateral amounts, each bound to a spork whose value is the
//! last block height at which that amount is required. Tiers are tried in
//! tier order and the first one whose threshold is at or above the height
//! wins; past every threshold the last tier applies.
//!

use std::fmt;

use crate::util::amount::Amount;

/// The collateral sporks, one per tier, in tier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum Spork {
    /// Last height requiring 3500 BSX
    SPORK_19_COLLATERAL_3500,
    /// Last height requiring 4300 BSX
    SPORK_20_COLLATERAL_4300,
    /// Last height requiring 4600 BSX
    SPORK_21_COLLATERAL_4600,
    /// Last height requiring 4850 BSX
    SPORK_22_COLLATERAL_4850,
    /// Last height requiring 5050 BSX
    SPORK_23_COLLATERAL_5050,
    /// Last height requiring 5300 BSX
    SPORK_24_COLLATERAL_5300,
    /// Last height requiring 5600 BSX
    SPORK_25_COLLATERAL_5600,
    /// Last height requiring 5950 BSX
    SPORK_26_COLLATERAL_5950,
    /// Last height requiring 6300 BSX
    SPORK_27_COLLATERAL_6300,
    /// Last height requiring 7000 BSX
    SPORK_29_COLLATERAL_7000,
    /// Last height requiring 7350 BSX
    SPORK_30_COLLATERAL_7350,
    /// Last height requiring 7700 BSX
    SPORK_31_COLLATERAL_7700,
    /// Last height requiring 8050 BSX
    SPORK_32_COLLATERAL_8050,
    /// Last height requiring 8400 BSX
    SPORK_33_COLLATERAL_8400,
    /// Last height requiring 8750 BSX
    SPORK_34_COLLATERAL_8750,
    /// Last height requiring 9500 BSX
    SPORK_35_COLLATERAL_9500,
}

impl fmt::Display for Spork {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Collateral tiers in tier order: the spork and the amount in whole coins.
pub const TIERS: [(Spork, u64); 16] = [
    (Spork::SPORK_19_COLLATERAL_3500, 3500),
    (Spork::SPORK_20_COLLATERAL_4300, 4300),
    (Spork::SPORK_21_COLLATERAL_4600, 4600),
    (Spork::SPORK_22_COLLATERAL_4850, 4850),
    (Spork::SPORK_23_COLLATERAL_5050, 5050),
    (Spork::SPORK_24_COLLATERAL_5300, 5300),
    (Spork::SPORK_25_COLLATERAL_5600, 5600),
    (Spork::SPORK_26_COLLATERAL_5950, 5950),
    (Spork::SPORK_27_COLLATERAL_6300, 6300),
    (Spork::SPORK_29_COLLATERAL_7000, 7000),
    (Spork::SPORK_30_COLLATERAL_7350, 7350),
    (Spork::SPORK_31_COLLATERAL_7700, 7700),
    (Spork::SPORK_32_COLLATERAL_8050, 8050),
    (Spork::SPORK_33_COLLATERAL_8400, 8400),
    (Spork::SPORK_34_COLLATERAL_8750, 8750),
    (Spork::SPORK_35_COLLATERAL_9500, 9500),
];

/// Whether `amount` is exactly one of the tier amounts.
pub fn is_tier_amount(amount: Amount) -> bool {
    TIERS.iter().any(|&(_, coins)| Amount::from_coins(coins) == amount)
}

/// The amount of the first tier.
pub fn first_tier_amount() -> Amount {
    Amount::from_coins(TIERS[0].1)
}

/// Read access to the current spork values. Values come from the network
/// and are not trusted to be ordered.
pub trait SporkValues {
    /// Current value of `spork`.
    fn spork_value(&self, spork: Spork) -> i64;
}

impl<'a, T: SporkValues + ?Sized> SporkValues for &'a T {
    fn spork_value(&self, spork: Spork) -> i64 {
        (**self).spork_value(spork)
    }
}

/// Resolves the collateral amount required at a block height.
#[derive(Debug, Clone)]
pub struct CollateralScheduler<S> {
    sporks: S,
}

impl<S: SporkValues> CollateralScheduler<S> {
    /// A scheduler reading thresholds from `sporks`.
    pub fn new(sporks: S) -> CollateralScheduler<S> {
        CollateralScheduler { sporks }
    }

    /// The collateral required for an output created at `height`.
    pub fn resolve(&self, height: u32) -> Amount {
        let height = i64::from(height);
        let coins = TIERS
            .iter()
            .find(|&&(spork, _)| height <= self.sporks.spork_value(spork))
            .unwrap_or(&TIERS[TIERS.len() - 1])
            .1;
        Amount::from_coins(coins)
    }

    /// Whether `amount` is exactly one of the tier amounts, at any height.
    pub fn is_recognized_amount(&self, amount: Amount) -> bool {
        is_tier_amount(amount)
    }

    /// Current thresholds in tier order.
    pub fn thresholds(&self) -> [i64; 16] {
        let mut thresholds = [0i64; 16];
        for (slot, &(spork, _)) in thresholds.iter_mut().zip(TIERS.iter()) {
            *slot = self.sporks.spork_value(spork);
        }
        thresholds
    }

    /// Whether the thresholds strictly ascend in tier order.
    pub fn thresholds_are_monotonic(&self) -> bool {
        self.thresholds().windows(2).all(|pair| pair[0] < pair[1])
    }

    /// Logs a warning when the thresholds do not strictly ascend.
    /// Resolution still follows tier order.
    pub fn audit_thresholds(&self) -> bool {
        let thresholds = self.thresholds();
        let monotonic = thresholds.windows(2).all(|pair| pair[0] < pair[1]);
        if !monotonic {
            warn!("Collateral spork thresholds are not ascending: {:?}", &thresholds[..]);
        }
        monotonic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockSporks;

    fn ascending() -> MockSporks {
        // Tier i ends at height 1000 * (i + 1).
        MockSporks::from_fn(|i| 1000 * (i as i64 + 1))
    }

    #[test]
    fn resolves_first_matching_tier() {
        let scheduler = CollateralScheduler::new(ascending());
        assert_eq!(scheduler.resolve(0), Amount::from_coins(3500));
        assert_eq!(scheduler.resolve(1000), Amount::from_coins(3500));
        assert_eq!(scheduler.resolve(1001), Amount::from_coins(4300));
        assert_eq!(scheduler.resolve(9000), Amount::from_coins(6300));
        assert_eq!(scheduler.resolve(9001), Amount::from_coins(7000));
        assert_eq!(scheduler.resolve(16000), Amount::from_coins(9500));
    }

    #[test]
    fn past_all_thresholds_uses_last_tier() {
        let scheduler = CollateralScheduler::new(ascending());
        assert_eq!(scheduler.resolve(16001), Amount::from_coins(9500));
        assert_eq!(scheduler.resolve(u32::max_value()), Amount::from_coins(9500));
    }

    #[test]
    fn non_monotonic_thresholds_follow_tier_order() {
        let mut sporks = ascending();
        sporks.set(Spork::SPORK_20_COLLATERAL_4300, 50_000);
        sporks.set(Spork::SPORK_21_COLLATERAL_4600, 10);
        let scheduler = CollateralScheduler::new(&sporks);
        assert!(!scheduler.thresholds_are_monotonic());
        assert!(!scheduler.audit_thresholds());

        // The 4300 tier covers every height up to 50000.
        assert_eq!(scheduler.resolve(1001), Amount::from_coins(4300));
        assert_eq!(scheduler.resolve(20_000), Amount::from_coins(4300));
        assert_eq!(scheduler.resolve(50_001), Amount::from_coins(9500));

        let mut previous = Amount::ZERO;
        for height in (0..60_000).step_by(97) {
            let amount = scheduler.resolve(height);
            assert!(amount >= previous, "resolve decreased at {}", height);
            previous = amount;
        }
    }

    #[test]
    fn monotonic_audit_passes() {
        let scheduler = CollateralScheduler::new(ascending());
        assert!(scheduler.thresholds_are_monotonic());
        assert!(scheduler.audit_thresholds());
        assert_eq!(scheduler.thresholds()[15], 16000);
    }

    #[test]
    fn recognized_amounts() {
        let scheduler = CollateralScheduler::new(ascending());
        for &(_, coins) in TIERS.iter() {
            let amount = Amount::from_coins(coins);
            assert!(scheduler.is_recognized_amount(amount));
            assert!(!scheduler.is_recognized_amount(amount + Amount::ONE_SAT));
            assert!(!scheduler.is_recognized_amount(amount - Amount::ONE_SAT));
        }
        assert!(!scheduler.is_recognized_amount(Amount::from_coins(6650)));
        assert!(!scheduler.is_recognized_amount(Amount::ZERO));
        assert_eq!(Spork::SPORK_35_COLLATERAL_9500.to_string(), "SPORK_35_COLLATERAL_9500");
    }
}
