// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! Amounts
//!
//! This module mainly introduces the [Amount] type, the value carried by
//! transaction outputs and by the masternode collateral tiers.
//!

use std::default;
use std::fmt;
use std::ops;

/// Satoshis in one BSX.
const COIN: u64 = 100_000_000;

/// Amount
///
/// The [Amount] type expresses BSX values in satoshi precision.
///
/// Warning!
///
/// The operators from [std::ops] panic on overflow or underflow. Use the
/// `checked_` methods where the operands are not trusted.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);
    /// Exactly one satoshi.
    pub const ONE_SAT: Amount = Amount(1);
    /// Exactly one BSX.
    pub const ONE_BSX: Amount = Amount(COIN);

    /// Create an [Amount] with satoshi precision and the given number of satoshis.
    pub const fn from_sat(satoshi: u64) -> Amount {
        Amount(satoshi)
    }

    /// Create an [Amount] of a whole number of coins.
    pub const fn from_coins(coins: u64) -> Amount {
        Amount(coins * COIN)
    }

    /// Get the number of satoshis in this [Amount].
    pub fn as_sat(self) -> u64 {
        self.0
    }

    /// The maximum value of an [Amount].
    pub fn max_value() -> Amount {
        Amount(u64::max_value())
    }

    /// Checked addition.
    /// Returns [None] if overflow occurred.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Checked subtraction.
    /// Returns [None] if overflow occurred.
    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Checked multiplication.
    /// Returns [None] if overflow occurred.
    pub fn checked_mul(self, rhs: u64) -> Option<Amount> {
        self.0.checked_mul(rhs).map(Amount)
    }
}

impl default::Default for Amount {
    fn default() -> Self {
        Amount::ZERO
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Amount({} satoshi)", self.as_sat())
    }
}

// No one should depend on a binding contract for Display for this type.
// Just using BSX denominated string.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{:08} BSX", self.0 / COIN, self.0 % COIN)
    }
}

impl ops::Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        self.checked_add(rhs).expect("Amount addition error")
    }
}

impl ops::Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Self::Output {
        self.checked_sub(rhs).expect("Amount subtraction error")
    }
}

impl ops::Mul<u64> for Amount {
    type Output = Amount;

    fn mul(self, rhs: u64) -> Self::Output {
        self.checked_mul(rhs).expect("Amount multiplication error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_mul() {
        let sat = Amount::from_sat;

        assert_eq!(sat(15) + sat(15), sat(30));
        assert_eq!(sat(15) - sat(15), sat(0));
        assert_eq!(sat(14) * 3, sat(42));
        assert_eq!(Amount::from_coins(3500), Amount::ONE_BSX * 3500);
        assert_eq!(sat(5).checked_sub(sat(6)), None);
        assert_eq!(Amount::max_value().checked_add(Amount::ONE_SAT), None);
    }

    #[test]
    #[should_panic]
    fn sub_underflow() {
        let _ = Amount::from_sat(1) - Amount::from_sat(2);
    }

    #[test]
    fn to_string() {
        assert_eq!(Amount::ONE_BSX.to_string(), "1.00000000 BSX");
        assert_eq!(Amount::from_sat(1).to_string(), "0.00000001 BSX");
        assert_eq!(Amount::from_coins(9500).to_string(), "9500.00000000 BSX");
        assert_eq!(Amount::from_sat(123_456_789_012).to_string(), "1234.56789012 BSX");
        assert_eq!(Amount::ZERO.to_string(), "0.00000000 BSX");
    }
}
