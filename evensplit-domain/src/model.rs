use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Exact decimal money amount.
///
/// Arithmetic is decimal throughout; binary floats never enter the model.
/// Equality and ordering are numeric, so `Money::new(100, 2)` equals
/// `Money::new(1, 0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Money from integer minor units at the given scale
    /// (`Money::new(1250, 2)` is 12.50).
    pub fn new(units: i64, scale: u32) -> Self {
        Self(Decimal::new(units, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|money| money.0).sum())
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        Self(iter.map(|money| money.0).sum())
    }
}

/// One recorded expense: who paid, and how much.
///
/// Amounts are non-negative and immutable once recorded; the ledger
/// replaces the whole list rather than patching entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expense<'a> {
    pub payer: &'a str,
    pub amount: Money,
}

/// Signed deviation of one member from the equal per-capita share.
/// Positive: net debtor; negative: net creditor; zero: settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetBalance<'a> {
    pub member: &'a str,
    pub amount: Money,
}

/// "`from` pays `to` this amount"; always positive, never reflexive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Money,
}

/// Full settlement output, recomputed fresh on every invocation.
///
/// Balances are listed in roster order and sum to exactly zero. Transfers
/// appear in the order the matching loop emitted them; callers must not
/// attach semantics to that order beyond "a valid, balance-zeroing
/// sequence".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementPlan<'a> {
    pub total: Money,
    pub per_capita_share: Money,
    pub balances: Vec<NetBalance<'a>>,
    pub transfers: Vec<Transfer<'a>>,
}

/// Rounding rule applied when amounts are quantized to the minor unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half to the nearest even number (banker's rounding); the
    /// default, since it carries no bias under repeated rounding.
    HalfEven,
    /// Round half away from zero (0.5 -> 1, -0.5 -> -1).
    HalfUp,
}

/// Minor-unit precision and rounding rule of the settlement currency.
///
/// The policy is fixed per invocation; rounding happens once, after
/// summing, never per expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrencyContext {
    /// Decimal places of the minor unit (0 for yen-style, 2 for cent-style).
    pub scale: u32,
    pub rounding_mode: RoundingMode,
}

impl CurrencyContext {
    pub fn with_scale(scale: u32) -> Self {
        Self {
            scale,
            rounding_mode: RoundingMode::HalfEven,
        }
    }

    /// One minor unit as a decimal (0.01 at scale 2).
    pub fn minor_unit(self) -> Decimal {
        Decimal::new(1, self.scale)
    }

    pub(crate) fn rounding_strategy(self) -> RoundingStrategy {
        match self.rounding_mode {
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        }
    }

    /// Converts a money amount to integer minor units under this scale.
    /// `None` when the amount is not an exact multiple of the minor unit
    /// or does not fit in an `i64`.
    pub fn to_minor_units(self, amount: Money) -> Option<i64> {
        let factor = Decimal::from_i128_with_scale(10_i128.checked_pow(self.scale)?, 0);
        let units = amount.as_decimal().checked_mul(factor)?;
        if units.fract() != Decimal::ZERO {
            return None;
        }
        units.to_i64()
    }
}

impl Default for CurrencyContext {
    fn default() -> Self {
        Self::with_scale(0)
    }
}
