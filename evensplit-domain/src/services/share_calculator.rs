use rust_decimal::Decimal;

use crate::{
    model::{CurrencyContext, Expense, Money},
    services::settlement_engine::SettlementError,
};

/// Pooled total and its equal split, before and after rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShareBreakdown {
    pub total: Money,
    /// Full-precision quotient; balances are derived from this so rounding
    /// happens once, after summing.
    pub exact_share: Money,
    /// The reported per-capita share, rounded to the currency's minor unit.
    pub rounded_share: Money,
}

/// Sums the ledger and splits it evenly across the roster.
///
/// A zero-member roster is only an error when money was actually spent;
/// an empty group with an empty ledger is a degenerate no-op.
pub fn compute_share(
    expenses: &[Expense<'_>],
    member_count: usize,
    context: CurrencyContext,
) -> Result<ShareBreakdown, SettlementError> {
    let total: Money = expenses.iter().map(|expense| expense.amount).sum();

    if member_count == 0 {
        if total.is_zero() {
            return Ok(ShareBreakdown {
                total,
                exact_share: Money::ZERO,
                rounded_share: Money::ZERO,
            });
        }
        return Err(SettlementError::EmptyRoster { total });
    }

    let exact = total.as_decimal() / Decimal::from(member_count as u64);
    let rounded = exact.round_dp_with_strategy(context.scale, context.rounding_strategy());

    Ok(ShareBreakdown {
        total,
        exact_share: Money::from_decimal(exact),
        rounded_share: Money::from_decimal(rounded),
    })
}
