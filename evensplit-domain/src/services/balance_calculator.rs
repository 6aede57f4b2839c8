use fxhash::FxHashMap;

use crate::model::{Expense, Money, NetBalance};

/// Derives each member's signed deviation from the equal share.
///
/// Output follows roster order; members who paid nothing still get an
/// entry (they owe the full share). Amounts keep full decimal precision;
/// quantization to the minor unit is a separate step.
pub fn compute_balances<'a>(
    expenses: &[Expense<'a>],
    members: &[&'a str],
    exact_share: Money,
) -> Vec<NetBalance<'a>> {
    let mut paid: FxHashMap<&str, Money> = FxHashMap::default();
    for expense in expenses {
        *paid.entry(expense.payer).or_insert(Money::ZERO) += expense.amount;
    }

    members
        .iter()
        .map(|&member| NetBalance {
            member,
            amount: exact_share - paid.get(member).copied().unwrap_or(Money::ZERO),
        })
        .collect()
}
