use evensplit_calc::{PersonBalance, PlanError, plan_transfers};
use fxhash::FxHashSet;
use thiserror::Error;

use crate::{
    model::{CurrencyContext, Expense, Money, NetBalance, SettlementPlan, Transfer},
    services::{
        balance_calculator::compute_balances,
        balance_rounding::{QuantizeError, quantize_balances},
        share_calculator::{ShareBreakdown, compute_share},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    #[error("Settlement requires at least one member (recorded total {total})")]
    EmptyRoster { total: Money },
    #[error("Member identifiers must be non-empty")]
    BlankMember,
    #[error("Duplicate member '{member}' in the roster")]
    DuplicateMember { member: String },
    #[error("Expense payer '{payer}' is not in the member roster")]
    UnknownPayer { payer: String },
    #[error("Negative amount {amount} recorded for payer '{payer}'")]
    NegativeAmount { payer: String, amount: Money },
    #[error("Sum of balances drifted from zero by {residual}")]
    BalanceDrift { residual: Money },
    #[error("Scale {scale} exceeds the supported precision ({max_supported})")]
    UnsupportedScale { scale: u32, max_supported: u32 },
    #[error("Quantized balances could not be settled exactly")]
    QuantizationFailed,
}

impl From<QuantizeError> for SettlementError {
    fn from(err: QuantizeError) -> Self {
        match err {
            QuantizeError::Drift { residual } => SettlementError::BalanceDrift { residual },
            QuantizeError::UnsupportedScale {
                scale,
                max_supported,
            } => SettlementError::UnsupportedScale {
                scale,
                max_supported,
            },
            QuantizeError::NonIntegral | QuantizeError::RepairFailed => {
                SettlementError::QuantizationFailed
            }
        }
    }
}

impl From<PlanError> for SettlementError {
    fn from(err: PlanError) -> Self {
        // Both planner failures require a non-zero-sum or unsettleable
        // input, which quantization has already ruled out.
        match err {
            PlanError::ImbalancedTotal(_) | PlanError::UnsettledResidue => {
                SettlementError::QuantizationFailed
            }
        }
    }
}

/// The settlement computation, end to end.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Computes the equal share, per-member net balances, and a greedy
    /// transfer plan that zeroes every balance.
    ///
    /// Pure and synchronous; recomputed fresh on every call. Invalid input
    /// yields a typed error, never a plausible-looking wrong plan.
    pub fn settle<'a>(
        &self,
        expenses: &[Expense<'a>],
        members: &[&'a str],
        context: CurrencyContext,
    ) -> Result<SettlementPlan<'a>, SettlementError> {
        let roster = validate_roster(members)?;
        validate_amounts(expenses)?;

        let ShareBreakdown {
            total,
            exact_share,
            rounded_share,
        } = compute_share(expenses, members.len(), context)?;

        validate_payers(expenses, &roster)?;

        if total.is_zero() {
            // Nothing was spent: every balance is zero and no transfer is
            // needed.
            return Ok(SettlementPlan {
                total,
                per_capita_share: rounded_share,
                balances: members
                    .iter()
                    .map(|&member| NetBalance {
                        member,
                        amount: Money::ZERO,
                    })
                    .collect(),
                transfers: Vec::new(),
            });
        }

        let balances = compute_balances(expenses, members, exact_share);
        let quantized = quantize_balances(&balances, context)?;

        let people = quantized
            .iter()
            .map(|balance| {
                context
                    .to_minor_units(balance.amount)
                    .map(|units| PersonBalance {
                        name: balance.member,
                        balance: units,
                    })
                    .ok_or(SettlementError::QuantizationFailed)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let payments = plan_transfers(people)?;
        let transfers: Vec<Transfer<'a>> = payments
            .into_iter()
            .map(|payment| Transfer {
                from: payment.from,
                to: payment.to,
                amount: Money::new(payment.amount, context.scale),
            })
            .collect();

        tracing::debug!(
            member_count = members.len(),
            expense_count = expenses.len(),
            transfer_count = transfers.len(),
            total = %total,
            "Settlement plan computed"
        );

        Ok(SettlementPlan {
            total,
            per_capita_share: rounded_share,
            balances: quantized,
            transfers,
        })
    }
}

fn validate_roster<'a>(members: &[&'a str]) -> Result<FxHashSet<&'a str>, SettlementError> {
    let mut roster = FxHashSet::default();
    roster.reserve(members.len());
    for &member in members {
        if member.is_empty() {
            return Err(SettlementError::BlankMember);
        }
        if !roster.insert(member) {
            return Err(SettlementError::DuplicateMember {
                member: member.to_string(),
            });
        }
    }
    Ok(roster)
}

fn validate_amounts(expenses: &[Expense<'_>]) -> Result<(), SettlementError> {
    for expense in expenses {
        if expense.amount.is_negative() {
            return Err(SettlementError::NegativeAmount {
                payer: expense.payer.to_string(),
                amount: expense.amount,
            });
        }
    }
    Ok(())
}

fn validate_payers(
    expenses: &[Expense<'_>],
    roster: &FxHashSet<&str>,
) -> Result<(), SettlementError> {
    for expense in expenses {
        if !roster.contains(expense.payer) {
            return Err(SettlementError::UnknownPayer {
                payer: expense.payer.to_string(),
            });
        }
    }
    Ok(())
}
