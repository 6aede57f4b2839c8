//! Balance quantization with deferred rounding and zero-sum repair.
//!
//! Balances arrive at full decimal precision (the exact share minus what a
//! member paid) and leave as exact multiples of the currency's minor unit
//! that sum to exactly zero:
//! 1. The input total must already sit within epsilon of zero.
//! 2. Each balance is rounded to the minor unit under the context's
//!    rounding mode.
//! 3. Any residual unit count is repaired with single-unit adjustments,
//!    assigned deterministically to the members who gained most from
//!    rounding, ties resolved by roster order.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::model::{CurrencyContext, Money, NetBalance};

/// Decimal precision caps the scale the quantizer can represent.
pub const MAX_SETTLEMENT_SCALE: u32 = 22;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantizeError {
    /// The input total exceeds the drift tolerance; upstream arithmetic is
    /// corrupt and no plausible-looking plan is produced from it.
    #[error("Sum of balances drifted from zero by {residual}")]
    Drift { residual: Money },
    #[error("Scale {scale} exceeds the supported precision ({max_supported})")]
    UnsupportedScale { scale: u32, max_supported: u32 },
    #[error("A rounded balance is not an integral number of minor units")]
    NonIntegral,
    #[error("Zero-sum repair failed to restore an exact zero total")]
    RepairFailed,
}

/// Drift tolerance: one millionth of the minor unit. Division residue from
/// share computation sits far below this; genuine imbalance sits far above.
fn settlement_epsilon(scale: u32) -> Decimal {
    Decimal::new(1, scale + 6)
}

struct QuantizedEntry<'a> {
    member: &'a str,
    rounded: Decimal,
    diff: Decimal,
}

pub fn quantize_balances<'a>(
    balances: &[NetBalance<'a>],
    context: CurrencyContext,
) -> Result<Vec<NetBalance<'a>>, QuantizeError> {
    if context.scale > MAX_SETTLEMENT_SCALE {
        return Err(QuantizeError::UnsupportedScale {
            scale: context.scale,
            max_supported: MAX_SETTLEMENT_SCALE,
        });
    }

    let minor_unit = context.minor_unit();
    let epsilon = settlement_epsilon(context.scale);
    let original_sum: Money = balances.iter().map(|balance| balance.amount).sum();
    if original_sum.abs().as_decimal() > epsilon {
        tracing::error!(
            member_count = balances.len(),
            sum_original = %original_sum,
            epsilon = %epsilon,
            "Balance quantization rejected due to input drift"
        );
        return Err(QuantizeError::Drift {
            residual: original_sum,
        });
    }

    let strategy = context.rounding_strategy();
    let mut residual_units = 0i128;
    let mut entries = Vec::with_capacity(balances.len());
    for balance in balances {
        let original = balance.amount.as_decimal();
        let units = quantize_to_int(original, minor_unit, strategy)?;
        residual_units += i128::from(units);
        let rounded = Decimal::from(units) * minor_unit;
        entries.push(QuantizedEntry {
            member: balance.member,
            rounded,
            diff: rounded - original,
        });
    }

    if residual_units != 0 {
        let adjustment_count = usize::try_from(residual_units.unsigned_abs())
            .map_err(|_| QuantizeError::RepairFailed)?;
        if adjustment_count > entries.len() {
            tracing::error!(
                residual_units,
                member_count = entries.len(),
                "Residual unit count exceeds participant count during zero-sum repair"
            );
            return Err(QuantizeError::RepairFailed);
        }

        let score_sign = if residual_units > 0 {
            Decimal::ONE
        } else {
            Decimal::NEGATIVE_ONE
        };

        // Largest score first: the members who gained most from rounding
        // give a unit back (or receive one, under a negative residual).
        // Exact ties resolve by roster position.
        let mut ranked: Vec<(usize, Decimal)> = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (idx, entry.diff * score_sign))
            .collect();
        ranked.sort_by(|(idx_a, score_a), (idx_b, score_b)| {
            score_b.cmp(score_a).then_with(|| idx_a.cmp(idx_b))
        });

        let adjustment = if residual_units > 0 {
            -minor_unit
        } else {
            minor_unit
        };
        for &(idx, _) in ranked.iter().take(adjustment_count) {
            entries[idx].rounded += adjustment;
        }

        tracing::debug!(
            residual_units,
            adjustment_count,
            member_count = entries.len(),
            "Applied zero-sum repair adjustments"
        );
    }

    let repaired_sum: Decimal = entries.iter().map(|entry| entry.rounded).sum();
    if !repaired_sum.is_zero() {
        tracing::error!(
            sum_repaired = %repaired_sum,
            member_count = entries.len(),
            "Zero-sum repair left a non-zero total"
        );
        return Err(QuantizeError::RepairFailed);
    }

    Ok(entries
        .into_iter()
        .map(|entry| NetBalance {
            member: entry.member,
            amount: Money::from_decimal(entry.rounded),
        })
        .collect())
}

fn quantize_to_int(
    original: Decimal,
    minor_unit: Decimal,
    strategy: RoundingStrategy,
) -> Result<i64, QuantizeError> {
    let units = (original / minor_unit).round_dp_with_strategy(0, strategy);
    let Some(quantized) = units.to_i64() else {
        tracing::warn!(
            %original,
            rounded_units = %units,
            "Minor-unit conversion failed during quantization"
        );
        return Err(QuantizeError::NonIntegral);
    };
    if Decimal::from(quantized) != units {
        return Err(QuantizeError::NonIntegral);
    }
    Ok(quantized)
}
