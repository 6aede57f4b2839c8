#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    CurrencyContext, Expense, Money, NetBalance, RoundingMode, SettlementPlan, Transfer,
};
pub use services::{
    QuantizeError, SettlementEngine, SettlementError, ShareBreakdown, compute_balances,
    compute_share, quantize_balances,
};
