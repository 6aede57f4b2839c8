#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod ports;
pub mod settlement_processor;

pub use model::{ExpenseRecord, PersonBalance, PlannedTransfer, SettlementResult};
pub use ports::{ExpenseLedger, MemberRoster};
pub use settlement_processor::SettlementProcessor;
