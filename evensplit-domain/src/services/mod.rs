pub mod balance_calculator;
pub mod balance_rounding;
pub mod settlement_engine;
pub mod share_calculator;

pub use balance_calculator::compute_balances;
pub use balance_rounding::{MAX_SETTLEMENT_SCALE, QuantizeError, quantize_balances};
pub use settlement_engine::{SettlementEngine, SettlementError};
pub use share_calculator::{ShareBreakdown, compute_share};
