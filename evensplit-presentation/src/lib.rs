#![warn(clippy::uninlined_format_args)]

pub mod settlement_presenter;

pub use settlement_presenter::SettlementPresenter;
