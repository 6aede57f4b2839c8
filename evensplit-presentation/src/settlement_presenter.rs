use evensplit_application::SettlementResult;
use std::fmt::Write;

/// Renders a settlement result as plain text.
///
/// Amounts are bare numerics; attaching a currency symbol or locale
/// formatting is the caller's concern.
pub struct SettlementPresenter;

impl SettlementPresenter {
    pub fn render(result: &SettlementResult) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{} members spent {} in total",
            result.member_count, result.total
        );
        let _ = writeln!(out, "{} per person", result.per_capita_share);

        let _ = writeln!(out);
        let _ = writeln!(out, "Balances");
        let width = result
            .balances
            .iter()
            .map(|balance| balance.member.len())
            .max()
            .unwrap_or(0);
        for balance in &result.balances {
            let sign = if balance.balance.is_negative() { "" } else { "+" };
            let _ = writeln!(
                out,
                "  {:width$}  {sign}{}",
                balance.member, balance.balance
            );
        }

        if result.transfers.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "No transfers needed");
            return out;
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Transfers");
        for transfer in &result.transfers {
            let _ = writeln!(
                out,
                "  {} pays {} {}",
                transfer.from, transfer.to, transfer.amount
            );
        }

        out
    }
}
