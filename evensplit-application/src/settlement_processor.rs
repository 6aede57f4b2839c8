use crate::{
    model::{PersonBalance, PlannedTransfer, SettlementResult},
    ports::{ExpenseLedger, MemberRoster},
};
use evensplit_domain::{CurrencyContext, Expense, SettlementEngine, SettlementError};

/// Wires the collaborator ports into the settlement engine.
#[derive(Clone, Copy)]
pub struct SettlementProcessor<'a> {
    ledger: &'a dyn ExpenseLedger,
    roster: &'a dyn MemberRoster,
}

impl<'a> SettlementProcessor<'a> {
    pub fn new(ledger: &'a dyn ExpenseLedger, roster: &'a dyn MemberRoster) -> Self {
        Self { ledger, roster }
    }

    /// Snapshots both collaborators and computes a fresh settlement plan.
    pub fn compute(&self, context: CurrencyContext) -> Result<SettlementResult, SettlementError> {
        let records = self.ledger.snapshot();
        let names = self.roster.members();

        let members: Vec<&str> = names.iter().map(String::as_str).collect();
        let expenses: Vec<Expense<'_>> = records
            .iter()
            .map(|record| Expense {
                payer: record.payer.as_str(),
                amount: record.amount,
            })
            .collect();

        let plan = SettlementEngine
            .settle(&expenses, &members, context)
            .inspect_err(|err| {
                tracing::error!(
                    member_count = members.len(),
                    expense_count = expenses.len(),
                    %err,
                    "Settlement rejected"
                );
            })?;

        Ok(SettlementResult {
            member_count: members.len(),
            total: plan.total,
            per_capita_share: plan.per_capita_share,
            balances: plan
                .balances
                .iter()
                .map(|balance| PersonBalance {
                    member: balance.member.to_string(),
                    balance: balance.amount,
                })
                .collect(),
            transfers: plan
                .transfers
                .iter()
                .map(|transfer| PlannedTransfer {
                    from: transfer.from.to_string(),
                    to: transfer.to.to_string(),
                    amount: transfer.amount,
                })
                .collect(),
        })
    }
}
