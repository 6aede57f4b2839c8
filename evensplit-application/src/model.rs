use evensplit_domain::Money;

/// One ledger entry as supplied by the expense collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub payer: String,
    pub amount: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonBalance {
    pub member: String,
    pub balance: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedTransfer {
    pub from: String,
    pub to: String,
    pub amount: Money,
}

/// Owned settlement output, detached from the ledger snapshot it was
/// computed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementResult {
    pub member_count: usize,
    pub total: Money,
    pub per_capita_share: Money,
    pub balances: Vec<PersonBalance>,
    pub transfers: Vec<PlannedTransfer>,
}
