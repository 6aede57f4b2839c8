use crate::model::ExpenseRecord;

/// Read-only view of the recorded expenses. Implementations hand out a
/// snapshot; edits on their side are full-list overwrites, never patches.
pub trait ExpenseLedger {
    fn snapshot(&self) -> Vec<ExpenseRecord>;
}

/// The group's participant identifiers. Uniqueness is validated by the
/// engine, not assumed here.
pub trait MemberRoster {
    fn members(&self) -> Vec<String>;
}
