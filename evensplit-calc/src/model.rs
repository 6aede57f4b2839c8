/// Net position of one member in integer minor units.
/// Positive: still owes money into the pool; negative: is owed money.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonBalance<'a> {
    pub name: &'a str,
    pub balance: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payment<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: i64,
}
