use evensplit_application::{ExpenseLedger, ExpenseRecord, MemberRoster};
use evensplit_domain::Money;
use nom::{
    IResult, Parser,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, digit1, space0, space1},
    combinator::{map_res, opt, recognize},
    multi::separated_list1,
    sequence::delimited,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerParseError {
    #[error("Ledger must declare `members:` before any expense")]
    MissingRoster,
    #[error("Syntax error at line {line}: {detail}")]
    Syntax { line: usize, detail: String },
}

/// A parsed ledger file: one `members:` declaration followed by
/// `<payer> <amount>` lines. Blank lines and `#` comments are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerFile {
    members: Vec<String>,
    expenses: Vec<ExpenseRecord>,
}

impl LedgerFile {
    pub fn parse(source: &str) -> Result<Self, LedgerParseError> {
        let mut members: Option<Vec<String>> = None;
        let mut expenses = Vec::new();

        for (idx, raw_line) in source.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line_no = idx + 1;

            if members.is_none() {
                match members_line(line) {
                    Ok(("", names)) => {
                        members = Some(names.into_iter().map(str::to_string).collect());
                        continue;
                    }
                    Ok((rest, _)) => {
                        return Err(syntax(line_no, format!("unexpected trailing input '{rest}'")));
                    }
                    Err(_) => return Err(LedgerParseError::MissingRoster),
                }
            }

            match expense_line(line) {
                Ok(("", (payer, amount))) => expenses.push(ExpenseRecord {
                    payer: payer.to_string(),
                    amount,
                }),
                Ok((rest, _)) => {
                    return Err(syntax(line_no, format!("unexpected trailing input '{rest}'")));
                }
                Err(_) => {
                    return Err(syntax(line_no, "expected `<payer> <amount>`".to_string()));
                }
            }
        }

        let Some(members) = members else {
            return Err(LedgerParseError::MissingRoster);
        };

        Ok(Self { members, expenses })
    }
}

impl ExpenseLedger for LedgerFile {
    fn snapshot(&self) -> Vec<ExpenseRecord> {
        self.expenses.clone()
    }
}

impl MemberRoster for LedgerFile {
    fn members(&self) -> Vec<String> {
        self.members.clone()
    }
}

fn syntax(line: usize, detail: String) -> LedgerParseError {
    LedgerParseError::Syntax { line, detail }
}

fn member_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != ',' && c != ':' && c != '#')(input)
}

fn members_line(input: &str) -> IResult<&str, Vec<&str>> {
    let (input, _) = tag_no_case("members")(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = char(':')(input)?;
    separated_list1(char(','), delimited(space0, member_name, space0)).parse(input)
}

fn amount(input: &str) -> IResult<&str, Money> {
    map_res(recognize((digit1, opt((char('.'), digit1)))), |raw: &str| {
        Decimal::from_str(raw).map(Money::from_decimal)
    })
    .parse(input)
}

fn expense_line(input: &str) -> IResult<&str, (&str, Money)> {
    let (input, payer) = member_name(input)?;
    let (input, _) = space1(input)?;
    let (input, value) = amount(input)?;
    Ok((input, (payer, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(payer: &str, units: i64, scale: u32) -> ExpenseRecord {
        ExpenseRecord {
            payer: payer.to_string(),
            amount: Money::new(units, scale),
        }
    }

    #[test]
    fn parses_roster_and_expenses() {
        let source = "members: Alice, Bob, Chris\nAlice 30000\nBob 4500.50\n";
        let ledger = LedgerFile::parse(source).expect("ledger should parse");

        assert_eq!(ledger.members(), vec!["Alice", "Bob", "Chris"]);
        assert_eq!(
            ledger.snapshot(),
            vec![record("Alice", 30000, 0), record("Bob", 450050, 2)]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let source = "# trip to the coast\n\nmembers: A, B\n\n# groceries\nA 12\n";
        let ledger = LedgerFile::parse(source).expect("ledger should parse");

        assert_eq!(ledger.members(), vec!["A", "B"]);
        assert_eq!(ledger.snapshot(), vec![record("A", 12, 0)]);
    }

    #[test]
    fn roster_declaration_is_case_insensitive() {
        let ledger = LedgerFile::parse("Members: A, B\n").expect("ledger should parse");
        assert_eq!(ledger.members(), vec!["A", "B"]);
    }

    #[rstest]
    #[case::empty("")]
    #[case::expense_first("Alice 30\nmembers: Alice\n")]
    #[case::comment_only("# nothing here\n")]
    fn requires_a_roster_declaration(#[case] source: &str) {
        assert_eq!(LedgerFile::parse(source), Err(LedgerParseError::MissingRoster));
    }

    #[rstest]
    #[case::missing_amount("members: A\nA\n", 2)]
    #[case::negative_amount("members: A\nA -5\n", 2)]
    #[case::trailing_garbage("members: A\nA 10 extra\n", 2)]
    #[case::amount_first("members: A, B\n10 A\n", 2)]
    fn reports_syntax_errors_with_line_numbers(#[case] source: &str, #[case] line: usize) {
        match LedgerFile::parse(source) {
            Err(LedgerParseError::Syntax { line: actual, .. }) => assert_eq!(actual, line),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn keeps_duplicate_roster_entries_for_the_engine_to_reject() {
        // Parsing is purely syntactic; semantic validation stays in the
        // settlement engine.
        let ledger = LedgerFile::parse("members: A, A\n").expect("ledger should parse");
        assert_eq!(ledger.members(), vec!["A", "A"]);
    }
}
