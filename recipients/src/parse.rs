//! Lenient line parser for raw recipient text.

use crate::set::RecipientSet;
use bgeo_types::{Address, Amount, RecipientEntry};

/// Outcome of parsing a raw recipient list.
///
/// Parsing never fails: malformed lines are dropped, not reported as errors.
/// The dropped line numbers are kept so a caller can tell the user how much
/// of the input survived.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseReport {
    pub set: RecipientSet,
    /// 1-based input line numbers that were dropped.
    pub skipped: Vec<usize>,
}

impl ParseReport {
    /// Number of deduplicated recipients that survived parsing.
    pub fn accepted(&self) -> usize {
        self.set.len()
    }
}

/// Parse raw `address,amount` lines into a deduplicated recipient set.
///
/// Rules, applied per line in input order:
/// - surrounding whitespace is trimmed; blank lines are ignored entirely
/// - the line splits at the first comma; both fields are trimmed
/// - a line with no comma, an empty field, or an amount that does not parse
///   as a finite non-negative number is dropped and its line number recorded
/// - a repeated address keeps its first-seen position and its amounts are
///   summed
pub fn parse(input: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for (line_no, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_address, raw_amount)) = line.split_once(',') else {
            report.skipped.push(line_no + 1);
            continue;
        };

        let parsed = Address::parse(raw_address)
            .ok()
            .zip(Amount::parse(raw_amount).ok());
        match parsed {
            Some((address, amount)) => {
                report.set.insert(RecipientEntry::new(address, amount));
            }
            None => report.skipped.push(line_no + 1),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use bgeo_types::Address;

    fn amounts(report: &ParseReport) -> Vec<(&str, &str)> {
        report
            .set
            .iter()
            .map(|e| (e.address.as_str(), e.amount.as_str()))
            .collect()
    }

    #[test]
    fn sums_duplicate_addresses_in_first_seen_order() {
        let report = parse("A,10\nB,5\nA,2.5");
        assert_eq!(amounts(&report), [("A", "12.5"), ("B", "5")]);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn drops_line_without_comma() {
        let report = parse("A,10\nC\nB,5");
        assert_eq!(amounts(&report), [("A", "10"), ("B", "5")]);
        assert_eq!(report.skipped, [2]);
    }

    #[test]
    fn drops_empty_fields() {
        let report = parse(",5\nA,\n  ,  \nB,1");
        assert_eq!(amounts(&report), [("B", "1")]);
        assert_eq!(report.skipped, [1, 2, 3]);
    }

    #[test]
    fn drops_non_numeric_amounts() {
        let report = parse("A,ten\nB,5");
        assert_eq!(amounts(&report), [("B", "5")]);
        assert_eq!(report.skipped, [1]);
    }

    #[test]
    fn drops_negative_and_non_finite_amounts() {
        let report = parse("A,-3\nB,inf\nC,1");
        assert_eq!(amounts(&report), [("C", "1")]);
        assert_eq!(report.skipped, [1, 2]);
    }

    #[test]
    fn splits_at_first_comma_only() {
        // The remainder after the first comma must still be one number.
        let report = parse("A,1,2");
        assert!(report.set.is_empty());
        assert_eq!(report.skipped, [1]);
    }

    #[test]
    fn ignores_blank_lines_without_recording_them() {
        let report = parse("\nA,10\n\n   \nB,5\n");
        assert_eq!(amounts(&report), [("A", "10"), ("B", "5")]);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn trims_whitespace_around_fields() {
        let report = parse("  A , 10 \n\tB\t,\t5\t");
        assert_eq!(amounts(&report), [("A", "10"), ("B", "5")]);
    }

    #[test]
    fn handles_crlf_input() {
        let report = parse("A,10\r\nB,5\r\n");
        assert_eq!(amounts(&report), [("A", "10"), ("B", "5")]);
    }

    #[test]
    fn preserves_raw_amount_rendering_until_merged() {
        let report = parse("A,2.50");
        let address = Address::parse("A").unwrap();
        assert_eq!(report.set.amount_for(&address).unwrap().as_str(), "2.50");
    }

    #[test]
    fn merged_amounts_inherit_float_rendering() {
        let report = parse("A,0.1\nA,0.2");
        let address = Address::parse("A").unwrap();
        assert_eq!(
            report.set.amount_for(&address).unwrap().as_str(),
            "0.30000000000000004"
        );
    }

    #[test]
    fn reparse_of_rendered_output_is_identical() {
        let report = parse("A,10\nB,5\nA,2.5\njunk\nC,0.125");
        let reparsed = parse(&report.set.to_text());
        assert_eq!(reparsed.set, report.set);
        assert!(reparsed.skipped.is_empty());
    }
}
