use proptest::prelude::*;

use bgeo_recipients::parse;
use bgeo_types::Address;

/// A pool of syntactically valid addresses so duplicates actually occur.
fn address_pool(i: usize) -> String {
    format!("bgeo1addr{}", i % 5)
}

fn render_input(lines: &[(usize, f64)]) -> String {
    lines
        .iter()
        .map(|(addr, amount)| format!("{},{}", address_pool(*addr), amount))
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    /// Parsing its own rendered output reproduces the same set.
    #[test]
    fn reparse_is_idempotent(
        lines in prop::collection::vec((0usize..5, 0.0f64..1_000.0), 0..40),
    ) {
        let first = parse(&render_input(&lines));
        let second = parse(&first.set.to_text());
        prop_assert_eq!(second.set, first.set);
        prop_assert!(second.skipped.is_empty());
    }

    /// Every address appears at most once in the output.
    #[test]
    fn output_addresses_are_unique(
        lines in prop::collection::vec((0usize..5, 0.0f64..1_000.0), 0..40),
    ) {
        let report = parse(&render_input(&lines));
        let mut seen = std::collections::HashSet::new();
        for entry in report.set.iter() {
            prop_assert!(seen.insert(entry.address.clone()));
        }
    }

    /// Each output amount equals the running float sum of that address's
    /// input lines, folded in input order.
    #[test]
    fn amounts_sum_per_address(
        lines in prop::collection::vec((0usize..5, 0.0f64..1_000.0), 1..40),
    ) {
        let report = parse(&render_input(&lines));

        let mut expected: Vec<(String, f64)> = Vec::new();
        for (addr, amount) in &lines {
            let name = address_pool(*addr);
            // Re-render and reparse to mirror what the parser reads.
            let parsed: f64 = format!("{amount}").parse().unwrap();
            match expected.iter_mut().find(|(a, _)| *a == name) {
                Some((_, sum)) => *sum += parsed,
                None => expected.push((name, parsed)),
            }
        }

        prop_assert_eq!(report.set.len(), expected.len());
        for (name, sum) in expected {
            let address = Address::parse(&name).unwrap();
            let amount = report.set.amount_for(&address).unwrap();
            prop_assert_eq!(amount.value(), sum);
        }
    }

    /// Lines without a comma never make it into the set and are all counted
    /// as skipped.
    #[test]
    fn comma_free_lines_are_skipped(
        valid in prop::collection::vec((0usize..5, 0.0f64..1_000.0), 0..10),
        junk in prop::collection::vec("[a-z]{1,12}", 1..10),
    ) {
        let mut input = render_input(&valid);
        for line in &junk {
            input.push('\n');
            input.push_str(line);
        }
        let report = parse(&input);
        prop_assert_eq!(report.skipped.len(), junk.len());
        for entry in report.set.iter() {
            prop_assert!(entry.address.as_str().starts_with("bgeo1addr"));
        }
    }
}
