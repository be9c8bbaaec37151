use proptest::prelude::*;

use bgeo_types::{Address, Amount, Timestamp};

proptest! {
    /// Amount: a rendered f64 parses back to the same numeric value.
    #[test]
    fn amount_render_parse_roundtrip(value in 0.0f64..1e12) {
        let rendered = format!("{value}");
        let amount = Amount::parse(&rendered).unwrap();
        prop_assert_eq!(amount.value(), value);
        prop_assert_eq!(amount.as_str(), rendered);
    }

    /// Amount: surrounding whitespace is trimmed, rendering preserved.
    #[test]
    fn amount_parse_trims(value in 0.0f64..1e9) {
        let rendered = format!("{value}");
        let padded = format!("  {rendered}\t");
        let amount = Amount::parse(&padded).unwrap();
        prop_assert_eq!(amount.as_str(), rendered);
    }

    /// Amount: plus is commutative (f64 addition is, for finite values).
    #[test]
    fn amount_plus_commutative(a in 0.0f64..1e9, b in 0.0f64..1e9) {
        let lhs = Amount::parse(&format!("{a}")).unwrap();
        let rhs = Amount::parse(&format!("{b}")).unwrap();
        prop_assert_eq!(lhs.plus(&rhs), rhs.plus(&lhs));
    }

    /// Amount: plus agrees with f64 addition exactly.
    #[test]
    fn amount_plus_matches_f64(a in 0.0f64..1e9, b in 0.0f64..1e9) {
        let lhs = Amount::parse(&format!("{a}")).unwrap();
        let rhs = Amount::parse(&format!("{b}")).unwrap();
        prop_assert_eq!(lhs.plus(&rhs).value(), a + b);
    }

    /// Amount: negative inputs are always rejected.
    #[test]
    fn amount_rejects_negative(value in 0.001f64..1e9) {
        let rendered = format!("-{value}");
        prop_assert!(Amount::parse(&rendered).is_err());
    }

    /// Address: parse trims whitespace and keeps the inner text.
    #[test]
    fn address_parse_trims(inner in "[a-z0-9]{1,40}") {
        let padded = format!(" {inner} ");
        let address = Address::parse(&padded).unwrap();
        prop_assert_eq!(address.as_str(), inner);
    }

    /// Address: Display roundtrips through parse.
    #[test]
    fn address_display_roundtrip(inner in "[a-z0-9]{1,40}") {
        let address = Address::parse(&inner).unwrap();
        let reparsed = Address::parse(&address.to_string()).unwrap();
        prop_assert_eq!(address, reparsed);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self (saturating).
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
    }
}
