use bigdecimal::{BigDecimal, Zero};
use crm_reports_rust::models::{AggregatedEntity, CurveBand};
use crm_reports_rust::{classify_abc, classify_abc_with, AbcThresholds};
use proptest::prelude::*;
use std::str::FromStr;

fn entities(values: &[u32]) -> Vec<AggregatedEntity> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| AggregatedEntity::new(format!("e{i}"), BigDecimal::from(*v)))
        .collect()
}

fn epsilon() -> BigDecimal {
    BigDecimal::from_str("0.000000001").unwrap()
}

proptest! {
    #[test]
    fn shares_add_up_to_one_hundred(values in prop::collection::vec(0u32..100_000, 1..60)) {
        prop_assume!(values.iter().any(|v| *v > 0));
        let result = classify_abc(entities(&values));

        let total = result.iter().fold(BigDecimal::zero(), |acc, c| acc + &c.share_percent);
        prop_assert!((total - BigDecimal::from(100)).abs() < epsilon());

        let last = &result.last().unwrap().cumulative_share_percent;
        prop_assert!((last - BigDecimal::from(100)).abs() < epsilon());
    }

    #[test]
    fn cumulative_and_bands_never_go_backwards(values in prop::collection::vec(0u32..10_000, 0..60)) {
        let result = classify_abc(entities(&values));
        prop_assert_eq!(result.len(), values.len());

        for pair in result.windows(2) {
            prop_assert!(pair[0].entity.total_value >= pair[1].entity.total_value);
            prop_assert!(pair[0].cumulative_share_percent <= pair[1].cumulative_share_percent);
            prop_assert!(pair[0].curve_band <= pair[1].curve_band);
        }
    }

    #[test]
    fn classification_is_repeatable(values in prop::collection::vec(0u32..10_000, 0..40)) {
        let first = classify_abc(entities(&values));
        let second = classify_abc(entities(&values));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn equal_values_keep_input_order(value in 1u32..1_000, copies in 2usize..20) {
        let result = classify_abc(entities(&vec![value; copies]));
        let ids: Vec<String> = result.iter().map(|c| c.entity.entity_id.clone()).collect();
        let expected: Vec<String> = (0..copies).map(|i| format!("e{i}")).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn first_entity_is_always_a(values in prop::collection::vec(1u32..10_000, 1..30)) {
        let result = classify_abc_with(entities(&values), &AbcThresholds::default());
        prop_assert_eq!(result[0].curve_band, CurveBand::A);
    }
}

#[test]
fn all_zero_input_is_c_with_no_share() {
    let result = classify_abc(entities(&[0, 0, 0]));

    assert_eq!(result.len(), 3);
    for c in &result {
        assert_eq!(c.curve_band, CurveBand::C);
        assert!(c.share_percent.is_zero());
        assert!(c.cumulative_share_percent.is_zero());
    }
}

#[test]
fn empty_input_is_empty_output() {
    assert!(classify_abc(Vec::new()).is_empty());
}
