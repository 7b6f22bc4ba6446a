use super::*;
use crate::{
    config::KeysetConfig,
    obs::NoopMetricsSink,
    test_fixtures::{Person, people, select},
};
use std::sync::Arc;

fn keyset() -> Keyset {
    Keyset::with_sink(KeysetConfig::default(), Arc::new(NoopMetricsSink)).expect("default config")
}

fn ordering(token: &str) -> OrderSpec {
    let keyset = keyset();
    let sort = keyset.parse_sort::<Person>(token).expect("sort resolves");
    let key = keyset.resolve_field::<Person>("Id").expect("Id exists");

    keyset.build_ordering(&sort, key)
}

fn names(rows: &[Person]) -> Vec<&str> {
    rows.iter().map(|row| row.name.as_str()).collect()
}

#[test]
fn key_is_appended_as_ascending_tie_break() {
    let order = ordering("-age");

    assert_eq!(
        order.terms,
        vec![
            OrderTerm {
                field: "Age".to_string(),
                direction: Direction::Desc,
                nulls: NullsOrder::Last,
                coercion: CoercionId::Strict,
            },
            OrderTerm::new("Id", Direction::Asc, CoercionId::Strict),
        ]
    );
    assert_eq!(
        order.pairs().collect::<Vec<_>>(),
        vec![("Age", false), ("Id", true)]
    );
}

#[test]
fn sorting_by_the_key_needs_no_tie_break() {
    assert_eq!(ordering("-Id").pairs().collect::<Vec<_>>(), vec![("Id", false)]);
}

#[test]
fn duplicate_values_are_ordered_by_key() {
    let rows = select(&people(), &ordering("Age"), None);

    // Morgan and Adrian share 22; Adrian's key sorts first
    assert_eq!(
        names(&rows),
        vec!["Adrian", "Morgan", "Charlie", "Bob", "Jordan", "Alex", "Max", "Alice"]
    );
}

#[test]
fn booleans_order_false_first() {
    let ascending = select(&people(), &ordering("Married"), None);
    assert!(!ascending[0].married);
    assert!(ascending[7].married);

    let descending = select(&people(), &ordering("-Married"), None);
    assert!(descending[0].married);
    assert!(!descending[7].married);
}

#[test]
fn text_orders_case_insensitively() {
    let mut rows = people();
    rows[0].name = "alex".to_string();

    let program = OrderProgram::<Person>::compile(&OrderSpec {
        terms: vec![OrderTerm::new("Name", Direction::Asc, CoercionId::TextCasefold)],
    });

    // "alex" and "Alex" tie on the only term
    assert!(program.compare(&rows[0], &rows[7]).is_eq());
    assert!(program.compare(&rows[5], &rows[0]).is_lt());
}

#[test]
fn nulls_sort_first_ascending_and_last_descending() {
    let ascending = select(&people(), &ordering("Notes"), None);
    assert!(ascending[..6].iter().all(|row| row.notes.is_none()));
    assert_eq!(ascending[6].notes.as_deref(), Some("Annual review pending"));

    let descending = select(&people(), &ordering("-Notes"), None);
    assert_eq!(descending[0].notes.as_deref(), Some("Part-time"));
    assert!(descending[2..].iter().all(|row| row.notes.is_none()));
}

#[test]
fn unknown_terms_compare_equal() {
    let rows = people();
    let program = OrderProgram::<Person>::compile(&OrderSpec {
        terms: vec![OrderTerm::new("Missing", Direction::Asc, CoercionId::Strict)],
    });

    assert!(program.compare(&rows[0], &rows[1]).is_eq());
}
