use super::*;
use crate::{
    config::KeysetConfig,
    db::{Cursor, Keyset, SortSpec, encode_cursor, order::OrderSpec},
    error::Error,
    obs::{MetricsEvent, NoopMetricsSink, PredicateShape},
    test_fixtures::{Person, RecordingSink, SORTABLE_FIELDS, ids, people, select},
    types::Uuid,
};
use proptest::prelude::*;
use std::sync::Arc;

fn keyset() -> Keyset {
    Keyset::with_sink(KeysetConfig::default(), Arc::new(NoopMetricsSink)).expect("default config")
}

fn spec(keyset: &Keyset, token: &str) -> SortSpec<Person> {
    keyset.parse_sort::<Person>(token).expect("sort should resolve")
}

fn id_field(keyset: &Keyset) -> &'static crate::model::FieldModel<Person> {
    keyset.resolve_field::<Person>("Id").expect("Id exists")
}

fn uuid(text: &str) -> Value {
    Value::Uuid(Uuid::parse_str(text).expect("uuid"))
}

// Every cursor position of every sort must select exactly the rows after it.
fn assert_suffix_property(keyset: &Keyset, rows: &[Person], token: &str) {
    let first = keyset
        .plan::<Person>(token, None, "Id", None)
        .expect("first page plan");
    let full = select(rows, &first.order, None);

    for at in 0..full.len() {
        let cursor = first
            .next_cursor(&full[..=at])
            .expect("cursor derives")
            .expect("page is not empty");
        let next = keyset
            .plan::<Person>(token, None, "Id", Some(&cursor))
            .expect("next page plan");
        let page = select(rows, &next.order, next.predicate.as_ref());

        assert_eq!(
            ids(&page),
            ids(&full[at + 1..]),
            "sort '{token}', cursor after position {at}"
        );
    }
}

///
/// Shapes
///

#[test]
fn no_cursor_means_no_filter() {
    let keyset = keyset();
    let sort = spec(&keyset, "Age");

    let predicate = keyset
        .build_predicate(&sort, id_field(&keyset), None)
        .expect("first page");

    assert_eq!(predicate, None);
}

#[test]
fn compound_predicate_breaks_ties_on_the_key() {
    let keyset = keyset();
    let sort = spec(&keyset, "Age");
    let key = "759f492f-7302-46c9-9c36-d898200bee00";
    let cursor = Cursor::with_target(key, "22");

    let predicate = keyset
        .build_predicate(&sort, id_field(&keyset), Some(&cursor))
        .expect("cursor converts");

    let expected = Predicate::or(vec![
        Predicate::compare("Age", CompareOp::Gt, Value::Uint16(22), CoercionId::Strict),
        Predicate::and(vec![
            Predicate::compare("Age", CompareOp::Eq, Value::Uint16(22), CoercionId::Strict),
            Predicate::compare("Id", CompareOp::Gt, uuid(key), CoercionId::Strict),
        ]),
    ]);
    assert_eq!(predicate, Some(expected));
}

#[test]
fn descending_compound_keeps_the_key_ascending() {
    let keyset = keyset();
    let sort = spec(&keyset, "-Name");
    let key = "83a4a35e-b914-4173-b6db-4d251ce2408b";
    let cursor = Cursor::with_target(key, "Alice");

    let predicate = keyset
        .build_predicate(&sort, id_field(&keyset), Some(&cursor))
        .expect("cursor converts")
        .expect("cursor yields a filter");

    let text = Value::Text("Alice".to_string());
    let expected = Predicate::or(vec![
        Predicate::compare("Name", CompareOp::Lt, text.clone(), CoercionId::TextCasefold),
        Predicate::and(vec![
            Predicate::compare("Name", CompareOp::Eq, text, CoercionId::TextCasefold),
            Predicate::compare("Id", CompareOp::Gt, uuid(key), CoercionId::Strict),
        ]),
    ]);
    assert_eq!(predicate, expected);
}

#[test]
fn sorting_by_the_key_ignores_the_target() {
    let keyset = keyset();
    let key = "2975ca59-cd2b-4726-b6a9-cff2c8668059";

    // target would not even convert if it were consulted
    let cursor = Cursor::with_target(key, "not a uuid");

    for (token, op) in [("Id", CompareOp::Gt), ("-id", CompareOp::Lt)] {
        let predicate = keyset
            .build_predicate(&spec(&keyset, token), id_field(&keyset), Some(&cursor))
            .expect("target is never converted");

        assert_eq!(
            predicate,
            Some(Predicate::compare("Id", op, uuid(key), CoercionId::Strict))
        );
    }
}

#[test]
fn missing_target_compares_the_key_in_the_sort_direction() {
    let keyset = keyset();
    let key = "2975ca59-cd2b-4726-b6a9-cff2c8668059";
    let cursor = Cursor::new(key);

    let predicate = keyset
        .build_predicate(&spec(&keyset, "-Age"), id_field(&keyset), Some(&cursor))
        .expect("key converts");

    assert_eq!(
        predicate,
        Some(Predicate::compare("Id", CompareOp::Lt, uuid(key), CoercionId::Strict))
    );
}

#[test]
fn null_target_on_a_nullable_field_is_null_aware() {
    let keyset = keyset();
    let key = "2975ca59-cd2b-4726-b6a9-cff2c8668059";
    let cursor = Cursor::new(key);
    let nulls_after_key = Predicate::and(vec![
        Predicate::is_null("Bonus"),
        Predicate::compare("Id", CompareOp::Gt, uuid(key), CoercionId::Strict),
    ]);

    let ascending = keyset
        .build_predicate(&spec(&keyset, "Bonus"), id_field(&keyset), Some(&cursor))
        .expect("key converts");
    assert_eq!(
        ascending,
        Some(Predicate::or(vec![
            nulls_after_key.clone(),
            Predicate::not(Predicate::is_null("Bonus")),
        ]))
    );

    let descending = keyset
        .build_predicate(&spec(&keyset, "-Bonus"), id_field(&keyset), Some(&cursor))
        .expect("key converts");
    assert_eq!(descending, Some(nulls_after_key));
}

#[test]
fn descending_nullable_compound_admits_trailing_nulls() {
    let keyset = keyset();
    let cursor = Cursor::with_target("759f492f-7302-46c9-9c36-d898200bee00", "1500");

    let Some(Predicate::Or(branches)) = keyset
        .build_predicate(&spec(&keyset, "-Bonus"), id_field(&keyset), Some(&cursor))
        .expect("cursor converts")
    else {
        panic!("compound predicate expected");
    };

    assert_eq!(branches.len(), 3);
    assert_eq!(branches[2], Predicate::is_null("Bonus"));
}

#[test]
fn bool_comparisons_use_the_ordinal_coercion() {
    let keyset = keyset();
    let cursor = Cursor::with_target("759f492f-7302-46c9-9c36-d898200bee00", "true");

    let Some(Predicate::Or(branches)) = keyset
        .build_predicate(&spec(&keyset, "Married"), id_field(&keyset), Some(&cursor))
        .expect("cursor converts")
    else {
        panic!("compound predicate expected");
    };

    assert_eq!(
        branches[0],
        Predicate::compare(
            "Married",
            CompareOp::Gt,
            Value::Bool(true),
            CoercionId::BoolOrdinal
        )
    );
}

#[test]
fn predicates_serialize_for_adapters() {
    let predicate = Predicate::not(Predicate::is_null("Notes"));
    let json = serde_json::to_value(&predicate).expect("predicate serializes");

    assert_eq!(json, serde_json::json!({ "Not": { "IsNull": { "field": "Notes" } } }));
}

///
/// Errors
///

#[test]
fn unconvertible_key_names_the_key_field() {
    let keyset = keyset();
    let cursor = Cursor::with_target("not-a-uuid", "22");

    let err = keyset
        .build_predicate(&spec(&keyset, "Age"), id_field(&keyset), Some(&cursor))
        .expect_err("bad key must fail");

    assert!(matches!(err, Error::InvalidKeyValue { field: "Id" }));
    assert_eq!(err.to_string(), "invalid key value for property 'Id'");
}

#[test]
fn unconvertible_target_names_the_sorted_field() {
    let keyset = keyset();
    let cursor = Cursor::with_target("759f492f-7302-46c9-9c36-d898200bee00", "twenty");

    let err = keyset
        .build_predicate(&spec(&keyset, "Age"), id_field(&keyset), Some(&cursor))
        .expect_err("bad target must fail");

    assert!(matches!(err, Error::InvalidFieldValue { field: "Age" }));
}

#[test]
fn unsupported_key_or_sorted_field_is_reported() {
    let keyset = keyset();
    let extra = keyset.resolve_field::<Person>("Extra").expect("Extra exists");

    let err = keyset
        .build_predicate(&spec(&keyset, "Age"), extra, Some(&Cursor::new("x")))
        .expect_err("unsupported key must fail");
    assert!(matches!(err, Error::UnsupportedFieldType { type_name: "Object" }));

    let cursor = Cursor::with_target("759f492f-7302-46c9-9c36-d898200bee00", "x");
    let err = keyset
        .build_predicate(&spec(&keyset, "Extra"), id_field(&keyset), Some(&cursor))
        .expect_err("unsupported sorted field must fail");
    assert!(matches!(err, Error::UnsupportedFieldType { type_name: "Object" }));
}

#[test]
fn predicate_shapes_are_reported() {
    let sink = Arc::new(RecordingSink::default());
    let keyset = Keyset::with_sink(KeysetConfig::default(), sink.clone()).expect("config");
    let key = id_field(&keyset);
    let sort = spec(&keyset, "Age");

    keyset.build_predicate(&sort, key, None).expect("first page");
    keyset
        .build_predicate(&sort, key, Some(&Cursor::new(Uuid::nil().to_string())))
        .expect("key only");

    let shapes: Vec<_> = sink
        .events()
        .into_iter()
        .filter_map(|event| match event {
            MetricsEvent::PredicateBuilt { shape, .. } => Some(shape),
            _ => None,
        })
        .collect();
    assert_eq!(shapes, vec![PredicateShape::FirstPage, PredicateShape::KeyOnly]);
}

///
/// Runtime
///

#[test]
fn comparisons_against_null_are_false() {
    let rows = people();
    let gt = PredicateProgram::<Person>::compile(&Predicate::compare(
        "Bonus",
        CompareOp::Gt,
        Value::Int32(0),
        CoercionId::Strict,
    ));
    let is_null = PredicateProgram::<Person>::compile(&Predicate::is_null("bonus"));

    assert_eq!(rows.iter().filter(|row| gt.eval(row)).count(), 1);
    assert_eq!(rows.iter().filter(|row| is_null.eval(row)).count(), 7);
}

#[test]
fn unknown_fields_evaluate_false() {
    let rows = people();
    let program = PredicateProgram::<Person>::compile(&Predicate::is_null("Missing"));

    assert!(rows.iter().all(|row| !program.eval(row)));
}

///
/// Paging
///

#[test]
fn every_field_pages_without_gaps_or_duplicates() {
    let keyset = keyset();
    let rows = people();

    for field in SORTABLE_FIELDS {
        assert_suffix_property(&keyset, &rows, field);
        assert_suffix_property(&keyset, &rows, &format!("-{field}"));
    }

    assert_suffix_property(&keyset, &rows, "Id");
    assert_suffix_property(&keyset, &rows, "-Id");
}

#[test]
fn key_only_cursor_pages_by_key() {
    let keyset = keyset();
    let rows = people();
    let token = encode_cursor("759f492f-7302-46c9-9c36-d898200bee00");
    let plan = keyset
        .plan::<Person>("Id", None, "Id", Some(&token))
        .expect("plan");

    let page = select(&rows, &plan.order, plan.predicate.as_ref());
    assert_eq!(page.len(), 5);
    assert_eq!(plan.order, OrderSpec::keyset(&plan.sort, plan.key));
}

fn arb_rows() -> impl Strategy<Value = Vec<Person>> {
    let row = (
        0u16..4,
        prop::option::of(0i32..3),
        any::<bool>(),
        prop_oneof![Just("al"), Just("Al"), Just("bo"), Just("BO")],
        prop::option::of(prop_oneof![Just("x"), Just("y")]),
    );

    prop::collection::vec(row, 1..12).prop_map(|rows| {
        let base = people().remove(0);

        rows.into_iter()
            .enumerate()
            .map(|(index, (age, bonus, married, name, notes))| Person {
                id: Uuid::from_u128(u128::try_from(index).expect("small index") + 1),
                age,
                bonus,
                married,
                name: name.to_string(),
                notes: notes.map(str::to_string),
                ..base.clone()
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn random_rows_page_without_gaps_or_duplicates(
        rows in arb_rows(),
        token in prop_oneof![
            Just("Age"), Just("-Age"),
            Just("Bonus"), Just("-Bonus"),
            Just("Married"), Just("-Married"),
            Just("Name"), Just("-Name"),
            Just("Notes"), Just("-Notes"),
        ],
    ) {
        assert_suffix_property(&keyset(), &rows, token);
    }
}
