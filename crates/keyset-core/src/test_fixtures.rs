use crate::{
    db::{
        PagePlan,
        order::{OrderProgram, OrderSpec},
        predicate::{Predicate, PredicateProgram},
    },
    model::{FieldKind, FieldType},
    obs::{MetricsEvent, MetricsSink},
    traits::FieldValue,
    types::{Decimal, NaiveDate, Timestamp, Uuid},
    value::Value,
};
use std::sync::Mutex;

///
/// Opaque
///
/// Field type with no converter; reads as null.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Opaque;

impl FieldValue for Opaque {
    const TYPE: FieldType = FieldType::new(FieldKind::Unsupported("Object"));

    fn to_value(&self) -> Value {
        Value::Null
    }
}

///
/// Person
///
/// One field of every supported kind, two nullable fields, and one
/// unsupported field.
///

#[derive(Clone, Debug)]
pub(crate) struct Person {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) age: u16,
    pub(crate) salary: Decimal,
    pub(crate) floor: i16,
    pub(crate) post_code: i32,
    pub(crate) house_number: u32,
    pub(crate) score: i64,
    pub(crate) rank: u64,
    pub(crate) height: f32,
    pub(crate) weight: f64,
    pub(crate) married: bool,
    pub(crate) hiring_date: Timestamp,
    pub(crate) code: char,
    pub(crate) level: i8,
    pub(crate) grade: u8,
    pub(crate) extra: Opaque,
    pub(crate) notes: Option<String>,
    pub(crate) bonus: Option<i32>,
}

crate::entity_model! {
    Person, path = "test_fixtures::Person",
    fields {
        "Id" => id: Uuid,
        "Name" => name: String,
        "Age" => age: u16,
        "Salary" => salary: Decimal,
        "Floor" => floor: i16,
        "PostCode" => post_code: i32,
        "HouseNumber" => house_number: u32,
        "Score" => score: i64,
        "Rank" => rank: u64,
        "Height" => height: f32,
        "Weight" => weight: f64,
        "Married" => married: bool,
        "HiringDate" => hiring_date: Timestamp,
        "Code" => code: char,
        "Level" => level: i8,
        "Grade" => grade: u8,
        "Extra" => extra: Opaque,
        "Notes" => notes: Option<String>,
        "Bonus" => bonus: Option<i32>,
    }
}

/// Every pageable (supported) field name of `Person` except the key.
pub(crate) const SORTABLE_FIELDS: [&str; 17] = [
    "Name",
    "Age",
    "Salary",
    "Floor",
    "PostCode",
    "HouseNumber",
    "Score",
    "Rank",
    "Height",
    "Weight",
    "Married",
    "HiringDate",
    "Code",
    "Level",
    "Grade",
    "Notes",
    "Bonus",
];

fn uuid(text: &str) -> Uuid {
    Uuid::parse_str(text).expect("fixture uuid should parse")
}

fn decimal(text: &str) -> Decimal {
    text.parse().expect("fixture decimal should parse")
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("fixture date should be valid")
        .and_utc()
}

#[expect(clippy::too_many_arguments)]
fn person(
    id: &str,
    name: &str,
    age: u16,
    married: bool,
    salary: &str,
    floor: i16,
    post_code: i32,
    house_number: u32,
    score: i64,
    rank: u64,
    height: f32,
    weight: f64,
    hiring_date: Timestamp,
    code: char,
) -> Person {
    Person {
        id: uuid(id),
        name: name.to_string(),
        age,
        salary: decimal(salary),
        floor,
        post_code,
        house_number,
        score,
        rank,
        height,
        weight,
        married,
        hiring_date,
        code,
        level: i8::try_from(floor - 3).expect("fixture level fits i8"),
        grade: u8::try_from(house_number % 7).expect("fixture grade fits u8"),
        extra: Opaque,
        notes: None,
        bonus: None,
    }
}

/// The eight-person dataset.
pub(crate) fn people() -> Vec<Person> {
    let mut people = vec![
        person(
            "eff79a51-f929-414e-8b26-8b3f023a190f",
            "Max",
            28,
            false,
            "12345.67",
            3,
            12345,
            12,
            1_234_567_890,
            9_876_543_210,
            1.80,
            75.5,
            date(2020, 1, 15),
            'A',
        ),
        person(
            "83a4a35e-b914-4173-b6db-4d251ce2408b",
            "Alice",
            30,
            true,
            "54578.32",
            5,
            54321,
            34,
            2_345_678_901,
            8_765_432_109,
            1.65,
            60.0,
            date(2019, 6, 1),
            'B',
        ),
        person(
            "759f492f-7302-46c9-9c36-d898200bee00",
            "Morgan",
            22,
            true,
            "6123.45",
            2,
            67890,
            56,
            3_456_789_012,
            7_654_321_098,
            1.75,
            68.2,
            date(2021, 3, 20),
            'C',
        ),
        person(
            "3a0153a2-9979-449f-99ac-adb19891572e",
            "Charlie",
            24,
            false,
            "7890.12",
            4,
            13579,
            78,
            4_567_890_123,
            6_543_210_987,
            1.82,
            80.0,
            date(2018, 11, 5),
            'D',
        ),
        person(
            "a1695dd4-c20f-408d-bc06-a50102bb98bf",
            "Bob",
            25,
            false,
            "6789.01",
            1,
            24680,
            90,
            5_678_901_234,
            5_432_109_876,
            1.78,
            72.3,
            date(2022, 7, 30),
            'E',
        ),
        person(
            "2975ca59-cd2b-4726-b6a9-cff2c8668059",
            "Adrian",
            22,
            false,
            "9512.34",
            2,
            11223,
            45,
            6_789_012_345,
            4_321_098_765,
            1.70,
            65.0,
            date(2021, 5, 10),
            'F',
        ),
        person(
            "9f0bca82-dc26-44dc-a38e-176b7e735fac",
            "Jordan",
            27,
            false,
            "4321.00",
            3,
            33445,
            67,
            7_890_123_456,
            3_210_987_654,
            1.85,
            85.7,
            date(2017, 9, 25),
            'G',
        ),
        person(
            "cd2ed09f-6abb-4ffc-95f0-8fab3b996bb5",
            "Alex",
            27,
            true,
            "3954.54",
            4,
            55667,
            89,
            8_901_234_567,
            2_109_876_543,
            1.68,
            59.8,
            date(2016, 12, 12),
            'H',
        ),
    ];

    people[1].notes = Some("Part-time".to_string());
    people[2].bonus = Some(1500);
    people[4].notes = Some("Annual review pending".to_string());

    people
}

/// Rows of `rows` that pass `predicate`, in `order`.
pub(crate) fn select(
    rows: &[Person],
    order: &OrderSpec,
    predicate: Option<&Predicate>,
) -> Vec<Person> {
    let order = OrderProgram::<Person>::compile(order);
    let filter = predicate.map(PredicateProgram::<Person>::compile);

    let mut selected: Vec<Person> = rows
        .iter()
        .filter(|row| filter.as_ref().is_none_or(|program| program.eval(*row)))
        .cloned()
        .collect();
    order.sort(&mut selected);

    selected
}

/// Rows of `rows` selected by `plan`.
pub(crate) fn select_page(rows: &[Person], plan: &PagePlan<Person>) -> Vec<Person> {
    select(rows, &plan.order, plan.predicate.as_ref())
}

/// Key values, for readable assertions.
pub(crate) fn ids(rows: &[Person]) -> Vec<Uuid> {
    rows.iter().map(|row| row.id).collect()
}

///
/// RecordingSink
///

#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<MetricsEvent>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<MetricsEvent> {
        self.events.lock().expect("sink lock poisoned").clone()
    }
}

impl MetricsSink for RecordingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.lock().expect("sink lock poisoned").push(event);
    }
}
