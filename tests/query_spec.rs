mod common;

use adt_reader::{AdtError, Criteria, Found, Selector, Value};
use common::*;

#[test]
fn first_returns_the_single_match() {
    let table = customers().open();
    let criteria = Criteria::new().with("LAST_NAME", "Gray");

    let found = table.find(Selector::First, &criteria).expect("find first");
    let Found::First(Some(record)) = found else {
        panic!("expected a matching record");
    };
    assert_eq!(record, table.record(0).unwrap());
}

#[test]
fn first_returns_none_without_matches() {
    let table = customers().open();
    let criteria = Criteria::new().with("LAST_NAME", "Grey");

    let found = table.find(Selector::First, &criteria).expect("find first");
    assert_eq!(found, Found::First(None));
}

#[test]
fn criteria_names_are_normalized() {
    let table = customers().open();

    for name in ["LastName", "last_name", "LAST_NAME"] {
        let criteria = Criteria::new().with(name, "Munroe");
        let record = table.find_first(&criteria).unwrap().expect("match");
        assert_eq!(record.get("id"), Some(&Value::AutoIncrement(3)));
    }
}

#[test]
fn all_collects_every_match_in_order() {
    let table = customers().open();
    let criteria = Criteria::new().with("Active", true);

    let records = table.find(Selector::All, &criteria).unwrap().into_records();
    let ids: Vec<_> = records.iter().map(|r| r.get("ID").cloned()).collect();
    assert_eq!(
        ids,
        [Some(Value::AutoIncrement(1)), Some(Value::AutoIncrement(3))]
    );
}

#[test]
fn every_condition_must_hold() {
    let table = customers().open();

    let both = Criteria::new().with("Active", true).with("Rank", 7u16);
    assert_eq!(table.find_all(&both).unwrap().len(), 1);

    let conflicting = Criteria::new().with("Active", false).with("Rank", 7u16);
    assert!(table.find_all(&conflicting).unwrap().is_empty());
}

#[test]
fn matching_is_exact_equality() {
    let table = customers().open();

    assert!(table.find_first(&Criteria::new().with("last_name", "Gr")).unwrap().is_none());
    assert!(table.find_first(&Criteria::new().with("last_name", "gray")).unwrap().is_none());
    assert!(table.find_first(&Criteria::new().with("balance", 125)).unwrap().is_none());
    assert!(table.find_first(&Criteria::new().with("rank", 70)).unwrap().is_none());
}

#[test]
fn integers_match_any_integer_column() {
    let table = customers().open();
    let first = table.record(0).unwrap();

    let by_id = table.find_first(&Criteria::new().with("ID", 1)).unwrap();
    assert_eq!(by_id, Some(first.clone()));

    let by_rank = table.find_first(&Criteria::new().with("Rank", 7)).unwrap();
    assert_eq!(by_rank, Some(first));

    let by_visits = Criteria::new().with("visits", -12).with("id", 2u32);
    let second = table.find_first(&by_visits).unwrap().expect("match");
    assert_eq!(second.get("first_name"), Some(&Value::Text("Scott".into())));
}

#[test]
fn unknown_attribute_never_matches() {
    let table = customers().open();
    let criteria = Criteria::new().with("nickname", "Storm");
    assert!(table.find_all(&criteria).unwrap().is_empty());
}

#[test]
fn empty_criteria_match_everything() {
    let table = customers().open();
    let all = table.find(Selector::All, &Criteria::new()).unwrap();
    assert_eq!(all, Found::Records(table.to_a().unwrap()));
}

#[test]
fn callback_receives_matches_without_collecting() {
    let table = customers().open();
    let criteria: Criteria = [("active", true)].into_iter().collect();

    let mut names = Vec::new();
    table
        .find_each(&criteria, |record| {
            names.push(record.get("first_name").and_then(Value::as_str).map(str::to_owned))
        })
        .expect("find_each");

    assert_eq!(names, [Some("Jean".to_string()), Some("Ororo".to_string())]);
}

#[test]
fn index_selectors_ignore_criteria() {
    let table = customers().open();
    let criteria = Criteria::new().with("last_name", "nobody");

    let found = table.find(Selector::Index(1), &criteria).unwrap();
    assert_eq!(found, Found::Record(table.record(1).unwrap()));

    let found = table.find(Selector::Indices(vec![2, 0]), &criteria).unwrap();
    assert_eq!(
        found,
        Found::Records(vec![table.record(2).unwrap(), table.record(0).unwrap()])
    );
}

#[test]
fn index_selectors_are_bounds_checked() {
    let table = customers().open();

    let err = table.find(Selector::Index(3), &Criteria::new()).unwrap_err();
    assert!(matches!(err, AdtError::RecordIndexOutOfBounds { index: 3, .. }));

    let err = table
        .find(Selector::Indices(vec![0, 9]), &Criteria::new())
        .unwrap_err();
    assert!(matches!(err, AdtError::RecordIndexOutOfBounds { index: 9, .. }));
}

#[test]
fn dates_can_be_matched() {
    let table = customers().open();
    let criteria = Criteria::new().with("birthday", date(1985, 3, 2));

    let record = table.find_first(&criteria).unwrap().expect("match");
    assert_eq!(record.get("first_name"), Some(&Value::Text("Scott".into())));
}
