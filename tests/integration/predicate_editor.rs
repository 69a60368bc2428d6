use spice::predicate::{
    ComparisonLoad, ComparisonOption, PredicateRowManager, PredicateValue, PropertyEntry,
    RowEvent, RowState, StaticPropertyStore,
};
use spice::EditorError;
use std::sync::Arc;

fn store() -> Arc<StaticPropertyStore> {
    Arc::new(StaticPropertyStore::new(vec![
        PropertyEntry::new(
            "p1",
            vec![
                ComparisonOption::new("equals", "eq"),
                ComparisonOption::new("greater than", "gt"),
            ],
            "[0-9]+",
        ),
        PropertyEntry::new("p2", vec![ComparisonOption::new("not equal", "ne")], ".*"),
        PropertyEntry::new("broken", vec![ComparisonOption::new("equals", "eq")], "(unclosed"),
    ]))
}

#[test]
fn drop_first_of_two_rows_keeps_the_second() {
    let mut manager = PredicateRowManager::new(store());
    let first = manager.ids()[0];
    let second = manager.add_row();
    manager
        .row_mut(second)
        .unwrap()
        .set_value(&PredicateValue::new("p2", "ne", "x"))
        .unwrap();

    assert!(manager.drop_row(first));
    assert_eq!(manager.get_value(), vec![PredicateValue::new("p2", "ne", "x")]);
    assert!(!manager.drop_row(second));
    assert_eq!(manager.len(), 1);
}

#[test]
fn set_value_round_trips_in_order_and_empty_list_leaves_one_row() {
    let mut manager = PredicateRowManager::new(store());
    let list = vec![
        PredicateValue::new("p1", "eq", "5"),
        PredicateValue::new("p2", "ne", "x"),
    ];

    manager.set_value(&list);
    assert_eq!(manager.get_value(), list);

    manager.set_value(&[]);
    assert_eq!(manager.get_value(), vec![PredicateValue::default()]);
}

#[test]
fn row_ids_are_never_reused() {
    let mut manager = PredicateRowManager::new(store());
    let before = manager.ids();
    manager.set_value(&[PredicateValue::new("p1", "eq", "1")]);
    let after = manager.ids();
    assert!(after.iter().all(|id| !before.contains(id)));
    assert!(manager.row(before[0]).is_none());
}

#[tokio::test]
async fn property_change_replaces_comparators() {
    let mut manager = PredicateRowManager::new(store());
    let id = manager.ids()[0];

    manager
        .handle(id, RowEvent::PropertyChanged("p1".to_string()))
        .await
        .unwrap();
    assert_eq!(manager.row(id).unwrap().comparisons().len(), 2);
    assert_eq!(manager.row(id).unwrap().state(), RowState::ComparatorsLoaded);

    let load = manager.set_comparisons(id, "p2").await.unwrap();
    assert_eq!(load, ComparisonLoad::Loaded { comparisons: 1 });
    let row = manager.row(id).unwrap();
    assert_eq!(row.comparisons(), &[ComparisonOption::new("not equal", "ne")]);
    assert_eq!(row.property(), "p2");
}

#[tokio::test]
async fn unknown_property_keeps_previous_comparators() {
    let mut manager = PredicateRowManager::new(store());
    let id = manager.ids()[0];
    manager.set_comparisons(id, "p1").await.unwrap();

    let load = manager.set_comparisons(id, "missing").await.unwrap();

    assert_eq!(load, ComparisonLoad::NoMatch);
    let row = manager.row(id).unwrap();
    assert_eq!(row.property(), "missing");
    assert_eq!(row.comparisons().len(), 2);
    assert_eq!(row.value_pattern(), Some("^(?:[0-9]+)$"));
}

#[tokio::test]
async fn invalid_pattern_is_reported_and_row_unchanged() {
    let mut manager = PredicateRowManager::new(store());
    let id = manager.ids()[0];

    let err = manager.set_comparisons(id, "broken").await.unwrap_err();

    assert!(matches!(err, EditorError::InvalidPattern { ref property, .. } if property == "broken"));
    assert!(manager.row(id).unwrap().comparisons().is_empty());
}

#[tokio::test]
async fn loaded_comparators_validate_row_values() {
    let mut manager = PredicateRowManager::new(store());
    manager.set_value(&[
        PredicateValue::new("p1", "eq", "42"),
        PredicateValue::new("p1", "lt", "forty"),
        PredicateValue::new("", "", ""),
    ]);

    let loads = manager.load_all_comparisons().await;
    assert_eq!(loads.len(), 2);

    let rows = manager.rows();
    assert!(rows[0].comparison_is_offered() && rows[0].value_is_valid());
    assert!(!rows[1].comparison_is_offered());
    assert!(!rows[1].value_is_valid());
    assert_eq!(rows[2].state(), RowState::Created);
}

#[tokio::test]
async fn events_for_dropped_rows_are_rejected() {
    let mut manager = PredicateRowManager::new(store());
    let first = manager.ids()[0];
    manager.handle(first, RowEvent::Add).await.unwrap();
    assert_eq!(manager.len(), 2);

    manager.handle(first, RowEvent::Drop).await.unwrap();
    assert_eq!(
        manager.handle(first, RowEvent::Add).await,
        Err(EditorError::RowNotFound(first))
    );
}
