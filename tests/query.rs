use price_dashboard::data::{
    global_metrics, list_categories, list_products, load_csv_reader, lookup, top_by_error,
    Dataset, ErrorPercent, ErrorSource, QueryError, Record,
};

fn end_to_end() -> Dataset {
    Dataset::from_records(vec![
        Record::new("Widget", "Home", 100.0, 80.0, 4.5, 10),
        Record::new("Gadget", "Home", 50.0, 55.0, 3.0, 5),
    ])
}

/// Several ties on absolute error, spread across categories.
fn ties() -> Dataset {
    Dataset::from_records(vec![
        Record::new("A", "Toys", 10.0, 13.0, 4.0, 1),
        Record::new("B", "Home", 20.0, 20.0, 4.0, 1),
        Record::new("C", "Toys", 30.0, 27.0, 4.0, 1),
        Record::new("D", "Home", 40.0, 50.0, 4.0, 1),
        Record::new("E", "Garden", 5.0, 2.0, 4.0, 1),
    ])
}

#[test]
fn end_to_end_example() {
    let ds = end_to_end();
    assert_eq!(list_categories(&ds), vec!["Home"]);
    assert_eq!(list_products(&ds, Some("Home")), vec!["Gadget", "Widget"]);

    let top = top_by_error(&ds, 1).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].product_name, "Widget");
    assert_eq!(top[0].absolute_error, 20.0);
}

#[test]
fn lookup_widget_metrics() {
    let m = lookup(&end_to_end(), Some("Home"), "Widget").unwrap();
    assert_eq!(m.absolute_error, 20.0);
    assert_eq!(m.error_percent, ErrorPercent::Defined(0.2));
    assert_eq!(m.record.rating_count, 10);
}

#[test]
fn lookup_zero_price_is_undefined_not_zero() {
    let ds = Dataset::from_records(vec![Record::new("Sample", "Promo", 0.0, 0.0, 4.0, 3)]);
    let m = lookup(&ds, None, "Sample").unwrap();
    assert_eq!(m.absolute_error, 0.0);
    assert_eq!(m.error_percent, ErrorPercent::Undefined);
    assert!(!m.error_percent.is_defined());
    assert_eq!(m.error_percent.as_fraction(), None);
}

#[test]
fn lookup_unknown_product_is_not_found() {
    let err = lookup(&end_to_end(), None, "Gizmo").unwrap_err();
    assert!(matches!(err, QueryError::NotFound { .. }));
}

#[test]
fn lookup_returns_first_duplicate() {
    let ds = Dataset::from_records(vec![
        Record::new("Mug", "Kitchen", 10.0, 9.0, 4.0, 1),
        Record::new("Mug", "Kitchen", 12.0, 6.0, 2.0, 8),
    ]);
    let m = lookup(&ds, Some("Kitchen"), "Mug").unwrap();
    assert_eq!(m.index, 0);
    assert_eq!(m.absolute_error, 1.0);
}

#[test]
fn mae_is_the_mean_of_stored_errors() {
    let ds = ties();
    let expected = ds.records().iter().map(|r| r.absolute_error).sum::<f64>() / ds.len() as f64;
    let g = global_metrics(&ds).unwrap();
    assert_eq!(g.mae, expected);
    assert_eq!(g.record_count, 5);
}

#[test]
fn mae_uses_sourced_errors() {
    let csv = "product_name,category,discounted_price,predicted_discounted_price,rating,rating_count,absolute_error\n\
               A,X,10,10,4,1,3\n\
               B,X,10,10,4,1,5\n";
    let ds = load_csv_reader(csv.as_bytes()).unwrap();
    assert_eq!(ds.error_source(), ErrorSource::Sourced);
    assert_eq!(global_metrics(&ds).unwrap().mae, 4.0);
}

#[test]
fn mape_skips_zero_price_records() {
    let ds = Dataset::from_records(vec![
        Record::new("Paid", "Home", 100.0, 80.0, 4.0, 1),
        Record::new("Cheap", "Home", 50.0, 60.0, 4.0, 1),
        Record::new("Free", "Home", 0.0, 15.0, 4.0, 1),
    ]);
    let g = global_metrics(&ds).unwrap();

    let expected = (20.0 / 100.0 + 10.0 / 50.0) / 2.0;
    match g.mape {
        ErrorPercent::Defined(v) => assert!((v - expected).abs() < 1e-12),
        ErrorPercent::Undefined => panic!("mape should be defined"),
    }
    assert_eq!(g.zero_price_count, 1);
    assert!((g.mae - 15.0).abs() < 1e-12);
}

#[test]
fn global_metrics_on_empty_dataset_fails() {
    let ds = Dataset::from_records(Vec::new());
    assert_eq!(global_metrics(&ds), Err(QueryError::EmptyDataset));
}

#[test]
fn top_by_error_is_sorted_and_stable() {
    let ds = ties();
    let names: Vec<&str> = top_by_error(&ds, 5)
        .unwrap()
        .iter()
        .map(|r| r.product_name.as_str())
        .collect();
    // D=10, then A, C, E all 3 in dataset order, then B=0.
    assert_eq!(names, vec!["D", "A", "C", "E", "B"]);

    let top = top_by_error(&ds, 5).unwrap();
    assert!(top
        .windows(2)
        .all(|w| w[0].absolute_error >= w[1].absolute_error));
}

#[test]
fn top_by_error_is_idempotent() {
    let ds = ties();
    let first = top_by_error(&ds, 3).unwrap();
    let second = top_by_error(&ds, 3).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn top_by_error_rejects_zero() {
    assert!(matches!(
        top_by_error(&end_to_end(), 0),
        Err(QueryError::InvalidArgument { .. })
    ));
}

#[test]
fn queries_do_not_change_the_dataset() {
    let ds = ties();
    let before = ds.clone();
    let _ = list_categories(&ds);
    let _ = list_products(&ds, Some("Toys"));
    let _ = lookup(&ds, None, "C");
    let _ = global_metrics(&ds);
    let _ = top_by_error(&ds, 2);
    assert_eq!(ds, before);
}
