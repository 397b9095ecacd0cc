use serde_json::{json, Value};
use stock_filter::core::filter::apply;
use stock_filter::core::normalize::normalize_field_name;
use stock_filter::core::{Condition, ConditionType, Dataset, FilterSet, Record, SkipReason};

fn records(rows: Value) -> Vec<Record> {
    rows.as_array()
        .expect("array of rows")
        .iter()
        .map(|row| Record::new(row.as_object().expect("object row").clone()))
        .collect()
}

fn watchlist() -> Dataset {
    Dataset::from_records(
        records(json!([
            {"Ticker": "AAPL", "Name": "Apple Inc.", "P/E Ratio": 28.4, "Market Cap ($B)": "2900"},
            {"Ticker": "KO", "Name": "Coca-Cola Co", "P/E Ratio": 24.1, "Market Cap ($B)": 260},
            {"Ticker": "TSLA", "Name": "Tesla, Inc.", "P/E Ratio": "N/A", "Market Cap ($B)": 700},
            {"Ticker": "BRK.B", "Name": null, "P/E Ratio": null, "Market Cap ($B)": 880}
        ])),
        None,
    )
}

/// 測試沒有條件時資料不變
#[test]
fn test_no_conditions_returns_dataset_unchanged() {
    let dataset = watchlist();
    let outcome = apply(dataset.clone(), &FilterSet::default());

    assert_eq!(outcome.dataset, dataset);
    assert!(outcome.skipped.is_empty());
}

/// 測試未知欄位的條件不影響結果
#[test]
fn test_unknown_field_is_a_no_op() {
    let dataset = watchlist();
    let filters = FilterSet::new(vec![Condition::new(
        "nonexistent_field",
        ConditionType::Contains,
        "x",
    )]);

    let outcome = apply(dataset.clone(), &filters);

    assert_eq!(outcome.dataset, dataset);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].reason, SkipReason::UnknownField);
}

/// 測試 greater_than 結果的欄位都是數值且大於門檻
#[test]
fn test_greater_than_results_are_numeric_and_above_threshold() {
    for threshold in [0.0, 24.1, 25.0, 30.0] {
        let filters = FilterSet::new(vec![Condition::new(
            "P/E Ratio",
            ConditionType::GreaterThan,
            threshold,
        )]);

        let outcome = apply(watchlist(), &filters);

        for row in outcome.dataset.rows() {
            let cell = row.get("p_e_ratio").and_then(Value::as_f64);
            assert!(cell.is_some_and(|v| v > threshold), "row {:?}", row);
        }
    }

    let filters = FilterSet::new(vec![Condition::new("P/E Ratio", ConditionType::GreaterThan, 0)]);
    assert_eq!(apply(watchlist(), &filters).dataset.len(), 2);
}

/// 測試 contains 不分大小寫
#[test]
fn test_contains_is_case_insensitive() {
    let dataset = Dataset::from_records(records(json!([{"c": "xabcx"}, {"c": "xyz"}])), None);
    let filters = FilterSet::new(vec![Condition::new("c", ConditionType::Contains, "ABC")]);

    let outcome = apply(dataset, &filters);

    assert_eq!(outcome.dataset.len(), 1);
    assert_eq!(outcome.dataset.rows()[0].get("c"), Some(&json!("xabcx")));
}

/// 測試數值門檻欄位與含標點的欄位名稱
#[test]
fn test_numeric_string_cells_and_punctuated_field_names() {
    let filters = FilterSet::from_json(&json!({
        "market cap ($b)": {"type": "greater_than", "value": "750"}
    }))
    .unwrap();

    let outcome = apply(watchlist(), &filters);
    let tickers: Vec<&str> = outcome
        .dataset
        .rows()
        .iter()
        .filter_map(|row| row.get("ticker").and_then(Value::as_str))
        .collect();

    assert_eq!(tickers, vec!["AAPL", "BRK.B"]);
}

/// 測試條件順序不影響結果
#[test]
fn test_condition_order_does_not_change_result() {
    let a = Condition::new("Name", ConditionType::Contains, "inc");
    let b = Condition::new("Market Cap ($B)", ConditionType::LessThan, 1000);

    let forward = apply(watchlist(), &FilterSet::new(vec![a.clone(), b.clone()]));
    let backward = apply(watchlist(), &FilterSet::new(vec![b, a]));

    assert_eq!(forward.dataset, backward.dataset);
    assert_eq!(forward.dataset.len(), 1);
}

/// 測試正規化的冪等性
#[test]
fn test_normalizer_is_idempotent_on_dataset_columns() {
    for column in watchlist().columns() {
        assert_eq!(&normalize_field_name(column), column);
    }
}
