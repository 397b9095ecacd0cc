use crate::core::normalize::normalize_field_name;
use crate::core::value::{coerce_cell_number, coerce_filter_number, render_value};
use crate::domain::model::{
    Condition, ConditionType, Dataset, FilterOutcome, FilterSet, SkipReason, SkippedCondition,
};
use crate::utils::error::{Result, StockError};
use serde_json::Value;

impl FilterSet {
    /// 解析請求主體
    ///
    /// `null`、`{}`、`[]`、空字串、`false` 與 `0` 都視為沒有提供篩選條件，
    /// 回傳空的 `FilterSet`；其他非物件的主體則是錯誤。
    pub fn from_json(body: &Value) -> Result<Self> {
        match body {
            Value::Object(entries) => Ok(FilterSet::new(
                entries
                    .iter()
                    .map(|(field, spec)| Condition {
                        field: field.clone(),
                        spec: spec.clone(),
                    })
                    .collect(),
            )),
            body if is_falsy(body) => Ok(FilterSet::default()),
            other => Err(StockError::InvalidFilterPayload {
                message: format!("expected a JSON object of conditions, got {}", other),
            }),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
    }
}

/// 依序套用所有條件，每個條件只會移除列
///
/// 無法套用的條件（未知欄位、缺少 type/value、無法轉成數字等）會被略過，
/// 並記錄在 `FilterOutcome::skipped` 中。
pub fn apply(mut dataset: Dataset, filters: &FilterSet) -> FilterOutcome {
    let mut skipped = Vec::new();

    for condition in &filters.conditions {
        if let Err(reason) = apply_condition(&mut dataset, condition) {
            tracing::info!("⏭️ Skipping filter on '{}': {}", condition.field, reason);
            skipped.push(SkippedCondition {
                field: condition.field.clone(),
                reason,
            });
        }
    }

    FilterOutcome { dataset, skipped }
}

fn apply_condition(dataset: &mut Dataset, condition: &Condition) -> std::result::Result<(), SkipReason> {
    let column = normalize_field_name(&condition.field);

    if !dataset.has_column(&column) {
        return Err(SkipReason::UnknownField);
    }

    if !condition.is_well_formed() {
        return Err(SkipReason::Malformed);
    }

    let value = condition.value().ok_or(SkipReason::MissingValue)?;
    let raw_type = condition.condition_type().ok_or(SkipReason::MissingType)?;

    let condition_type = raw_type
        .as_str()
        .and_then(ConditionType::parse)
        .ok_or_else(|| SkipReason::UnsupportedType(render_value(raw_type).unwrap_or_default()))?;

    let before = dataset.len();

    match condition_type {
        ConditionType::GreaterThan | ConditionType::LessThan => {
            let threshold = coerce_filter_number(value).ok_or_else(|| {
                SkipReason::NonNumericValue(render_value(value).unwrap_or_default())
            })?;

            dataset.retain(|row| {
                let cell = row.get(&column).and_then(coerce_cell_number);
                match (cell, condition_type) {
                    (Some(n), ConditionType::GreaterThan) => n > threshold,
                    (Some(n), _) => n < threshold,
                    (None, _) => false,
                }
            });
        }
        ConditionType::EqualTo => {
            let expected = render_value(value).unwrap_or_default();
            dataset.retain(|row| {
                row.get(&column)
                    .and_then(render_value)
                    .is_some_and(|actual| actual == expected)
            });
        }
        ConditionType::Contains => {
            let needle = render_value(value).unwrap_or_default().to_lowercase();
            dataset.retain(|row| {
                row.get(&column)
                    .and_then(render_value)
                    .is_some_and(|actual| actual.to_lowercase().contains(&needle))
            });
        }
    }

    tracing::debug!(
        "🔎 Applied {} on '{}': {} -> {} rows",
        condition_type,
        column,
        before,
        dataset.len()
    );
    Ok(())
}
