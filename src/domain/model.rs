use crate::core::normalize::normalize_field_name;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// 單筆股票資料，欄位順序與來源 JSON 相同
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}

/// 以正規化欄位名稱組成的表格；每一列都擁有所有欄位（缺值為 null）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Dataset {
    /// 從原始資料建立表格
    ///
    /// 沒有 schema 時欄位為所有列的鍵（正規化後）依首次出現順序的聯集；
    /// 有 schema 時只保留宣告的欄位，未宣告的欄位會被丟棄。
    pub fn from_records(records: Vec<Record>, schema: Option<&[String]>) -> Self {
        let columns: Vec<String> = match schema {
            Some(fields) => fields.iter().map(|f| normalize_field_name(f)).collect(),
            None => {
                let mut seen = HashSet::new();
                let mut columns = Vec::new();
                for record in &records {
                    for key in record.data.keys() {
                        let normalized = normalize_field_name(key);
                        if seen.insert(normalized.clone()) {
                            columns.push(normalized);
                        }
                    }
                }
                columns
            }
        };

        let declared: HashSet<&str> = columns.iter().map(String::as_str).collect();
        let mut dropped_fields = 0usize;

        let rows = records
            .into_iter()
            .map(|record| {
                let mut normalized = Map::new();
                for (key, value) in record.data {
                    let column = normalize_field_name(&key);
                    if declared.contains(column.as_str()) {
                        // 兩個原始鍵正規化後相同時，後出現的值覆蓋前者
                        normalized.insert(column, value);
                    } else {
                        dropped_fields += 1;
                    }
                }

                let mut data = Map::with_capacity(columns.len());
                for column in &columns {
                    let value = normalized.remove(column).unwrap_or(Value::Null);
                    data.insert(column.clone(), value);
                }
                Record { data }
            })
            .collect();

        if dropped_fields > 0 {
            tracing::debug!("🧹 Dropped {} values outside the declared schema", dropped_fields);
        }

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Record) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    GreaterThan,
    LessThan,
    EqualTo,
    Contains,
}

impl ConditionType {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "greater_than" => Some(ConditionType::GreaterThan),
            "less_than" => Some(ConditionType::LessThan),
            "equal_to" => Some(ConditionType::EqualTo),
            "contains" => Some(ConditionType::Contains),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::GreaterThan => "greater_than",
            ConditionType::LessThan => "less_than",
            ConditionType::EqualTo => "equal_to",
            ConditionType::Contains => "contains",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ConditionType::GreaterThan | ConditionType::LessThan)
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 單一篩選條件，保留請求中的原始內容，由篩選引擎判斷是否可套用
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub spec: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, condition_type: ConditionType, value: impl Into<Value>) -> Self {
        let mut spec = Map::new();
        spec.insert("type".to_string(), Value::String(condition_type.as_str().to_string()));
        spec.insert("value".to_string(), value.into());
        Self {
            field: field.into(),
            spec: Value::Object(spec),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.spec.is_object()
    }

    /// `type` 欄位；缺少或為 null 時回傳 `None`
    pub fn condition_type(&self) -> Option<&Value> {
        self.spec.get("type").filter(|v| !v.is_null())
    }

    /// `value` 欄位；缺少或為 null 時回傳 `None`
    pub fn value(&self) -> Option<&Value> {
        self.spec.get("value").filter(|v| !v.is_null())
    }
}

/// 一次請求的所有條件，依請求中的順序以 AND 組合
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub conditions: Vec<Condition>,
}

impl FilterSet {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnknownField,
    MissingValue,
    MissingType,
    UnsupportedType(String),
    NonNumericValue(String),
    Malformed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownField => f.write_str("unknown field"),
            SkipReason::MissingValue => f.write_str("missing value"),
            SkipReason::MissingType => f.write_str("missing type"),
            SkipReason::UnsupportedType(t) => write!(f, "unsupported type {}", t),
            SkipReason::NonNumericValue(v) => write!(f, "cannot convert {} to a number", v),
            SkipReason::Malformed => f.write_str("condition is not an object"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCondition {
    pub field: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    pub dataset: Dataset,
    pub skipped: Vec<SkippedCondition>,
}

/// 資料檔狀態，用來區分「真的沒有資料」與「載入失敗」
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetStatus {
    Ready(usize),
    Empty,
    Unavailable(String),
}

impl DatasetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DatasetStatus::Ready(_) => "ok",
            DatasetStatus::Empty => "empty",
            DatasetStatus::Unavailable(_) => "unavailable",
        }
    }
}
