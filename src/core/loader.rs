use crate::domain::model::Record;
use crate::domain::ports::DatasetSource;
use crate::utils::error::{Result, StockError};
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 從固定路徑讀取股票匯出 JSON
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<Record>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StockError::DataNotFound {
                    path: self.describe(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let json: Value = serde_json::from_slice(&bytes)?;
        let records = parse_records(json)?;

        tracing::debug!("📂 Loaded {} records from {}", records.len(), self.describe());
        Ok(records)
    }
}

/// 頂層必須是陣列；陣列中不是物件的項目會被略過
pub fn parse_records(json: Value) -> Result<Vec<Record>> {
    let items = match json {
        Value::Array(items) => items,
        other => {
            return Err(StockError::InvalidDataShape {
                message: format!("expected a JSON array, found {}", json_kind(&other)),
            });
        }
    };

    let total = items.len();
    let records: Vec<Record> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(data) => Some(Record { data }),
            _ => None,
        })
        .collect();

    if records.len() < total {
        tracing::warn!(
            "🔶 Skipped {} array items that are not objects",
            total - records.len()
        );
    }

    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
