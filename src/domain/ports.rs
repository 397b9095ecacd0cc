use crate::domain::model::{DatasetStatus, Record};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 股票資料來源；每次請求都重新讀取，不做快取
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// 來源描述，用於日誌
    fn describe(&self) -> String;

    async fn load(&self) -> Result<Vec<Record>>;

    /// 任何載入錯誤都只記錄日誌並回傳空序列
    async fn load_or_empty(&self) -> Vec<Record> {
        match self.load().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("⚠️ Failed to load stock data from {}: {}", self.describe(), e);
                Vec::new()
            }
        }
    }

    async fn status(&self) -> DatasetStatus {
        match self.load().await {
            Ok(records) if records.is_empty() => DatasetStatus::Empty,
            Ok(records) => DatasetStatus::Ready(records.len()),
            Err(e) => DatasetStatus::Unavailable(e.to_string()),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn data_path(&self) -> &str;
    fn schema_fields(&self) -> Option<&[String]>;
    fn strict_filters(&self) -> bool;
}
