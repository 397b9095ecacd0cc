use crate::core::value::render_csv_field;
use crate::domain::model::Dataset;
use crate::utils::error::{Result, StockError};
use serde_json::Value;

pub const CSV_FILENAME: &str = "filtered_stock_data.csv";

/// 將表格輸出成 CSV：第一列為欄位名稱，每筆資料一列
pub fn dataset_to_csv(dataset: &Dataset) -> Result<String> {
    if dataset.columns().is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(dataset.columns())?;

    for row in dataset.rows() {
        let fields = dataset
            .columns()
            .iter()
            .map(|column| render_csv_field(row.get(column).unwrap_or(&Value::Null)));
        writer.write_record(fields)?;
    }

    let bytes = writer.into_inner().map_err(|e| StockError::ProcessingError {
        message: format!("failed to flush CSV writer: {}", e),
    })?;

    String::from_utf8(bytes).map_err(|e| StockError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Record;
    use serde_json::json;

    fn dataset(rows: Value) -> Dataset {
        let records = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|row| Record::new(row.as_object().unwrap().clone()))
            .collect();
        Dataset::from_records(records, None)
    }

    #[test]
    fn test_csv_header_uses_normalized_columns() {
        let data = dataset(json!([
            {"Ticker": "AAPL", "Price": 150, "Company Name": "Apple Inc."},
            {"Ticker": "GOOG", "Price": 90.5, "Company Name": null}
        ]));

        let csv = dataset_to_csv(&data).unwrap();

        assert_eq!(
            csv,
            "ticker,price,company_name\nAAPL,150,Apple Inc.\nGOOG,90.5,\n"
        );
    }

    #[test]
    fn test_csv_quotes_fields_with_delimiters() {
        let data = dataset(json!([{"Name": "Berkshire Hathaway, Inc.", "Note": "say \"hi\""}]));

        let csv = dataset_to_csv(&data).unwrap();

        assert_eq!(
            csv,
            "name,note\n\"Berkshire Hathaway, Inc.\",\"say \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn test_csv_with_no_rows_is_header_only() {
        let mut data = dataset(json!([{"Ticker": "AAPL", "Price": 150}]));
        data.retain(|_| false);

        assert_eq!(dataset_to_csv(&data).unwrap(), "ticker,price\n");
    }

    #[test]
    fn test_csv_with_no_columns_is_empty() {
        assert_eq!(dataset_to_csv(&Dataset::default()).unwrap(), "");
    }
}
