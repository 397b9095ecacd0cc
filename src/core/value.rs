use serde_json::Value;

/// 將篩選條件的值轉成浮點數；無法轉換時回傳 `None`
pub fn coerce_filter_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => parse_numeric_text(s),
        _ => None,
    }
}

/// 將儲存格轉成數值；字串以外的非數值（含布林與 null）都視為缺值
pub fn coerce_cell_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_text(s),
        _ => None,
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// 儲存格與條件值共用的字串表示；null 沒有字串表示
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// CSV 欄位內容，null 輸出為空字串
pub fn render_csv_field(value: &Value) -> String {
    render_value(value).unwrap_or_default()
}
