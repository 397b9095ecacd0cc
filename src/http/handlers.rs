use super::{ApiError, AppState};
use crate::core::export::{dataset_to_csv, CSV_FILENAME};
use crate::core::filter;
use crate::core::{Dataset, DatasetStatus, FilterOutcome, FilterSet, Record};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

const INDEX_HTML: &str = include_str!("assets/index.html");

static SKIPPED_FILTERS: HeaderName = HeaderName::from_static("x-skipped-filters");

pub(crate) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// 回傳原始資料；載入失敗與空資料都回傳 `[]`
pub(crate) async fn load_data(State(state): State<AppState>) -> Json<Vec<Record>> {
    let records = state.source.load_or_empty().await;
    tracing::info!("📤 /load_data returning {} records", records.len());
    Json(records)
}

pub(crate) async fn filter_data(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let outcome = run_filters(&state, &body).await?;

    let mut headers = HeaderMap::new();
    put_skipped_header(&mut headers, &outcome);

    let rows = outcome.dataset.into_rows();
    tracing::info!("📤 /filter returning {} records", rows.len());
    Ok((headers, Json(rows)).into_response())
}

pub(crate) async fn download_csv(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let outcome = run_filters(&state, &body).await?;
    let csv_data = dataset_to_csv(&outcome.dataset)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename={}", CSV_FILENAME)) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    put_skipped_header(&mut headers, &outcome);

    tracing::info!(
        "📤 /download_csv returning {} records ({} bytes)",
        outcome.dataset.len(),
        csv_data.len()
    );
    Ok((headers, csv_data).into_response())
}

pub(crate) async fn healthz(State(state): State<AppState>) -> Response {
    let status = state.source.status().await;
    let body = match &status {
        DatasetStatus::Ready(count) => json!({"status": status.label(), "records": count}),
        DatasetStatus::Empty => json!({"status": status.label(), "records": 0}),
        DatasetStatus::Unavailable(reason) => json!({"status": status.label(), "reason": reason}),
    };
    let code = match status {
        DatasetStatus::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };
    (code, Json(body)).into_response()
}

/// `/filter` 與 `/download_csv` 共用：先確認有資料，再檢查篩選條件
async fn run_filters(state: &AppState, body: &[u8]) -> Result<FilterOutcome, ApiError> {
    let records = match state.source.load().await {
        Ok(records) if !records.is_empty() => records,
        Ok(_) => {
            tracing::info!("📭 Stock data file {} is empty", state.source.describe());
            return Err(ApiError::NoData);
        }
        Err(e) => {
            tracing::warn!(
                "⚠️ Stock data unavailable from {}: {} ({})",
                state.source.describe(),
                e,
                e.recovery_suggestion()
            );
            return Err(ApiError::NoData);
        }
    };

    let filters = parse_filters(body)?;
    if filters.is_empty() {
        return Err(ApiError::NoFilters);
    }

    let dataset = Dataset::from_records(records, state.schema.as_deref());
    tracing::debug!(
        "🔎 Applying {} filters to {} records ({} columns)",
        filters.len(),
        dataset.len(),
        dataset.columns().len()
    );

    let outcome = filter::apply(dataset, &filters);

    if state.strict_filters && !outcome.skipped.is_empty() {
        return Err(ApiError::RejectedFilters(outcome.skipped));
    }

    Ok(outcome)
}

fn parse_filters(body: &[u8]) -> Result<FilterSet, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(FilterSet::default());
    }

    let json: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidFilters(format!("Invalid filter payload: {}", e)))?;

    Ok(FilterSet::from_json(&json)?)
}

fn put_skipped_header(headers: &mut HeaderMap, outcome: &FilterOutcome) {
    if !outcome.skipped.is_empty() {
        headers.insert(SKIPPED_FILTERS.clone(), HeaderValue::from(outcome.skipped.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters_blank_body_is_empty() {
        assert!(parse_filters(b"").unwrap().is_empty());
        assert!(parse_filters(b"  \n").unwrap().is_empty());
        assert!(parse_filters(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_filters_invalid_json() {
        let err = parse_filters(b"{not json").unwrap_err();
        assert!(matches!(err, ApiError::InvalidFilters(_)));
        assert!(err.to_string().starts_with("Invalid filter payload"));
    }

    #[test]
    fn test_parse_filters_object() {
        let filters = parse_filters(br#"{"Price": {"type": "greater_than", "value": 1}}"#).unwrap();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.conditions[0].field, "Price");
    }
}
