use regex::Regex;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("static pattern is valid"));

/// 將欄位名稱正規化：非英數字元換成 `_` 後轉小寫
///
/// 資料集欄位與前端傳入的篩選欄位都會經過這一步，
/// 因此 `"P/E Ratio"`、`"p e ratio"` 與 `"p_e_ratio"` 會對應到同一欄。
pub fn normalize_field_name(field_name: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(field_name, "_")
        .to_ascii_lowercase()
}
