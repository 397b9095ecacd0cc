#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_bind_address, validate_one_of, validate_path, validate_schema_fields, Validate,
};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::CliArgs;

/// 合併設定檔與命令列參數後的最終設定
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind: String,
    pub data_path: String,
    pub schema: Option<Vec<String>>,
    pub strict_filters: bool,
    pub log_level: Option<String>,
    pub log_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from(TomlConfig::default())
    }
}

impl From<TomlConfig> for AppConfig {
    fn from(config: TomlConfig) -> Self {
        Self {
            bind: config.server.bind,
            data_path: config.data.path,
            schema: config.schema.map(|s| s.fields),
            strict_filters: config.filters.strict,
            log_level: config.logging.level,
            log_format: config.logging.format,
        }
    }
}

impl AppConfig {
    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.log_format).unwrap_or(LogFormat::Compact)
    }
}

impl ConfigProvider for AppConfig {
    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn schema_fields(&self) -> Option<&[String]> {
        self.schema.as_deref()
    }

    fn strict_filters(&self) -> bool {
        self.strict_filters
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_bind_address("server.bind", &self.bind)?;
        validate_path("data.path", &self.data_path)?;

        if let Some(fields) = &self.schema {
            validate_schema_fields("schema.fields", fields)?;
        }

        validate_one_of("logging.format", &self.log_format, &["compact", "json"])?;
        Ok(())
    }
}
