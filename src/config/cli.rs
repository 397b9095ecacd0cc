use crate::config::toml_config::TomlConfig;
use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "stock-filter")]
#[command(about = "Serve a stock data export with server-side filtering and CSV download")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the stock data JSON file
    #[arg(long)]
    pub data_path: Option<String>,

    /// Override the listen address (e.g. 127.0.0.1:5000)
    #[arg(long)]
    pub bind: Option<String>,

    /// Reject requests containing filters that cannot be applied
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl CliArgs {
    /// 載入設定檔（若有指定），再套用命令列覆蓋
    pub fn resolve(&self) -> Result<AppConfig> {
        let file_config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        let mut config = AppConfig::from(file_config);

        if let Some(data_path) = &self.data_path {
            config.data_path = data_path.clone();
        }
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if self.strict {
            config.strict_filters = true;
        }
        if self.json_logs {
            config.log_format = "json".to_string();
        }

        Ok(config)
    }
}
