pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use config::AppConfig;
pub use core::loader::JsonFileSource;
pub use http::{build_router, AppState};
pub use utils::error::{Result, StockError};
