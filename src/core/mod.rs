pub mod export;
pub mod filter;
pub mod loader;
pub mod normalize;
pub mod value;

pub use crate::domain::model::{
    Condition, ConditionType, Dataset, DatasetStatus, FilterOutcome, FilterSet, Record,
    SkipReason, SkippedCondition,
};
pub use crate::domain::ports::{ConfigProvider, DatasetSource};
pub use crate::utils::error::Result;
