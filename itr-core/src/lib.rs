pub mod merge;
pub mod models;
pub mod recommend;

pub use merge::{MergeOutcome, merge_import, refresh_business_flags};
pub use models::*;
pub use recommend::{FormType, HIGH_INCOME_THRESHOLD, RecommendationResult, recommend};
