//! Database repository implementations

pub mod ad_repository;
pub mod ai_repository;
pub mod analytics_repository;
pub mod automation_repository;
pub mod campaign_repository;
pub mod client_repository;
pub mod dashboard_repository;
pub mod integration_repository;
pub mod invoice_repository;
pub mod notification_repository;
pub mod post_repository;
pub mod preference_repository;
pub mod report_repository;
pub mod reward_repository;
pub mod user_repository;

// Re-export all repositories for convenience
pub use ad_repository::*;
pub use ai_repository::*;
pub use analytics_repository::*;
pub use automation_repository::*;
pub use campaign_repository::*;
pub use client_repository::*;
pub use dashboard_repository::*;
pub use integration_repository::*;
pub use invoice_repository::*;
pub use notification_repository::*;
pub use post_repository::*;
pub use preference_repository::*;
pub use report_repository::*;
pub use reward_repository::*;
pub use user_repository::*;
