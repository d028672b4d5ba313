//! Business logic services for the application layer.

pub mod link_service;
pub mod redirect_service;
pub mod stats_service;
pub mod usage_recorder;
pub mod user_service;

pub use link_service::LinkService;
pub use redirect_service::RedirectService;
pub use stats_service::StatsService;
pub use usage_recorder::UsageRecorder;
pub use user_service::UserService;
