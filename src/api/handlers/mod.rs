//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod fallback;
pub mod health;
pub mod links;
pub mod redirect;
pub mod stats;
pub mod users;

pub use fallback::fallback_handler;
pub use health::health_handler;
pub use links::{
    create_short_handler, delete_short_handler, get_short_handler, list_shorts_handler,
};
pub use redirect::redirect_handler;
pub use stats::{top_domains_handler, usage_graph_handler};
pub use users::{logout_handler, me_handler, register_handler};
