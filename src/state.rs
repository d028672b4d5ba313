//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    LinkService, RedirectService, StatsService, UsageRecorder, UserService,
};
use crate::domain::repositories::{LinkRepository, UsageRepository, UserRepository};
use crate::infrastructure::cache::CacheService;

/// Services behind trait objects, so the same router serves PostgreSQL and
/// in-memory storage.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    pub stats_service: Arc<StatsService<dyn UsageRepository>>,
    pub user_service: Arc<UserService<dyn UserRepository>>,
    pub usage_recorder: UsageRecorder,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires the services over the given repositories.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        usage: Arc<dyn UsageRepository>,
        users: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheService>,
        usage_recorder: UsageRecorder,
        password_secret: String,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(links, cache.clone()));
        let redirect_service = Arc::new(RedirectService::new(
            link_service.clone(),
            usage_recorder.clone(),
        ));

        Self {
            link_service,
            redirect_service,
            stats_service: Arc::new(StatsService::new(usage)),
            user_service: Arc::new(UserService::new(users, password_secret)),
            usage_recorder,
            cache,
        }
    }
}
