//! Link creation, resolution and owner-scoped management.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, CachedLink};
use crate::utils::code_generator::{decode_code, encode_id};
use crate::utils::url_validator::validate_absolute_url;

/// Service owning the link records.
///
/// Short codes are never chosen here: storage assigns the id and the code is
/// its base-36 rendering, written in the same unit of work as the insert.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    cache: Arc<dyn CacheService>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    pub fn new(link_repository: Arc<L>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            link_repository,
            cache,
        }
    }

    /// Creates a link for `owner_id` pointing at `full_url`.
    ///
    /// The URL is stored exactly as given once it is known to be absolute.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if `full_url` lacks a scheme or host.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create(&self, owner_id: i64, full_url: String) -> Result<Link, AppError> {
        validate_absolute_url(&full_url).map_err(|e| {
            AppError::invalid_url(
                "Only absolute URLs are supported",
                json!({ "full": full_url, "reason": e.to_string() }),
            )
        })?;

        let link = self
            .link_repository
            .create(NewLink { owner_id, full_url }, encode_id)
            .await?;

        debug!("Created link {} -> {}", link.code, link.full_url);
        Ok(link)
    }

    /// Looks up a link by its short code.
    ///
    /// Codes that are not canonical base-36 are rejected without a storage
    /// round trip.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        if decode_code(code).is_none() {
            return Err(short_link_not_found(code));
        }

        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| short_link_not_found(code))
    }

    /// Resolves a short code for redirecting, consulting the cache first.
    ///
    /// Misses are filled in the background; a failing cache falls back to
    /// storage.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub async fn resolve_target(&self, code: &str) -> Result<CachedLink, AppError> {
        match self.cache.get_link(code).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => error!("Cache error: {}", e),
        }

        let link = self.resolve(code).await?;
        let target = CachedLink {
            link_id: link.id,
            full_url: link.full_url,
        };

        let cache = self.cache.clone();
        let code = link.code;
        let entry = target.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set_link(&code, &entry, None).await {
                warn!("Failed to cache link {}: {}", code, e);
            }
        });

        Ok(target)
    }

    /// Deletes a link owned by `owner_id` together with its usage events.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `owner_id` owns no link with that id.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete(&self, link_id: i64, owner_id: i64) -> Result<(), AppError> {
        let deleted = self
            .link_repository
            .delete_owned(link_id, owner_id)
            .await?
            .ok_or_else(|| link_not_found(link_id))?;

        if let Err(e) = self.cache.invalidate(&deleted.code).await {
            warn!("Failed to invalidate cached link {}: {}", deleted.code, e);
        }

        debug!("Deleted link {} ({})", deleted.id, deleted.code);
        Ok(())
    }

    /// Returns every link owned by `owner_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_by_owner(owner_id).await
    }

    /// Fetches one link, only if `owner_id` owns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `owner_id` owns no link with that id.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_owned(&self, link_id: i64, owner_id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_owned(link_id, owner_id)
            .await?
            .ok_or_else(|| link_not_found(link_id))
    }

    /// Counts all links. Doubles as the storage health check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }
}

fn short_link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "short": code }))
}

fn link_not_found(link_id: i64) -> AppError {
    AppError::not_found("Link not found", json!({ "id": link_id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::cache::{CacheResult, NullCache};
    use async_trait::async_trait;
    use crate::domain::entities::NewUser;
    use crate::domain::repositories::UserRepository;
    use crate::infrastructure::memory::MemoryStore;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    fn create_test_link(id: i64, url: &str, owner_id: i64) -> Link {
        Link::new(id, encode_id(id as u64), url.to_string(), owner_id, Utc::now())
    }

    fn service(repo: MockLinkRepository) -> LinkService<MockLinkRepository> {
        LinkService::new(Arc::new(repo), Arc::new(NullCache::new()))
    }

    /// Records invalidations and serves a fixed hit.
    #[derive(Default)]
    struct RecordingCache {
        hit: Option<CachedLink>,
        invalidated: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CacheService for RecordingCache {
        async fn get_link(&self, _code: &str) -> CacheResult<Option<CachedLink>> {
            Ok(self.hit.clone())
        }

        async fn set_link(
            &self,
            _code: &str,
            _link: &CachedLink,
            _ttl_seconds: Option<usize>,
        ) -> CacheResult<()> {
            Ok(())
        }

        async fn invalidate(&self, code: &str) -> CacheResult<()> {
            self.invalidated.lock().unwrap().push(code.to_string());
            Ok(())
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_create_passes_id_encoder() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .withf(|new_link, _| new_link.full_url == "https://google.com" && new_link.owner_id == 7)
            .times(1)
            .returning(|new_link, encode| {
                Ok(Link::new(
                    37,
                    encode(37),
                    new_link.full_url,
                    new_link.owner_id,
                    Utc::now(),
                ))
            });

        let link = service(mock_repo)
            .create(7, "https://google.com".to_string())
            .await
            .unwrap();

        assert_eq!(link.code, "11");
        assert_eq!(link.full_url, "https://google.com");
    }

    #[tokio::test]
    async fn test_create_keeps_url_verbatim() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .withf(|new_link, _| new_link.full_url == "https://EXAMPLE.com:443/Path?q=1")
            .times(1)
            .returning(|new_link, encode| {
                Ok(Link::new(1, encode(1), new_link.full_url, 1, Utc::now()))
            });

        let result = service(mock_repo)
            .create(1, "https://EXAMPLE.com:443/Path?q=1".to_string())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_relative_url() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let result = service(mock_repo).create(1, "not-a-url".to_string()).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_hostless_url() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let result = service(mock_repo)
            .create(1, "mailto:someone@example.com".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut mock_repo = MockLinkRepository::new();
        let link = create_test_link(1, "https://google.com", 1);
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "1")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let link = service(mock_repo).resolve("1").await.unwrap();

        assert_eq!(link.full_url, "https://google.com");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo).resolve("zz").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_non_canonical_skips_storage() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_code().times(0);

        let svc = service(mock_repo);

        assert!(matches!(
            svc.resolve("ABC").await.unwrap_err(),
            AppError::NotFound { .. }
        ));
        assert!(matches!(
            svc.resolve("").await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_resolve_target_uses_cache_hit() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_code().times(0);

        let cache = RecordingCache {
            hit: Some(CachedLink {
                link_id: 4,
                full_url: "https://cached.example".to_string(),
            }),
            ..Default::default()
        };
        let svc = LinkService::new(Arc::new(mock_repo), Arc::new(cache));

        let target = svc.resolve_target("4").await.unwrap();

        assert_eq!(target.link_id, 4);
        assert_eq!(target.full_url, "https://cached.example");
    }

    #[tokio::test]
    async fn test_resolve_target_falls_back_to_storage() {
        let mut mock_repo = MockLinkRepository::new();
        let link = create_test_link(10, "https://rust-lang.org", 1);
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "a")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let target = service(mock_repo).resolve_target("a").await.unwrap();

        assert_eq!(target.link_id, 10);
        assert_eq!(target.full_url, "https://rust-lang.org");
    }

    #[tokio::test]
    async fn test_delete_invalidates_cache() {
        let mut mock_repo = MockLinkRepository::new();
        let link = create_test_link(37, "https://google.com", 2);
        mock_repo
            .expect_delete_owned()
            .withf(|id, owner| *id == 37 && *owner == 2)
            .times(1)
            .returning(move |_, _| Ok(Some(link.clone())));

        let cache = Arc::new(RecordingCache::default());
        let svc = LinkService::new(Arc::new(mock_repo), cache.clone());

        svc.delete(37, 2).await.unwrap();

        assert_eq!(*cache.invalidated.lock().unwrap(), vec!["11".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_not_owned() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_delete_owned()
            .times(1)
            .returning(|_, _| Ok(None));

        let result = service(mock_repo).delete(37, 3).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_owned_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_owned()
            .times(1)
            .returning(|_, _| Ok(None));

        let result = service(mock_repo).get_owned(1, 1).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_by_owner() {
        let mut mock_repo = MockLinkRepository::new();
        let links = vec![
            create_test_link(1, "https://a.example", 5),
            create_test_link(2, "https://b.example", 5),
        ];
        mock_repo
            .expect_list_by_owner()
            .withf(|owner| *owner == 5)
            .times(1)
            .returning(move |_| Ok(links.clone()));

        let links = service(mock_repo).list_by_owner(5).await.unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].code, "1");
        assert_eq!(links[1].code, "2");
    }

    enum Slot {
        Live(CachedLink),
        Deleted,
    }

    /// In-process cache with the fill-if-absent and tombstone rules of
    /// `RedisCache`, whose fills land only after a delay.
    struct SlowCache {
        fill_delay: Duration,
        slots: Mutex<HashMap<String, Slot>>,
    }

    impl SlowCache {
        fn new(fill_delay: Duration) -> Self {
            Self {
                fill_delay,
                slots: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl CacheService for SlowCache {
        async fn get_link(&self, code: &str) -> CacheResult<Option<CachedLink>> {
            Ok(match self.slots.lock().unwrap().get(code) {
                Some(Slot::Live(link)) => Some(link.clone()),
                _ => None,
            })
        }

        async fn set_link(
            &self,
            code: &str,
            link: &CachedLink,
            _ttl_seconds: Option<usize>,
        ) -> CacheResult<()> {
            tokio::time::sleep(self.fill_delay).await;
            self.slots
                .lock()
                .unwrap()
                .entry(code.to_string())
                .or_insert_with(|| Slot::Live(link.clone()));
            Ok(())
        }

        async fn invalidate(&self, code: &str) -> CacheResult<()> {
            self.slots
                .lock()
                .unwrap()
                .insert(code.to_string(), Slot::Deleted);
            Ok(())
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_late_cache_fill_does_not_revive_deleted_link() {
        let store = Arc::new(MemoryStore::new());
        let owner = UserRepository::create(
            store.as_ref(),
            NewUser {
                name: "alice".to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap();
        let cache = Arc::new(SlowCache::new(Duration::from_millis(50)));
        let svc = LinkService::new(store, cache.clone());

        let link = svc
            .create(owner.id, "https://google.com".to_string())
            .await
            .unwrap();
        assert_eq!(link.code, "1");

        // Leaves a fill in flight that lands after the delete.
        svc.resolve_target("1").await.unwrap();
        svc.delete(link.id, owner.id).await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;

        let result = svc.resolve_target("1").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
        assert_eq!(cache.get_link("1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cache_fill_stores_live_link() {
        let store = Arc::new(MemoryStore::new());
        let owner = UserRepository::create(
            store.as_ref(),
            NewUser {
                name: "alice".to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap();
        let cache = Arc::new(SlowCache::new(Duration::from_millis(1)));
        let svc = LinkService::new(store, cache.clone());

        svc.create(owner.id, "https://google.com".to_string())
            .await
            .unwrap();
        svc.resolve_target("1").await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        let cached = cache.get_link("1").await.unwrap().unwrap();
        assert_eq!(cached.full_url, "https://google.com");
    }
}
