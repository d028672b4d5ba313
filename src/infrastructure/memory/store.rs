//! [`MemoryStore`]: all three repositories over one lock.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::domain::entities::{
    FullUrlUseCount, Link, NewLink, NewUsageEvent, NewUser, UsageEvent, User,
};
use crate::domain::repositories::{CodeEncoder, LinkRepository, UsageRepository, UserRepository};
use crate::error::AppError;

#[derive(Default)]
struct State {
    next_link_id: i64,
    next_usage_id: i64,
    next_user_id: i64,
    links: BTreeMap<i64, Link>,
    codes: HashMap<String, i64>,
    uses: BTreeMap<i64, UsageEvent>,
    users: BTreeMap<i64, User>,
}

impl State {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

/// Thread-safe in-memory implementation of every repository trait.
///
/// Ids start at 1 and increase by one per insert, like a `BIGSERIAL` column.
/// Link creation holds the write lock across id assignment and code
/// derivation, so readers never see a link without its code.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn create(&self, new_link: NewLink, encode: CodeEncoder) -> Result<Link, AppError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&new_link.owner_id) {
            return Err(AppError::bad_request(
                "Referenced record does not exist",
                json!({ "owner_id": new_link.owner_id }),
            ));
        }

        let id = State::next_id(&mut state.next_link_id);
        let code = encode(id as u64);
        if state.codes.contains_key(&code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "code": code }),
            ));
        }

        let link = Link::new(id, code.clone(), new_link.full_url, new_link.owner_id, Utc::now());
        state.codes.insert(code, id);
        state.links.insert(id, link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .codes
            .get(code)
            .and_then(|id| state.links.get(id))
            .cloned())
    }

    async fn find_owned(&self, id: i64, owner_id: i64) -> Result<Option<Link>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .links
            .get(&id)
            .filter(|link| link.is_owned_by(owner_id))
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .links
            .values()
            .filter(|link| link.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    async fn delete_owned(&self, id: i64, owner_id: i64) -> Result<Option<Link>, AppError> {
        let mut state = self.state.write().await;

        if !state.links.get(&id).is_some_and(|l| l.is_owned_by(owner_id)) {
            return Ok(None);
        }

        let Some(link) = state.links.remove(&id) else {
            return Ok(None);
        };
        state.codes.remove(&link.code);
        state.uses.retain(|_, event| event.link_id != id);

        Ok(Some(link))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.state.read().await.links.len() as i64)
    }
}

#[async_trait]
impl UsageRepository for MemoryStore {
    async fn record(&self, event: NewUsageEvent) -> Result<UsageEvent, AppError> {
        let mut state = self.state.write().await;

        if !state.links.contains_key(&event.link_id) {
            return Err(AppError::bad_request(
                "Referenced record does not exist",
                json!({ "link_id": event.link_id }),
            ));
        }

        let id = State::next_id(&mut state.next_usage_id);
        let recorded = UsageEvent::new(id, event.link_id, event.used_at);
        state.uses.insert(id, recorded.clone());

        Ok(recorded)
    }

    async fn list_all(&self) -> Result<Vec<UsageEvent>, AppError> {
        Ok(self.state.read().await.uses.values().cloned().collect())
    }

    async fn list_by_link(&self, link_id: i64) -> Result<Vec<UsageEvent>, AppError> {
        let state = self.state.read().await;
        let mut events: Vec<UsageEvent> = state
            .uses
            .values()
            .filter(|e| e.link_id == link_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.used_at, e.id));
        Ok(events)
    }

    async fn use_counts_by_full_url(&self) -> Result<Vec<FullUrlUseCount>, AppError> {
        let state = self.state.read().await;

        let mut per_link: BTreeMap<i64, u64> = BTreeMap::new();
        for event in state.uses.values() {
            *per_link.entry(event.link_id).or_insert(0) += 1;
        }

        Ok(per_link
            .into_iter()
            .filter_map(|(link_id, uses)| {
                state
                    .links
                    .get(&link_id)
                    .map(|link| FullUrlUseCount::new(link.full_url.clone(), uses))
            })
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.state.read().await.uses.len() as i64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.name == new_user.name) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "name": new_user.name }),
            ));
        }

        let id = State::next_id(&mut state.next_user_id);
        let user = User::new(id, new_user.name, new_user.password_hash, Utc::now());
        state.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.name == name).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::code_generator::encode_id;
    use chrono::TimeZone;
    use std::sync::Arc;

    async fn store_with_user() -> (MemoryStore, i64) {
        let store = MemoryStore::new();
        let user = UserRepository::create(
            &store,
            NewUser {
                name: "alice".to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap();
        (store, user.id)
    }

    async fn add_link(store: &MemoryStore, owner_id: i64, url: &str) -> Link {
        LinkRepository::create(
            store,
            NewLink {
                owner_id,
                full_url: url.to_string(),
            },
            encode_id,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_codes_follow_ids() {
        let (store, owner) = store_with_user().await;

        let first = add_link(&store, owner, "https://google.com").await;
        assert_eq!(first.id, 1);
        assert_eq!(first.code, "1");

        for _ in 2..37 {
            add_link(&store, owner, "https://example.com").await;
        }
        let link_37 = add_link(&store, owner, "https://rust-lang.org").await;
        assert_eq!(link_37.id, 37);
        assert_eq!(link_37.code, "11");

        let found = store.find_by_code("11").await.unwrap().unwrap();
        assert_eq!(found.full_url, "https://rust-lang.org");
    }

    #[tokio::test]
    async fn test_create_requires_owner() {
        let store = MemoryStore::new();
        let result = LinkRepository::create(
            &store,
            NewLink {
                owner_id: 99,
                full_url: "https://google.com".to_string(),
            },
            encode_id,
        )
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_owner_scoping() {
        let (store, owner) = store_with_user().await;
        let link = add_link(&store, owner, "https://google.com").await;

        assert!(store.find_owned(link.id, owner).await.unwrap().is_some());
        assert!(store.find_owned(link.id, owner + 1).await.unwrap().is_none());
        assert!(store.delete_owned(link.id, owner + 1).await.unwrap().is_none());
        assert_eq!(LinkRepository::count(&store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_uses() {
        let (store, owner) = store_with_user().await;
        let google = add_link(&store, owner, "https://google.com").await;
        let rust = add_link(&store, owner, "https://rust-lang.org").await;

        for link_id in [google.id, google.id, rust.id] {
            store
                .record(NewUsageEvent {
                    link_id,
                    used_at: Utc::now(),
                })
                .await
                .unwrap();
        }

        let deleted = store.delete_owned(google.id, owner).await.unwrap();
        assert_eq!(deleted.unwrap().code, google.code);

        assert!(store.find_by_code(&google.code).await.unwrap().is_none());
        assert_eq!(UsageRepository::count(&store).await.unwrap(), 1);
        assert_eq!(
            store.use_counts_by_full_url().await.unwrap(),
            vec![FullUrlUseCount::new("https://rust-lang.org", 1)]
        );
    }

    #[tokio::test]
    async fn test_record_unknown_link() {
        let store = MemoryStore::new();
        let result = store
            .record(NewUsageEvent {
                link_id: 1,
                used_at: Utc::now(),
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_use_counts_omit_unused_links() {
        let (store, owner) = store_with_user().await;
        let used = add_link(&store, owner, "https://google.com").await;
        add_link(&store, owner, "https://unused.example").await;

        store
            .record(NewUsageEvent {
                link_id: used.id,
                used_at: Utc.with_ymd_and_hms(2020, 2, 1, 5, 10, 0).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(
            store.use_counts_by_full_url().await.unwrap(),
            vec![FullUrlUseCount::new("https://google.com", 1)]
        );
    }

    #[tokio::test]
    async fn test_duplicate_user_name() {
        let (store, _) = store_with_user().await;
        let result = UserRepository::create(
            &store,
            NewUser {
                name: "alice".to_string(),
                password_hash: "other".to_string(),
            },
        )
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_codes() {
        let (store, owner) = store_with_user().await;
        let store = Arc::new(store);

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    add_link(&store, owner, &format!("https://host{}.example", i)).await
                })
            })
            .collect();

        let mut codes = std::collections::HashSet::new();
        for handle in handles {
            let link = handle.await.unwrap();
            assert_eq!(link.code, encode_id(link.id as u64));
            codes.insert(link.code);
        }

        assert_eq!(codes.len(), 64);
    }

    fn assert_coded(link: &Link) {
        assert!(!link.code.is_empty(), "link {} has no code", link.id);
        assert_eq!(link.code, encode_id(link.id as u64));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_see_link_without_code() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let (store, owner) = store_with_user().await;
        let store = Arc::new(store);
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                let done = done.clone();
                tokio::spawn(async move {
                    while !done.load(Ordering::Acquire) {
                        for link in store.list_by_owner(owner).await.unwrap() {
                            assert_coded(&link);
                        }
                        for id in 1..=64i64 {
                            let code = encode_id(id as u64);
                            if let Some(link) = store.find_by_code(&code).await.unwrap() {
                                assert_coded(&link);
                            }
                            if let Some(link) = store.find_owned(id, owner).await.unwrap() {
                                assert_coded(&link);
                            }
                        }
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        let writers: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    add_link(&store, owner, &format!("https://host{}.example", i)).await
                })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap();
        }
        done.store(true, Ordering::Release);

        for reader in readers {
            reader.await.unwrap();
        }
        let listed = store.list_by_owner(owner).await.unwrap();
        assert_eq!(listed.len(), 64);
        listed.iter().for_each(assert_coded);
    }
}
