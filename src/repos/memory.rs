//! In-memory `UserStore` for unit tests. Counts `find_by_id` calls so tests
//! can assert whether a lookup hit the cache or fell back to the store.
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::repos::error::RepoError;
use crate::repos::user_repo::{UserRow, UserStore};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, UserRow>>,
    finds: AtomicUsize,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRow>) -> Self {
        let store = Self::new();
        {
            let mut map = store.users.lock().unwrap();
            for user in users {
                map.insert(user.id.clone(), user);
            }
        }
        store
    }

    pub fn find_count(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRow>, RepoError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn insert(&self, user: &UserRow) -> Result<(), RepoError> {
        self.users
            .lock()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, RepoError> {
        Ok(self.users.lock().unwrap().remove(id).is_some())
    }
}
