//! User operations

use bookfeed_core::ports::Storage;
use bookfeed_core::{NewUser, Result, User};
use std::sync::Arc;
use tracing::info;

pub struct UserService {
    store: Arc<dyn Storage>,
}

impl UserService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub async fn create(&self, req: NewUser) -> Result<User> {
        req.validate()?;
        let user = self.store.insert_user(&req.name).await?;
        info!("Created user: id={}, name={}", user.id, user.name);
        Ok(user)
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>> {
        self.store.get_user(id).await
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.store.list_users().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use bookfeed_core::CoreError;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn create_returns_record_with_fresh_id() {
        let users = service();

        let alice = users
            .create(NewUser {
                name: "Alice".to_string(),
            })
            .await
            .unwrap();
        let bob = users
            .create(NewUser {
                name: "Bob".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(alice.name, "Alice");
        assert_ne!(alice.id, bob.id);
        assert_eq!(users.get(alice.id).await.unwrap(), Some(alice));
    }

    #[tokio::test]
    async fn create_rejects_empty_name() {
        let users = service();

        let err = users
            .create(NewUser {
                name: "".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(users.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let users = service();
        assert_eq!(users.get(42).await.unwrap(), None);
    }
}
