//! Referential integrity checks
//!
//! Precondition gates for operations that insert rows referencing
//! users or books. Check-then-insert runs as two statements; users and
//! books have no delete path, so a referenced row cannot vanish
//! between the check and the insert.

use bookfeed_core::ports::Storage;
use bookfeed_core::{CoreError, Result};

pub async fn ensure_user_exists(store: &dyn Storage, id: i64) -> Result<()> {
    if store.user_exists(id).await? {
        Ok(())
    } else {
        Err(CoreError::reference("user", id))
    }
}

pub async fn ensure_book_exists(store: &dyn Storage, id: i64) -> Result<()> {
    if store.book_exists(id).await? {
        Ok(())
    } else {
        Err(CoreError::reference("book", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use bookfeed_core::ports::UserStore;

    #[tokio::test]
    async fn missing_rows_fail_with_reference_error() {
        let store = MemoryStore::new();

        let err = ensure_user_exists(&store, 999).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Reference {
                entity: "user",
                id: 999
            }
        ));

        let err = ensure_book_exists(&store, 1).await.unwrap_err();
        assert!(matches!(err, CoreError::Reference { entity: "book", .. }));

        let alice = store.insert_user("Alice").await.unwrap();
        ensure_user_exists(&store, alice.id).await.unwrap();
    }
}
