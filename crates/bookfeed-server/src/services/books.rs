//! Book operations

use bookfeed_core::ports::Storage;
use bookfeed_core::{Book, NewBook, Result};
use std::sync::Arc;
use tracing::info;

pub struct BookService {
    store: Arc<dyn Storage>,
}

impl BookService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub async fn create(&self, req: NewBook) -> Result<Book> {
        req.validate()?;
        let book = self.store.insert_book(&req.title, &req.author).await?;
        info!("Created book: id={}, title={}", book.id, book.title);
        Ok(book)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Book>> {
        self.store.get_book(id).await
    }

    pub async fn list(&self) -> Result<Vec<Book>> {
        self.store.list_books().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use bookfeed_core::{CoreError, AUTHOR_MAX_LEN};

    fn service() -> BookService {
        BookService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn create_round_trips_title_and_author() {
        let books = service();

        let book = books
            .create(NewBook {
                title: "Clean Code".to_string(),
                author: "Robert C. Martin".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(book.title, "Clean Code");
        assert_eq!(book.author, "Robert C. Martin");
        assert_eq!(books.get(book.id).await.unwrap(), Some(book));
    }

    #[tokio::test]
    async fn create_rejects_overlong_author() {
        let books = service();

        let err = books
            .create(NewBook {
                title: "Clean Code".to_string(),
                author: "x".repeat(AUTHOR_MAX_LEN + 1),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(books.list().await.unwrap().is_empty());
    }
}
