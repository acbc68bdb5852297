use crate::adapters::error::BackendError;
use crate::domain::{Isbn, book::Book};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result, Transition};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// インメモリ版 BookRepository 実装
///
/// 書籍は追加順に保持し、ISBNの索引を別に持つ。
/// `get_all`は追加順に列挙する。
/// `add`と`update`を含むすべての操作は1つのロックの下で行われる。
pub struct BookRepository {
    store: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    books: Vec<Book>,
    index: HashMap<Isbn, usize>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| BackendError::LockPoisoned.into())
    }
}

impl Default for BookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl BookRepositoryTrait for BookRepository {
    /// ロックを保持したまま存在確認と挿入を行う
    fn add(&self, book: Book) -> Result<bool> {
        let mut store = self.lock()?;
        if store.index.contains_key(&book.isbn) {
            return Ok(false);
        }

        let position = store.books.len();
        store.index.insert(book.isbn.clone(), position);
        store.books.push(book);
        Ok(true)
    }

    fn get_by_id(&self, isbn: &Isbn) -> Result<Option<Book>> {
        let store = self.lock()?;
        Ok(store
            .index
            .get(isbn)
            .map(|&position| store.books[position].clone()))
    }

    fn get_all(&self) -> Result<Vec<Book>> {
        Ok(self.lock()?.books.clone())
    }

    fn exists_by_id(&self, isbn: &Isbn) -> Result<bool> {
        Ok(self.lock()?.index.contains_key(isbn))
    }

    /// ロックを保持したまま状態遷移を適用する
    fn update(&self, isbn: &Isbn, apply: Transition<'_>) -> Result<Option<Book>> {
        let mut store = self.lock()?;
        let Some(position) = store.index.get(isbn).copied() else {
            return Ok(None);
        };

        match apply(&store.books[position]) {
            Some(next) => {
                store.books[position] = next.clone();
                Ok(Some(next))
            }
            None => Ok(Some(store.books[position].clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{borrow_book, register_book};
    use chrono::{TimeZone, Utc};

    fn book(isbn: &str) -> Book {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        register_book(isbn, "Title", "Author", 2000, now).unwrap().0
    }

    fn isbn(value: &str) -> Isbn {
        Isbn::new(value).unwrap()
    }

    #[test]
    fn test_add_and_get_by_id() {
        let repo = BookRepository::new();
        repo.add(book("1")).unwrap();

        let found = repo.get_by_id(&isbn("1")).unwrap();
        assert_eq!(found.map(|b| b.isbn), Some(isbn("1")));
        assert!(repo.get_by_id(&isbn("2")).unwrap().is_none());
    }

    #[test]
    fn test_exists_by_id() {
        let repo = BookRepository::new();
        assert!(!repo.exists_by_id(&isbn("1")).unwrap());

        repo.add(book("1")).unwrap();
        assert!(repo.exists_by_id(&isbn("1")).unwrap());
    }

    #[test]
    fn test_get_all_keeps_insertion_order() {
        let repo = BookRepository::new();
        for value in ["c", "a", "b"] {
            repo.add(book(value)).unwrap();
        }

        let isbns: Vec<String> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|b| b.isbn.value().to_string())
            .collect();
        assert_eq!(isbns, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_add_existing_isbn_leaves_store_unchanged() {
        let repo = BookRepository::new();
        assert!(repo.add(book("a")).unwrap());
        assert!(repo.add(book("b")).unwrap());

        let mut replacement = book("a");
        replacement.title = crate::domain::Title::new("Second Edition").unwrap();
        assert!(!repo.add(replacement).unwrap());

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title.value(), "Title");
        assert_eq!(all[1].isbn, isbn("b"));
    }

    #[test]
    fn test_add_existing_isbn_keeps_borrowed_state() {
        let repo = BookRepository::new();
        repo.add(book("1")).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        repo.update(&isbn("1"), &mut |current| {
            borrow_book(current, at).ok().map(|(next, _)| next)
        })
        .unwrap();

        assert!(!repo.add(book("1")).unwrap());

        let stored = repo.get_by_id(&isbn("1")).unwrap().unwrap();
        assert!(!stored.is_available());
        assert_eq!(stored.last_borrowed_at, Some(at));
    }

    #[test]
    fn test_concurrent_add_of_same_isbn_inserts_once() {
        use std::sync::Arc;
        use std::thread;

        let repo = Arc::new(BookRepository::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || repo.add(book("1")).unwrap())
            })
            .collect();

        let inserted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|&added| added)
            .count();

        assert_eq!(inserted, 1);
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_isbn_returns_none_without_calling_apply() {
        let repo = BookRepository::new();
        let mut called = false;

        let result = repo
            .update(&isbn("missing"), &mut |_| {
                called = true;
                None
            })
            .unwrap();

        assert!(result.is_none());
        assert!(!called);
    }

    #[test]
    fn test_update_stores_transition_result() {
        let repo = BookRepository::new();
        repo.add(book("1")).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();

        let updated = repo
            .update(&isbn("1"), &mut |current| {
                borrow_book(current, at).ok().map(|(next, _)| next)
            })
            .unwrap()
            .unwrap();

        assert!(!updated.is_available());
        let stored = repo.get_by_id(&isbn("1")).unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[test]
    fn test_update_without_change_returns_current() {
        let repo = BookRepository::new();
        repo.add(book("1")).unwrap();

        let current = repo.update(&isbn("1"), &mut |_| None).unwrap().unwrap();

        assert!(current.is_available());
        assert_eq!(repo.get_by_id(&isbn("1")).unwrap().unwrap(), current);
    }
}
