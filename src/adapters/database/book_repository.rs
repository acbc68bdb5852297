use crate::adapters::{error::BackendError, registry::BackendKind};
use crate::domain::{Isbn, book::Book};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result, Transition};

/// データベース版 BookRepository 実装（プレースホルダー）
///
/// サービスを変更せずにデータベースへ切り替えられるように用意している。
/// ストレージはまだ接続されておらず、すべての操作が
/// `BackendError::NotImplemented`で失敗する。
pub struct BookRepository;

impl BookRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BookRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn not_implemented<T>(operation: &str) -> Result<T> {
    tracing::debug!(backend = %BackendKind::Database, operation, "Placeholder repository called");
    Err(BackendError::NotImplemented(BackendKind::Database).into())
}

impl BookRepositoryTrait for BookRepository {
    fn add(&self, _book: Book) -> Result<bool> {
        not_implemented("add")
    }

    fn get_by_id(&self, _isbn: &Isbn) -> Result<Option<Book>> {
        not_implemented("get_by_id")
    }

    fn get_all(&self) -> Result<Vec<Book>> {
        not_implemented("get_all")
    }

    fn exists_by_id(&self, _isbn: &Isbn) -> Result<bool> {
        not_implemented("exists_by_id")
    }

    fn update(&self, _isbn: &Isbn, _apply: Transition<'_>) -> Result<Option<Book>> {
        not_implemented("update")
    }
}
