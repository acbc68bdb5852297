use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::book::Book;

/// 書籍スナップショット（DTO）
///
/// サービスの全操作が返す不変の転送レコード。
/// リポジトリが所有する可変の集約を呼び出し側から切り離す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub is_available: bool,
    pub last_borrowed_at: Option<DateTime<Utc>>,
    pub last_returned_at: Option<DateTime<Utc>>,
}

impl From<&Book> for BookSnapshot {
    fn from(book: &Book) -> Self {
        Self {
            isbn: book.isbn.value().to_string(),
            title: book.title.value().to_string(),
            author: book.author.value().to_string(),
            publication_year: book.publication_year.value(),
            is_available: book.is_available(),
            last_borrowed_at: book.last_borrowed_at,
            last_returned_at: book.last_returned_at,
        }
    }
}
