#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use library_catalog::adapters::in_memory::InMemoryBookRepository;
use library_catalog::application::catalog::ServiceDependencies;
use library_catalog::domain::commands::{AddBook, BorrowBook, ReturnBook};
use std::sync::Arc;

/// テストで使う固定の「現在時刻」
///
/// 出版年の上限はこの年（2024）になる。
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub const CURRENT_YEAR: i32 = 2024;

/// インメモリリポジトリを使ったサービス依存関係を作成
pub fn in_memory_deps() -> ServiceDependencies {
    ServiceDependencies {
        book_repository: Arc::new(InMemoryBookRepository::new()),
    }
}

pub fn add_book_cmd(isbn: &str, title: &str, author: &str, publication_year: i32) -> AddBook {
    AddBook {
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        publication_year,
        requested_at: fixed_now(),
    }
}

pub fn valid_book_cmd(isbn: &str) -> AddBook {
    add_book_cmd(isbn, "Test Book", "Author Name", 2020)
}

pub fn borrow_book_cmd(isbn: &str) -> BorrowBook {
    BorrowBook {
        isbn: isbn.to_string(),
        borrowed_at: fixed_now(),
    }
}

pub fn return_book_cmd(isbn: &str) -> ReturnBook {
    ReturnBook {
        isbn: isbn.to_string(),
        returned_at: fixed_now(),
    }
}
