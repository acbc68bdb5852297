use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Isbn;

/// イベント：書籍がカタログに登録された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAdded {
    pub isbn: Isbn,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub added_at: DateTime<Utc>,
}

/// イベント：書籍が貸し出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookBorrowed {
    pub isbn: Isbn,
    pub borrowed_at: DateTime<Utc>,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReturned {
    pub isbn: Isbn,
    pub returned_at: DateTime<Utc>,
}

/// ドメインイベント統合型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    BookAdded(BookAdded),
    BookBorrowed(BookBorrowed),
    BookReturned(BookReturned),
}

impl DomainEvent {
    /// イベント種別の識別子
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::BookAdded(_) => "BookAdded",
            DomainEvent::BookBorrowed(_) => "BookBorrowed",
            DomainEvent::BookReturned(_) => "BookReturned",
        }
    }

    pub fn isbn(&self) -> &Isbn {
        match self {
            DomainEvent::BookAdded(e) => &e.isbn,
            DomainEvent::BookBorrowed(e) => &e.isbn,
            DomainEvent::BookReturned(e) => &e.isbn,
        }
    }
}
