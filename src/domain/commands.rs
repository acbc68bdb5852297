use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// コマンド：書籍を登録する
///
/// 入力値は未検証の生データ。検証はドメイン層で行う。
/// 出版年の上限は`requested_at`の年（UTC）で判定される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub requested_at: DateTime<Utc>,
}

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowBook {
    pub isbn: String,
    pub borrowed_at: DateTime<Utc>,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub isbn: String,
    pub returned_at: DateTime<Utc>,
}
