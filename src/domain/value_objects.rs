use serde::{Deserialize, Serialize};
use std::fmt;

/// 値オブジェクト生成時のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// ISBNが空
    EmptyIsbn,
    /// タイトルが空
    EmptyTitle,
    /// 著者が空
    EmptyAuthor,
    /// 出版年が範囲外（0 < year <= current_year を満たさない）
    PublicationYearOutOfRange { year: i32, current_year: i32 },
}

/// ISBN - 書籍の一意な識別子（カタログの主キー）
///
/// 不変条件：空文字列ではない
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Isbn(String);

impl Isbn {
    /// # エラー
    /// 空文字列の場合は`ValidationError::EmptyIsbn`を返す
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyIsbn);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 書籍タイトル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title(String);

impl Title {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// 著者名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author(String);

impl Author {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// 出版年
///
/// 不変条件：0 < year <= 登録時点の年
/// 未来の出版年や紀元0年以前の値は型として作成できない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationYear(i32);

impl PublicationYear {
    /// # エラー
    /// 範囲外の場合は`ValidationError::PublicationYearOutOfRange`を返す
    pub fn new(year: i32, current_year: i32) -> Result<Self, ValidationError> {
        if year <= 0 || year > current_year {
            return Err(ValidationError::PublicationYearOutOfRange { year, current_year });
        }
        Ok(Self(year))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// 書籍の貸出状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookStatus {
    /// 貸出可能（登録直後の初期状態）
    #[default]
    Available,
    /// 貸出中
    Borrowed,
}

impl BookStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, BookStatus::Available)
    }
}
