use crate::domain::ValidationError;
use thiserror::Error;

/// カタログ管理アプリケーション層のエラー
///
/// メッセージはCLIにそのまま表示される固定テンプレート。
#[derive(Debug, Error)]
pub enum CatalogError {
    /// ISBNが空
    #[error("ISBN cannot be null or empty.")]
    InvalidIsbn,

    /// タイトルが空
    #[error("Title cannot be null or empty.")]
    InvalidTitle,

    /// 著者が空
    #[error("Author cannot be null or empty.")]
    InvalidAuthor,

    /// 出版年が範囲外
    #[error("Invalid publication year.")]
    InvalidPublicationYear,

    /// 同じISBNの書籍が既に登録されている
    #[error("Book with ISBN {0} already exists in the library.")]
    BookAlreadyExists(String),

    /// 書籍が存在しない
    #[error("Book with ISBN {0} does not exist in the library.")]
    BookDoesNotExist(String),

    /// 書籍が貸出中
    #[error("Book with ISBN {0} is not available for borrowing.")]
    BookNotAvailable(String),

    /// リポジトリのエラー
    #[error("Repository error: {0}")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CatalogError {
    /// 機械可読なエラーコード（JSON出力で使用）
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::InvalidIsbn => "INVALID_ISBN",
            CatalogError::InvalidTitle => "INVALID_TITLE",
            CatalogError::InvalidAuthor => "INVALID_AUTHOR",
            CatalogError::InvalidPublicationYear => "INVALID_PUBLICATION_YEAR",
            CatalogError::BookAlreadyExists(_) => "BOOK_ALREADY_EXISTS",
            CatalogError::BookDoesNotExist(_) => "BOOK_DOES_NOT_EXIST",
            CatalogError::BookNotAvailable(_) => "BOOK_NOT_AVAILABLE",
            CatalogError::RepositoryError(_) => "REPOSITORY_ERROR",
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyIsbn => CatalogError::InvalidIsbn,
            ValidationError::EmptyTitle => CatalogError::InvalidTitle,
            ValidationError::EmptyAuthor => CatalogError::InvalidAuthor,
            ValidationError::PublicationYearOutOfRange { .. } => {
                CatalogError::InvalidPublicationYear
            }
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CatalogError>;
