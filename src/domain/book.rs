use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Author, BookAdded, BookBorrowed, BookReturned, BookStatus, BorrowBookError, Isbn,
    PublicationYear, Title, ValidationError,
};

/// Book集約 - カタログに登録された1冊の書籍
///
/// ストレージに追加された後はリポジトリが排他的に所有する。
/// 状態遷移：Available ⇄ Borrowed（終端状態なし）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    // 識別子
    pub isbn: Isbn,

    // 書誌情報
    pub title: Title,
    pub author: Author,
    pub publication_year: PublicationYear,

    // 貸出管理の責務
    pub status: BookStatus,
    pub last_borrowed_at: Option<DateTime<Utc>>,
    pub last_returned_at: Option<DateTime<Utc>>,

    // 監査情報
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }
}

/// 純粋関数：書籍を登録する
///
/// バリデーション順序（最初に違反した規則でエラー）：
/// 1. ISBNが空でない
/// 2. タイトルが空でない
/// 3. 著者が空でない
/// 4. 出版年が (0, 登録時点の年] の範囲内
///
/// ISBNの重複確認はストレージを必要とするためアプリケーション層で行う。
/// 副作用なし。新しいBookとイベントを返す。
pub fn register_book(
    isbn: impl Into<String>,
    title: impl Into<String>,
    author: impl Into<String>,
    publication_year: i32,
    added_at: DateTime<Utc>,
) -> Result<(Book, BookAdded), ValidationError> {
    let isbn = Isbn::new(isbn)?;
    let title = Title::new(title)?;
    let author = Author::new(author)?;
    let publication_year = PublicationYear::new(publication_year, added_at.year())?;

    let book = Book {
        isbn: isbn.clone(),
        title,
        author,
        publication_year,
        status: BookStatus::Available,
        last_borrowed_at: None,
        last_returned_at: None,
        added_at,
        updated_at: added_at,
    };

    let event = BookAdded {
        isbn,
        title: book.title.value().to_string(),
        author: book.author.value().to_string(),
        publication_year: publication_year.value(),
        added_at,
    };

    Ok((book, event))
}

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - 貸出中の書籍は貸し出せない
/// - 貸出時に last_borrowed_at を記録する
///
/// 副作用なし。新しいBookとイベントを返す。
pub fn borrow_book(
    book: &Book,
    borrowed_at: DateTime<Utc>,
) -> Result<(Book, BookBorrowed), BorrowBookError> {
    if !book.is_available() {
        return Err(BorrowBookError::NotAvailable);
    }

    let new_book = Book {
        status: BookStatus::Borrowed,
        last_borrowed_at: Some(borrowed_at),
        updated_at: borrowed_at,
        ..book.clone()
    };

    let event = BookBorrowed {
        isbn: book.isbn.clone(),
        borrowed_at,
    };

    Ok((new_book, event))
}

/// 純粋関数：書籍を返却する
///
/// ビジネスルール：
/// - 貸出中であれば貸出可能に戻し、last_returned_at を記録する
/// - 既に貸出可能な書籍の返却はエラーにせず、何も変更しない（冪等）
///
/// 副作用なし。変更がなかった場合はイベントを返さない。
pub fn return_book(book: &Book, returned_at: DateTime<Utc>) -> (Book, Option<BookReturned>) {
    if book.is_available() {
        return (book.clone(), None);
    }

    let new_book = Book {
        status: BookStatus::Available,
        last_returned_at: Some(returned_at),
        updated_at: returned_at,
        ..book.clone()
    };

    let event = BookReturned {
        isbn: book.isbn.clone(),
        returned_at,
    };

    (new_book, Some(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    fn registered_book() -> Book {
        let (book, _) = register_book("12345", "Test Book", "Author Name", 2020, fixed_now())
            .unwrap();
        book
    }

    // TDD: register_book() のテスト
    #[test]
    fn test_register_book_creates_available_book() {
        let added_at = fixed_now();

        let (book, event) =
            register_book("12345", "Test Book", "Author Name", 2020, added_at).unwrap();

        assert_eq!(book.isbn.value(), "12345");
        assert_eq!(book.title.value(), "Test Book");
        assert_eq!(book.author.value(), "Author Name");
        assert_eq!(book.publication_year.value(), 2020);
        assert_eq!(book.status, BookStatus::Available);
        assert!(book.last_borrowed_at.is_none());
        assert!(book.last_returned_at.is_none());
        assert_eq!(book.added_at, added_at);
        assert_eq!(book.updated_at, added_at);

        // イベントの検証
        assert_eq!(event.isbn, book.isbn);
        assert_eq!(event.title, "Test Book");
        assert_eq!(event.author, "Author Name");
        assert_eq!(event.publication_year, 2020);
        assert_eq!(event.added_at, added_at);
    }

    #[test]
    fn test_register_book_validation_order() {
        let now = fixed_now();

        // すべて不正な場合はISBNのエラーが優先される
        assert_eq!(
            register_book("", "", "", 0, now).unwrap_err(),
            ValidationError::EmptyIsbn
        );
        assert_eq!(
            register_book("1", "", "", 0, now).unwrap_err(),
            ValidationError::EmptyTitle
        );
        assert_eq!(
            register_book("1", "T", "", 0, now).unwrap_err(),
            ValidationError::EmptyAuthor
        );
        assert!(matches!(
            register_book("1", "T", "A", 0, now).unwrap_err(),
            ValidationError::PublicationYearOutOfRange { .. }
        ));
    }

    #[test]
    fn test_register_book_uses_year_of_added_at() {
        let added_at = fixed_now();

        assert!(register_book("1", "T", "A", 2024, added_at).is_ok());
        assert_eq!(
            register_book("1", "T", "A", 2025, added_at).unwrap_err(),
            ValidationError::PublicationYearOutOfRange {
                year: 2025,
                current_year: 2024
            }
        );
    }

    // TDD: borrow_book() のテスト
    #[test]
    fn test_borrow_book_success() {
        let book = registered_book();
        let borrowed_at = fixed_now() + Duration::days(1);

        let (borrowed, event) = borrow_book(&book, borrowed_at).unwrap();

        assert_eq!(borrowed.status, BookStatus::Borrowed);
        assert!(!borrowed.is_available());
        assert_eq!(borrowed.last_borrowed_at, Some(borrowed_at));
        assert_eq!(borrowed.updated_at, borrowed_at);
        assert_eq!(borrowed.added_at, book.added_at);

        assert_eq!(event.isbn, book.isbn);
        assert_eq!(event.borrowed_at, borrowed_at);
    }

    #[test]
    fn test_borrow_book_fails_when_already_borrowed() {
        let book = registered_book();
        let (borrowed, _) = borrow_book(&book, fixed_now()).unwrap();

        let result = borrow_book(&borrowed, fixed_now() + Duration::hours(1));
        assert_eq!(result.unwrap_err(), BorrowBookError::NotAvailable);
    }

    // TDD: return_book() のテスト
    #[test]
    fn test_return_book_success() {
        let book = registered_book();
        let borrowed_at = fixed_now() + Duration::days(1);
        let returned_at = borrowed_at + Duration::days(7);
        let (borrowed, _) = borrow_book(&book, borrowed_at).unwrap();

        let (returned, event) = return_book(&borrowed, returned_at);

        assert_eq!(returned.status, BookStatus::Available);
        assert_eq!(returned.last_borrowed_at, Some(borrowed_at));
        assert_eq!(returned.last_returned_at, Some(returned_at));
        assert_eq!(returned.updated_at, returned_at);

        let event = event.expect("returning a borrowed book emits an event");
        assert_eq!(event.isbn, book.isbn);
        assert_eq!(event.returned_at, returned_at);
    }

    #[test]
    fn test_return_book_is_noop_when_available() {
        let book = registered_book();

        let (returned, event) = return_book(&book, fixed_now() + Duration::days(3));

        // 冪等：状態も監査情報も変わらない
        assert_eq!(returned, book);
        assert!(event.is_none());
    }

    #[test]
    fn test_full_lifecycle() {
        let book = registered_book();
        let t1 = fixed_now() + Duration::days(1);
        let t2 = t1 + Duration::days(1);
        let t3 = t2 + Duration::days(1);

        let (book, _) = borrow_book(&book, t1).unwrap();
        let (book, _) = return_book(&book, t2);
        let (book, _) = borrow_book(&book, t3).unwrap();

        assert!(!book.is_available());
        assert_eq!(book.last_borrowed_at, Some(t3));
        assert_eq!(book.last_returned_at, Some(t2));
    }
}
