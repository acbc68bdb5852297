use crate::domain::{self, BorrowBookError, DomainEvent, Isbn, commands::*};
use crate::ports::BookRepository;
use std::sync::Arc;

use super::errors::{CatalogError, Result};
use super::snapshot::BookSnapshot;

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// バックエンドの切り替えは新しいリポジトリでこの構造体を作り直すことで行う。
/// プロセス全体で共有される隠れたシングルトンは持たない。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub book_repository: Arc<dyn BookRepository>,
}

/// リポジトリのエラーを記録してアプリケーション層のエラーに変換する
fn repository_error(err: Box<dyn std::error::Error + Send + Sync>) -> CatalogError {
    tracing::error!(error = %err, "Repository operation failed");
    CatalogError::RepositoryError(err)
}

/// 検索キーとしてのISBNを構築する
///
/// 空のISBNの書籍はストレージに存在し得ないため、「存在しない」として扱う。
fn lookup_key(raw: &str) -> Result<Isbn> {
    Isbn::new(raw).map_err(|_| CatalogError::BookDoesNotExist(raw.to_string()))
}

fn log_event(event: &DomainEvent) {
    tracing::info!(
        event_type = event.event_type(),
        isbn = %event.isbn(),
        "Catalog event"
    );
}

/// 書籍を登録する
///
/// ビジネスルール（この順序で検証し、最初の違反でエラー）：
/// - ISBNが空でないこと
/// - タイトルが空でないこと
/// - 著者が空でないこと
/// - 出版年が (0, 現在の年] の範囲内であること
/// - 同じISBNの書籍が登録されていないこと
///
/// # 戻り値
/// 登録された書籍のスナップショット（貸出可能状態）
pub fn add_book(deps: &ServiceDependencies, cmd: AddBook) -> Result<BookSnapshot> {
    // 1. ドメイン層の純粋関数でフィールドを検証
    let (book, event) = domain::book::register_book(
        cmd.isbn,
        cmd.title,
        cmd.author,
        cmd.publication_year,
        cmd.requested_at,
    )
    .map_err(|e| {
        tracing::debug!(reason = ?e, "Rejected book registration");
        CatalogError::from(e)
    })?;

    // 2. 保存（重複確認はリポジトリの`add`内で挿入と同時に行われる）
    let snapshot = BookSnapshot::from(&book);
    let isbn = book.isbn.clone();
    let added = deps.book_repository.add(book).map_err(repository_error)?;

    if !added {
        tracing::debug!(isbn = %isbn, "Rejected duplicate ISBN");
        return Err(CatalogError::BookAlreadyExists(isbn.to_string()));
    }

    log_event(&DomainEvent::BookAdded(event));
    Ok(snapshot)
}

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - 書籍が貸出可能であること（二重貸出は不可）
///
/// 状態確認と更新はリポジトリの`update`内で1操作として行われる。
pub fn borrow_book(deps: &ServiceDependencies, cmd: BorrowBook) -> Result<BookSnapshot> {
    let isbn = lookup_key(&cmd.isbn)?;

    let mut outcome = None;
    let stored = deps
        .book_repository
        .update(&isbn, &mut |current| {
            let result = domain::book::borrow_book(current, cmd.borrowed_at);
            let next = result.as_ref().ok().map(|(book, _)| book.clone());
            outcome = Some(result);
            next
        })
        .map_err(repository_error)?;

    match (stored, outcome) {
        (Some(book), Some(Ok((_, event)))) => {
            log_event(&DomainEvent::BookBorrowed(event));
            Ok(BookSnapshot::from(&book))
        }
        (Some(_), Some(Err(BorrowBookError::NotAvailable))) => {
            tracing::debug!(isbn = %isbn, "Rejected borrow of unavailable book");
            Err(CatalogError::BookNotAvailable(cmd.isbn))
        }
        _ => Err(CatalogError::BookDoesNotExist(cmd.isbn)),
    }
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - 既に貸出可能な書籍の返却はエラーにせず、変更なしのスナップショットを返す（冪等）
pub fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<BookSnapshot> {
    let isbn = lookup_key(&cmd.isbn)?;

    let mut event = None;
    let stored = deps
        .book_repository
        .update(&isbn, &mut |current| {
            let (next, returned) = domain::book::return_book(current, cmd.returned_at);
            let changed = returned.is_some();
            event = returned;
            changed.then_some(next)
        })
        .map_err(repository_error)?
        .ok_or_else(|| CatalogError::BookDoesNotExist(cmd.isbn.clone()))?;

    match event {
        Some(event) => log_event(&DomainEvent::BookReturned(event)),
        None => tracing::debug!(isbn = %isbn, "Book already available; return is a no-op"),
    }

    Ok(BookSnapshot::from(&stored))
}

/// 貸出可能な書籍の一覧を取得する
///
/// リポジトリの列挙順（インメモリの場合は登録順）を保つ。
/// 該当がない場合は空のVecを返す（エラーではない）。
pub fn view_available_books(deps: &ServiceDependencies) -> Result<Vec<BookSnapshot>> {
    let books = deps.book_repository.get_all().map_err(repository_error)?;

    Ok(books
        .iter()
        .filter(|book| book.is_available())
        .map(BookSnapshot::from)
        .collect())
}
