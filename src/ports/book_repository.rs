use crate::domain::{Isbn, book::Book};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 状態遷移関数
///
/// 現在の書籍を受け取り、置き換える書籍を返す。
/// `None`を返した場合はストレージを変更しない。
pub type Transition<'a> = &'a mut dyn FnMut(&Book) -> Option<Book>;

/// 書籍リポジトリポート
///
/// ISBNをキーとする書籍ストレージを抽象化する。
/// カタログサービスはこの契約のみに依存し、具体的なバックエンドは知らない。
pub trait BookRepository: Send + Sync {
    /// 書籍を追加する
    ///
    /// 存在確認と挿入を1操作として行う。
    /// 同じISBNの書籍が既に存在する場合はストレージを変更せず`false`を返す
    /// （既存の書籍の貸出状態は上書きされない）。
    ///
    /// # 戻り値
    /// - `true`: 追加した
    /// - `false`: 同じISBNの書籍が既に存在する
    fn add(&self, book: Book) -> Result<bool>;

    /// ISBNで書籍を取得する
    fn get_by_id(&self, isbn: &Isbn) -> Result<Option<Book>>;

    /// すべての書籍を取得する
    ///
    /// バックエンド固有の列挙順で返す（インメモリの場合は追加順）。
    fn get_all(&self) -> Result<Vec<Book>>;

    /// ISBNの書籍が存在するか確認する
    fn exists_by_id(&self, isbn: &Isbn) -> Result<bool>;

    /// 書籍を読み取り・変更・書き戻しを1操作として更新する
    ///
    /// 取得と保存の間に他の更新が割り込まないことを実装が保証する。
    /// 貸出・返却の check-then-set はこの操作の中で行われる。
    ///
    /// # 戻り値
    /// - `None`: ISBNの書籍が存在しない（`apply`は呼ばれない）
    /// - `Some(book)`: 更新後（`apply`が`None`を返した場合は更新前）の書籍
    fn update(&self, isbn: &Isbn, apply: Transition<'_>) -> Result<Option<Book>>;
}
