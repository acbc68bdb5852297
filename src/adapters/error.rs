use thiserror::Error;

use super::registry::BackendKind;

/// ストレージバックエンドのエラー
#[derive(Debug, Error)]
pub enum BackendError {
    /// ストレージが未実装のプレースホルダーバックエンド
    #[error("{0} repository is not implemented")]
    NotImplemented(BackendKind),

    /// ストアのロック保持中に他のスレッドがパニックした
    #[error("in-memory store lock is poisoned")]
    LockPoisoned,
}
