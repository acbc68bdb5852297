use crate::ports::BookRepository;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{
    database::DatabaseBookRepository, filesystem::FileSystemBookRepository,
    in_memory::InMemoryBookRepository,
};

/// ストレージバックエンドの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    InMemory,
    Database,
    FileSystem,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [
        BackendKind::InMemory,
        BackendKind::Database,
        BackendKind::FileSystem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::InMemory => "IN_MEMORY",
            BackendKind::Database => "DATABASE",
            BackendKind::FileSystem => "FILESYSTEM",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    /// 大文字小文字を区別しない。`-`と`_`は同一視する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(BackendKind::InMemory),
            "database" | "db" => Ok(BackendKind::Database),
            "filesystem" | "file_system" | "fs" => Ok(BackendKind::FileSystem),
            _ => Err(format!("Invalid repository type: {}", s)),
        }
    }
}

/// 構築済みリポジトリのセッション単位のキャッシュ
///
/// 各バックエンドは最初の要求時に構築され、以降は再利用される。
/// そのため別のバックエンドに切り替えて戻っても、保持していた内容は残る。
/// セッションを駆動する側が所有し、プロセス全体で共有されるインスタンスはない。
#[derive(Default)]
pub struct BackendRegistry {
    cache: HashMap<BackendKind, Arc<dyn BookRepository>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `kind`のリポジトリを返す（初回のみ構築）
    pub fn repository(&mut self, kind: BackendKind) -> Arc<dyn BookRepository> {
        self.cache
            .entry(kind)
            .or_insert_with(|| {
                tracing::debug!(backend = %kind, "building repository");
                build(kind)
            })
            .clone()
    }

    pub fn is_cached(&self, kind: BackendKind) -> bool {
        self.cache.contains_key(&kind)
    }

    /// キャッシュをすべて破棄する。次の要求で新しいインスタンスが構築される
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

fn build(kind: BackendKind) -> Arc<dyn BookRepository> {
    match kind {
        BackendKind::InMemory => Arc::new(InMemoryBookRepository::new()),
        BackendKind::Database => Arc::new(DatabaseBookRepository::new()),
        BackendKind::FileSystem => Arc::new(FileSystemBookRepository::new()),
    }
}
