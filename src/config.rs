//! コマンドライン引数と環境変数による設定
//!
//! すべてのフラグは環境変数でも指定できる。
//! ログのフィルタは`RUST_LOG`で指定する。

use clap::{Parser, ValueEnum};

use crate::adapters::BackendKind;

/// 標準出力への結果の書き出し形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// 対話メニューと人が読める書籍詳細
    #[default]
    Text,
    /// メニュー・プロンプトなし。結果ごとに1行のJSON
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "library-catalog", version, about = "Interactive library catalog manager")]
pub struct Config {
    /// 起動時のストレージバックエンド（IN_MEMORY, DATABASE, FILESYSTEM）
    #[arg(long, env = "LIBRARY_BACKEND", default_value = "IN_MEMORY")]
    pub backend: BackendKind,

    /// 出力形式
    #[arg(long, env = "LIBRARY_OUTPUT", value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::InMemory,
            output: OutputFormat::Text,
        }
    }
}
