use serde::Serialize;
use std::io::{self, Write};

use crate::application::catalog::{BookSnapshot, CatalogError};
use crate::config::OutputFormat;

/// エラーレスポンス（JSON出力）
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)
}

fn write_details(out: &mut impl Write, book: &BookSnapshot) -> io::Result<()> {
    writeln!(out, "Book Details :")?;
    writeln!(out, "ISBN             : {}", book.isbn)?;
    writeln!(out, "Title            : {}", book.title)?;
    writeln!(out, "Author           : {}", book.author)?;
    writeln!(out, "Publication Year : {}", book.publication_year)?;
    writeln!(
        out,
        "Available        : {}",
        if book.is_available { "Yes" } else { "No" }
    )?;
    writeln!(out)
}

/// 1冊分のスナップショットを出力する
pub fn book(out: &mut impl Write, format: OutputFormat, book: &BookSnapshot) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_details(out, book),
        OutputFormat::Json => write_json(out, book),
    }
}

/// 貸出可能な書籍の一覧を出力する
pub fn books(out: &mut impl Write, format: OutputFormat, books: &[BookSnapshot]) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "Total Available Books : {}", books.len())?;
            books.iter().try_for_each(|book| write_details(out, book))
        }
        OutputFormat::Json => write_json(out, &books),
    }
}

/// サービスのエラーを出力する
pub fn error(out: &mut impl Write, format: OutputFormat, err: &CatalogError) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "Exception Occurred : {}", err),
        OutputFormat::Json => write_json(out, &ErrorResponse::new(err.code(), err.to_string())),
    }
}

/// 入力ミスなどメニュー操作上の通知を出力する
pub fn notice(
    out: &mut impl Write,
    format: OutputFormat,
    code: &str,
    message: &str,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", message),
        OutputFormat::Json => write_json(out, &ErrorResponse::new(code, message)),
    }
}

/// 対話モードでのみ表示する案内メッセージ
pub fn info(out: &mut impl Write, format: OutputFormat, message: &str) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", message),
        OutputFormat::Json => Ok(()),
    }
}
