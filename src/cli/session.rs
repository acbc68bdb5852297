use chrono::Utc;
use std::io::{self, BufRead, Write};

use crate::adapters::{BackendKind, BackendRegistry};
use crate::application::catalog::{self, CatalogError, ServiceDependencies};
use crate::config::{Config, OutputFormat};
use crate::domain::commands::{AddBook, BorrowBook, ReturnBook};

use super::output;

/// メニューの選択肢
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    BorrowBook,
    ReturnBook,
    ViewAvailableBooks,
    SwitchRepository,
    Exit,
}

impl std::str::FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(MenuChoice::AddBook),
            "2" => Ok(MenuChoice::BorrowBook),
            "3" => Ok(MenuChoice::ReturnBook),
            "4" => Ok(MenuChoice::ViewAvailableBooks),
            "5" => Ok(MenuChoice::SwitchRepository),
            "6" => Ok(MenuChoice::Exit),
            _ => Err(format!("Invalid menu choice: {}", s)),
        }
    }
}

/// ループを続けるか終了するか
enum Flow {
    Continue,
    Exit,
}

/// 対話型メニューのセッション
///
/// 入力を読み取り、コマンドに変換してカタログサービスを呼び出し、結果を出力する。
/// バックエンドはセッションが所有するレジストリから取得し、切り替え時に
/// `ServiceDependencies`を作り直す。
///
/// 入出力は`BufRead`/`Write`で抽象化しているため、テストから台本を流し込める。
pub struct Session<R, W> {
    input: R,
    output: W,
    format: OutputFormat,
    registry: BackendRegistry,
    backend: BackendKind,
    deps: ServiceDependencies,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: &Config) -> Self {
        let mut registry = BackendRegistry::new();
        let deps = ServiceDependencies {
            book_repository: registry.repository(config.backend),
        };

        Self {
            input,
            output,
            format: config.output,
            registry,
            backend: config.backend,
            deps,
        }
    }

    /// 現在のバックエンド
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// 終了が選ばれるか入力が尽きるまでメニューを繰り返す
    pub fn run(&mut self) -> io::Result<()> {
        self.announce_backend()?;

        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match line.trim().parse::<MenuChoice>() {
                Ok(MenuChoice::AddBook) => self.add_book()?,
                Ok(MenuChoice::BorrowBook) => self.borrow_book()?,
                Ok(MenuChoice::ReturnBook) => self.return_book()?,
                Ok(MenuChoice::ViewAvailableBooks) => self.view_available_books()?,
                Ok(MenuChoice::SwitchRepository) => self.switch_repository()?,
                Ok(MenuChoice::Exit) => Flow::Exit,
                Err(_) => {
                    output::notice(
                        &mut self.output,
                        self.format,
                        "INVALID_CHOICE",
                        "Invalid choice. Please try again.",
                    )?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        output::info(&mut self.output, self.format, "Exiting program. Goodbye!")?;
        self.output.flush()
    }

    fn interactive(&self) -> bool {
        self.format == OutputFormat::Text
    }

    fn print_menu(&mut self) -> io::Result<()> {
        if !self.interactive() {
            return Ok(());
        }
        writeln!(self.output)?;
        writeln!(self.output, "Library Management System")?;
        writeln!(self.output, "1. Add Book")?;
        writeln!(self.output, "2. Borrow Book")?;
        writeln!(self.output, "3. Return Book")?;
        writeln!(self.output, "4. View Available Books")?;
        writeln!(self.output, "5. Switch Repository")?;
        writeln!(self.output, "6. Exit Program")?;
        writeln!(self.output)
    }

    /// プロンプトを表示して1行読む。入力が尽きた場合は`None`
    ///
    /// 取り除くのは改行のみ。前後の空白は入力の一部としてそのまま渡す。
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        if self.interactive() {
            write!(self.output, "{}", label)?;
            self.output.flush()?;
        }

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn announce_backend(&mut self) -> io::Result<()> {
        tracing::info!(backend = %self.backend, "Library initialized");
        let message = format!("Library initialized with {} repository.", self.backend);
        output::info(&mut self.output, self.format, &message)
    }

    fn report(&mut self, result: catalog::Result<catalog::BookSnapshot>) -> io::Result<Flow> {
        match result {
            Ok(snapshot) => output::book(&mut self.output, self.format, &snapshot)?,
            Err(err) => output::error(&mut self.output, self.format, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn add_book(&mut self) -> io::Result<Flow> {
        let Some(isbn) = self.prompt("Enter ISBN: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(title) = self.prompt("Enter Title: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(author) = self.prompt("Enter Author: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(year) = self.prompt("Enter Publication Year: ")? else {
            return Ok(Flow::Exit);
        };

        let Ok(publication_year) = year.trim().parse::<i32>() else {
            output::error(
                &mut self.output,
                self.format,
                &CatalogError::InvalidPublicationYear,
            )?;
            return Ok(Flow::Continue);
        };

        let cmd = AddBook {
            isbn,
            title,
            author,
            publication_year,
            requested_at: Utc::now(),
        };
        let result = catalog::add_book(&self.deps, cmd);
        self.report(result)
    }

    fn borrow_book(&mut self) -> io::Result<Flow> {
        let Some(isbn) = self.prompt("Enter ISBN to borrow: ")? else {
            return Ok(Flow::Exit);
        };

        let cmd = BorrowBook {
            isbn,
            borrowed_at: Utc::now(),
        };
        let result = catalog::borrow_book(&self.deps, cmd);
        self.report(result)
    }

    fn return_book(&mut self) -> io::Result<Flow> {
        let Some(isbn) = self.prompt("Enter ISBN to return: ")? else {
            return Ok(Flow::Exit);
        };

        let cmd = ReturnBook {
            isbn,
            returned_at: Utc::now(),
        };
        let result = catalog::return_book(&self.deps, cmd);
        self.report(result)
    }

    fn view_available_books(&mut self) -> io::Result<Flow> {
        match catalog::view_available_books(&self.deps) {
            Ok(books) => output::books(&mut self.output, self.format, &books)?,
            Err(err) => output::error(&mut self.output, self.format, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn switch_repository(&mut self) -> io::Result<Flow> {
        if self.interactive() {
            writeln!(self.output, "Available Repository Types:")?;
            for kind in BackendKind::ALL {
                writeln!(self.output, "- {}", kind)?;
            }
        }

        let Some(raw) = self.prompt("Enter repository type to switch to: ")? else {
            return Ok(Flow::Exit);
        };

        match raw.trim().parse::<BackendKind>() {
            Ok(kind) => {
                self.backend = kind;
                self.deps = ServiceDependencies {
                    book_repository: self.registry.repository(kind),
                };
                self.announce_backend()?;
            }
            Err(_) => {
                tracing::debug!(input = %raw, "Rejected repository type");
                output::notice(
                    &mut self.output,
                    self.format,
                    "INVALID_REPOSITORY_TYPE",
                    "Invalid repository type. Please try again.",
                )?;
            }
        }
        Ok(Flow::Continue)
    }
}
