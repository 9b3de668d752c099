//! Menu loop driving one catalog repository.
//!
//! # Responsibility
//! - Prompt for input, call the catalog service, print outcomes.
//! - Pause and clear the screen between operations.
//!
//! # Invariants
//! - Recoverable errors never leave the loop.
//! - End of input is handled like the exit option.

use crate::console::report::{render_book_table, ListLayout};
use crate::model::book::NewBook;
use crate::repo::book_repo::{BookRepository, IdScheme, MarkReadOutcome, StoreError};
use crate::service::catalog_service::{parse_publication_year, CatalogService, YearInput};
use log::info;
use std::io::{self, BufRead, Write};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// One entry of the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    ListBooks,
    MarkRead,
    DeleteBook,
    Exit,
}

impl MenuChoice {
    /// Parses the typed option; anything but `1`..`5` is rejected.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddBook),
            "2" => Some(Self::ListBooks),
            "3" => Some(Self::MarkRead),
            "4" => Some(Self::DeleteBook),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Interactive catalog session over `input`/`output`.
pub struct CatalogConsole<R: BookRepository, I: BufRead, O: Write> {
    service: CatalogService<R>,
    input: I,
    output: O,
}

impl<R: BookRepository, I: BufRead, O: Write> CatalogConsole<R, I, O> {
    pub fn new(repo: R, input: I, output: O) -> Self {
        Self {
            service: CatalogService::new(repo),
            input,
            output,
        }
    }

    /// Releases the repository and the output sink.
    pub fn into_parts(self) -> (R, O) {
        (self.service.into_repository(), self.output)
    }

    /// Runs the menu until the user exits or input is closed.
    ///
    /// # Errors
    /// Returns console I/O failures other than end of input.
    pub fn run(&mut self) -> io::Result<()> {
        info!(
            "event=menu_loop module=console status=start store={}",
            self.service.kind().label()
        );
        match self.menu_loop() {
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                writeln!(self.output)?;
                self.say_goodbye()?;
            }
            other => other?,
        }
        info!("event=menu_loop module=console status=ok");
        Ok(())
    }

    fn menu_loop(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let raw = self.prompt("Select an option (1-5): ")?;

            match MenuChoice::parse(&raw) {
                Some(MenuChoice::AddBook) => self.add_book()?,
                Some(MenuChoice::ListBooks) => self.list_books()?,
                Some(MenuChoice::MarkRead) => self.mark_read()?,
                Some(MenuChoice::DeleteBook) => self.delete_book()?,
                Some(MenuChoice::Exit) => return self.say_goodbye(),
                None => writeln!(
                    self.output,
                    "❌ Invalid option. Please choose a number between 1 and 5."
                )?,
            }

            self.prompt("\nPress Enter to continue...")?;
            write!(self.output, "{CLEAR_SCREEN}")?;
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        let title = format!("LIBRARY MANAGER ({})", self.service.kind().label());
        let width = title.chars().count() + 4;
        let delete_label = match self.id_scheme() {
            IdScheme::Serial => "4. Delete book by ID",
            IdScheme::ObjectSuffix => "4. Delete book by ID (last 5 characters)",
        };

        writeln!(self.output, "\n{}", "=".repeat(width))?;
        writeln!(self.output, "  {title}")?;
        writeln!(self.output, "{}", "=".repeat(width))?;
        writeln!(self.output, "1. Add new book")?;
        writeln!(self.output, "2. List all books")?;
        writeln!(self.output, "3. Mark book as read")?;
        writeln!(self.output, "{delete_label}")?;
        writeln!(self.output, "5. Exit")?;
        writeln!(self.output, "{}", "-".repeat(width))
    }

    fn add_book(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- ADD NEW BOOK ---")?;
        let title = self.prompt("Title: ")?;
        let author = self.prompt("Author: ")?;

        let book = NewBook::new(title, author);
        if book.validate().is_err() {
            return writeln!(self.output, "❌ Error: title and author cannot be empty.");
        }

        let year = match parse_publication_year(&self.prompt("Publication year (optional): ")?) {
            YearInput::Ignored(raw) => {
                writeln!(
                    self.output,
                    "⚠️ Warning: invalid year `{raw}`, it will be ignored."
                )?;
                None
            }
            other => other.value(),
        };
        let genre = self.prompt("Genre: ")?;
        let book = book.with_year(year).with_genre(Some(&genre));

        match self.service.add_book(&book) {
            Ok(created) => writeln!(
                self.output,
                "\n✅ Book '{}' by {} added successfully (ID: {}).",
                created.title, created.author, created.id
            ),
            Err(StoreError::Validation(err)) => writeln!(self.output, "❌ Error: {err}."),
            Err(err) => writeln!(self.output, "❌ Error while adding the book: {err}"),
        }
    }

    fn list_books(&mut self) -> io::Result<()> {
        match self.service.list_books() {
            Ok(books) => {
                let layout = ListLayout::for_scheme(self.id_scheme());
                write!(self.output, "{}", render_book_table(&books, &layout))
            }
            Err(err) => writeln!(self.output, "❌ Error while listing the books: {err}"),
        }
    }

    fn mark_read(&mut self) -> io::Result<()> {
        self.list_books()?;
        let Some(input) = self.prompt_for_id("mark as READ")? else {
            return Ok(());
        };

        match self.service.mark_read(&input) {
            Ok(MarkReadOutcome::Marked(book)) => writeln!(
                self.output,
                "✅ Book with ID {} ('{}') marked as READ.",
                input.trim(),
                book.title
            ),
            Ok(MarkReadOutcome::AlreadyRead(_)) => writeln!(
                self.output,
                "⚠️ Warning: the book with ID {} was already marked as read.",
                input.trim()
            ),
            Err(err) => self.report_lookup_failure("updating", &err),
        }
    }

    fn delete_book(&mut self) -> io::Result<()> {
        self.list_books()?;
        let Some(input) = self.prompt_for_id("DELETE")? else {
            return Ok(());
        };

        match self.service.delete_book(&input) {
            Ok(book) => writeln!(
                self.output,
                "✅ Book with ID {} ('{}') deleted successfully.",
                input.trim(),
                book.title
            ),
            Err(err) => self.report_lookup_failure("deleting", &err),
        }
    }

    /// Reads an id for `action`; `None` when the input was blank.
    fn prompt_for_id(&mut self, action: &str) -> io::Result<Option<String>> {
        let label = match self.id_scheme() {
            IdScheme::Serial => format!("\nEnter the ID of the book to {action}: "),
            IdScheme::ObjectSuffix => {
                format!("\nEnter the LAST 5 characters of the ID to {action}: ")
            }
        };
        let input = self.prompt(&label)?;
        if input.trim().is_empty() {
            writeln!(self.output, "❌ Error: the ID cannot be empty.")?;
            return Ok(None);
        }
        Ok(Some(input))
    }

    fn report_lookup_failure(&mut self, action: &str, err: &StoreError) -> io::Result<()> {
        match err {
            StoreError::InvalidId(_) => match self.id_scheme() {
                IdScheme::Serial => {
                    writeln!(self.output, "❌ Error: please enter a valid number.")
                }
                IdScheme::ObjectSuffix => writeln!(
                    self.output,
                    "❌ Error: the ID must be 1 to 24 hexadecimal characters."
                ),
            },
            StoreError::NotFound(id) => writeln!(
                self.output,
                "⚠️ Warning: no book found with ID {id}."
            ),
            StoreError::NoSuffixMatch(suffix) => writeln!(
                self.output,
                "⚠️ Warning: no book found whose ID ends in {suffix}."
            ),
            StoreError::AmbiguousId { suffix, matches } => writeln!(
                self.output,
                "⚠️ Warning: {matches} books have an ID ending in {suffix}. Enter more characters."
            ),
            other => writeln!(self.output, "❌ Error while {action} the book: {other}"),
        }
    }

    fn say_goodbye(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "👋 Thanks for using the Library CLI with {}.",
            self.service.kind().label()
        )
    }

    fn id_scheme(&self) -> IdScheme {
        self.service.kind().id_scheme()
    }

    /// Writes `label`, then reads one line without its line ending.
    ///
    /// Bytes that are not UTF-8 are replaced with U+FFFD. Closed input
    /// surfaces as `UnexpectedEof`.
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "console input closed",
            ));
        }
        Ok(String::from_utf8_lossy(&line)
            .trim_end_matches(['\r', '\n'])
            .to_string())
    }
}
