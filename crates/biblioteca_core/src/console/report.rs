//! Fixed-width text tables for console output.

use crate::model::book::Book;
use crate::model::world::MissionReportRow;
use crate::repo::book_repo::IdScheme;
use std::fmt::Write as _;

/// Column widths and headings of the book list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLayout {
    pub heading: &'static str,
    pub id_header: &'static str,
    pub id_width: usize,
    pub title_width: usize,
    pub author_width: usize,
    pub year_width: usize,
    pub rule_width: usize,
}

impl ListLayout {
    pub const SERIAL: Self = Self {
        heading: "--- 📚 MY PERSONAL LIBRARY ---",
        id_header: "ID",
        id_width: 4,
        title_width: 40,
        author_width: 25,
        year_width: 4,
        rule_width: 80,
    };

    pub const OBJECT_SUFFIX: Self = Self {
        heading: "--- 📚 MY PERSONAL LIBRARY (MongoDB) ---",
        id_header: "ID (last 5)",
        id_width: 11,
        title_width: 35,
        author_width: 25,
        year_width: 4,
        rule_width: 89,
    };

    pub fn for_scheme(scheme: IdScheme) -> Self {
        match scheme {
            IdScheme::Serial => Self::SERIAL,
            IdScheme::ObjectSuffix => Self::OBJECT_SUFFIX,
        }
    }
}

pub const EMPTY_LIBRARY_MESSAGE: &str =
    "--- 📚 EMPTY LIBRARY ---\nNo books registered yet. Use option 1 to add one.";

/// Renders `books` as a table, or the empty-state message when there are none.
pub fn render_book_table(books: &[Book], layout: &ListLayout) -> String {
    if books.is_empty() {
        return format!("\n{EMPTY_LIBRARY_MESSAGE}\n");
    }

    let rule = "-".repeat(layout.rule_width);
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", layout.heading);
    let _ = writeln!(
        out,
        "{:<idw$} | {:<tw$} | {:<aw$} | {:<yw$} | {}",
        layout.id_header,
        "Title",
        "Author",
        "Year",
        "Read",
        idw = layout.id_width,
        tw = layout.title_width,
        aw = layout.author_width,
        yw = layout.year_width,
    );
    let _ = writeln!(out, "{rule}");

    for book in books {
        let year = book
            .publication_year
            .map_or_else(|| "N/A".to_string(), |year| year.to_string());
        let _ = writeln!(
            out,
            "{:<idw$} | {:<tw$} | {:<aw$} | {:<yw$} | {}",
            book.id.short(),
            truncate(&book.title, layout.title_width),
            truncate(&book.author, layout.author_width),
            year,
            read_label(book.is_read),
            idw = layout.id_width,
            tw = layout.title_width,
            aw = layout.author_width,
            yw = layout.year_width,
        );
    }
    let _ = writeln!(out, "{rule}");
    out
}

/// Renders the mission/hero/monster join.
pub fn render_mission_report(rows: &[MissionReportRow]) -> String {
    let mut out = String::from("\n--- 🔍 Missions, Heroes and Monsters Report ---\n");
    if rows.is_empty() {
        out.push_str("No rows returned by the report query.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<20} | {:<10} | {:<15} | {:<20} | Qty.",
        "Mission", "Hero", "Role", "Monster Faced"
    );
    let _ = writeln!(out, "{}", "-".repeat(75));
    for row in rows {
        let _ = writeln!(
            out,
            "{:<20} | {:<10} | {:<15} | {:<20} | {:<5}",
            row.mission, row.hero, row.role, row.monster, row.quantity
        );
    }
    out
}

pub fn read_label(is_read: bool) -> &'static str {
    if is_read {
        "Yes (✅)"
    } else {
        "No (❌)"
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::{render_book_table, render_mission_report, ListLayout, EMPTY_LIBRARY_MESSAGE};
    use crate::model::book::{Book, BookId};
    use crate::model::world::MissionReportRow;

    fn book(id: BookId, title: &str, year: Option<i32>, is_read: bool) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "Herbert".to_string(),
            publication_year: year,
            genre: None,
            is_read,
        }
    }

    #[test]
    fn empty_list_renders_empty_state() {
        let rendered = render_book_table(&[], &ListLayout::SERIAL);
        assert!(rendered.contains(EMPTY_LIBRARY_MESSAGE));
        assert!(!rendered.contains("Title"));
    }

    #[test]
    fn long_titles_are_truncated_to_column_width() {
        let long_title = "T".repeat(60);
        let rendered = render_book_table(
            &[book(BookId::Row(1), &long_title, None, false)],
            &ListLayout::SERIAL,
        );
        assert!(rendered.contains(&"T".repeat(40)));
        assert!(!rendered.contains(&"T".repeat(41)));
        assert!(rendered.contains("N/A"));
        assert!(rendered.contains("No (❌)"));
    }

    #[test]
    fn object_ids_show_last_characters_only() {
        let rendered = render_book_table(
            &[book(
                BookId::Object("65f1c2a9e4b0a1b2c3d4e5f6".to_string()),
                "Dune",
                Some(1965),
                true,
            )],
            &ListLayout::OBJECT_SUFFIX,
        );
        assert!(rendered.contains("4e5f6"));
        assert!(!rendered.contains("65f1c2a9"));
        assert!(rendered.contains("1965"));
        assert!(rendered.contains("Yes (✅)"));
    }

    #[test]
    fn mission_report_lists_every_row() {
        let rows = vec![MissionReportRow {
            mission: "Dragon Hunt".to_string(),
            hero: "Lyra".to_string(),
            role: "Magic Support".to_string(),
            monster: "Skeleton King".to_string(),
            quantity: 1,
        }];
        let rendered = render_mission_report(&rows);
        assert!(rendered.contains("Dragon Hunt"));
        assert!(rendered.contains("Skeleton King"));
        assert!(render_mission_report(&[]).contains("No rows"));
    }
}
