//! Interactive console front-end.
//!
//! # Responsibility
//! - Render the numbered menu and dispatch choices to the catalog service.
//! - Format list tables and the adventure world report.
//!
//! # Invariants
//! - Recoverable failures print a message and return to the menu; only
//!   closed input or the exit option end the loop.

pub mod menu;
pub mod report;

pub use menu::{CatalogConsole, MenuChoice};
pub use report::{render_book_table, render_mission_report, ListLayout};
