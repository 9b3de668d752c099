//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into menu-level use cases.
//! - Keep the console layer decoupled from storage details.

pub mod catalog_service;
