/*!
 * # ankigen - Anki flashcard deck generator
 *
 * A Rust library for turning line-oriented plain text into Anki-importable
 * flashcard decks.
 *
 * ## Features
 *
 * - Poem mode: sliding-window context cards (given the previous lines,
 *   recall the next one), with stanza breaks rendered inline
 * - Sequence mode: relational cards over an enumerated sequence
 *   (identity, position, successor, predecessor, whole-sequence recall)
 * - Tolerant input decoding that drops undecodable bytes instead of failing
 * - Two-column CSV output with minimal quoting and an optional UTF-8 BOM
 *   for Anki's encoding auto-detection
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document_loader`: Input reading and line cleaning
 * - `card_generator`: Poem and sequence card generation algorithms
 * - `deck_writer`: CSV deck file output
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod card_generator;
pub mod deck_writer;
pub mod document_loader;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, EscapingPolicy, GenerationMode};
pub use app_controller::Controller;
pub use card_generator::{CardGenerator, Flashcard};
pub use deck_writer::DeckWriter;
pub use document_loader::{CleanedDocument, DocumentLoader};
pub use errors::{AppError, GenerateError, LoadError, WriteError};
