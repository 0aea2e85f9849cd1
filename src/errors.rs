/*!
 * Error types for the ankigen application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and cleaning the input document
#[derive(Error, Debug)]
pub enum LoadError {
    /// Input ended before the required header lines were read
    #[error("Input too short: expected at least {expected} header lines, got {actual}")]
    InputTooShort {
        /// Minimum number of lines the selected mode requires
        expected: usize,
        /// Number of lines actually read
        actual: usize,
    },

    /// Document contains headers but no content lines to generate cards from
    #[error("No content lines after the {0}-line header")]
    EmptyDocument(usize),

    /// Error reading from the input stream
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while generating flashcards
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Poem mode needs at least two content lines to bootstrap the window
    #[error("Poem mode needs at least 2 content lines, got {0}")]
    PoemTooShort(usize),

    /// Sequence mode needs at least one element
    #[error("Sequence mode needs at least 1 element")]
    SequenceEmpty,
}

/// Errors that can occur while writing the output deck
#[derive(Error, Debug)]
pub enum WriteError {
    /// Error creating or writing the output file
    #[error("Failed to write deck file {path:?}: {source}")]
    Io {
        /// Path of the output file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Error from the CSV serializer
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from loading the input document
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Error from card generation
    #[error("Generation error: {0}")]
    Generate(#[from] GenerateError),

    /// Error from deck writing
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Load(LoadError::Io(error))
    }
}
