use std::fmt;
use std::io::Read;
use log::{debug, warn};

use crate::app_config::{EscapingPolicy, GenerationMode};
use crate::errors::LoadError;

// @module: Input loading and line cleaning

/// Marker appended to the line preceding a stanza break so the break
/// renders inline on the card front instead of consuming a display line.
pub const STANZA_BREAK: &str = " <br>";

/// Quote character stripped from line ends, to support input copy-pasted
/// with surrounding quotation marks.
const QUOTE_CHAR: char = '"';

/// Input document after cleaning, with header lines separated from content
#[derive(Debug, Clone)]
pub struct CleanedDocument {
    /// Title of the poem or sequence (first input line)
    pub title: String,

    /// Author (second input line, poem mode only)
    pub author: Option<String>,

    /// Content lines in their original order, headers removed
    pub lines: Vec<String>,
}

impl fmt::Display for CleanedDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Cleaned Document")?;
        writeln!(f, "Title: {}", self.title)?;
        if let Some(author) = &self.author {
            writeln!(f, "Author: {}", author)?;
        }
        writeln!(f, "Content lines: {}", self.lines.len())?;
        Ok(())
    }
}

// @struct: Line loading and cleaning operations
pub struct DocumentLoader;

impl DocumentLoader {
    /// Read an input stream and produce a cleaned document for the given mode.
    ///
    /// Lines are decoded permissively (invalid byte sequences are dropped),
    /// stripped of surrounding quotes and whitespace, and optionally
    /// HTML-escaped. In poem mode a blank line marks a stanza break: it emits
    /// no line of its own, but the preceding line receives an inline break
    /// marker once the next non-empty line arrives.
    pub fn load<R: Read>(
        mut reader: R,
        mode: GenerationMode,
        escaping: EscapingPolicy,
    ) -> Result<CleanedDocument, LoadError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;

        let text = Self::decode_dropping_invalid(&raw);
        let lines = Self::clean_lines(&text, mode, escaping);

        Self::split_headers(lines, mode)
    }

    /// Clean raw text into an ordered list of non-empty lines
    fn clean_lines(text: &str, mode: GenerationMode, escaping: EscapingPolicy) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut pending_break = false;

        for raw_line in text.lines() {
            let cleaned = raw_line.trim().trim_matches(QUOTE_CHAR).trim();

            if cleaned.is_empty() {
                // Stanza separator. Separators before any content carry no
                // information and are dropped.
                if lines.is_empty() {
                    debug!("Dropping leading blank line");
                } else {
                    pending_break = true;
                }
                continue;
            }

            if pending_break {
                if mode == GenerationMode::Poem {
                    if let Some(last) = lines.last_mut() {
                        last.push_str(STANZA_BREAK);
                    }
                }
                pending_break = false;
            }

            if escaping.escapes_html() {
                lines.push(Self::escape_html(cleaned));
            } else {
                lines.push(cleaned.to_string());
            }
        }

        if pending_break {
            debug!("Dropping trailing blank line(s) at end of input");
        }

        lines
    }

    /// Split header lines (title, and author in poem mode) from content
    fn split_headers(
        mut lines: Vec<String>,
        mode: GenerationMode,
    ) -> Result<CleanedDocument, LoadError> {
        let header_count = mode.header_lines();

        if lines.len() < header_count {
            return Err(LoadError::InputTooShort {
                expected: header_count,
                actual: lines.len(),
            });
        }

        if lines.len() == header_count {
            warn!("Input has headers but no content lines");
            return Err(LoadError::EmptyDocument(header_count));
        }

        let content = lines.split_off(header_count);
        let mut headers = lines.into_iter();
        let title = headers.next().unwrap_or_default();
        let author = headers.next();

        debug!(
            "Loaded document: title={:?}, author={:?}, {} content line(s)",
            title,
            author,
            content.len()
        );

        Ok(CleanedDocument {
            title,
            author,
            lines: content,
        })
    }

    /// Decode bytes as UTF-8, dropping invalid sequences instead of
    /// substituting replacement characters or failing the run.
    pub fn decode_dropping_invalid(bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let valid_len = e.valid_up_to();
                    out.push_str(std::str::from_utf8(&rest[..valid_len]).unwrap_or_default());

                    // error_len is None when the input ends mid-sequence
                    let skip = e.error_len().unwrap_or(rest.len() - valid_len);
                    rest = &rest[valid_len + skip..];
                }
            }
        }

        out
    }

    /// Escape HTML-significant characters so they render as literal text.
    /// Matches the escaping table used by the downstream import tool's
    /// allow-HTML mode: &, <, >, double and single quotes.
    pub fn escape_html(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#x27;"),
                _ => escaped.push(c),
            }
        }
        escaped
    }
}
