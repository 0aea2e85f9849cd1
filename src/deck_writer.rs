use std::fs::File;
use std::io::Write;
use std::path::Path;
use csv::{Terminator, WriterBuilder};
use log::{debug, info};

use crate::card_generator::Flashcard;
use crate::errors::WriteError;

// @module: CSV deck output

/// UTF-8 byte-order mark, written at the start of the file so Anki's
/// import dialog auto-detects the encoding.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// @struct: Deck file writing operations
pub struct DeckWriter;

impl DeckWriter {
    /// Write all cards as two-field CSV records to `path`, truncating any
    /// existing file. Field one is the rendered front including the
    /// title/author header, field two is the back verbatim. Fields are
    /// quoted when they contain the delimiter, a quote, or a line
    /// terminator, so the import tool reconstructs the boundaries even
    /// though both fields carry raw HTML.
    pub fn write_to_file<P: AsRef<Path>>(
        path: P,
        cards: &[Flashcard],
        write_bom: bool,
    ) -> Result<(), WriteError> {
        let path = path.as_ref();

        let mut file = File::create(path).map_err(|e| WriteError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        if write_bom {
            file.write_all(UTF8_BOM).map_err(|e| WriteError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        Self::write_records(file, cards)?;

        info!("Wrote {} card(s) to {}", cards.len(), path.display());
        Ok(())
    }

    /// Serialize cards as CSV records into any writer. Records are
    /// terminated with CRLF for byte compatibility with decks produced by
    /// the stock csv tooling Anki users already import.
    pub fn write_records<W: Write>(writer: W, cards: &[Flashcard]) -> Result<(), WriteError> {
        let mut csv_writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_writer(writer);

        for card in cards {
            csv_writer.write_record([card.render_front(), card.back.clone()])?;
            debug!("Emitted record with back: {:?}", card.back);
        }

        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
