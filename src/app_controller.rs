use std::io::Read;
use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::app_config::{Config, GenerationMode};
use crate::card_generator::{CardGenerator, Flashcard};
use crate::deck_writer::DeckWriter;
use crate::document_loader::{CleanedDocument, DocumentLoader};

// @module: Main application controller

// @struct: Orchestrates the load, generate, and write stages
pub struct Controller {
    // @field: Application configuration
    config: Config,
}

impl Controller {
    // @creates: Controller with validated configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Controller { config })
    }

    /// Run the full pipeline: read the input stream to completion, generate
    /// the card list in memory, write the deck file, done. Single-threaded
    /// batch execution; the output file is truncated and rewritten each run.
    pub fn run<R: Read>(&self, input: R) -> Result<()> {
        let mode = self.config.mode;
        let escaping = self.config.effective_escaping();

        debug!("Running {} pipeline with {:?} escaping", mode, escaping);

        let document = DocumentLoader::load(input, mode, escaping)
            .context("Failed to load input document")?;

        info!(
            "Loaded \"{}\" with {} content line(s)",
            document.title,
            document.lines.len()
        );

        let cards = self.generate_cards(&document)?;
        info!("Generated {} flashcard(s) in {} mode", cards.len(), mode);

        DeckWriter::write_to_file(&self.config.output.path, &cards, self.config.output.write_bom)
            .context("Failed to write deck file")?;

        Ok(())
    }

    /// Generate the card list for the configured mode
    pub fn generate_cards(&self, document: &CleanedDocument) -> Result<Vec<Flashcard>> {
        match self.config.mode {
            GenerationMode::Poem => {
                if self.config.poem.answer_lines != 1 {
                    // Accepted in config for forward compatibility only
                    warn!(
                        "answer_lines is set to {} but multi-line answers are not implemented; using 1",
                        self.config.poem.answer_lines
                    );
                }
                let cards =
                    CardGenerator::poem_cards(document, self.config.poem.question_lines)?;
                Ok(cards)
            }
            GenerationMode::Sequence => {
                let cards = CardGenerator::sequence_cards(document)?;
                Ok(cards)
            }
        }
    }

    /// Access the active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
