use std::collections::VecDeque;
use std::fmt;
use log::debug;

use crate::document_loader::CleanedDocument;
use crate::errors::GenerateError;

// @module: Flashcard generation algorithms

/// Inline line break used between context lines on a card front
pub const LINE_BREAK: &str = "<br>";

/// Marker shown as context before the first line of the poem
const BEGINNING_MARKER: &str = "Beginning";

/// Instruction front of the whole-sequence recall card
const RECALL_ALL_FRONT: &str = "Recall all elements of the sequence:";

/// Separator between elements on the whole-sequence recall back
const SEQUENCE_SEPARATOR: &str = ", ";

// @struct: Single question/answer flashcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    // @field: Deck title shown in the card header
    pub title: String,

    // @field: Author shown under the title, when present
    pub author: Option<String>,

    // @field: Question side content (HTML), without the header
    pub front: String,

    // @field: Answer side content
    pub back: String,
}

impl Flashcard {
    pub fn new(title: &str, author: Option<&str>, front: String, back: String) -> Self {
        Flashcard {
            title: title.to_string(),
            author: author.map(|a| a.to_string()),
            front,
            back,
        }
    }

    /// Render the full question side: fixed title/author header followed
    /// directly by the front content, no separating delimiter.
    pub fn render_front(&self) -> String {
        let mut rendered = format!("<h4 style='margin: 0.25em;'>{}</h4>", self.title);
        if let Some(author) = &self.author {
            rendered.push_str(&format!(
                "<h5 style='margin: 0.2em 0.2em 1.0em 0.2em;'>{}</h5>",
                author
            ));
        }
        rendered.push_str(&self.front);
        rendered
    }
}

impl fmt::Display for Flashcard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render_front())
    }
}

// @struct: Card generation over a cleaned document
pub struct CardGenerator;

impl CardGenerator {
    /// Generate sliding-window context cards over poem lines.
    ///
    /// A window of exactly `question_lines` entries, initialized to empty
    /// strings, slides over the already-seen lines. Position 0 emits the two
    /// bootstrap cards; every later position emits one card whose front is
    /// the window contents joined with inline breaks and whose back is the
    /// following line. Cards come out in poem reading order.
    pub fn poem_cards(
        doc: &CleanedDocument,
        question_lines: usize,
    ) -> Result<Vec<Flashcard>, GenerateError> {
        let poem = &doc.lines;
        if poem.len() < 2 {
            return Err(GenerateError::PoemTooShort(poem.len()));
        }

        let title = doc.title.as_str();
        let author = doc.author.as_deref();
        let window_size = question_lines.max(1);

        let mut window: VecDeque<&str> = VecDeque::with_capacity(window_size + 1);
        window.extend(std::iter::repeat("").take(window_size));

        let mut cards = Vec::with_capacity(poem.len());

        for i in 0..poem.len() - 1 {
            window.push_back(poem[i].as_str());
            window.pop_front();

            if i == 0 {
                // Bootstrap recall before the window has any real context
                let front = format!("{}{}", BEGINNING_MARKER, LINE_BREAK);
                cards.push(Flashcard::new(title, author, front, poem[0].clone()));

                let front = format!(
                    "{}{}{}{}",
                    BEGINNING_MARKER, LINE_BREAK, poem[0], LINE_BREAK
                );
                cards.push(Flashcard::new(title, author, front, poem[1].clone()));
            } else {
                let mut front = window
                    .iter()
                    .copied()
                    .collect::<Vec<_>>()
                    .join(LINE_BREAK);
                front.push_str(LINE_BREAK);
                cards.push(Flashcard::new(title, author, front, poem[i + 1].clone()));
            }
        }

        debug!(
            "Generated {} poem card(s) from {} line(s) with {} context line(s)",
            cards.len(),
            poem.len(),
            window_size
        );

        Ok(cards)
    }

    /// Generate relational cards over sequence elements: one whole-sequence
    /// recall card, then per element a forward (position to element),
    /// backward (element to position), successor, and predecessor card.
    /// Produces `4n - 1` cards for `n` elements.
    pub fn sequence_cards(doc: &CleanedDocument) -> Result<Vec<Flashcard>, GenerateError> {
        let sequence = &doc.lines;
        if sequence.is_empty() {
            return Err(GenerateError::SequenceEmpty);
        }

        let title = doc.title.as_str();
        let author = doc.author.as_deref();

        let mut cards = Vec::with_capacity(4 * sequence.len());

        cards.push(Flashcard::new(
            title,
            author,
            RECALL_ALL_FRONT.to_string(),
            sequence.join(SEQUENCE_SEPARATOR),
        ));

        for (i, element) in sequence.iter().enumerate() {
            let position = i + 1;

            cards.push(Flashcard::new(
                title,
                author,
                format!("What element has position {}?", position),
                element.clone(),
            ));

            cards.push(Flashcard::new(
                title,
                author,
                format!("What is the position of {}?", element),
                position.to_string(),
            ));

            if i < sequence.len() - 1 {
                cards.push(Flashcard::new(
                    title,
                    author,
                    format!("What comes after {}?", element),
                    sequence[i + 1].clone(),
                ));
            }

            if i > 0 {
                cards.push(Flashcard::new(
                    title,
                    author,
                    format!("What comes before {}?", element),
                    sequence[i - 1].clone(),
                ));
            }
        }

        debug!(
            "Generated {} sequence card(s) from {} element(s)",
            cards.len(),
            sequence.len()
        );

        Ok(cards)
    }
}
