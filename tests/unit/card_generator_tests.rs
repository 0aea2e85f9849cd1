/*!
 * Tests for the poem and sequence card generation algorithms
 */

use anyhow::Result;
use ankigen::card_generator::CardGenerator;
use ankigen::errors::GenerateError;
use crate::common;

/// Test the worked four-line poem example with the default two context lines
#[test]
fn test_poemCards_withFourLines_shouldMatchExpectedSequence() -> Result<()> {
    let doc = common::poem_document(&["Line1", "Line2", "Line3", "Line4"]);
    let cards = CardGenerator::poem_cards(&doc, 2)?;

    // Two bootstrap cards plus one per remaining window position
    assert_eq!(cards.len(), 4);

    assert_eq!(cards[0].front, "Beginning<br>");
    assert_eq!(cards[0].back, "Line1");

    assert_eq!(cards[1].front, "Beginning<br>Line1<br>");
    assert_eq!(cards[1].back, "Line2");

    assert_eq!(cards[2].front, "Line1<br>Line2<br>");
    assert_eq!(cards[2].back, "Line3");

    assert_eq!(cards[3].front, "Line2<br>Line3<br>");
    assert_eq!(cards[3].back, "Line4");

    Ok(())
}

/// Test the card count formula 2 + (n - 2) for n content lines
#[test]
fn test_poemCards_withManyLines_shouldFollowCountFormula() -> Result<()> {
    for n in 2..=10 {
        let lines: Vec<String> = (1..=n).map(|i| format!("L{}", i)).collect();
        let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
        let doc = common::poem_document(&refs);

        let cards = CardGenerator::poem_cards(&doc, 2)?;
        assert_eq!(cards.len(), 2 + (n - 2), "card count mismatch for n={}", n);

        // First card's back is always the first content line
        assert_eq!(cards[0].back, "L1");
    }

    Ok(())
}

/// Test that cards come out in strictly increasing line order
#[test]
fn test_poemCards_withAnyPoem_shouldPreserveReadingOrder() -> Result<()> {
    let doc = common::poem_document(&["A", "B", "C", "D", "E"]);
    let cards = CardGenerator::poem_cards(&doc, 2)?;

    let backs: Vec<&str> = cards.iter().map(|c| c.back.as_str()).collect();
    assert_eq!(backs, vec!["A", "B", "C", "D", "E"]);

    Ok(())
}

/// Test that a single context line yields single-line fronts after bootstrap
#[test]
fn test_poemCards_withOneContextLine_shouldShowOnlyPreviousLine() -> Result<()> {
    let doc = common::poem_document(&["A", "B", "C"]);
    let cards = CardGenerator::poem_cards(&doc, 1)?;

    assert_eq!(cards.len(), 3);
    assert_eq!(cards[2].front, "B<br>");
    assert_eq!(cards[2].back, "C");

    Ok(())
}

/// Test that stanza break markers carried in the lines flow through to fronts
#[test]
fn test_poemCards_withStanzaMarkerInLine_shouldKeepMarkerInFront() -> Result<()> {
    let doc = common::poem_document(&["End of stanza <br>", "New stanza", "Next"]);
    let cards = CardGenerator::poem_cards(&doc, 2)?;

    assert_eq!(cards[2].front, "End of stanza <br><br>New stanza<br>");
    assert_eq!(cards[2].back, "Next");

    Ok(())
}

/// Test that a poem with fewer than two content lines is rejected
#[test]
fn test_poemCards_withOneLine_shouldReturnPoemTooShort() {
    let doc = common::poem_document(&["Lonely"]);
    let result = CardGenerator::poem_cards(&doc, 2);

    assert!(matches!(result, Err(GenerateError::PoemTooShort(1))));
}

/// Test poem cards carry the title and author for the header
#[test]
fn test_poemCards_withAuthor_shouldCarryHeaderFields() -> Result<()> {
    let doc = common::poem_document(&["A", "B"]);
    let cards = CardGenerator::poem_cards(&doc, 2)?;

    assert_eq!(cards[0].title, "Title");
    assert_eq!(cards[0].author.as_deref(), Some("Author"));

    Ok(())
}

/// Test the worked planets example: 4n - 1 records for n = 3
#[test]
fn test_sequenceCards_withPlanets_shouldProduceElevenCards() -> Result<()> {
    let doc = common::sequence_document(&["Mercury", "Venus", "Earth"]);
    let cards = CardGenerator::sequence_cards(&doc)?;

    assert_eq!(cards.len(), 11);

    // Whole-sequence recall comes first
    assert_eq!(cards[0].front, "Recall all elements of the sequence:");
    assert_eq!(cards[0].back, "Mercury, Venus, Earth");

    // Successor card
    let successor = cards
        .iter()
        .find(|c| c.front == "What comes after Mercury?")
        .expect("missing successor card");
    assert_eq!(successor.back, "Venus");

    // Backward card
    let backward = cards
        .iter()
        .find(|c| c.front == "What is the position of Earth?")
        .expect("missing backward card");
    assert_eq!(backward.back, "3");

    // Forward card
    let forward = cards
        .iter()
        .find(|c| c.front == "What element has position 2?")
        .expect("missing forward card");
    assert_eq!(forward.back, "Venus");

    // Predecessor card
    let predecessor = cards
        .iter()
        .find(|c| c.front == "What comes before Earth?")
        .expect("missing predecessor card");
    assert_eq!(predecessor.back, "Venus");

    Ok(())
}

/// Test the 4n - 1 count and the successor card uniqueness property
#[test]
fn test_sequenceCards_withVaryingLengths_shouldFollowCountFormula() -> Result<()> {
    for n in 1..=6 {
        let elements: Vec<String> = (1..=n).map(|i| format!("E{}", i)).collect();
        let refs: Vec<&str> = elements.iter().map(|s| s.as_str()).collect();
        let doc = common::sequence_document(&refs);

        let cards = CardGenerator::sequence_cards(&doc)?;
        assert_eq!(cards.len(), 4 * n - 1, "card count mismatch for n={}", n);

        // Exactly one successor card per non-final element
        for i in 1..n {
            let front = format!("What comes after E{}?", i);
            let matches: Vec<_> = cards.iter().filter(|c| c.front == front).collect();
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].back, format!("E{}", i + 1));
        }
    }

    Ok(())
}

/// Test that a single-element sequence has no successor or predecessor cards
#[test]
fn test_sequenceCards_withSingleElement_shouldOmitNeighborCards() -> Result<()> {
    let doc = common::sequence_document(&["Solo"]);
    let cards = CardGenerator::sequence_cards(&doc)?;

    assert_eq!(cards.len(), 3);
    assert!(cards.iter().all(|c| !c.front.starts_with("What comes")));

    Ok(())
}

/// Test that an empty sequence is rejected
#[test]
fn test_sequenceCards_withNoElements_shouldReturnSequenceEmpty() {
    let doc = common::sequence_document(&[]);
    let result = CardGenerator::sequence_cards(&doc);

    assert!(matches!(result, Err(GenerateError::SequenceEmpty)));
}

/// Test sequence cards render without an author heading
#[test]
fn test_sequenceCards_withoutAuthor_shouldRenderTitleOnlyHeader() -> Result<()> {
    let doc = common::sequence_document(&["One", "Two"]);
    let cards = CardGenerator::sequence_cards(&doc)?;

    assert_eq!(
        cards[0].render_front(),
        "<h4 style='margin: 0.25em;'>Title</h4>Recall all elements of the sequence:"
    );

    Ok(())
}
