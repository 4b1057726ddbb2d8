//! Detail page parser
//!
//! This module turns one accident-detail document into a [`Record`]:
//! - 17 scalar fields, each found by its label-marker cell and read from the
//!   adjacent value cell
//! - the free-text narrative section, which keeps its line breaks
//!
//! A missing label only leaves that field absent. Most detail pages lack
//! several fields.

use crate::record::{Field, Record};
use crate::{ExtractError, ExtractResult};
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Capability to look up the value printed next to a label-marker
pub trait LabeledFieldReader {
    /// Returns true if the document carries `label`, with or without a value
    fn has_label(&self, label: &str) -> bool;

    /// Returns the normalized value for `label`, or None if the label is
    /// absent or its value cell is empty
    fn read_field(&self, label: &str) -> Option<String>;
}

/// [`LabeledFieldReader`] over a parsed HTML document
///
/// Labels live in table cells; the value is the next sibling cell.
pub struct HtmlFieldReader<'a> {
    document: &'a Html,
    cells: Selector,
}

impl<'a> HtmlFieldReader<'a> {
    pub fn new(document: &'a Html) -> ExtractResult<Self> {
        Ok(Self {
            document,
            cells: create_selector("td")?,
        })
    }
}

impl<'a> HtmlFieldReader<'a> {
    fn label_cell(&self, label: &str) -> Option<ElementRef<'a>> {
        self.document
            .select(&self.cells)
            .find(|cell| collapsed_text(cell) == label)
    }
}

impl LabeledFieldReader for HtmlFieldReader<'_> {
    fn has_label(&self, label: &str) -> bool {
        self.label_cell(label).is_some()
    }

    fn read_field(&self, label: &str) -> Option<String> {
        let label_cell = self.label_cell(label)?;

        let value_cell = label_cell
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .next()?;

        Some(collapsed_text(&value_cell)).filter(|value| !value.is_empty())
    }
}

/// Parses a detail document into a record
///
/// # Arguments
///
/// * `html` - The detail document
/// * `source_url` - Address the document was fetched from; becomes SourceURL
///
/// # Returns
///
/// * `Ok(Record)` - The record, absent fields set to None
/// * `Err(ExtractError)` - The URL is malformed, the body is blank, or the
///   document carries none of the known labels
///
/// # Example
///
/// ```
/// use accident_harvest::crawler::extract_record;
///
/// let html = r#"<table><tr><td class="caption">Date:</td><td>1 May 2020</td></tr></table>"#;
/// let record = extract_record(html, "https://example.com/wikibase/1").unwrap();
/// assert_eq!(record.date.as_deref(), Some("1 May 2020"));
/// assert_eq!(record.narrative, None);
/// ```
pub fn extract_record(html: &str, source_url: &str) -> ExtractResult<Record> {
    validate_source_url(source_url)?;

    if html.trim().is_empty() {
        return Err(ExtractError::EmptyDocument {
            url: source_url.to_string(),
        });
    }

    let document = Html::parse_document(html);
    let reader = HtmlFieldReader::new(&document)?;

    let mut record = Record::new(source_url);
    let labels_found = populate_labeled_fields(&mut record, &reader);
    let caption = narrative_caption(&document)?;

    // A page with labels but no values is still a detail page
    if labels_found == 0 && caption.is_none() {
        return Err(ExtractError::NoLabeledFields {
            url: source_url.to_string(),
        });
    }

    record.set(Field::Narrative, caption.and_then(read_narrative));
    Ok(record)
}

/// Fills every labeled scalar field from the reader
///
/// Returns how many of the labels occur in the document, counting those
/// whose value is empty.
pub fn populate_labeled_fields(record: &mut Record, reader: &impl LabeledFieldReader) -> usize {
    let mut found = 0;
    for field in Field::LABELED {
        let Some(label) = field.label() else {
            continue;
        };
        if reader.has_label(label) {
            found += 1;
            record.set(field, reader.read_field(label));
        }
    }
    found
}

/// Finds the `Narrative:` caption, if the document has one
fn narrative_caption(document: &Html) -> ExtractResult<Option<ElementRef<'_>>> {
    let captions = create_selector("span.caption")?;
    let Some(label) = Field::Narrative.label() else {
        return Ok(None);
    };

    Ok(document
        .select(&captions)
        .find(|span| collapsed_text(span) == label))
}

/// Reads the narrative section
///
/// Walks the siblings after the caption up to the next section header
/// (`div.captionhr`):
/// - `<br>` becomes a newline
/// - other elements contribute their trimmed text
/// - bare text is appended verbatim
fn read_narrative(caption: ElementRef<'_>) -> Option<String> {
    let mut narrative = String::new();
    for node in caption.next_siblings() {
        match node.value() {
            Node::Text(text) => narrative.push_str(text),
            Node::Element(element) => {
                if element.name() == "br" {
                    narrative.push('\n');
                    continue;
                }
                if element.name() == "div" && element.classes().any(|c| c == "captionhr") {
                    break;
                }
                if let Some(child) = ElementRef::wrap(node) {
                    for piece in child.text() {
                        narrative.push_str(piece.trim());
                    }
                }
            }
            _ => {}
        }
    }

    let narrative = narrative.trim();
    (!narrative.is_empty()).then(|| narrative.to_string())
}

fn validate_source_url(source_url: &str) -> ExtractResult<()> {
    let invalid = |message: String| ExtractError::InvalidSourceUrl {
        url: source_url.to_string(),
        message,
    };

    let url = Url::parse(source_url).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(())
}

/// Element text with runs of whitespace collapsed to single spaces
fn collapsed_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[inline]
fn create_selector(sel_str: &str) -> ExtractResult<Selector> {
    Selector::parse(sel_str).map_err(|_| ExtractError::Selector(sel_str.into()))
}
