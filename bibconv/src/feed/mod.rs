//! Atom feed extraction.
//!
//! Every `entry` element becomes a [`FeedEntry`] built from:
//!
//! - the text of its `title` child
//! - the `href` of its first `link` child with no `rel` or `rel="alternate"`
//! - the `name` text of each `author` child
//!
//! Elements are matched on their local name, so `atom:entry` and a default
//! namespaced `entry` are treated alike. All entries are collected before
//! [`summarize`] aggregates them.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{BibResult, FeedError, FeedResult};
use crate::models::{FeedEntry, FeedRecord};

/// Output formats for extracted feed entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FeedFormat {
    /// Entry count and per-entry field counts
    #[default]
    Summary,
    /// Pretty-printed JSON array of records
    Json,
    /// `title,link,author` rows with a header
    Csv,
}

/// Aggregate view over all entries of a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSummary {
    pub entry_count: usize,
    /// Populated fields per entry, in document order
    pub field_counts: Vec<usize>,
}

impl FeedSummary {
    /// Entries with title, link and author all present.
    pub fn complete_entries(&self) -> usize {
        self.field_counts
            .iter()
            .filter(|&&n| n == FIELDS_PER_ENTRY)
            .count()
    }
}

const FIELDS_PER_ENTRY: usize = 3;

// =============================================================================
// Parsing
// =============================================================================

/// Field whose text is being collected.
#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    AuthorName,
}

/// An entry under construction.
#[derive(Debug, Default)]
struct EntryBuilder {
    entry: FeedEntry,
    /// Open elements inside the entry, counting the entry itself
    depth: usize,
    in_author: bool,
    /// Field being captured and the depth its element opened at
    capture: Option<(Field, usize)>,
    text: String,
}

impl EntryBuilder {
    fn new() -> Self {
        Self {
            depth: 1,
            ..Self::default()
        }
    }

    fn start(&mut self, element: &BytesStart<'_>, empty: bool) -> Result<(), String> {
        let local = element.local_name();
        let name = local.as_ref();

        if self.depth == 1 {
            match name {
                b"title" if !empty => self.begin_capture(Field::Title),
                b"link" if self.entry.link.is_none() => {
                    self.entry.link = alternate_href(element)?;
                }
                b"author" if !empty => self.in_author = true,
                _ => {}
            }
        } else if self.depth == 2 && self.in_author && name == b"name" && !empty {
            self.begin_capture(Field::AuthorName);
        }

        if !empty {
            self.depth += 1;
        }
        Ok(())
    }

    fn begin_capture(&mut self, field: Field) {
        self.capture = Some((field, self.depth + 1));
        self.text.clear();
    }

    fn text(&mut self, text: &str) {
        if self.capture.is_some() {
            self.text.push_str(text);
        }
    }

    /// Close the current element. Returns true once the entry itself closes.
    fn end(&mut self) -> bool {
        if let Some((field, depth)) = self.capture {
            if depth == self.depth {
                let value = self.text.trim().to_string();
                match field {
                    Field::Title => self.entry.title = value,
                    Field::AuthorName => self.entry.authors.push(value),
                }
                self.capture = None;
            }
        }

        self.depth -= 1;
        if self.depth == 1 {
            self.in_author = false;
        }
        self.depth == 0
    }
}

/// `href` of a link element when it points at the entry itself.
fn alternate_href(element: &BytesStart<'_>) -> Result<Option<String>, String> {
    let mut href = None;
    let mut alternate = true;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        match attr.key.local_name().as_ref() {
            b"href" => href = Some(value.into_owned()),
            b"rel" => alternate = value == "alternate",
            _ => {}
        }
    }

    Ok(if alternate { href } else { None })
}

/// Parse an Atom document and collect all of its entries.
pub fn parse_feed<R: BufRead>(input: R) -> FeedResult<Vec<FeedEntry>> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();
    let mut entries = Vec::new();
    let mut current: Option<EntryBuilder> = None;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| FeedError::Xml {
            position: reader.error_position(),
            message: e.to_string(),
        })?;
        let position = reader.buffer_position();
        let xml_error = |message: String| FeedError::Xml { position, message };

        match event {
            Event::Start(e) => match current.as_mut() {
                Some(builder) => builder.start(&e, false).map_err(xml_error)?,
                None if e.local_name().as_ref() == b"entry" => current = Some(EntryBuilder::new()),
                None => {}
            },
            Event::Empty(e) => match current.as_mut() {
                Some(builder) => builder.start(&e, true).map_err(xml_error)?,
                None if e.local_name().as_ref() == b"entry" => entries.push(FeedEntry::default()),
                None => {}
            },
            Event::Text(e) => {
                if let Some(builder) = current.as_mut() {
                    let text = e.unescape().map_err(|e| xml_error(e.to_string()))?;
                    builder.text(&text);
                }
            }
            Event::CData(e) => {
                if let Some(builder) = current.as_mut() {
                    builder.text(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(_) => {
                if let Some(builder) = current.as_mut() {
                    if builder.end() {
                        if let Some(done) = current.take() {
                            entries.push(done.entry);
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if current.is_some() {
        return Err(FeedError::Xml {
            position: reader.buffer_position(),
            message: "document ended inside <entry>".to_string(),
        });
    }

    Ok(entries)
}

/// Parse the Atom feed stored at `path`.
pub fn parse_feed_file(path: &Path) -> FeedResult<Vec<FeedEntry>> {
    let file = File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => FeedError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => FeedError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_feed(BufReader::new(file))
}

// =============================================================================
// Aggregation & Output
// =============================================================================

/// Summarize all collected entries.
pub fn summarize(entries: &[FeedEntry]) -> FeedSummary {
    FeedSummary {
        entry_count: entries.len(),
        field_counts: entries.iter().map(FeedEntry::field_count).collect(),
    }
}

/// Write entries in the requested format.
pub fn write_entries<W: Write>(entries: &[FeedEntry], format: FeedFormat, out: &mut W) -> BibResult<()> {
    match format {
        FeedFormat::Summary => write_summary(entries, out)?,
        FeedFormat::Json => {
            let records: Vec<FeedRecord> = entries.iter().map(FeedEntry::to_record).collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
        FeedFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(["title", "link", "author"])?;
            for entry in entries {
                let record = entry.to_record();
                writer.write_record([&record.title, &record.link, &record.author])?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn write_summary<W: Write>(entries: &[FeedEntry], out: &mut W) -> std::io::Result<()> {
    let summary = summarize(entries);
    writeln!(
        out,
        "{} entries ({} complete)",
        summary.entry_count,
        summary.complete_entries()
    )?;
    for (i, (entry, fields)) in entries.iter().zip(&summary.field_counts).enumerate() {
        writeln!(
            out,
            "[{}] {}/{} fields  {}",
            i + 1,
            fields,
            FIELDS_PER_ENTRY,
            entry.title
        )?;
    }
    Ok(())
}
