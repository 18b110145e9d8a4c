//! Domain models.
//!
//! - [`Record`] - one row of the bibliographic CSV export
//! - [`FeedEntry`] - one Atom `entry` element
//! - [`FeedRecord`] - flattened feed entry, the shape written as JSON or CSV

use serde::Serialize;

use crate::transform::split::{split_authors, AuthorDelimiter};

/// Separator used when authors are joined back into one string.
pub const AUTHOR_JOIN: &str = "; ";

// =============================================================================
// CSV Record
// =============================================================================

/// One row of the spreadsheet export.
///
/// Only the key and the raw author field are kept; the other columns are
/// not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Opaque identifier from the key column.
    pub key: String,
    /// Author names joined by `;` or `; `.
    pub authors: String,
    /// 1-based line the row starts on.
    pub line: u64,
}

impl Record {
    pub fn new(key: impl Into<String>, authors: impl Into<String>, line: u64) -> Self {
        Self {
            key: key.into(),
            authors: authors.into(),
            line,
        }
    }

    /// Authors of this row, split with `delimiter`.
    pub fn author_list(&self, delimiter: AuthorDelimiter) -> Vec<&str> {
        split_authors(&self.authors, delimiter)
    }
}

// =============================================================================
// Feed Entry
// =============================================================================

/// An Atom `entry` as read from the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    /// `href` of the entry link, if any.
    pub link: Option<String>,
    pub authors: Vec<String>,
}

impl FeedEntry {
    /// Authors joined with `"; "`.
    pub fn author(&self) -> String {
        self.authors.join(AUTHOR_JOIN)
    }

    /// Number of populated fields among title, link and author.
    pub fn field_count(&self) -> usize {
        let mut count = 0;
        if !self.title.is_empty() {
            count += 1;
        }
        if self.link.as_deref().is_some_and(|l| !l.is_empty()) {
            count += 1;
        }
        if !self.authors.is_empty() {
            count += 1;
        }
        count
    }

    pub fn to_record(&self) -> FeedRecord {
        FeedRecord {
            title: self.title.clone(),
            link: self.link.clone().unwrap_or_default(),
            author: self.author(),
        }
    }
}

/// Flattened feed entry, as written by the json and csv feed formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedRecord {
    pub title: String,
    pub link: String,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_author_list() {
        let record = Record::new("B001", "Smith, J.; Doe, A.", 1);
        assert_eq!(
            record.author_list(AuthorDelimiter::SemicolonSpace),
            vec!["Smith, J.", "Doe, A."]
        );
    }

    #[test]
    fn test_feed_entry_author_join() {
        let entry = FeedEntry {
            title: "Paper".into(),
            link: Some("https://example.org/1".into()),
            authors: vec!["Ada".into(), "Grace".into()],
        };
        assert_eq!(entry.author(), "Ada; Grace");
        assert_eq!(entry.field_count(), 3);

        let record = entry.to_record();
        assert_eq!(record.author, "Ada; Grace");
        assert_eq!(record.link, "https://example.org/1");
    }

    #[test]
    fn test_field_count_skips_missing_fields() {
        let entry = FeedEntry {
            title: "Untitled draft".into(),
            link: None,
            authors: Vec::new(),
        };
        assert_eq!(entry.field_count(), 1);
        assert_eq!(entry.to_record().link, "");
    }
}
