//! Splitting the author field.
//!
//! Exports disagree on how authors are separated: some write `"A; B"`,
//! others `"A;B"`. Both separators are supported as named options.
//!
//! ```text
//! "A; B; C"  --SemicolonSpace-->  ["A", "B", "C"]
//! "A; B; C"  --Semicolon------->  ["A", " B", " C"]
//! ```

use std::fmt;
use std::str::FromStr;

/// Separator between author names in the author field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AuthorDelimiter {
    /// `";"` - keeps the leading space of every author after the first
    Semicolon,
    /// `"; "`
    #[default]
    SemicolonSpace,
}

impl AuthorDelimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthorDelimiter::Semicolon => ";",
            AuthorDelimiter::SemicolonSpace => "; ",
        }
    }
}

impl fmt::Display for AuthorDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.as_str())
    }
}

impl FromStr for AuthorDelimiter {
    type Err = String;

    /// Accepts the literal separator or its name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ";" | "semicolon" => Ok(AuthorDelimiter::Semicolon),
            "; " | "semicolon-space" => Ok(AuthorDelimiter::SemicolonSpace),
            other => Err(format!("unknown author delimiter '{}'", other)),
        }
    }
}

/// Split an author field into names.
///
/// An empty field has no authors. Otherwise pieces are returned exactly as
/// they appear, without trimming or filtering.
pub fn split_authors(field: &str, delimiter: AuthorDelimiter) -> Vec<&str> {
    if field.is_empty() {
        return Vec::new();
    }
    field.split(delimiter.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_semicolon_space() {
        assert_eq!(
            split_authors("A; B; C", AuthorDelimiter::SemicolonSpace),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn test_split_semicolon_keeps_leading_space() {
        assert_eq!(
            split_authors("A; B; C", AuthorDelimiter::Semicolon),
            vec!["A", " B", " C"]
        );
    }

    #[test]
    fn test_empty_field_has_no_authors() {
        assert!(split_authors("", AuthorDelimiter::SemicolonSpace).is_empty());
        assert!(split_authors("", AuthorDelimiter::Semicolon).is_empty());
    }

    #[test]
    fn test_single_author() {
        assert_eq!(
            split_authors("Smith, J.", AuthorDelimiter::SemicolonSpace),
            vec!["Smith, J."]
        );
    }

    #[test]
    fn test_pieces_are_not_filtered() {
        // Doubled separator leaves an empty name in place
        assert_eq!(
            split_authors("A;;B", AuthorDelimiter::Semicolon),
            vec!["A", "", "B"]
        );
    }

    #[test]
    fn test_semicolon_space_without_space_is_one_author() {
        assert_eq!(
            split_authors("A;B", AuthorDelimiter::SemicolonSpace),
            vec!["A;B"]
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(";".parse::<AuthorDelimiter>(), Ok(AuthorDelimiter::Semicolon));
        assert_eq!("; ".parse::<AuthorDelimiter>(), Ok(AuthorDelimiter::SemicolonSpace));
        assert_eq!(
            "semicolon-space".parse::<AuthorDelimiter>(),
            Ok(AuthorDelimiter::SemicolonSpace)
        );
        assert!(",".parse::<AuthorDelimiter>().is_err());
    }
}
