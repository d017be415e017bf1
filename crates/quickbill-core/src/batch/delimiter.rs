//! Field delimiter detection for batch lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MULTI_SPACE: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Separator used to split one batch line into fields.
///
/// Detection order is tab, comma, semicolon, then runs of two or more
/// whitespace characters. Saved batches and the downloadable template
/// depend on this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
    Semicolon,
    MultiSpace,
}

impl Delimiter {
    /// Pick the delimiter for a single (trimmed) line.
    pub fn detect(line: &str) -> Self {
        if line.contains('\t') {
            Delimiter::Tab
        } else if line.contains(',') {
            Delimiter::Comma
        } else if line.contains(';') {
            Delimiter::Semicolon
        } else {
            Delimiter::MultiSpace
        }
    }

    /// Split `line` on this delimiter and trim every field.
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let fields: Vec<&str> = match self {
            Delimiter::Tab => line.split('\t').collect(),
            Delimiter::Comma => line.split(',').collect(),
            Delimiter::Semicolon => line.split(';').collect(),
            Delimiter::MultiSpace => MULTI_SPACE.split(line).collect(),
        };

        fields.into_iter().map(str::trim).collect()
    }
}

/// Detect the delimiter of `line` and split it into trimmed fields.
pub fn split_fields(line: &str) -> (Delimiter, Vec<&str>) {
    let delimiter = Delimiter::detect(line);
    (delimiter, delimiter.split(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_priority() {
        assert_eq!(Delimiter::detect("a\tb,c;d"), Delimiter::Tab);
        assert_eq!(Delimiter::detect("a,b;c"), Delimiter::Comma);
        assert_eq!(Delimiter::detect("a;b  c"), Delimiter::Semicolon);
        assert_eq!(Delimiter::detect("a  b"), Delimiter::MultiSpace);
        assert_eq!(Delimiter::detect("single field"), Delimiter::MultiSpace);
    }

    #[test]
    fn test_split_trims_fields() {
        assert_eq!(
            split_fields("Web Hosting , 1 , 29900"),
            (Delimiter::Comma, vec!["Web Hosting", "1", "29900"])
        );
        assert_eq!(
            split_fields("SEO Optimization   1    50000"),
            (Delimiter::MultiSpace, vec!["SEO Optimization", "1", "50000"])
        );
    }

    #[test]
    fn test_single_spaces_do_not_split() {
        assert_eq!(split_fields("Logo design 5000").1, vec!["Logo design 5000"]);
    }

    #[test]
    fn test_grouped_amounts_survive_only_in_tab_lines() {
        assert_eq!(split_fields("Design,1,200").1, vec!["Design", "1", "200"]);
        assert_eq!(split_fields("Design\t1,200").1, vec!["Design", "1,200"]);
    }
}
