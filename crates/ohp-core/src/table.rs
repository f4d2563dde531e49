use serde::{Deserialize, Serialize};

/// A row is an ordered list of raw field values.
pub type Row = Vec<String>;

/// An in-memory comma-delimited table.
///
/// Rows are not required to match the header width: short rows produced by
/// blank or truncated lines are kept as they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Source label, usually the file stem. Only used to prefix columns.
    pub name: String,
    pub keys: Vec<String>,
    pub values: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, keys: Vec<String>, values: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            keys,
            values,
        }
    }

    /// Parse delimited text: the first line is the header, every remaining
    /// line (a trailing empty one included) becomes a row.
    ///
    /// There is no quoting support, a field containing `,` is split.
    pub fn parse(name: impl Into<String>, text: &str) -> Self {
        let (header, rest) = text.split_once('\n').unwrap_or((text, ""));
        let keys = split_fields(header.trim_end());
        let values = rest.split('\n').map(split_fields).collect();
        Self::new(name, keys, values)
    }

    /// Position of the first column called `key`.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Rows with fewer fields than the header, with their 1-based line
    /// number in the source text.
    pub fn short_rows(&self) -> impl Iterator<Item = (usize, &Row)> + '_ {
        let width = self.keys.len();
        self.values
            .iter()
            .enumerate()
            .filter(move |(_, row)| row.len() < width)
            .map(|(i, row)| (i + 2, row))
    }

    /// Header followed by the data rows.
    pub fn to_rows(&self) -> Vec<Row> {
        let mut rows = Vec::with_capacity(self.values.len() + 1);
        rows.push(self.keys.clone());
        rows.extend(self.values.iter().cloned());
        rows
    }
}

fn split_fields(line: &str) -> Row {
    line.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_rows() {
        let t = Table::parse("people", "id,name\n1,alice\n2,bob");
        assert_eq!(t.name, "people");
        assert_eq!(t.keys, vec!["id", "name"]);
        assert_eq!(t.values, vec![vec!["1", "alice"], vec!["2", "bob"]]);
    }

    #[test]
    fn test_parse_trailing_newline_yields_blank_row() {
        let t = Table::parse("t", "id,name  \n1,alice\n");
        assert_eq!(t.keys, vec!["id", "name"]);
        assert_eq!(t.values.len(), 2);
        assert_eq!(t.values[1], vec![""]);
    }

    #[test]
    fn test_parse_header_only() {
        let t = Table::parse("t", "a,b");
        assert_eq!(t.keys, vec!["a", "b"]);
        assert_eq!(t.values, vec![vec![""]]);
    }

    #[test]
    fn test_parse_empty_text() {
        let t = Table::parse("t", "");
        assert_eq!(t.keys, vec![""]);
        assert_eq!(t.values, vec![vec![""]]);
    }

    #[test]
    fn test_parse_does_not_unquote() {
        let t = Table::parse("t", "a,b\n\"x,y\",z");
        assert_eq!(t.values[0], vec!["\"x", "y\"", "z"]);
    }

    #[test]
    fn test_index_of_duplicate_keys_picks_first() {
        let t = Table::parse("t", "id,x,id\n1,2,3");
        assert_eq!(t.index_of("id"), Some(0));
        assert_eq!(t.index_of("x"), Some(1));
        assert_eq!(t.index_of("missing"), None);
        assert!(!t.contains_key("missing"));
    }

    #[test]
    fn test_short_rows_reports_line_numbers() {
        let t = Table::parse("t", "a,b,c\n1,2,3\n4,5\n\n7,8,9,10");
        let short: Vec<_> = t.short_rows().map(|(line, _)| line).collect();
        assert_eq!(short, vec![3, 4]);
    }

    #[test]
    fn test_to_rows_prepends_header() {
        let t = Table::parse("t", "a,b\n1,2");
        assert_eq!(t.to_rows(), vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_serializes_to_json() {
        let t = Table::parse("t", "a\n1");
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"name":"t","keys":["a"],"values":[["1"]]}"#);
    }
}
