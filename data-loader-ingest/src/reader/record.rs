use std::fmt;
use std::sync::Arc;

/// A data row keyed by the header columns.
///
/// Headers are shared between all records of one input.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    line: u64,
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl RawRecord {
    /// Create a record. `values` must line up with `headers`.
    pub fn new(line: u64, headers: Arc<[String]>, values: Vec<String>) -> Self {
        debug_assert_eq!(headers.len(), values.len());
        Self {
            line,
            headers,
            values,
        }
    }

    /// Build a record from `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(line: u64, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (headers, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self::new(line, headers.into(), values)
    }

    /// 1-based line number in the input.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Column names, in source order.
    pub fn columns(&self) -> &[String] {
        &self.headers
    }

    /// Value of a column. When a header repeats, the last column wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .rposition(|h| h == column)
            .map(|i| self.values[i].as_str())
    }

    /// A copy of this record with surrounding whitespace removed from every value.
    pub fn trimmed(&self) -> Self {
        Self {
            line: self.line,
            headers: Arc::clone(&self.headers),
            values: self.values.iter().map(|v| v.trim().to_string()).collect(),
        }
    }
}

impl fmt::Display for RawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (column, value)) in self.headers.iter().zip(&self.values).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {:?}", column, value)?;
        }
        f.write_str("}")
    }
}
