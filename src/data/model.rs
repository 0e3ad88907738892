use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Record – one row of a chat CSV
// ---------------------------------------------------------------------------

/// A single chat line as an ordered column → value mapping.
///
/// Column order follows the CSV header, with feature columns appended in the
/// order they were added. Keys are unique; inserting an existing key
/// overwrites the value in place without moving the column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Build a record from parallel header / value sequences.
    pub fn from_columns<I, J>(headers: I, values: J) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        Record {
            fields: headers
                .into_iter()
                .zip(values)
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value for `key`, if the column exists.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key` to `value`, overwriting in place if the column exists,
    /// appending a new column otherwise.
    pub fn insert(&mut self, key: &str, value: String) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    /// Column names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// (column, value) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ColumnError – typed failure for multi-column extraction
// ---------------------------------------------------------------------------

/// A requested column was absent from a record.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("column '{column}' missing in record {row}")]
pub struct ColumnError {
    pub column: String,
    pub row: usize,
}

// ---------------------------------------------------------------------------
// ChatSession – one chat file plus its session labels
// ---------------------------------------------------------------------------

/// All lines of one chat file together with the session-level label map
/// taken from the description row that named the file
/// (e.g. `winner → BEL`, `country_1 → BEL`, `country_2 → ENG`).
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    /// Chat lines in file order.
    pub records: Vec<Record>,
    /// Session metadata, fixed at load time.
    pub labels: BTreeMap<String, String>,
}

impl ChatSession {
    /// Number of chat lines (header excluded).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the session has no lines.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `idx`, if in range.
    pub fn get(&self, idx: usize) -> Option<&Record> {
        self.records.get(idx)
    }

    /// Label value for `key`. Absent keys are `None`, never an error.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Compute `func` for every record and store the result under `name`,
    /// overwriting any existing column of that name.
    pub fn add_feature<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&Record) -> String,
    {
        for record in &mut self.records {
            let value = func(record);
            record.insert(name, value);
        }
        log::info!("add feature '{}' to {}", name, self);
    }

    /// Per record, the values of `keys` in the given order. Fails the whole
    /// call if any record lacks one of the columns.
    pub fn values_for_columns(&self, keys: &[&str]) -> Result<Vec<Vec<String>>, ColumnError> {
        self.records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                keys.iter()
                    .map(|&key| {
                        record
                            .get(key)
                            .map(str::to_string)
                            .ok_or_else(|| ColumnError {
                                column: key.to_string(),
                                row,
                            })
                    })
                    .collect()
            })
            .collect()
    }
}

impl Index<usize> for ChatSession {
    type Output = Record;

    fn index(&self, idx: usize) -> &Record {
        &self.records[idx]
    }
}

impl fmt::Display for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChatSession {:?}", self.labels)
    }
}

// ---------------------------------------------------------------------------
// ChatDataset – the complete loaded collection of sessions
// ---------------------------------------------------------------------------

/// All sessions built from one description file, in description-row order.
#[derive(Debug, Clone, Default)]
pub struct ChatDataset {
    pub sessions: Vec<ChatSession>,
}

impl ChatDataset {
    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the dataset holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Apply the same feature to every session.
    pub fn add_feature<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&Record) -> String,
    {
        for session in &mut self.sessions {
            session.add_feature(name, &func);
        }
    }

    /// Sessions in construction order. Restartable.
    pub fn iter(&self) -> std::slice::Iter<'_, ChatSession> {
        self.sessions.iter()
    }
}

impl<'a> IntoIterator for &'a ChatDataset {
    type Item = &'a ChatSession;
    type IntoIter = std::slice::Iter<'a, ChatSession>;

    fn into_iter(self) -> Self::IntoIter {
        self.sessions.iter()
    }
}
