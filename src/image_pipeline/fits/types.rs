//! FITS image data types

use std::fmt;

use ndarray::Array2;

/// Literal returned by metadata lookups for absent keys.
pub const UNKNOWN: &str = "Unknown";

/// A single header card value.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Text(String),
    Logical(bool),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Text(s) => f.write_str(s.trim_end()),
            HeaderValue::Logical(b) => f.write_str(if *b { "T" } else { "F" }),
            HeaderValue::Integer(i) => write!(f, "{}", i),
            HeaderValue::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Key-value header metadata, in the order the cards were read.
#[derive(Debug, Clone, Default)]
pub struct FitsHeader {
    cards: Vec<(String, HeaderValue)>,
}

impl FitsHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a card.
    pub fn insert(&mut self, key: impl Into<String>, value: HeaderValue) {
        let key = key.into();
        match self.cards.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.cards.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.cards.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the value rendered as text, or `"Unknown"` when the key is absent.
    pub fn lookup(&self, key: &str) -> String {
        self.get(key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.cards.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Image samples plus the header they were described by.
#[derive(Debug, Clone)]
pub struct FitsImage {
    /// Samples indexed `[row, col]`; NaN marks missing sensor data
    pub data: Array2<f64>,
    pub header: FitsHeader,
}

impl FitsImage {
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Figure title: target, instrument label and capture date, one per line.
    pub fn title(&self, instrument: &str) -> String {
        format!(
            "{}\n{}\n{}",
            self.header.lookup("TARGNAME"),
            instrument,
            self.header.lookup("DATE")
        )
    }
}
