use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{ItemEntry, ItemRecord};
use crate::snapshot::SharedReader;

/// A query after trimming and classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Empty,
    Entry(ItemEntry),
    Text(TextQuery),
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Query::Empty;
        }
        match trimmed.parse::<ItemEntry>() {
            Ok(entry) => Query::Entry(entry),
            Err(_) => Query::Text(TextQuery::from_text(trimmed)),
        }
    }
}

/// Whitespace-separated tokens, each matched as a prefix of a name word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    tokens: Vec<String>,
}

impl TextQuery {
    pub fn from_text(text: &str) -> Self {
        Self {
            tokens: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// FTS5 MATCH expression: every token as a quoted prefix term, joined
    /// with spaces (implicit AND). Quoting keeps apostrophes and hyphens in
    /// item names from being read as query syntax.
    pub fn match_expression(&self) -> String {
        self.tokens
            .iter()
            .map(|token| format!("\"{}\"*", token.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Turns user input into ordered item records.
#[derive(Clone)]
pub struct SearchEngine {
    reader: SharedReader,
}

impl SearchEngine {
    pub fn new(reader: SharedReader) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &SharedReader {
        &self.reader
    }

    /// Like [`SearchEngine::try_search`] but a failed read is logged and
    /// reported as no results.
    pub fn search(&self, raw: &str, limit: usize) -> Vec<ItemRecord> {
        match self.try_search(raw, limit) {
            Ok(items) => items,
            Err(err) => {
                warn!(query = raw, error = %err, "search failed; returning no results");
                Vec::new()
            }
        }
    }

    pub fn try_search(&self, raw: &str, limit: usize) -> Result<Vec<ItemRecord>> {
        match Query::parse(raw) {
            Query::Empty => Ok(Vec::new()),
            Query::Entry(entry) => {
                debug!(entry, "primary key lookup");
                Ok(self.reader.item(entry)?.into_iter().collect())
            }
            Query::Text(query) => {
                if limit == 0 {
                    return Ok(Vec::new());
                }
                let items = self.reader.items_matching(&query, limit)?;
                debug!(tokens = query.tokens().len(), hits = items.len(), "text search");
                Ok(items)
            }
        }
    }
}
