// Author: Dustin Pilgrim
// License: MIT

use indexmap::map::Entry;
use log::{debug, trace};

use super::*;

/// One insertion emitted by a front end, addressed by its absolute path.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Value { path: KeyPath, value: Value },
    Array { path: KeyPath, elements: Vec<Value> },
}

impl Event {
    pub fn path(&self) -> &KeyPath {
        match self {
            Event::Value { path, .. } | Event::Array { path, .. } => path,
        }
    }
}

/// Accumulates values into a document as a front end discovers them.
///
/// The builder is the only writer a tree ever has. Insertion is append-only:
/// a bound key is never overwritten, and a failed insertion leaves the tree
/// exactly as it was.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    root: Table,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` at `path`, creating missing intermediate tables.
    ///
    /// # Errors
    /// - [`TomeError::DuplicateKey`] if the last segment is already bound, or
    ///   if an intermediate segment is bound to something other than a table.
    /// - [`TomeError::MixedArrayType`] if `value` contains an array whose
    ///   elements do not share one type.
    pub fn insert<P>(&mut self, path: &P, value: Value) -> Result<(), TomeError>
    where
        P: ToKeyPath + ?Sized,
    {
        let path = path.to_key_path()?;
        validation::check_value(&path, &value)?;
        self.bind(path, value)
    }

    /// Bind an array literal at `path` after checking its elements share
    /// one type.
    pub fn insert_array<P>(&mut self, path: &P, elements: Vec<Value>) -> Result<(), TomeError>
    where
        P: ToKeyPath + ?Sized,
    {
        let path = path.to_key_path()?;
        validation::check_array(&path, &elements)?;
        self.bind(path, Value::Array(elements))
    }

    pub fn apply(&mut self, event: Event) -> Result<(), TomeError> {
        match event {
            Event::Value { path, value } => self.insert(&path, value),
            Event::Array { path, elements } => self.insert_array(&path, elements),
        }
    }

    /// Freeze the tree. The returned document has no mutation API.
    pub fn finish(self) -> Document {
        debug!("document built with {} top-level keys", self.root.len());
        Document { root: self.root }
    }

    // Only pre-existing nodes can make the walk fail, and those are all
    // visited before the first new table is created.
    fn bind(&mut self, path: KeyPath, value: Value) -> Result<(), TomeError> {
        let (last, parents) = path.split_last();

        let mut current = &mut self.root;
        for segment in parents {
            current = match current
                .entry(segment.clone())
                .or_insert_with(|| Value::Table(Table::new()))
            {
                Value::Table(inner) => inner,
                other => {
                    debug!(
                        "rejecting '{}': '{}' is bound to a {}",
                        path,
                        segment,
                        other.kind()
                    );
                    return Err(TomeError::DuplicateKey { path: path.clone() });
                }
            };
        }

        match current.entry(last.to_string()) {
            Entry::Occupied(_) => {
                debug!("rejecting '{}': key already bound", path);
                Err(TomeError::DuplicateKey { path: path.clone() })
            }
            Entry::Vacant(slot) => {
                trace!("insert {} = {}", path, value);
                slot.insert(value);
                Ok(())
            }
        }
    }
}

impl Document {
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    /// Build a document from a stream of events, stopping at the first
    /// rejected insertion. No partial document is returned.
    pub fn from_events<I>(events: I) -> Result<Document, TomeError>
    where
        I: IntoIterator<Item = Event>,
    {
        Self::try_from_events(events.into_iter().map(Ok))
    }

    /// Like [`Document::from_events`], for front ends that can fail while
    /// producing events.
    pub fn try_from_events<I>(events: I) -> Result<Document, TomeError>
    where
        I: IntoIterator<Item = Result<Event, TomeError>>,
    {
        let mut builder = DocumentBuilder::new();
        for event in events {
            builder.apply(event?)?;
        }
        Ok(builder.finish())
    }
}
