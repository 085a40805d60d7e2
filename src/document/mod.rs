// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use serde::ser::{Serialize, Serializer};

use crate::error::TomeError;
use crate::key::{KeyPath, ToKeyPath};
use crate::value::{Table, Value};

mod access;
mod builder;
mod conversion;
pub mod resolve;
mod validation;

pub use access::{Lookup, TableView};
pub use builder::{DocumentBuilder, Event};

/// A finished document tree, rooted at a table.
///
/// Documents are built through a [`DocumentBuilder`] and are immutable
/// afterwards. Reads go through the [`Lookup`] trait.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Table,
}

impl Document {
    /// A view of the whole document.
    pub fn view(&self) -> TableView<'_> {
        TableView::root_of(self)
    }

    pub fn as_table(&self) -> &Table {
        &self.root
    }

    pub fn into_table(self) -> Table {
        self.root
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

fn dump(f: &mut fmt::Formatter<'_>, prefix: Option<&KeyPath>, table: &Table) -> fmt::Result {
    for (key, value) in table {
        let path = match prefix {
            Some(p) => p.child(key.as_str()),
            None => KeyPath::from_segment(key.as_str()),
        };
        match value {
            Value::Table(inner) if !inner.is_empty() => dump(f, Some(&path), inner)?,
            other => writeln!(f, "{} = {}", path, other)?,
        }
    }
    Ok(())
}

/// One line per leaf path, in insertion order:
///
/// ```text
/// server.host = "localhost"
/// server.ports = [80, 443]
/// ```
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dump(f, None, &self.root)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
