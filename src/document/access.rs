// Author: Dustin Pilgrim
// License: MIT

use crate::datetime::Datetime;
use crate::error::ConversionError;

use super::*;

/// Typed, path-addressed reads over a table.
///
/// Implemented by [`Document`] for the whole tree and by [`TableView`] for a
/// sub-table. All paths are relative to the implementor's table; errors
/// always name the absolute path.
///
/// # Examples
/// ```
/// use tome_cfg::{Document, Lookup, Value};
///
/// # fn main() -> Result<(), tome_cfg::TomeError> {
/// let mut builder = Document::builder();
/// builder.insert("server.host", Value::from("localhost"))?;
/// builder.insert_array("server.ports", vec![Value::from(80), Value::from(443)])?;
/// let doc = builder.finish();
///
/// let host = doc.get_string("server.host")?;
/// let ports: Vec<u16> = doc.get_array(&["server", "ports"])?;
/// assert_eq!(host, "localhost");
/// assert_eq!(ports, vec![80, 443]);
/// assert!(doc.get_integer("server.host").is_err());
/// # Ok(())
/// # }
/// ```
pub trait Lookup {
    /// The table paths are resolved against.
    fn root(&self) -> &Table;

    /// Where [`Lookup::root`] sits in the full document, if it is not the
    /// document itself.
    fn base(&self) -> Option<&KeyPath>;

    /// The absolute form of a path relative to this table.
    fn absolute(&self, path: &KeyPath) -> KeyPath {
        match self.base() {
            Some(base) => base.join(path),
            None => path.clone(),
        }
    }

    /// Find the value at `path`. `Ok(None)` means nothing is there; an
    /// error means the path itself was unusable (e.g. empty).
    fn resolve<P>(&self, path: &P) -> Result<Option<&Value>, TomeError>
    where
        P: ToKeyPath + ?Sized,
    {
        let path = path.to_key_path()?;
        Ok(resolve::resolve(self.root(), &path))
    }

    fn has_key<P>(&self, path: &P) -> Result<bool, TomeError>
    where
        P: ToKeyPath + ?Sized,
    {
        let path = path.to_key_path()?;
        Ok(resolve::exists(self.root(), &path))
    }

    /// Top-level keys of this table, in insertion order.
    fn keys(&self) -> Vec<&str> {
        self.root().keys().map(String::as_str).collect()
    }

    /// Get the value at `path` converted to `T`.
    ///
    /// # Errors
    /// - [`TomeError::KeyError`] if nothing is bound at `path`.
    /// - [`TomeError::TypeMismatch`] if the value (or, for arrays, one of
    ///   its elements) is of another kind.
    /// - [`TomeError::OutOfRange`] if an integer does not fit `T`.
    fn get<'a, T, P>(&'a self, path: &P) -> Result<T, TomeError>
    where
        T: TryFrom<&'a Value, Error = ConversionError>,
        P: ToKeyPath + ?Sized,
    {
        let path = path.to_key_path()?;
        let value = resolve::resolve(self.root(), &path).ok_or_else(|| TomeError::KeyError {
            path: self.absolute(&path),
        })?;
        T::try_from(value).map_err(|e| e.at(self.absolute(&path)))
    }

    /// Like [`Lookup::get`], with `Ok(None)` when the key is absent. A
    /// value of the wrong kind is still an error.
    fn get_optional<'a, T, P>(&'a self, path: &P) -> Result<Option<T>, TomeError>
    where
        T: TryFrom<&'a Value, Error = ConversionError>,
        P: ToKeyPath + ?Sized,
    {
        match self.get(path) {
            Ok(value) => Ok(Some(value)),
            Err(TomeError::KeyError { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn get_or<'a, T, P>(&'a self, path: &P, default: T) -> T
    where
        T: TryFrom<&'a Value, Error = ConversionError>,
        P: ToKeyPath + ?Sized,
    {
        self.get(path).unwrap_or(default)
    }

    fn get_str<P>(&self, path: &P) -> Result<&str, TomeError>
    where
        P: ToKeyPath + ?Sized,
    {
        self.get(path)
    }

    fn get_string<P>(&self, path: &P) -> Result<String, TomeError>
    where
        P: ToKeyPath + ?Sized,
    {
        self.get(path)
    }

    fn get_integer<P>(&self, path: &P) -> Result<i64, TomeError>
    where
        P: ToKeyPath + ?Sized,
    {
        self.get(path)
    }

    fn get_float<P>(&self, path: &P) -> Result<f64, TomeError>
    where
        P: ToKeyPath + ?Sized,
    {
        self.get(path)
    }

    fn get_bool<P>(&self, path: &P) -> Result<bool, TomeError>
    where
        P: ToKeyPath + ?Sized,
    {
        self.get(path)
    }

    fn get_datetime<P>(&self, path: &P) -> Result<Datetime, TomeError>
    where
        P: ToKeyPath + ?Sized,
    {
        self.get(path)
    }

    fn get_array<'a, T, P>(&'a self, path: &P) -> Result<Vec<T>, TomeError>
    where
        T: TryFrom<&'a Value, Error = ConversionError>,
        P: ToKeyPath + ?Sized,
    {
        self.get(path)
    }

    /// A read-only view of the table at `path`.
    fn get_table<P>(&self, path: &P) -> Result<TableView<'_>, TomeError>
    where
        P: ToKeyPath + ?Sized,
    {
        let path = path.to_key_path()?;
        let table: &Table = self.get(&path)?;
        Ok(TableView {
            table,
            base: Some(self.absolute(&path)),
        })
    }
}

/// A borrowed sub-table of a [`Document`].
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    table: &'a Table,
    base: Option<KeyPath>,
}

impl<'a> TableView<'a> {
    pub(super) fn root_of(doc: &'a Document) -> Self {
        Self {
            table: &doc.root,
            base: None,
        }
    }

    /// The absolute path of this table in its document; `None` for the
    /// document root.
    pub fn path(&self) -> Option<&KeyPath> {
        self.base.as_ref()
    }

    pub fn as_table(&self) -> &'a Table {
        self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'a, String, Value> {
        self.table.iter()
    }
}

impl Lookup for TableView<'_> {
    fn root(&self) -> &Table {
        self.table
    }

    fn base(&self) -> Option<&KeyPath> {
        self.base.as_ref()
    }
}

impl Lookup for Document {
    fn root(&self) -> &Table {
        &self.root
    }

    fn base(&self) -> Option<&KeyPath> {
        None
    }
}
