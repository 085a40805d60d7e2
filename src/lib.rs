//! A typed, path-addressed document tree for configuration files.
//!
//! A front end (not part of this crate) turns configuration text into a
//! stream of `(key path, value)` insertions. [`DocumentBuilder`] turns those
//! into a [`Document`], rejecting duplicate keys and mixed-type arrays as
//! they arrive. The finished document is read through [`Lookup`].
//!
//! ```
//! use tome_cfg::{Document, Lookup, TomeError, Value};
//!
//! let mut builder = Document::builder();
//! builder.insert("db.conn.timeout", Value::from(30)).unwrap();
//! let doc = builder.finish();
//!
//! let conn = doc.get_table("db.conn").unwrap();
//! assert_eq!(conn.get_integer("timeout").unwrap(), 30);
//! assert!(matches!(doc.get_string("db.conn.timeout"), Err(TomeError::TypeMismatch { .. })));
//! ```

pub mod datetime;
pub mod document;
pub mod error;
pub mod export;
pub mod key;
pub mod value;

pub use datetime::Datetime;
pub use document::{Document, DocumentBuilder, Event, Lookup, TableView};
pub use error::{ConversionError, Result, TomeError};
pub use key::{KeyPath, ToKeyPath};
pub use value::{Kind, Table, Value};
