// Author: Dustin Pilgrim
// License: MIT

use log::trace;

use super::*;

/// Walk `path` from `table`, one segment at a time.
///
/// Every step must land on a table holding the next segment. Stepping
/// through a scalar or an array is plain absence, like a missing key.
pub fn resolve<'a>(table: &'a Table, path: &KeyPath) -> Option<&'a Value> {
    let (last, parents) = path.split_last();

    let mut current = table;
    for segment in parents {
        match current.get(segment.as_str()) {
            Some(Value::Table(inner)) => current = inner,
            _ => {
                trace!("resolve '{}': no table at '{}'", path, segment);
                return None;
            }
        }
    }

    let found = current.get(last);
    trace!("resolve '{}': {}", path, if found.is_some() { "found" } else { "missing" });
    found
}

pub fn exists(table: &Table, path: &KeyPath) -> bool {
    resolve(table, path).is_some()
}
