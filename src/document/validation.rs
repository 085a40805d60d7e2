// Author: Dustin Pilgrim
// License: MIT

use super::*;

/// Check that `elements` share one tag, and that every array nested inside
/// them (directly or through inline tables) does too.
pub(super) fn check_array(path: &KeyPath, elements: &[Value]) -> Result<(), TomeError> {
    if let Some(first) = elements.first() {
        let expected = first.kind();
        if let Some(odd) = elements.iter().find(|v| v.kind() != expected) {
            return Err(TomeError::MixedArrayType {
                path: path.clone(),
                expected,
                found: odd.kind(),
            });
        }
    }

    for element in elements {
        check_value(path, element)?;
    }
    Ok(())
}

/// Validate a value about to be bound at `path`.
pub(super) fn check_value(path: &KeyPath, value: &Value) -> Result<(), TomeError> {
    match value {
        Value::Array(elements) => check_array(path, elements),
        Value::Table(table) => {
            for (key, inner) in table {
                check_value(&path.child(key.as_str()), inner)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
