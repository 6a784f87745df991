//! Change detector — which source keys changed since the previous snapshot.

use std::collections::BTreeMap;

use serde_yaml::Value;

use lingua_core::document::flatten;

/// Flat key path → new source value, for every key whose string value differs
/// between the current and previous snapshots.
pub type DeltaMap = BTreeMap<String, String>;

/// Compute the delta between two source snapshots.
///
/// A key missing from `previous` counts as changed. Equality is exact string
/// equality — no normalization, no trimming. Keys present only in `previous`
/// are not reported; deletions are the reconciler's concern.
pub fn diff(current: &Value, previous: &Value) -> DeltaMap {
    let previous_flat = flatten(previous);
    flatten(current)
        .into_iter()
        .filter(|(path, value)| previous_flat.get(path) != Some(value))
        .collect()
}
