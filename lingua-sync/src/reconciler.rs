//! Deletion reconciler — prune target keys whose source key no longer exists.

use serde_yaml::{Mapping, Value};

/// Remove, recursively, every key of `target` whose full path is absent from
/// `source`. The presence check is type-agnostic: an array- or number-valued
/// source key protects the target's key. A target mapping whose source
/// counterpart became a scalar is cleared, since none of its leaf paths exist
/// any more; the emptied mapping itself may remain.
///
/// Returns whether any removal occurred, so the caller can decide if a write
/// is needed.
pub fn reconcile(target: &mut Value, source: &Value) -> bool {
    match (target, source) {
        (Value::Mapping(target_map), Value::Mapping(source_map)) => {
            reconcile_maps(target_map, source_map)
        }
        _ => false,
    }
}

fn reconcile_maps(target: &mut Mapping, source: &Mapping) -> bool {
    let mut changed = false;
    let keys: Vec<Value> = target.keys().cloned().collect();
    for key in keys {
        match source.get(&key) {
            None => {
                target.remove(&key);
                changed = true;
            }
            Some(Value::Mapping(source_child)) => {
                if let Some(Value::Mapping(target_child)) = target.get_mut(&key) {
                    changed |= reconcile_maps(target_child, source_child);
                }
            }
            Some(_) => {
                // Source turned this subtree into a scalar; the target's
                // nested paths no longer exist.
                if let Some(Value::Mapping(target_child)) = target.get_mut(&key) {
                    if !target_child.is_empty() {
                        target_child.clear();
                        changed = true;
                    }
                }
            }
        }
    }
    changed
}
