//! Slash-separated path access over JSON trees.
//!
//! The realtime store addresses data as `shares/{id}/files/{index}`. These
//! helpers apply the same addressing to an in-memory [`Value`] so the live
//! stream and the in-memory store share one set of tree semantics:
//!
//! - writing `null` removes the node
//! - objects emptied by a removal disappear from their parent
//! - numeric segments index into arrays, trailing `null` slots are trimmed

use serde_json::{Map, Value};

/// Split a store path into non-empty segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Join a base path and a child key.
pub fn join(base: &str, child: &str) -> String {
    let base = base.trim_end_matches('/');
    let child = child.trim_start_matches('/');
    if base.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", base, child)
    }
}

/// Get the value at `path`, treating `null` as absent.
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in segments(path) {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    (!current.is_null()).then_some(current)
}

/// Replace the value at `path`, creating intermediate objects.
pub fn set(root: &mut Value, path: &str, value: Value) {
    if value.is_null() {
        remove(root, path);
        return;
    }

    let mut current = root;
    for segment in segments(path) {
        current = child_mut(current, segment);
    }
    *current = value;
}

/// Merge the children of `patch` into the node at `path`.
///
/// Each key is written independently, so keys may themselves be paths.
pub fn merge(root: &mut Value, path: &str, patch: Map<String, Value>) {
    for (key, value) in patch {
        set(root, &join(path, &key), value);
    }
}

/// Remove the node at `path`, pruning parents left empty.
pub fn remove(root: &mut Value, path: &str) {
    let segs = segments(path);
    if segs.is_empty() || remove_in(root, &segs) {
        *root = Value::Null;
    }
}

/// Returns `true` when `node` is left empty.
fn remove_in(node: &mut Value, segs: &[&str]) -> bool {
    let Some((head, rest)) = segs.split_first() else {
        return false;
    };

    match node {
        Value::Object(map) => {
            if rest.is_empty() {
                map.remove(*head);
            } else if let Some(child) = map.get_mut(*head)
                && remove_in(child, rest)
            {
                map.remove(*head);
            }
            map.is_empty()
        }
        Value::Array(items) => {
            if let Ok(index) = head.parse::<usize>()
                && index < items.len()
                && (rest.is_empty() || remove_in(&mut items[index], rest))
            {
                items[index] = Value::Null;
            }
            while items.last().is_some_and(Value::is_null) {
                items.pop();
            }
            items.is_empty()
        }
        _ => false,
    }
}

fn child_mut<'a>(node: &'a mut Value, segment: &str) -> &'a mut Value {
    match (node, segment.parse::<usize>()) {
        (Value::Array(items), Ok(index)) => {
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
        (node, _) => ensure_object(node)
            .entry(segment.to_string())
            .or_insert(Value::Null),
    }
}

fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_through_arrays() {
        let root = json!({ "shares": { "abc": { "files": [{ "name": "a" }, null, { "name": "c" }] } } });
        assert_eq!(
            get(&root, "shares/abc/files/2/name"),
            Some(&json!("c"))
        );
        assert_eq!(get(&root, "shares/abc/files/1"), None);
        assert_eq!(get(&root, "shares/missing"), None);
        assert_eq!(get(&root, "/shares/abc/files/0/name/"), Some(&json!("a")));
    }

    #[test]
    fn test_set_creates_parents() {
        let mut root = Value::Null;
        set(&mut root, "shares/1/createdAt", json!(5));
        assert_eq!(root, json!({ "shares": { "1": { "createdAt": 5 } } }));
    }

    #[test]
    fn test_set_root_replaces() {
        let mut root = json!({ "a": 1 });
        set(&mut root, "/", json!({ "b": 2 }));
        assert_eq!(root, json!({ "b": 2 }));
    }

    #[test]
    fn test_set_null_removes_and_prunes() {
        let mut root = json!({ "shares": { "1": { "createdAt": 5 }, "2": { "createdAt": 6 } } });
        set(&mut root, "shares/1/createdAt", Value::Null);
        assert_eq!(root, json!({ "shares": { "2": { "createdAt": 6 } } }));

        remove(&mut root, "shares/2");
        assert_eq!(root, Value::Null);
    }

    #[test]
    fn test_remove_array_slot_keeps_positions() {
        let mut root = json!({ "files": ["a", "b", "c"] });
        remove(&mut root, "files/1");
        assert_eq!(root, json!({ "files": ["a", null, "c"] }));
        remove(&mut root, "files/2");
        assert_eq!(root, json!({ "files": ["a"] }));
    }

    #[test]
    fn test_merge_writes_each_child() {
        let mut root = json!({ "files": [{ "name": "old.pdf", "size": 10 }] });
        let patch = json!({ "name": "new.pdf" });
        merge(&mut root, "files/0", patch.as_object().cloned().unwrap_or_default());
        assert_eq!(root, json!({ "files": [{ "name": "new.pdf", "size": 10 }] }));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("shares", "abc"), "shares/abc");
        assert_eq!(join("shares/", "/abc"), "shares/abc");
        assert_eq!(join("", "abc"), "abc");
        assert_eq!(join("/", "abc"), "abc");
    }
}
