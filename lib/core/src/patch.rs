/// Merge a JSON patch into a base value.
///
/// For each key in `patch`:
/// - If the value is `null`, the key is removed from `base`.
/// - Otherwise, the key is set to the patch value.
///
/// This follows RFC 7386 (JSON Merge Patch) semantics. The CLI uses it
/// to lay a partial edit over a draft seeded from the current record.
pub fn merge_patch(base: &mut serde_json::Value, patch: &serde_json::Value) {
    if let (Some(base_obj), Some(patch_obj)) = (base.as_object_mut(), patch.as_object()) {
        for (key, value) in patch_obj {
            if value.is_null() {
                base_obj.remove(key);
            } else if value.is_object() {
                // Recursively merge nested objects.
                let entry = base_obj
                    .entry(key.clone())
                    .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
                merge_patch(entry, value);
            } else {
                base_obj.insert(key.clone(), value.clone());
            }
        }
    } else {
        *base = patch.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_patch() {
        let mut base = serde_json::json!({"a": 1, "b": 2, "c": {"d": 3}});
        let patch = serde_json::json!({"b": null, "c": {"e": 4}, "f": 5});
        merge_patch(&mut base, &patch);
        assert_eq!(
            base,
            serde_json::json!({"a": 1, "c": {"d": 3, "e": 4}, "f": 5})
        );
    }

    #[test]
    fn test_non_object_patch_replaces() {
        let mut base = serde_json::json!({"a": 1});
        merge_patch(&mut base, &serde_json::json!(7));
        assert_eq!(base, serde_json::json!(7));
    }
}
