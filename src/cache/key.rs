//! Cache key generation

use crate::models::{DataType, Params};

/// Deterministic cache key for a data type and parameter set.
///
/// Format is `{dataType}_{k}:{v}_{k}:{v}` with parameters sorted by key, so
/// insertion order never changes the key and the prefix recovers the type.
pub fn cache_key(data_type: DataType, params: &Params) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)));

    let mut key = data_type.as_str().to_string();
    for (k, v) in sorted {
        key.push('_');
        key.push_str(k);
        key.push(':');
        key.push_str(v);
    }
    key
}
