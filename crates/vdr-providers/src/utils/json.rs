//! JSON Value Extension
//!
//! Accessors for JSON values returned by remote providers.

use serde_json::Value;

/// Extension trait for `serde_json::Value`
///
/// # Example
///
/// ```ignore
/// use serde_json::json;
/// use vdr_providers::utils::JsonExt;
///
/// let body = json!({"result": {"exists": true}, "status": "ok"});
/// assert_eq!(body.at_path("result/exists"), Some(&json!(true)));
/// assert_eq!(body.opt_str("status"), Some("ok"));
/// ```
pub trait JsonExt {
    /// Get optional string
    fn opt_str(&self, key: &str) -> Option<&str>;

    /// Follow a `/`-separated path of object keys
    fn at_path(&self, path: &str) -> Option<&Value>;
}

impl JsonExt for Value {
    #[inline]
    fn opt_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn at_path(&self, path: &str) -> Option<&Value> {
        path.split('/').try_fold(self, |value, key| value.get(key))
    }
}
