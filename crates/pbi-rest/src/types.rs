//! Wire types shared across endpoints.

use serde::{Deserialize, Serialize};

/// The `{"value": [...]}` envelope Power BI wraps collections in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ODataList<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

impl<T> Default for ODataList<T> {
    fn default() -> Self {
        Self { value: Vec::new() }
    }
}

impl<T> IntoIterator for ODataList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.value.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_is_empty() {
        let list: ODataList<String> = serde_json::from_str(r#"{"@odata.context":"x"}"#).unwrap();
        assert!(list.value.is_empty());

        let list: ODataList<String> = serde_json::from_str(r#"{"value":["a","b"]}"#).unwrap();
        assert_eq!(list.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
