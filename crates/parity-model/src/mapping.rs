use serde::{Deserialize, Serialize};

/// An order-preserving association from source column name to target column
/// name.
///
/// Insertion order drives field-level comparison order and therefore report
/// order, so this is a sequence of pairs rather than a sorted map. Source
/// keys are unique: inserting an existing key overwrites its target in place
/// and keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping {
    pairs: Vec<(String, String)>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        let target = target.into();
        match self.pairs.iter_mut().find(|(s, _)| *s == source) {
            Some(pair) => pair.1 = target,
            None => self.pairs.push((source, target)),
        }
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, t)| t.as_str())
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Builds the identity fallback mapping: every source column whose exact
    /// name also appears in the target columns maps to itself, in source
    /// column order.
    pub fn identity(source_columns: &[String], target_columns: &[String]) -> Self {
        let mut mapping = Self::new();
        for column in source_columns {
            if target_columns.contains(column) {
                mapping.insert(column.clone(), column.clone());
            }
        }
        mapping
    }
}

impl FromIterator<(String, String)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (source, target) in iter {
            mapping.insert(source, target);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_first_position_on_overwrite() {
        let mut mapping = FieldMapping::new();
        mapping.insert("a", "1");
        mapping.insert("b", "2");
        mapping.insert("a", "3");
        let pairs: Vec<(&str, &str)> = mapping.iter().collect();
        assert_eq!(pairs, [("a", "3"), ("b", "2")]);
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn identity_keeps_only_shared_columns_in_source_order() {
        let source = vec!["Id".to_string(), "Name".to_string(), "Extra".to_string()];
        let target = vec!["Name".to_string(), "Id".to_string()];
        let mapping = FieldMapping::identity(&source, &target);
        let pairs: Vec<(&str, &str)> = mapping.iter().collect();
        assert_eq!(pairs, [("Id", "Id"), ("Name", "Name")]);
    }

    #[test]
    fn serializes_as_pair_list() {
        let mut mapping = FieldMapping::new();
        mapping.insert("a", "1");
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"[["a","1"]]"#);
        let round: FieldMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(round, mapping);
    }
}
