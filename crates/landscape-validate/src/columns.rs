use std::collections::HashMap;

/// A set that performs case-insensitive lookups but preserves original names.
///
/// Keys are folded to lowercase. When two headers fold to the same key the
/// first one is kept.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    /// Maps lowercase name -> original name
    inner: HashMap<String, String>,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }

    pub fn insert(&mut self, value: impl AsRef<str>) {
        let s = value.as_ref();
        self.inner
            .entry(s.to_lowercase())
            .or_insert_with(|| s.to_string());
    }

    /// Check if the set contains a column (case-insensitive).
    pub fn contains(&self, value: impl AsRef<str>) -> bool {
        self.inner.contains_key(&value.as_ref().to_lowercase())
    }

    /// True if any of the given columns is present.
    pub fn contains_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.contains(name))
    }

    /// Original header spelling for a column.
    pub fn get(&self, value: impl AsRef<str>) -> Option<&str> {
        self.inner
            .get(&value.as_ref().to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
