//! The user's curated keywords.

use models::Keyword;

/// Ordered set of curated keywords.
///
/// Insertion order is what the user sees and what gets finalized, so the
/// set is kept as a vector and uniqueness is enforced on `add`.
///
/// Every effective mutation bumps [`revision`](KeywordSet::revision); a
/// validation result remembers the revision it was computed against and is
/// stale once the two differ.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
    revision: u64,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `keyword` unless it is already present.
    ///
    /// Returns `true` if the set changed.
    pub fn add(&mut self, keyword: Keyword) -> bool {
        if self.contains(&keyword) {
            return false;
        }

        self.keywords.push(keyword);
        self.revision += 1;
        true
    }

    /// Remove the keyword at `index`, shifting later keywords left.
    pub fn remove(&mut self, index: usize) -> Option<Keyword> {
        if index >= self.keywords.len() {
            return None;
        }

        self.revision += 1;
        Some(self.keywords.remove(index))
    }

    /// Remove every keyword. Clearing an empty set is not a mutation.
    pub fn clear(&mut self) {
        if self.keywords.is_empty() {
            return;
        }

        self.keywords.clear();
        self.revision += 1;
    }

    pub fn contains(&self, keyword: &Keyword) -> bool {
        self.keywords.iter().any(|existing| existing == keyword)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn as_slice(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keyword> {
        self.keywords.iter()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.keywords
            .iter()
            .map(|keyword| keyword.as_str().to_string())
            .collect()
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a Keyword;
    type IntoIter = std::slice::Iter<'a, Keyword>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
