//! Canonical label identity.
//!
//! A series is addressed by (metric name, label set), and two label sets
//! with the same pairs in any insertion order must land on the same series.
//! `LabelSet` enforces that by owning its pairs sorted by label name;
//! equality and hashing run over the sorted form, so it can key the series
//! maps directly. `canonical_key` is the string form of the same identity,
//! used wherever a deterministic ordering of series is needed.

/// An owned, canonicalized set of label name/value pairs.
///
/// Pairs are sorted by label name on construction. Duplicate names keep the
/// first occurrence. The empty set is valid (an unlabeled series).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LabelSet {
    pairs: Vec<(String, String)>,
}

impl LabelSet {
    /// Build a canonical set from pairs in any order.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut owned: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        // Stable sort by name only, then drop later duplicates, so the
        // first occurrence of a repeated name wins.
        owned.sort_by(|a, b| a.0.cmp(&b.0));
        owned.dedup_by(|later, earlier| later.0 == earlier.0);
        Self { pairs: owned }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in canonical (name-sorted) order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Order-independent identity string.
    ///
    /// Pairs are joined with ASCII unit/record separators, which cannot
    /// appear in label names; the key is collision-free but not meant to be
    /// human-readable. The empty set yields the empty string.
    pub fn canonical_key(&self) -> String {
        let mut key = String::new();
        for (i, (name, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                key.push('\u{1e}');
            }
            key.push_str(name);
            key.push('\u{1f}');
            key.push_str(value);
        }
        key
    }
}
