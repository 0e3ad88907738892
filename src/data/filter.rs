use std::collections::BTreeMap;

use super::model::{ChatDataset, ChatSession};

// ---------------------------------------------------------------------------
// Label query: select sessions whose labels match every given pair
// ---------------------------------------------------------------------------

/// Wanted label key → value pairs. A session matches only if ALL pairs
/// equal its labels exactly (string equality).
pub type LabelFilter = BTreeMap<String, String>;

/// Build a [`LabelFilter`] from string pairs.
pub fn label_filter<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> LabelFilter
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Sessions matching all pairs of `filter`, in construction order.
///
/// An empty filter matches everything. A key absent from a session's labels
/// never matches.
pub fn filter_by_labels<'a>(dataset: &'a ChatDataset, filter: &LabelFilter) -> Vec<&'a ChatSession> {
    dataset
        .iter()
        .filter(|session| {
            filter
                .iter()
                .all(|(key, value)| session.label(key) == Some(value.as_str()))
        })
        .collect()
}
