//! Revision manifests.
//!
//! Styles and scripts each persist a fragment mapping source-relative names
//! to revisioned names. The rewrite step consumes a [`RevManifest`], which can
//! only be obtained by loading both fragments through a [`ManifestStore`].

mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use store::{FragmentKind, ManifestStore};

/// One persisted fragment: `app.min.css` → `app.min-0123456789.css`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestFragment(BTreeMap<String, String>);

impl ManifestFragment {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn insert(&mut self, original: impl Into<String>, revisioned: impl Into<String>) {
        self.0.insert(original.into(), revisioned.into());
    }

    #[cfg(test)]
    pub fn get(&self, original: &str) -> Option<&str> {
        self.0.get(original).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

impl FromIterator<(String, String)> for ManifestFragment {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Merged lookup of both fragments, ready for reference rewriting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevManifest {
    entries: BTreeMap<String, String>,
}

impl RevManifest {
    /// Merge the style and script fragments. On a shared key the script
    /// entry wins.
    pub(crate) fn from_fragments(styles: ManifestFragment, scripts: ManifestFragment) -> Self {
        let mut entries = styles.0;
        for (key, value) in scripts.0 {
            if let Some(previous) = entries.insert(key.clone(), value) {
                crate::debug!("rewrite"; "`{}` in both manifests, dropping `{}`", key, previous);
            }
        }
        Self { entries }
    }

    /// Build a lookup directly, for tests.
    #[cfg(test)]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys, longest first; ties in lexical order.
    pub fn keys_longest_first(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        keys
    }
}
