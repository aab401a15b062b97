//! Session capabilities.
//!
//! Instead of scattering permission lookups through every view, the
//! capability set is resolved once per session from the user payload and
//! checked at the composition layer. It is read-only after construction.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The set of capability names granted to the current session.
///
/// # Examples
///
/// ```
/// use daybook_core::CapabilitySet;
///
/// let caps: CapabilitySet = ["entries-create", "reports-reconciliation"]
///     .into_iter()
///     .collect();
/// assert!(caps.allows("reports-reconciliation"));
/// assert!(!caps.allows("settings-roles"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    names: HashSet<String>,
}

impl CapabilitySet {
    /// An empty set, granting nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether the session holds the named capability.
    #[must_use]
    pub fn allows(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of granted capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check whether nothing is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows() {
        let caps: CapabilitySet = ["entries-create"].into_iter().collect();
        assert!(caps.allows("entries-create"));
        assert!(!caps.allows("entries-delete"));
    }

    #[test]
    fn test_empty_grants_nothing() {
        assert!(!CapabilitySet::empty().allows("anything"));
        assert!(CapabilitySet::empty().is_empty());
    }

    #[test]
    fn test_deserialize_from_list() {
        let caps: CapabilitySet =
            serde_json::from_str(r#"["reports-reconciliation", "entries-create"]"#).unwrap();
        assert_eq!(caps.len(), 2);
        assert!(caps.allows("reports-reconciliation"));
    }
}
