use indexmap::IndexSet;

use crate::path::OPTIONS_PARAM;

/// Parameters of the generated function, in order of first appearance.
///
/// Two fields sharing a prefix (`a[b]`, `a[c]`) register `a` once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentSet {
    names: IndexSet<String>,
}

impl ArgumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the name was already present. Empty names (from a
    /// field like `[x]`) are not parameters and are ignored.
    pub fn insert(&mut self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.names.insert(name.to_string())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// The text between the parentheses of the generated signature.
    pub fn signature(&self, use_options_object: bool) -> String {
        if use_options_object {
            return OPTIONS_PARAM.to_string();
        }
        self.iter().collect::<Vec<_>>().join(", ")
    }
}

impl<'a> FromIterator<&'a str> for ArgumentSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = ArgumentSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse_in_first_seen_order() {
        let mut set = ArgumentSet::new();
        assert!(set.insert("b"));
        assert!(set.insert("a"));
        assert!(!set.insert("b"));
        assert_eq!(set.iter().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(set.signature(false), "b, a");
    }

    #[test]
    fn inherited_looking_names_are_plain_entries() {
        let set: ArgumentSet = ["constructor", "__proto__", "toString"].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn options_signature_ignores_entries() {
        let set: ArgumentSet = ["a", "b"].into_iter().collect();
        assert_eq!(set.signature(true), "options");
        assert_eq!(ArgumentSet::new().signature(false), "");
    }

    #[test]
    fn empty_names_are_skipped() {
        let mut set = ArgumentSet::new();
        assert!(!set.insert(""));
        assert!(set.is_empty());
    }
}
