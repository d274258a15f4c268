//! Selectable options projected from tags and posts.

use serde::{Deserialize, Serialize};

use super::{PostSummary, Tag};

/// A `(value, label)` pair shown in a select widget. `value` is the source id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<&Tag> for SelectOption {
    fn from(tag: &Tag) -> Self {
        Self::new(tag.id.clone(), tag.name.clone())
    }
}

impl From<&PostSummary> for SelectOption {
    fn from(post: &PostSummary) -> Self {
        Self::new(post.id.clone(), post.title.clone())
    }
}

/// Insertion-ordered set of options, unique by `value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    items: Vec<SelectOption>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the option unless one with the same value is present. Returns whether it was added.
    pub fn insert(&mut self, option: SelectOption) -> bool {
        if self.contains(&option.value) {
            return false;
        }
        self.items.push(option);
        true
    }

    pub fn remove(&mut self, value: &str) -> Option<SelectOption> {
        let index = self.items.iter().position(|o| o.value == value)?;
        Some(self.items.remove(index))
    }

    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|o| o.value == value)
    }

    pub fn get(&self, value: &str) -> Option<&SelectOption> {
        self.items.iter().find(|o| o.value == value)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn values(&self) -> Vec<String> {
        self.items.iter().map(|o| o.value.clone()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectOption> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[SelectOption] {
        &self.items
    }
}

impl FromIterator<SelectOption> for OptionSet {
    fn from_iter<I: IntoIterator<Item = SelectOption>>(iter: I) -> Self {
        let mut set = OptionSet::new();
        for option in iter {
            set.insert(option);
        }
        set
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
