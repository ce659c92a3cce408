// ABOUTME: Ordered, duplicate-free tag lists and the tag-input control
// ABOUTME: Used for interests, purchase behaviors and social media platforms

use serde::{Deserialize, Serialize};

/// Ordered list of unique, trimmed, non-empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagList {
    tags: Vec<String>,
}

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag. Returns false when the trimmed text is empty or already present.
    pub fn add(&mut self, text: &str) -> bool {
        let tag = text.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Remove a tag. Returns false when it was not in the list.
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = TagList::new();
        for item in iter {
            list.add(item.as_ref());
        }
        list
    }
}

impl From<Vec<String>> for TagList {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagList> for Vec<String> {
    fn from(list: TagList) -> Self {
        list.tags
    }
}

/// Keys the tag input reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    Enter,
    Other,
}

/// Free-text entry that turns confirmed input into tags
#[derive(Debug, Clone, Default)]
pub struct TagInput {
    tags: TagList,
    pending: String,
    disabled: bool,
}

impl TagInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(tags: TagList) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Replace the pending text
    pub fn set_input(&mut self, text: impl Into<String>) {
        if !self.disabled {
            self.pending = text.into();
        }
    }

    pub fn input(&self) -> &str {
        &self.pending
    }

    /// The explicit add action is only offered while the pending text is non-blank
    pub fn can_confirm(&self) -> bool {
        !self.disabled && !self.pending.trim().is_empty()
    }

    /// Explicit add action
    pub fn confirm(&mut self) -> bool {
        self.add_pending()
    }

    /// Key press in the text field; only Enter adds
    pub fn handle_key(&mut self, key: TagKey) -> bool {
        match key {
            TagKey::Enter => self.add_pending(),
            TagKey::Other => false,
        }
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        if self.disabled {
            return false;
        }
        self.tags.remove(tag)
    }

    pub fn tags(&self) -> &TagList {
        &self.tags
    }

    pub fn into_tags(self) -> TagList {
        self.tags
    }

    // Both triggers funnel through here
    fn add_pending(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        let added = self.tags.add(&self.pending);
        if added {
            self.pending.clear();
        }
        added
    }
}
