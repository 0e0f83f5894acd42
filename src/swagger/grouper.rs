//! Grouping of operations by declared tag.

use indexmap::IndexMap;
use serde::Serialize;

use super::types::{Operation, Tag};

/// Operations bucketed by tag, in tag declaration order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TagGroups {
    groups: IndexMap<String, Vec<Operation>>,
    untagged: Vec<Operation>,
}

impl TagGroups {
    /// Number of declared groups (including empty ones).
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no tags were declared.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Operations of one tag.
    pub fn get(&self, tag: &str) -> Option<&[Operation]> {
        self.groups.get(tag).map(Vec::as_slice)
    }

    /// Tag names in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Iterate over groups in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Operation])> {
        self.groups
            .iter()
            .map(|(tag, ops)| (tag.as_str(), ops.as_slice()))
    }

    /// Operations that declare no tag at all.
    pub fn untagged(&self) -> &[Operation] {
        &self.untagged
    }

    /// Total number of grouped entries (an operation counts once per tag).
    pub fn operation_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Buckets operations by the tags declared at the document root.
#[derive(Debug, Default)]
pub struct TagGrouper;

impl TagGrouper {
    /// Create a grouper.
    pub fn new() -> Self {
        Self
    }

    /// Group operations. Unknown tags are logged and skipped.
    pub fn group(&self, tags: &[Tag], operations: &[Operation]) -> TagGroups {
        let mut groups: IndexMap<String, Vec<Operation>> = tags
            .iter()
            .map(|tag| (tag.name.clone(), Vec::new()))
            .collect();
        let mut untagged = Vec::new();

        for operation in operations {
            if operation.tags.is_empty() {
                log::debug!(
                    "Operation {} {} has no tags",
                    operation.method_upper(),
                    operation.path
                );
                untagged.push(operation.clone());
                continue;
            }
            for tag in &operation.tags {
                match groups.get_mut(tag) {
                    Some(group) => group.push(operation.clone()),
                    None => log::warn!(
                        "Unknown tag {} on {} {}",
                        tag,
                        operation.method_upper(),
                        operation.path
                    ),
                }
            }
        }

        TagGroups { groups, untagged }
    }
}
