//! Insertion-ordered label set carried by every node

use super::types::Label;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

#[derive(Debug, Clone, Default)]
pub(crate) struct LabelSet {
    labels: IndexSet<Label, FxBuildHasher>,
}

impl LabelSet {
    /// Insert a label; returns false when it was already present
    pub(crate) fn insert(&mut self, label: Label) -> bool {
        self.labels.insert(label)
    }

    pub(crate) fn contains(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }

    /// Label at a given insertion position
    pub(crate) fn get(&self, position: usize) -> Option<&Label> {
        self.labels.get_index(position)
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }
}
