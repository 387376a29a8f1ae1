use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tag::ItemTag;

/// Confidence cutoff for automatic approval.
///
/// A node at or above this confidence is auto-approved; below it the node is
/// flagged for manual review. Every `needs_review`/`is_auto_approved` flag in
/// an analysis derives from exactly this comparison.
pub const REVIEW_THRESHOLD: f64 = 0.80;

/// Structural role a classified row plays in the plan tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Category header owning child items.
    Group,
    /// Leaf budget line with a value and a semantic tag.
    Item,
    /// Row excluded from the output tree.
    Ignore,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Group => "group",
            NodeKind::Item => "item",
            NodeKind::Ignore => "ignore",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque node identifier, unique within one tree build.
///
/// Rendered as a short hex token cut from a v4 UUID; nothing outside equality
/// may be read into it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn generate() -> Self {
        let mut token = Uuid::new_v4().simple().to_string();
        token.truncate(12);
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One inferred node in the plan tree.
///
/// The tree is exactly two levels deep: `Group` nodes sit at the root and own
/// `Item` children; items never nest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanNode {
    pub id: NodeId,
    pub name: String,
    pub value: f64,
    pub kind: NodeKind,
    pub tag: ItemTag,
    pub confidence: f64,
    /// Derived from [`REVIEW_THRESHOLD`] at construction; forced `true` for
    /// the synthetic fallback group regardless of confidence.
    pub needs_review: bool,
    /// A1-style reference of the source row's category cell.
    pub source_ref: String,
    /// Formula text of the value cell, when the source carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PlanNode>,
}

impl PlanNode {
    /// Create a category header node. Groups carry no semantic tag.
    pub fn group(name: impl Into<String>, value: f64, confidence: f64, source_ref: impl Into<String>) -> Self {
        Self {
            id: NodeId::generate(),
            name: name.into(),
            value,
            kind: NodeKind::Group,
            tag: ItemTag::Unknown,
            confidence,
            needs_review: confidence < REVIEW_THRESHOLD,
            source_ref: source_ref.into(),
            formula: None,
            children: Vec::new(),
        }
    }

    /// Create a leaf budget line.
    pub fn item(
        name: impl Into<String>,
        value: f64,
        tag: ItemTag,
        confidence: f64,
        source_ref: impl Into<String>,
        formula: Option<String>,
    ) -> Self {
        Self {
            id: NodeId::generate(),
            name: name.into(),
            value,
            kind: NodeKind::Item,
            tag,
            confidence,
            needs_review: confidence < REVIEW_THRESHOLD,
            source_ref: source_ref.into(),
            formula,
            children: Vec::new(),
        }
    }

    pub fn is_auto_approved(&self) -> bool {
        !self.needs_review
    }
}
