use serde::{Deserialize, Serialize};

use crate::node::PlanNode;

/// Result of analyzing one sheet into a plan tree.
///
/// `nodes` holds the root groups in sheet order; aggregates cover the whole
/// flattened tree (groups and items together for `overall_confidence`, items
/// only for the review counters).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetAnalysis {
    pub sheet_name: String,
    pub nodes: Vec<PlanNode>,
    pub total_groups: usize,
    pub total_items: usize,
    /// Mean confidence across every node, groups and items.
    pub overall_confidence: f64,
    pub items_needing_review: usize,
    pub auto_approved_items: usize,
}

impl SheetAnalysis {
    /// All nodes in walk order: each group followed by its children.
    pub fn flattened(&self) -> Vec<&PlanNode> {
        let mut out = Vec::with_capacity(self.total_groups + self.total_items);
        for group in &self.nodes {
            out.push(group);
            out.extend(group.children.iter());
        }
        out
    }

    /// Items across all groups, in walk order.
    pub fn items(&self) -> Vec<&PlanNode> {
        self.nodes.iter().flat_map(|g| g.children.iter()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::PlanNode;
    use crate::tag::ItemTag;

    #[test]
    fn flattened_interleaves_groups_and_children() {
        let mut housing = PlanNode::group("HOUSING", 0.0, 0.95, "A1");
        housing
            .children
            .push(PlanNode::item("Rent", 1200.0, ItemTag::Recurring, 0.9, "A2", None));
        let mut food = PlanNode::group("FOOD", 0.0, 0.85, "A3");
        food.children
            .push(PlanNode::item("Groceries", 400.0, ItemTag::Budget, 0.88, "A4", None));

        let analysis = SheetAnalysis {
            sheet_name: "Budget".to_string(),
            nodes: vec![housing, food],
            total_groups: 2,
            total_items: 2,
            overall_confidence: 0.0,
            items_needing_review: 0,
            auto_approved_items: 2,
        };
        let names: Vec<&str> = analysis.flattened().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["HOUSING", "Rent", "FOOD", "Groceries"]);
        assert_eq!(analysis.items().len(), 2);
    }
}
