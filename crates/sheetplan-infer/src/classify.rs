//! Ordered structural classification of sheet rows.
//!
//! Rules fire first-match-wins in the order of [`RULE_ORDER`]; the order is
//! part of the contract, not an implementation detail. A row no rule claims
//! falls through to [`NodeKind::Ignore`].

use std::fmt;

use sheetplan_model::NodeKind;

use crate::features::RowFeatures;

const HEADER_NO_VALUE_CONFIDENCE: f64 = 0.95;
const UPPERCASE_HEADER_CONFIDENCE: f64 = 0.85;
const STYLED_HEADER_CONFIDENCE: f64 = 0.80;
const INDENTED_ITEM_CONFIDENCE: f64 = 0.90;
const FORMULA_ITEM_CONFIDENCE: f64 = 0.85;
const PLAIN_ITEM_CONFIDENCE: f64 = 0.70;
const IGNORED_ROW_CONFIDENCE: f64 = 0.50;

/// Uppercase headers shorter than this many characters stay unclaimed.
const UPPERCASE_MIN_LEN: usize = 4;

/// One structural rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureRule {
    /// Category text without a value reads as a section header.
    HeaderWithoutValue,
    /// All-caps category of four or more characters reads as a header.
    UppercaseHeader,
    /// Bold category without a value reads as a header.
    StyledHeader,
    /// Indented category reads as a line under the current header.
    IndentedItem,
    /// Any remaining row with a value reads as a line item.
    ValuedItem,
}

/// Evaluation order of the rules.
pub const RULE_ORDER: [StructureRule; 5] = [
    StructureRule::HeaderWithoutValue,
    StructureRule::UppercaseHeader,
    StructureRule::StyledHeader,
    StructureRule::IndentedItem,
    StructureRule::ValuedItem,
];

impl StructureRule {
    fn applies(self, features: &RowFeatures, category: &str) -> bool {
        match self {
            StructureRule::HeaderWithoutValue => !category.trim().is_empty() && !features.has_value,
            StructureRule::UppercaseHeader => {
                features.is_uppercase && category.trim().chars().count() >= UPPERCASE_MIN_LEN
            }
            StructureRule::StyledHeader => features.is_bold && !features.has_value,
            StructureRule::IndentedItem => features.indentation > 0,
            StructureRule::ValuedItem => features.has_value,
        }
    }

    fn outcome(self, features: &RowFeatures) -> (NodeKind, f64) {
        match self {
            StructureRule::HeaderWithoutValue => (NodeKind::Group, HEADER_NO_VALUE_CONFIDENCE),
            StructureRule::UppercaseHeader => (NodeKind::Group, UPPERCASE_HEADER_CONFIDENCE),
            StructureRule::StyledHeader => (NodeKind::Group, STYLED_HEADER_CONFIDENCE),
            StructureRule::IndentedItem => (NodeKind::Item, INDENTED_ITEM_CONFIDENCE),
            StructureRule::ValuedItem => {
                if features.has_formula {
                    (NodeKind::Item, FORMULA_ITEM_CONFIDENCE)
                } else {
                    (NodeKind::Item, PLAIN_ITEM_CONFIDENCE)
                }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StructureRule::HeaderWithoutValue => "header_without_value",
            StructureRule::UppercaseHeader => "uppercase_header",
            StructureRule::StyledHeader => "styled_header",
            StructureRule::IndentedItem => "indented_item",
            StructureRule::ValuedItem => "valued_item",
        }
    }
}

impl fmt::Display for StructureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural verdict for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub kind: NodeKind,
    pub confidence: f64,
    /// Rule that claimed the row, `None` for the ignore fallback.
    pub rule: Option<StructureRule>,
}

/// Classify one row from its features and raw category text.
pub fn classify_row(features: &RowFeatures, category: &str) -> Classification {
    for rule in RULE_ORDER {
        if rule.applies(features, category) {
            let (kind, confidence) = rule.outcome(features);
            return Classification {
                kind,
                confidence,
                rule: Some(rule),
            };
        }
    }
    Classification {
        kind: NodeKind::Ignore,
        confidence: IGNORED_ROW_CONFIDENCE,
        rule: None,
    }
}
