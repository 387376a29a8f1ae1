use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Semantic tag attached to an inferred budget line.
///
/// Tags drive downstream plan behavior (cadence tracking, goal pacing), so a
/// line the predictor cannot place stays `Unknown` rather than guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemTag {
    /// Regular budgeted spending (groceries, fuel, dining).
    Budget,
    /// Fixed-cadence commitments (rent, subscriptions, insurance).
    Recurring,
    /// Transfers into savings or investments.
    Savings,
    /// Money coming in (salary, freelance, interest).
    Income,
    /// Debt service (loans, credit cards, mortgage principal).
    Debt,
    /// No layer of the predictor recognized the term.
    Unknown,
}

impl ItemTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemTag::Budget => "budget",
            ItemTag::Recurring => "recurring",
            ItemTag::Savings => "savings",
            ItemTag::Income => "income",
            ItemTag::Debt => "debt",
            ItemTag::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ItemTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemTag {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(ItemTag::Budget),
            "recurring" => Ok(ItemTag::Recurring),
            "savings" => Ok(ItemTag::Savings),
            "income" => Ok(ItemTag::Income),
            "debt" => Ok(ItemTag::Debt),
            "unknown" => Ok(ItemTag::Unknown),
            other => Err(ModelError::UnknownTag(other.to_string())),
        }
    }
}
