use serde::{Deserialize, Serialize};

/// Explanation of a single blueprint score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub building_id: String,
    pub building_name: String,
    /// Clauses joined by " • ", e.g. "Category: Production • Produces: planks"
    pub detail: String,
    /// One line per positive component, e.g. "Base: +50"
    pub breakdown: Vec<String>,
    pub tier: ScoreTier,
}

/// Score band used to colour results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    Strong,
    Fair,
    Weak,
}

impl ScoreTier {
    /// Derive tier from a rounded total
    pub fn from_total(total: i64) -> Self {
        match total {
            t if t >= 80 => ScoreTier::Strong,
            t if t >= 60 => ScoreTier::Fair,
            _ => ScoreTier::Weak,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Strong => "Strong",
            ScoreTier::Fair => "Fair",
            ScoreTier::Weak => "Weak",
        }
    }
}
