pub mod buyer;
pub mod config;
pub mod engine;
pub mod growth;
pub mod validation;
pub mod valuation;

pub use buyer::{buyer_score, calculate_buyer_score, CohortMaxima};
pub use config::*;
pub use engine::{FactorContribution, ScoreBreakdown, ScoreResult};
pub use growth::calculate_growth_score;
pub use validation::validate_scoring;
pub use valuation::{
    classify_firm_size, estimate_valuation, valuation_multiple, FirmSize, Valuation,
};
