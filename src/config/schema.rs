use serde::{Deserialize, Serialize};

use crate::scale::ScaleConfig;
use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub scale: Option<ScaleConfig>,
}

impl Config {
    /// Fully populated config, as written by `offmarket init`.
    pub fn with_defaults() -> Self {
        Self {
            scoring: Some(ScoringConfig::with_defaults()),
            scale: Some(ScaleConfig::default()),
        }
    }

    pub fn scoring_or_default(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn scale_or_default(&self) -> ScaleConfig {
        self.scale.clone().unwrap_or_default()
    }

    /// Validate every section, collecting all errors.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if let Err(mut e) = crate::scoring::validate_scoring(&self.scoring_or_default()) {
            errors.append(&mut e);
        }
        if let Err(mut e) = crate::scale::validate_scale(&self.scale_or_default()) {
            errors.append(&mut e);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
