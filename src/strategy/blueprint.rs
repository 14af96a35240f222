//! Blueprint synthesis
//!
//! Pure derivation of the full cross-platform content package from one
//! trend: one plan per platform in the fixed platform order, plus a lead
//! magnet and monetization package chosen once per blueprint. No clock, no
//! randomness, no I/O — identical trends yield identical blueprints.

use crate::models::Trend;
use crate::strategy::offers::{LeadMagnet, Monetization, OfferCatalog};
use crate::strategy::platforms::{plan_for, Platform, PlatformPlan};
use crate::utils::error::SynthesisError;
use serde::{Deserialize, Serialize};

/// Full cross-platform content package derived from one trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// The trend this blueprint was derived from; never mutated
    pub trend: Trend,

    /// One plan per platform, in [`Platform::all`] order
    pub platform_plans: Vec<PlatformPlan>,

    pub lead_magnet: LeadMagnet,
    pub monetization: Monetization,
}

/// Configured blueprint builder
///
/// Holds the offer catalog and brand tags so tests can substitute their
/// own; [`build_blueprint`] wraps the default configuration.
#[derive(Debug, Clone)]
pub struct BlueprintStudio {
    offers: OfferCatalog,
    brand_tags: Vec<String>,
}

impl Default for BlueprintStudio {
    fn default() -> Self {
        Self {
            offers: OfferCatalog::default(),
            brand_tags: vec!["AIAutomation".to_string(), "AgenticGrowth".to_string()],
        }
    }
}

impl BlueprintStudio {
    pub fn new(offers: OfferCatalog, brand_tags: Vec<String>) -> Self {
        Self { offers, brand_tags }
    }

    /// Derive the blueprint for one trend
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError`] only for structurally invalid trends
    /// (empty id or title); trends produced by the engine's own aggregator
    /// always pass. Empty keywords and short summaries are handled by
    /// template defaults, not errors.
    pub fn build(&self, trend: &Trend) -> Result<Blueprint, SynthesisError> {
        if trend.id.trim().is_empty() {
            return Err(SynthesisError::MissingId);
        }
        if trend.title.trim().is_empty() {
            return Err(SynthesisError::MissingTitle);
        }

        let platform_plans = Platform::all()
            .iter()
            .map(|&platform| plan_for(platform, trend, &self.brand_tags))
            .collect();

        Ok(Blueprint {
            trend: trend.clone(),
            platform_plans,
            lead_magnet: self.offers.lead_magnet(trend),
            monetization: self.offers.monetization(trend),
        })
    }
}

/// Derive a blueprint with the default offer catalog and brand tags
pub fn build_blueprint(trend: &Trend) -> Result<Blueprint, SynthesisError> {
    BlueprintStudio::default().build(trend)
}
