//! Content strategy derivation: blueprints, offers, and the growth plan

pub mod blueprint;
pub mod growth;
pub mod offers;
pub mod platforms;
pub mod tools;

pub use blueprint::{build_blueprint, Blueprint, BlueprintStudio};
pub use growth::{build_growth_plan, GrowthMilestone};
pub use offers::{LeadMagnet, Monetization, OfferCatalog};
pub use platforms::{Platform, PlatformPlan};
pub use tools::{tool_stack, StackTool};
