//! trendpulse - AI trend intelligence and content blueprint engine
//!
//! Ingests short-lived trend signals from Reddit, Hacker News, Google News,
//! and YouTube, scores and ranks them, and deterministically derives
//! cross-platform content blueprints plus a fixed follower-growth plan.
//!
//! # Architecture
//!
//! - [`config`] - Configuration, scoring weights, and the breakout vocabulary
//! - [`feeds`] - Feed providers and the shared rate-limited HTTP client
//! - [`trends`] - Raw item normalization, scoring, and aggregation
//! - [`strategy`] - Blueprint synthesis, offer catalog, and growth plan
//! - [`models`] - Core data structures
//! - [`error`] - Unified error handling
//!
//! # Example
//!
//! ```no_run
//! use trendpulse::config::Config;
//! use trendpulse::{build_blueprint, build_growth_plan, TrendEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let engine = TrendEngine::new(config)?;
//!
//!     let trends = engine.trend_insights().await;
//!     for trend in trends.iter().take(4) {
//!         let blueprint = build_blueprint(trend)?;
//!         println!("{}: {} platform plans", trend.title, blueprint.platform_plans.len());
//!     }
//!
//!     let plan = build_growth_plan();
//!     println!("{} growth milestones", plan.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod feeds;
pub mod models;
pub mod strategy;
pub mod trends;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{BatchStats, RawFeedItem, Trend, TrendSource};
    pub use crate::strategy::{
        build_blueprint, build_growth_plan, tool_stack, Blueprint, GrowthMilestone, Platform,
        PlatformPlan, StackTool,
    };
    pub use crate::trends::TrendEngine;
}

// Direct re-exports for the three entry points
pub use strategy::{build_blueprint, build_growth_plan};
pub use trends::TrendEngine;
