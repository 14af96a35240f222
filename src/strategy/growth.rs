//! Static follower-growth milestone plan
//!
//! Pure configuration data exposed through a generator function for
//! interface symmetry with the trend-driven generators, and so a starting
//! follower count can become a parameter later without breaking callers.

use serde::{Deserialize, Serialize};

/// One waypoint in the growth plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMilestone {
    /// Short label, e.g. "Month 1"
    pub label: String,

    /// Cumulative follower target; strictly increasing across the plan
    pub followers: u64,

    /// Days from start; strictly increasing across the plan
    pub timeframe_days: u32,

    /// Concrete actions for the period
    pub tactics: Vec<String>,
}

fn milestone(label: &str, followers: u64, timeframe_days: u32, tactics: &[&str]) -> GrowthMilestone {
    GrowthMilestone {
        label: label.to_string(),
        followers,
        timeframe_days,
        tactics: tactics.iter().map(|t| t.to_string()).collect(),
    }
}

/// The fixed 180-day plan to 10M followers
pub fn build_growth_plan() -> Vec<GrowthMilestone> {
    vec![
        milestone(
            "Month 1",
            25_000,
            30,
            &[
                "Ship 2 short-form videos + 1 thread per ranked trend, every day",
                "Stand up the zero-cost stack: Make, n8n, Notion HQ, Airtable tracker",
                "Run one live agent build per week and clip it within 12 hours",
            ],
        ),
        milestone(
            "Month 2",
            100_000,
            60,
            &[
                "Double down on the two platforms with the best watch-through",
                "Launch the lead magnet funnel behind every post",
                "Start weekly collab lives with adjacent automation accounts",
            ],
        ),
        milestone(
            "Month 3",
            400_000,
            90,
            &[
                "Let the agent repurpose winners into every remaining platform format",
                "Publish client case studies as carousel + thread pairs",
                "Open the free community and seed it with workshop replays",
            ],
        ),
        milestone(
            "Month 4",
            1_200_000,
            120,
            &[
                "Scale to 5 posts per platform per day, fully agent-scheduled",
                "Run a viral giveaway gated on the automation checklist",
                "Localize top performers for two new regions",
            ],
        ),
        milestone(
            "Month 5",
            4_000_000,
            150,
            &[
                "Cross-promote with three 1M+ creators on joint live builds",
                "Turn the best funnel into an evergreen webinar",
                "Spin up a clips team run entirely by the agent pipeline",
            ],
        ),
        milestone(
            "Month 6",
            10_000_000,
            180,
            &[
                "Daily trend-reactive posting across all seven platforms",
                "Flagship challenge: 10,000 students building agents in public",
                "Convert the audience flywheel into high-ticket installs",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_has_fixed_length() {
        assert_eq!(build_growth_plan().len(), 6);
        // Same length on every call
        assert_eq!(build_growth_plan().len(), build_growth_plan().len());
    }

    #[test]
    fn test_followers_strictly_increasing() {
        let plan = build_growth_plan();
        for pair in plan.windows(2) {
            assert!(pair[1].followers > pair[0].followers);
        }
    }

    #[test]
    fn test_timeframes_strictly_increasing() {
        let plan = build_growth_plan();
        for pair in plan.windows(2) {
            assert!(pair[1].timeframe_days > pair[0].timeframe_days);
        }
    }

    #[test]
    fn test_every_milestone_has_tactics() {
        for milestone in build_growth_plan() {
            assert!(!milestone.label.is_empty());
            assert!(!milestone.tactics.is_empty());
        }
    }

    #[test]
    fn test_plan_is_deterministic() {
        assert_eq!(build_growth_plan(), build_growth_plan());
    }
}
