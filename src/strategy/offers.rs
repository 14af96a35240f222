//! Lead magnet and monetization offer catalog
//!
//! A small fixed catalog of offer templates keyed by trigger keywords. The
//! mapping from trend topic to template is deterministic: the first catalog
//! entry with a trigger present in the trend's keywords or title wins, and
//! a default template backs everything else. `{topic}` placeholders in the
//! template strings are substituted with the trend's lead keyword.

use crate::models::Trend;
use serde::{Deserialize, Serialize};

/// Free asset offered in exchange for a lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadMagnet {
    pub headline: String,

    /// Value proposition, one sentence
    pub promise: String,

    /// Delivery steps the automation runs, 3–6 entries
    pub automation_flow: Vec<String>,
}

/// Paid offer and funnel attached to a blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monetization {
    pub offer_headline: String,
    pub pricing: String,
    pub funnel: Vec<String>,
}

/// One offer template in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferTemplate {
    pub id: String,

    /// Keywords that select this template; empty for the fallback
    pub triggers: Vec<String>,

    pub magnet_headline: String,
    pub magnet_promise: String,
    pub magnet_flow: Vec<String>,

    pub offer_headline: String,
    pub pricing: String,
    pub funnel: Vec<String>,
}

/// Fixed catalog of offer templates plus the default fallback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferCatalog {
    templates: Vec<OfferTemplate>,
    fallback: OfferTemplate,
}

impl Default for OfferCatalog {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            templates: vec![
                OfferTemplate {
                    id: "agent-workshop".to_string(),
                    triggers: strings(&["agent", "agents", "agentic", "autonomous", "workflow"]),
                    magnet_headline: "Live Agent Build: {topic} Edition".to_string(),
                    magnet_promise:
                        "Watch a working agent get built end to end around {topic}, then take the template home."
                            .to_string(),
                    magnet_flow: strings(&[
                        "Register through the embedded form (Airtable captures the lead)",
                        "Agent sends the prep checklist and calendar invite",
                        "Replay and template delivered automatically after the session",
                        "Three-day nurture sequence books the strategy call",
                    ]),
                    offer_headline: "Done-With-You Agent Install Sprint".to_string(),
                    pricing: "$1,500 flat, two-week sprint".to_string(),
                    funnel: strings(&[
                        "Free live workshop",
                        "Strategy call with automation audit",
                        "Two-week install sprint",
                        "Monthly optimization retainer",
                    ]),
                },
                OfferTemplate {
                    id: "content-engine".to_string(),
                    triggers: strings(&["content", "video", "creator", "viral", "youtube", "tiktok"]),
                    magnet_headline: "The {topic} Content Engine Swipe File".to_string(),
                    magnet_promise:
                        "Thirty days of cross-platform posts generated from a single {topic} signal."
                            .to_string(),
                    magnet_flow: strings(&[
                        "Opt-in form drops the swipe file instantly",
                        "Agent tags the lead by platform of interest",
                        "Five-part email course on repurposing loops",
                        "Case-study email pitches the engine install",
                    ]),
                    offer_headline: "Content Engine Install: One Signal, Seven Platforms".to_string(),
                    pricing: "$997 setup + $197/month".to_string(),
                    funnel: strings(&[
                        "Swipe file download",
                        "Email course",
                        "Engine demo call",
                        "Install and monthly management",
                    ]),
                },
                OfferTemplate {
                    id: "ops-toolkit".to_string(),
                    triggers: strings(&[
                        "automation",
                        "business",
                        "sales",
                        "productivity",
                        "no-code",
                        "saas",
                    ]),
                    magnet_headline: "Zero-Cost {topic} Ops Toolkit".to_string(),
                    magnet_promise:
                        "The checklist and free-tier stack that removes the manual work behind {topic}."
                            .to_string(),
                    magnet_flow: strings(&[
                        "Checklist delivered on opt-in",
                        "Agent scores the lead from the intake answers",
                        "Personalized tool-stack recommendation email",
                        "Audit call offer for qualified leads",
                    ]),
                    offer_headline: "Ops Automation Audit + Build".to_string(),
                    pricing: "$750 audit, credited toward any build".to_string(),
                    funnel: strings(&[
                        "Toolkit download",
                        "Stack recommendation",
                        "Paid audit",
                        "Custom build engagement",
                    ]),
                },
            ],
            fallback: OfferTemplate {
                id: "automation-blueprint".to_string(),
                triggers: Vec::new(),
                magnet_headline: "The {topic} Automation Blueprint".to_string(),
                magnet_promise:
                    "A plug-and-play blueprint that turns the {topic} conversation into leads on autopilot."
                        .to_string(),
                magnet_flow: strings(&[
                    "Blueprint PDF delivered on opt-in",
                    "Agent follows up with a personalized use case",
                    "Weekly automation teardown email keeps the list warm",
                ]),
                offer_headline: "Custom AI Automation System".to_string(),
                pricing: "From $2,000 per system".to_string(),
                funnel: strings(&[
                    "Blueprint download",
                    "Use-case follow-up",
                    "Scoping call",
                    "System build and handoff",
                ]),
            },
        }
    }
}

impl OfferCatalog {
    /// Pick the template for a trend; deterministic for fixed input
    pub fn select(&self, trend: &Trend) -> &OfferTemplate {
        let title = trend.title.to_lowercase();
        self.templates
            .iter()
            .find(|template| {
                template.triggers.iter().any(|trigger| {
                    trend.keywords.iter().any(|k| k == trigger) || title.contains(trigger)
                })
            })
            .unwrap_or(&self.fallback)
    }

    /// Build the lead magnet for a trend
    pub fn lead_magnet(&self, trend: &Trend) -> LeadMagnet {
        let template = self.select(trend);
        let topic = Self::topic(trend);
        LeadMagnet {
            headline: template.magnet_headline.replace("{topic}", &topic),
            promise: template.magnet_promise.replace("{topic}", &topic),
            automation_flow: template.magnet_flow.clone(),
        }
    }

    /// Build the monetization package for a trend
    pub fn monetization(&self, trend: &Trend) -> Monetization {
        let template = self.select(trend);
        Monetization {
            offer_headline: template.offer_headline.clone(),
            pricing: template.pricing.clone(),
            funnel: template.funnel.clone(),
        }
    }

    fn topic(trend: &Trend) -> String {
        trend
            .keywords
            .first()
            .cloned()
            .unwrap_or_else(|| "AI automation".to_string())
    }
}
