//! Per-platform content plan templates
//!
//! One pure template function per platform, dispatched from a single match
//! on the [`Platform`] enum. Every function is a pure mapping from trend
//! fields to strings, so each is independently unit-testable and the whole
//! plan set is deterministic for a fixed trend.

use crate::models::Trend;
use crate::utils::{pascal_case, squash_case, truncate_chars};
use serde::{Deserialize, Serialize};

/// The fixed, closed set of target platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    LinkedIn,
    Facebook,
    Instagram,
    Pinterest,
    TikTok,
    YouTubeShorts,
    X,
}

impl Platform {
    /// All platforms in blueprint order; this order is stable API
    pub fn all() -> [Platform; 7] {
        [
            Self::LinkedIn,
            Self::Facebook,
            Self::Instagram,
            Self::Pinterest,
            Self::TikTok,
            Self::YouTubeShorts,
            Self::X,
        ]
    }

    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinkedIn => "LinkedIn",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Pinterest => "Pinterest",
            Self::TikTok => "TikTok",
            Self::YouTubeShorts => "YouTube Shorts",
            Self::X => "X",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Content plan for one platform within a blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformPlan {
    pub platform: Platform,

    /// Short format descriptor, e.g. "carousel", "vertical video"
    pub format: String,

    pub hook: String,

    /// Multi-line body copy in the platform's native shape
    pub primary_copy: String,

    pub call_to_action: String,

    /// Reframes the post as evidence of the automation system being sold
    pub automation_angle: String,

    /// Platform-cased tags, trend keywords first, brand tags last
    pub hashtags: Vec<String>,
}

/// First keyword of the trend, or a stable fallback topic
fn topic(trend: &Trend) -> String {
    trend
        .keywords
        .first()
        .cloned()
        .unwrap_or_else(|| "ai automation".to_string())
}

/// Build the plan for one platform from trend fields
pub fn plan_for(platform: Platform, trend: &Trend, brand_tags: &[String]) -> PlatformPlan {
    let (format, hook, primary_copy, call_to_action) = match platform {
        Platform::LinkedIn => linkedin(trend),
        Platform::Facebook => facebook(trend),
        Platform::Instagram => instagram(trend),
        Platform::Pinterest => pinterest(trend),
        Platform::TikTok => tiktok(trend),
        Platform::YouTubeShorts => youtube_shorts(trend),
        Platform::X => x_thread(trend),
    };

    PlatformPlan {
        platform,
        automation_angle: automation_angle(platform, &format),
        hashtags: hashtags(platform, trend, brand_tags),
        format,
        hook,
        primary_copy,
        call_to_action,
    }
}

fn automation_angle(platform: Platform, format: &str) -> String {
    format!(
        "This {format} was drafted, scheduled, and repurposed by the same agent stack we install \
         for clients — every {platform} post doubles as a live demo of the automation offer."
    )
}

fn linkedin(trend: &Trend) -> (String, String, String, String) {
    let hook = format!(
        "{} — and almost nobody is talking about the operational side.",
        trend.title
    );
    let copy = format!(
        "Everyone saw the headline. Here's what operators should actually take from it.\n\n\
         {}\n\n\
         1. Capture the workflow while attention is still high.\n\
         2. Template the repeatable part the same day.\n\
         3. Hand distribution to an agent so the team stays on delivery.\n\n\
         We packaged the exact build — details in the comments.",
        trend.summary
    );
    (
        "document carousel".to_string(),
        hook,
        copy,
        "Comment \"SYSTEM\" and I'll send the build breakdown.".to_string(),
    )
}

fn facebook(trend: &Trend) -> (String, String, String, String) {
    let hook = format!("We tested what \"{}\" means in practice.", trend.title);
    let copy = format!(
        "{}\n\n\
         We rebuilt the workflow behind this with free-tier tools only, and it ran unattended \
         overnight.\n\n\
         Honest question for the group: would you let an agent run this part of your business?",
        trend.summary
    );
    (
        "link post + community prompt".to_string(),
        hook,
        copy,
        "Join the free automation group for the full walkthrough.".to_string(),
    )
}

fn instagram(trend: &Trend) -> (String, String, String, String) {
    let hook = format!("Steal this before it's mainstream: {}", trend.title);
    let copy = format!(
        "Slide 1: {}\n\
         Slide 2: {}\n\
         Slide 3: The 3-step agent workflow that turns this into daily content.\n\
         Slide 4: Receipts — what the agent shipped this week.\n\
         Slide 5: Save this and grab the toolkit in bio.",
        truncate_chars(&trend.title, 80),
        trend.summary
    );
    (
        "carousel".to_string(),
        hook,
        copy,
        "Save this and tap the link in bio for the toolkit.".to_string(),
    )
}

fn pinterest(trend: &Trend) -> (String, String, String, String) {
    let hook = format!("{} playbook: from headline to income stream", topic(trend));
    let copy = format!(
        "{}\n\n\
         Pin the play: capture the trend, template the content, let the agent run the posting \
         schedule while you build the offer.",
        trend.summary
    );
    (
        "idea pin".to_string(),
        hook,
        copy,
        "Open the pin link for the free automation checklist.".to_string(),
    )
}

fn tiktok(trend: &Trend) -> (String, String, String, String) {
    let hook = format!(
        "This changes {} forever — watch before it's everywhere.",
        topic(trend)
    );
    let copy = format!(
        "Beat 1 (0-3s): {}\n\
         Beat 2 (3-15s): {}\n\
         Beat 3 (15-35s): Screen-record the agent doing the work live, no cuts.\n\
         Beat 4 (35-45s): \"I packaged the whole system — comment AGENT.\"",
        hook, trend.summary
    );
    (
        "vertical video".to_string(),
        hook,
        copy,
        "Comment \"AGENT\" for the free workflow.".to_string(),
    )
}

fn youtube_shorts(trend: &Trend) -> (String, String, String, String) {
    let hook = format!("{} — here's the 45-second version.", truncate_chars(&trend.title, 80));
    let copy = format!(
        "Open on the finished result, then rewind.\n\n\
         {}\n\n\
         Show the agent dashboard, the trigger, and the output side by side. End on the opening \
         frame so the short loops.",
        trend.summary
    );
    (
        "vertical video".to_string(),
        hook,
        copy,
        "Subscribe for daily agent builds — toolkit link in the description.".to_string(),
    )
}

fn x_thread(trend: &Trend) -> (String, String, String, String) {
    let hook = format!(
        "{}\n\nMost people will scroll past this. It's a blueprint. 🧵",
        trend.title
    );
    let copy = format!(
        "1/ {}\n\
         2/ The signal: attention is moving faster than the tooling. That gap is the opportunity.\n\
         3/ How to act on it today with a free-tier stack (Make + n8n + Notion).\n\
         4/ The exact agent workflow we run on every trend like this one.\n\
         5/ Template is in the first reply.",
        trend.summary
    );
    (
        "thread".to_string(),
        hook,
        copy,
        "Follow and repost the opener — template goes out by DM.".to_string(),
    )
}

/// Tag casing and count conventions per platform
fn hashtags(platform: Platform, trend: &Trend, brand_tags: &[String]) -> Vec<String> {
    let (limit, pascal) = match platform {
        Platform::LinkedIn => (5, true),
        Platform::Facebook => (3, true),
        Platform::Instagram => (8, false),
        Platform::Pinterest => (5, false),
        Platform::TikTok => (4, false),
        Platform::YouTubeShorts => (3, true),
        Platform::X => (3, true),
    };

    let case = |s: &str| {
        if pascal {
            pascal_case(s)
        } else {
            squash_case(s)
        }
    };

    let mut tags: Vec<String> = Vec::new();
    if platform == Platform::YouTubeShorts {
        tags.push("#Shorts".to_string());
    }

    tags.extend(
        trend
            .keywords
            .iter()
            .take(limit)
            .map(|k| format!("#{}", case(k)))
            .filter(|t| t.len() > 1),
    );

    for brand in brand_tags {
        let tag = format!("#{}", case(brand));
        if tag.len() > 1 && !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    tags
}
