//! Zero-cost tool stack catalog
//!
//! The fixed set of free-tier tools the automation offer is built on.
//! Pure configuration data behind a generator function, same shape as the
//! growth plan, so the rendering layer can list it next to the other
//! strategy output.

use serde::{Deserialize, Serialize};

/// One tool in the recommended stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackTool {
    pub name: String,

    /// What the tool covers in the operating stack, one sentence
    pub purpose: String,
}

fn tool(name: &str, purpose: &str) -> StackTool {
    StackTool {
        name: name.to_string(),
        purpose: purpose.to_string(),
    }
}

/// The fixed zero-cost tool stack
pub fn tool_stack() -> Vec<StackTool> {
    vec![
        tool("Make.com Free Tier", "Automations without coding cost."),
        tool("n8n Self-Hosted", "Advanced agent workflows on a free VPS."),
        tool("Notion HQ", "Command center for assets and community."),
        tool("Airtable Free Plan", "Lead tracker and KPI dashboard."),
        tool("Zapier Starter", "Bridge legacy tools on free tasks."),
        tool("Canva", "Cross-format creative templates."),
        tool("CapCut Desktop", "Rapid vertical video editing."),
        tool("Restream Free", "Simulcast live workshops everywhere."),
        tool("OBS Studio", "Record automation demos in high quality."),
        tool("Pexels + Mixkit", "Royalty-free b-roll for shorts."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_has_fixed_length() {
        assert_eq!(tool_stack().len(), 10);
    }

    #[test]
    fn test_every_tool_is_populated_and_unique() {
        let stack = tool_stack();
        let mut names: Vec<&str> = stack.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), stack.len());

        for tool in &stack {
            assert!(!tool.name.is_empty());
            assert!(!tool.purpose.is_empty());
        }
    }

    #[test]
    fn test_stack_is_deterministic() {
        assert_eq!(tool_stack(), tool_stack());
    }
}
