//! Google News RSS provider
//!
//! Google News has no JSON API, so this provider reads the RSS search feed.
//! Items are split out with regexes rather than a strict XML parser: the
//! feed is machine-generated and flat, and a lenient reader survives the
//! occasional unescaped fragment. Descriptions arrive as HTML and are
//! reduced to text with scraper.

use crate::feeds::{FeedClient, FeedProvider};
use crate::models::{RawFeedItem, TrendSource};
use crate::utils::error::FeedError;
use crate::utils::{collapse_whitespace, truncate_chars};

use async_trait::async_trait;
use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;
use tracing::debug;

fn item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<item>(.*?)</item>").expect("valid item regex"))
}

fn field_re(tag: &'static str, cell: &'static OnceLock<Regex>) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(&format!(
            r"(?s)<{tag}>\s*(?:<!\[CDATA\[(.*?)\]\]>|(.*?))\s*</{tag}>"
        ))
        .expect("valid field regex")
    })
}

fn title_field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    field_re("title", &RE)
}

fn link_field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    field_re("link", &RE)
}

fn guid_field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<guid[^>]*>\s*(?:<!\[CDATA\[(.*?)\]\]>|(.*?))\s*</guid>")
            .expect("valid guid regex")
    })
}

fn pub_date_field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    field_re("pubDate", &RE)
}

fn description_field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    field_re("description", &RE)
}

fn extract_field(re: &Regex, item: &str) -> Option<String> {
    re.captures(item).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

/// Google News feed provider
pub struct GoogleNewsProvider {
    client: FeedClient,
    query: String,
}

impl GoogleNewsProvider {
    /// Create a provider for the given search query
    pub fn new(client: FeedClient, query: impl Into<String>) -> Self {
        Self {
            client,
            query: query.into(),
        }
    }

    fn feed_url(&self) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(self.query.as_bytes()).collect();
        format!("https://news.google.com/rss/search?q={encoded}&hl=en-US&gl=US&ceid=US:en")
    }

    /// Parse one RSS document into raw items
    fn parse_rss(body: &str) -> Vec<RawFeedItem> {
        item_re()
            .captures_iter(body)
            .filter_map(|caps| Self::parse_item(caps.get(1)?.as_str()))
            .collect()
    }

    fn parse_item(item: &str) -> Option<RawFeedItem> {
        let title = extract_field(title_field_re(), item)
            .map(|t| html_escape::decode_html_entities(&t).into_owned());

        let url = extract_field(link_field_re(), item)
            .or_else(|| extract_field(guid_field_re(), item))
            .map(|u| html_escape::decode_html_entities(&u).into_owned());

        let summary = extract_field(description_field_re(), item)
            .map(|d| html_escape::decode_html_entities(&d).into_owned())
            .map(|d| Self::strip_html(&d))
            .filter(|d| !d.is_empty())
            .map(|d| truncate_chars(&d, 280));

        let published_at = extract_field(pub_date_field_re(), item);

        let mut raw = RawFeedItem::new(TrendSource::GoogleNews);
        raw.title = title;
        raw.summary = summary;
        raw.url = url;
        raw.published_at = published_at;
        Some(raw)
    }

    /// Reduce an HTML description fragment to plain text
    fn strip_html(fragment: &str) -> String {
        let parsed = Html::parse_fragment(fragment);
        let text: String = parsed.root_element().text().collect::<Vec<_>>().join(" ");
        collapse_whitespace(&text)
    }
}

#[async_trait]
impl FeedProvider for GoogleNewsProvider {
    fn source(&self) -> TrendSource {
        TrendSource::GoogleNews
    }

    async fn fetch_raw_items(&self) -> Result<Vec<RawFeedItem>, FeedError> {
        let body = self.client.get_text(&self.feed_url()).await?;
        let items = Self::parse_rss(&body);

        if items.is_empty() && !body.contains("<rss") {
            return Err(FeedError::Malformed {
                origin: TrendSource::GoogleNews,
                detail: "response does not look like an RSS document".to_string(),
            });
        }

        debug!(items = items.len(), "Parsed Google News RSS feed");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
<title>Search results</title>
<item>
  <title>OpenAI launches new agent toolkit &amp; SDK</title>
  <link>https://news.example.com/articles/openai-agent-toolkit</link>
  <guid isPermaLink="false">CBMiabcdef</guid>
  <pubDate>Tue, 25 Aug 2026 08:30:00 GMT</pubDate>
  <description>&lt;a href="https://news.example.com"&gt;OpenAI launches agent toolkit&lt;/a&gt;&lt;font&gt;Example Wire&lt;/font&gt;</description>
</item>
<item>
  <title><![CDATA[Automation startups raise record funding]]></title>
  <link>https://news.example.com/articles/automation-funding</link>
  <pubDate>Mon, 24 Aug 2026 19:00:00 GMT</pubDate>
  <description>Funding roundup</description>
</item>
</channel></rss>"#;

    #[test]
    fn test_parse_rss_items() {
        let items = GoogleNewsProvider::parse_rss(SAMPLE_RSS);
        assert_eq!(items.len(), 2);

        let first = &items[0];
        assert_eq!(first.source, TrendSource::GoogleNews);
        assert_eq!(
            first.title.as_deref(),
            Some("OpenAI launches new agent toolkit & SDK")
        );
        assert_eq!(
            first.url.as_deref(),
            Some("https://news.example.com/articles/openai-agent-toolkit")
        );
        assert_eq!(
            first.published_at.as_deref(),
            Some("Tue, 25 Aug 2026 08:30:00 GMT")
        );
        // HTML tags stripped from the description
        let summary = first.summary.as_deref().unwrap();
        assert!(summary.contains("OpenAI launches agent toolkit"));
        assert!(!summary.contains('<'));
    }

    #[test]
    fn test_parse_rss_cdata_title() {
        let items = GoogleNewsProvider::parse_rss(SAMPLE_RSS);
        assert_eq!(
            items[1].title.as_deref(),
            Some("Automation startups raise record funding")
        );
    }

    #[test]
    fn test_parse_rss_empty_document() {
        assert!(GoogleNewsProvider::parse_rss("<html>not a feed</html>").is_empty());
    }

    #[test]
    fn test_feed_url_encodes_query() {
        let client = FeedClient::new(&crate::config::FeedsConfig::default()).unwrap();
        let provider = GoogleNewsProvider::new(client, "AI agents automation");
        let url = provider.feed_url();
        assert!(url.starts_with("https://news.google.com/rss/search?q=AI"));
        assert!(!url.contains(' '));
    }
}
