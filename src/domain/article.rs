use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// India Standard Time, the display timezone for all rendered timestamps.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST offset is valid")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub tag_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub count: i64,
    pub reaction_type: String,
}

/// One discussion article as returned by the feed. Timestamps stay in their
/// wire form (RFC3339 strings); parse on demand via `created_time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub uuid: String,
    #[serde(default)]
    pub topic_id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub author: Author,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub article_type: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl Article {
    pub fn new(uuid: String, title: String) -> Self {
        Self {
            uuid,
            topic_id: 0,
            title,
            slug: String::new(),
            summary: String::new(),
            author: Author::default(),
            created_at: String::new(),
            updated_at: String::new(),
            article_type: String::new(),
            tags: Vec::new(),
            reactions: Vec::new(),
        }
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Parse the wire `createdAt` timestamp. None if missing or malformed.
    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Canonical discuss URL for this article.
    pub fn url(&self) -> String {
        format!(
            "https://leetcode.com/discuss/post/{}/{}/",
            self.topic_id, self.slug
        )
    }

    /// Creation time rendered in IST for console/report/email display.
    /// Falls back to the raw wire string when it does not parse.
    pub fn created_display(&self) -> String {
        format_wire_timestamp(&self.created_at)
    }

    pub fn updated_display(&self) -> String {
        format_wire_timestamp(&self.updated_at)
    }
}

/// Format an RFC3339 wire timestamp as `YYYY-MM-DD HH:MM:SS IST`.
/// Returns the input unchanged when unparseable, "N/A" when empty.
pub fn format_wire_timestamp(ts: &str) -> String {
    if ts.is_empty() {
        return "N/A".to_string();
    }

    match DateTime::parse_from_rfc3339(ts) {
        Ok(t) => t
            .with_timezone(&ist())
            .format("%Y-%m-%d %H:%M:%S IST")
            .to_string(),
        Err(_) => ts.to_string(),
    }
}
