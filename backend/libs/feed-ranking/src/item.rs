use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of post shown in the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Video,
    Image,
    Text,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
            Self::Text => "text",
        }
    }

    /// Parse the stored kind name; `None` for anything unrecognised
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "video" => Some(Self::Video),
            "image" => Some(Self::Image),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Viewer interaction that mutates a content item's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementAction {
    Like,
    Unlike,
    Comment,
    Share,
    View,
}

impl EngagementAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Unlike => "unlike",
            Self::Comment => "comment",
            Self::Share => "share",
            Self::View => "view",
        }
    }
}

impl std::fmt::Display for EngagementAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interaction counters of a content item
///
/// Counters never go below zero: an unlike on a post with no likes is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngagementCounts {
    pub like_count: u64,
    pub comment_count: u64,
    pub share_count: u64,
    pub view_count: u64,
}

impl EngagementCounts {
    /// Build counters from signed storage values, clamping negatives to zero
    pub fn from_signed(likes: i64, comments: i64, shares: i64, views: i64) -> Self {
        Self {
            like_count: clamp_non_negative(likes),
            comment_count: clamp_non_negative(comments),
            share_count: clamp_non_negative(shares),
            view_count: clamp_non_negative(views),
        }
    }

    pub fn apply(&mut self, action: EngagementAction) {
        match action {
            EngagementAction::Like => self.like_count = self.like_count.saturating_add(1),
            EngagementAction::Unlike => self.like_count = self.like_count.saturating_sub(1),
            EngagementAction::Comment => {
                self.comment_count = self.comment_count.saturating_add(1)
            }
            EngagementAction::Share => self.share_count = self.share_count.saturating_add(1),
            EngagementAction::View => self.view_count = self.view_count.saturating_add(1),
        }
    }
}

fn clamp_non_negative(value: i64) -> u64 {
    value.max(0) as u64
}

/// A post in the social feed (video, image or text)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    pub author_id: Uuid,
    pub kind: ContentKind,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub counts: EngagementCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl ContentItem {
    /// Fresh post with all counters at zero
    pub fn new(id: Uuid, author_id: Uuid, kind: ContentKind, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            author_id,
            kind,
            created_at,
            counts: EngagementCounts::default(),
            caption: None,
            media_url: None,
        }
    }

    pub fn with_counts(mut self, counts: EngagementCounts) -> Self {
        self.counts = counts;
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn apply(&mut self, action: EngagementAction) {
        self.counts.apply(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlike_on_zero_stays_zero() {
        let mut counts = EngagementCounts::default();
        counts.apply(EngagementAction::Unlike);
        counts.apply(EngagementAction::Unlike);
        assert_eq!(counts.like_count, 0);
    }

    #[test]
    fn test_like_then_unlike() {
        let mut counts = EngagementCounts::default();
        counts.apply(EngagementAction::Like);
        counts.apply(EngagementAction::Like);
        counts.apply(EngagementAction::Unlike);
        assert_eq!(counts.like_count, 1);
    }

    #[test]
    fn test_each_action_touches_one_counter() {
        let mut counts = EngagementCounts::default();
        counts.apply(EngagementAction::Comment);
        counts.apply(EngagementAction::Share);
        counts.apply(EngagementAction::View);
        counts.apply(EngagementAction::View);
        assert_eq!(
            counts,
            EngagementCounts {
                like_count: 0,
                comment_count: 1,
                share_count: 1,
                view_count: 2,
            }
        );
    }

    #[test]
    fn test_from_signed_clamps_negatives() {
        let counts = EngagementCounts::from_signed(-3, 4, -1, 10);
        assert_eq!(counts.like_count, 0);
        assert_eq!(counts.comment_count, 4);
        assert_eq!(counts.share_count, 0);
        assert_eq!(counts.view_count, 10);
    }

    #[test]
    fn test_content_kind_parse() {
        assert_eq!(ContentKind::parse("Video"), Some(ContentKind::Video));
        assert_eq!(ContentKind::parse(" image "), Some(ContentKind::Image));
        assert_eq!(ContentKind::parse("text"), Some(ContentKind::Text));
        assert_eq!(ContentKind::parse("product"), None);
    }

    #[test]
    fn test_action_serde_names() {
        let action: EngagementAction = serde_json::from_str("\"unlike\"").unwrap();
        assert_eq!(action, EngagementAction::Unlike);
        assert_eq!(action.to_string(), "unlike");
    }
}
