use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Feed variant selected by the viewer's tab
///
/// `Chronological` backs the "following" tab, `EngagementRanked` backs "for you".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FeedMode {
    #[serde(rename = "following", alias = "chronological")]
    Chronological,
    #[default]
    #[serde(rename = "for_you", alias = "engagement_ranked")]
    EngagementRanked,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown feed mode '{0}', expected 'following' or 'for_you'")]
pub struct FeedModeParseError(pub String);

impl FeedMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chronological => "following",
            Self::EngagementRanked => "for_you",
        }
    }

    /// Whether the feed is restricted to authors the viewer follows
    pub fn is_following_only(&self) -> bool {
        matches!(self, Self::Chronological)
    }
}

impl FromStr for FeedMode {
    type Err = FeedModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "following" | "chronological" => Ok(Self::Chronological),
            "for_you" | "foryou" | "engagement_ranked" => Ok(Self::EngagementRanked),
            other => Err(FeedModeParseError(other.to_string())),
        }
    }
}

impl std::fmt::Display for FeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
