use std::collections::HashSet;
use uuid::Uuid;

use crate::item::ContentItem;

/// Which authors' posts a viewer's feed draws from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Every visible post ("for you")
    Everyone,
    /// Only posts by authors the viewer follows ("following")
    FollowedAuthors(HashSet<Uuid>),
}

impl Audience {
    pub fn followed(authors: impl IntoIterator<Item = Uuid>) -> Self {
        Self::FollowedAuthors(authors.into_iter().collect())
    }

    pub fn admits(&self, item: &ContentItem) -> bool {
        match self {
            Self::Everyone => true,
            Self::FollowedAuthors(authors) => authors.contains(&item.author_id),
        }
    }

    /// Author ids to push down into the fetch query, if restricted
    pub fn author_ids(&self) -> Option<Vec<Uuid>> {
        match self {
            Self::Everyone => None,
            Self::FollowedAuthors(authors) => Some(authors.iter().copied().collect()),
        }
    }

    /// Drop items outside the audience, preserving the order of the rest
    pub fn filter(&self, mut items: Vec<ContentItem>) -> Vec<ContentItem> {
        if let Self::FollowedAuthors(_) = self {
            items.retain(|item| self.admits(item));
        }
        items
    }
}
