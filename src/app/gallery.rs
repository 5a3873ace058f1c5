use crate::cache::ContentCache;
use crate::content::Photo;

pub const ALL_FILTER: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PhotoFilter {
    #[default]
    All,
    Category(String),
}

impl PhotoFilter {
    pub fn parse(raw: &str) -> Self {
        if raw == ALL_FILTER {
            Self::All
        } else {
            Self::Category(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_FILTER,
            Self::Category(id) => id,
        }
    }

    pub fn category_id(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Category(id) => Some(id),
        }
    }

    /// Step through `all` then each category in order, wrapping.
    pub fn cycle(&self, category_ids: &[&str], forward: bool) -> Self {
        let len = category_ids.len() + 1;
        let current = match self {
            Self::All => 0,
            Self::Category(id) => category_ids
                .iter()
                .position(|c| c == id)
                .map(|i| i + 1)
                .unwrap_or(0),
        };
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        if next == 0 {
            Self::All
        } else {
            Self::Category(category_ids[next - 1].to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

/// Photos to show for `filter`. `All` is the unfiltered API listing as
/// sent, or the static document in category-then-insertion order. Never
/// re-sorts; an unknown category yields nothing.
pub fn select_photos(cache: &ContentCache, filter: &PhotoFilter) -> Vec<Photo> {
    if let (PhotoFilter::All, Some(listing)) = (filter, cache.listing.as_ref()) {
        return listing.clone();
    }
    let Some(index) = cache.photos.data.as_ref() else {
        return Vec::new();
    };
    match filter {
        PhotoFilter::All => index.values().flatten().cloned().collect(),
        PhotoFilter::Category(id) => index.get(id).cloned().unwrap_or_default(),
    }
}
