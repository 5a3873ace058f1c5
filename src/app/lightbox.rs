use crate::content::Photo;

/// Full-screen viewer over one ordered sequence of photos.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Lightbox {
    #[default]
    Closed,
    Open { photos: Vec<Photo>, index: usize },
}

impl Lightbox {
    /// Returns whether the viewer is now open. An empty sequence or an
    /// out-of-range index leaves it closed.
    pub fn open(&mut self, photos: Vec<Photo>, index: usize) -> bool {
        if index >= photos.len() {
            return false;
        }
        *self = Self::Open { photos, index };
        true
    }

    /// Returns whether it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = Self::Closed;
        was_open
    }

    pub fn next(&mut self) {
        if let Self::Open { photos, index } = self
            && photos.len() > 1
        {
            *index = (*index + 1) % photos.len();
        }
    }

    pub fn previous(&mut self) {
        if let Self::Open { photos, index } = self
            && photos.len() > 1
        {
            *index = (*index + photos.len() - 1) % photos.len();
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Open { index, .. } => Some(*index),
            Self::Closed => None,
        }
    }

    pub fn current(&self) -> Option<&Photo> {
        match self {
            Self::Open { photos, index } => photos.get(*index),
            Self::Closed => None,
        }
    }

    /// 1-based position and total.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Open { photos, index } => Some((index + 1, photos.len())),
            Self::Closed => None,
        }
    }

    /// Prev/next controls and the counter only make sense past one photo.
    pub fn has_navigation(&self) -> bool {
        matches!(self, Self::Open { photos, .. } if photos.len() > 1)
    }
}
