use crate::content::{
    Category, ContentDocument, OTHER_CATEGORY, Pagination, Photo, PhotoIndex, Photographer,
    ResourceKind, Service, Testimonial,
};

/// `{data, loading, error}` view of one fetched resource.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn resolve(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
        self.error = None;
    }

    /// Previous data, if any, is kept as a stale snapshot.
    pub fn fail(&mut self, error: String) {
        self.loading = false;
        self.error = Some(error);
    }
}

/// Everything fetched for the current session. Owned by the app state and
/// handed to whatever renders it; there is no global copy.
#[derive(Debug, Clone, Default)]
pub struct ContentCache {
    pub photographer: FetchState<Photographer>,
    pub categories: FetchState<Vec<Category>>,
    pub photos: FetchState<PhotoIndex>,
    /// Latest unfiltered API page, in the order the server sent it.
    pub listing: Option<Vec<Photo>>,
    pub testimonials: FetchState<Vec<Testimonial>>,
    pub services: FetchState<Vec<Service>>,
    pub pagination: Option<Pagination>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Document => {
                self.photographer.begin();
                self.categories.begin();
                self.photos.begin();
                self.testimonials.begin();
                self.services.begin();
            }
            ResourceKind::Photographer => self.photographer.begin(),
            ResourceKind::Categories => self.categories.begin(),
            ResourceKind::Photos => self.photos.begin(),
            ResourceKind::Testimonials => self.testimonials.begin(),
            ResourceKind::Services => self.services.begin(),
        }
    }

    pub fn fail(&mut self, kind: ResourceKind, error: &str) {
        match kind {
            ResourceKind::Document => {
                self.photographer.fail(error.to_string());
                self.categories.fail(error.to_string());
                self.photos.fail(error.to_string());
                self.testimonials.fail(error.to_string());
                self.services.fail(error.to_string());
            }
            ResourceKind::Photographer => self.photographer.fail(error.to_string()),
            ResourceKind::Categories => self.categories.fail(error.to_string()),
            ResourceKind::Photos => self.photos.fail(error.to_string()),
            ResourceKind::Testimonials => self.testimonials.fail(error.to_string()),
            ResourceKind::Services => self.services.fail(error.to_string()),
        }
    }

    pub fn install_document(&mut self, doc: ContentDocument) {
        match doc.photographer {
            Some(p) => self.photographer.resolve(p),
            None => self
                .photographer
                .fail("The content document has no photographer profile".to_string()),
        }
        self.categories.resolve(doc.categories);
        self.photos.resolve(doc.photos);
        self.listing = None;
        self.testimonials.resolve(doc.testimonials);
        self.services.resolve(doc.services);
        self.pagination = None;
    }

    /// `None` replaces the listing and the whole map; `Some(id)` replaces
    /// one category.
    pub fn install_photos(&mut self, category: Option<&str>, photos: Vec<Photo>) {
        match category {
            None => {
                self.photos.resolve(group_by_category(&photos));
                self.listing = Some(photos);
            }
            Some(id) => {
                let mut index = self.photos.data.take().unwrap_or_default();
                index.insert(id.to_string(), photos);
                self.photos.resolve(index);
            }
        }
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.data.as_deref().unwrap_or(&[])
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        self.testimonials.data.as_deref().unwrap_or(&[])
    }

    pub fn services(&self) -> &[Service] {
        self.services.data.as_deref().unwrap_or(&[])
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories().iter().find(|c| c.id == id)
    }

    /// Display name, falling back to the raw id.
    pub fn category_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.category(id).map(|c| c.name.as_str()).unwrap_or(id)
    }

    pub fn contact_category_name<'a>(&'a self, id: &'a str) -> &'a str {
        if id == OTHER_CATEGORY {
            "Other"
        } else {
            self.category_name(id)
        }
    }

    pub fn first_error(&self) -> Option<&str> {
        [
            &self.photographer.error,
            &self.categories.error,
            &self.photos.error,
            &self.testimonials.error,
            &self.services.error,
        ]
        .into_iter()
        .find_map(|e| e.as_deref())
    }

    pub fn is_loading(&self) -> bool {
        self.photographer.loading
            || self.categories.loading
            || self.photos.loading
            || self.testimonials.loading
            || self.services.loading
    }
}

pub fn group_by_category(photos: &[Photo]) -> PhotoIndex {
    let mut index = PhotoIndex::new();
    for photo in photos {
        index
            .entry(photo.category.clone())
            .or_default()
            .push(photo.clone());
    }
    index
}
