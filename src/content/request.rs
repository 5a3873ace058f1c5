pub const DEFAULT_PER_PAGE: u32 = 50;
pub const MAX_PER_PAGE: u32 = 100;

/// Which slot of the content cache a request fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Document,
    Photographer,
    Categories,
    Photos,
    Testimonials,
    Services,
}

/// One read against the content API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceRequest {
    Photographer,
    Categories {
        active_only: bool,
    },
    Photos {
        category: Option<String>,
        visible_only: bool,
        page: u32,
        per_page: u32,
    },
    CategoryPhotos {
        category: String,
        visible_only: bool,
    },
    Testimonials {
        visible_only: bool,
    },
    Services {
        active_only: bool,
    },
}

impl ResourceRequest {
    pub fn categories() -> Self {
        Self::Categories { active_only: true }
    }

    pub fn photos(category: Option<&str>, page: u32, per_page: u32) -> Self {
        Self::Photos {
            category: category.map(str::to_string),
            visible_only: true,
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// `None` when no category is selected yet.
    pub fn category_photos(category: Option<&str>) -> Option<Self> {
        category
            .filter(|c| !c.is_empty())
            .map(|c| Self::CategoryPhotos {
                category: c.to_string(),
                visible_only: true,
            })
    }

    pub fn testimonials() -> Self {
        Self::Testimonials { visible_only: true }
    }

    pub fn services() -> Self {
        Self::Services { active_only: true }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Photographer => ResourceKind::Photographer,
            Self::Categories { .. } => ResourceKind::Categories,
            Self::Photos { .. } | Self::CategoryPhotos { .. } => ResourceKind::Photos,
            Self::Testimonials { .. } => ResourceKind::Testimonials,
            Self::Services { .. } => ResourceKind::Services,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Photographer => "/photographer".to_string(),
            Self::Categories { .. } => "/categories".to_string(),
            Self::Photos { .. } => "/photos".to_string(),
            Self::CategoryPhotos { category, .. } => format!("/photos/category/{category}"),
            Self::Testimonials { .. } => "/testimonials".to_string(),
            Self::Services { .. } => "/services".to_string(),
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Photographer => Vec::new(),
            Self::Categories { active_only } | Self::Services { active_only } => {
                vec![("active_only", active_only.to_string())]
            }
            Self::Photos {
                category,
                visible_only,
                page,
                per_page,
            } => {
                let mut params = Vec::with_capacity(4);
                if let Some(category) = category {
                    params.push(("category", category.clone()));
                }
                params.push(("visible_only", visible_only.to_string()));
                params.push(("page", page.to_string()));
                params.push(("per_page", per_page.to_string()));
                params
            }
            Self::CategoryPhotos { visible_only, .. } | Self::Testimonials { visible_only } => {
                vec![("visible_only", visible_only.to_string())]
            }
        }
    }

    /// Stable key for the snapshot store: path plus query string.
    pub fn cache_key(&self) -> String {
        let query = self.query();
        if query.is_empty() {
            return self.path();
        }
        let qs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{}?{}", self.path(), qs.join("&"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Fire when the owning page mounts rather than only on refetch.
    pub immediate: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { immediate: true }
    }
}

/// A request bound to a page, with its mount behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub request: Option<ResourceRequest>,
    pub options: FetchOptions,
}

impl Query {
    pub fn new(request: ResourceRequest) -> Self {
        Self {
            request: Some(request),
            options: FetchOptions::default(),
        }
    }

    /// Only immediate when the request could be built, e.g. a category
    /// page that has no id yet stays idle until refetched.
    pub fn deferred(request: Option<ResourceRequest>) -> Self {
        let immediate = request.is_some();
        Self {
            request,
            options: FetchOptions { immediate },
        }
    }

    pub fn on_mount(&self) -> Option<ResourceRequest> {
        if self.options.immediate {
            self.request.clone()
        } else {
            None
        }
    }

    pub fn refetch(&self) -> Option<ResourceRequest> {
        self.request.clone()
    }
}
