use std::time::{Duration, Instant};

use crate::app::actions::SideEffect;
use crate::app::carousel::{self, Carousel};
use crate::app::contact::{self, ContactFlow};
use crate::app::gallery::{PhotoFilter, ViewMode, select_photos};
use crate::app::lightbox::Lightbox;
use crate::cache::ContentCache;
use crate::content::request::DEFAULT_PER_PAGE;
use crate::content::{Category, OTHER_CATEGORY, Photo, Query, ResourceRequest, SourceKind};
use crate::error::PortfolioError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusedPane {
    Navigation,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Portfolio,
    Category(String),
    About,
    Contact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavNode {
    Home,
    Portfolio,
    Category { id: String, name: String },
    About,
    Contact,
}

impl NavNode {
    pub fn page(&self) -> Page {
        match self {
            NavNode::Home => Page::Home,
            NavNode::Portfolio => Page::Portfolio,
            NavNode::Category { id, .. } => Page::Category(id.clone()),
            NavNode::About => Page::About,
            NavNode::Contact => Page::Contact,
        }
    }
}

/// What a category page can show.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryView<'a> {
    Loading,
    Failed(String),
    NotFound(PortfolioError),
    Found(&'a Category),
}

#[derive(Debug, Clone)]
pub struct StateSettings {
    pub per_page: u32,
    pub view_mode: ViewMode,
    pub carousel_interval: Duration,
    pub error_dismiss: Duration,
    pub nav_width_percent: u16,
    /// Category id to open at startup, resolved once categories load.
    pub start_category: Option<String>,
}

impl Default for StateSettings {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            view_mode: ViewMode::Grid,
            carousel_interval: carousel::DEFAULT_INTERVAL,
            error_dismiss: contact::DEFAULT_ERROR_DISMISS,
            nav_width_percent: 30,
            start_category: None,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    // Data
    pub source: SourceKind,
    pub source_label: String,
    pub cache: ContentCache,
    pub last_refresh: Option<chrono::DateTime<chrono::Utc>>,

    // Navigation
    pub nav_nodes: Vec<NavNode>,
    pub nav_cursor: usize,
    pub focused_pane: FocusedPane,
    pub page: Page,
    pub content_cursor: usize,

    // Gallery
    pub filter: PhotoFilter,
    pub view_mode: ViewMode,
    pub photo_page: u32,
    pub per_page: u32,

    // Overlays and widgets
    pub lightbox: Lightbox,
    pub scroll_locked: bool,
    pub carousel: Carousel,
    pub contact: ContactFlow,

    // UI flags
    pub nav_width_percent: u16,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(source: SourceKind, source_label: String, settings: StateSettings) -> Self {
        // A category opened by id starts with its page focused.
        let (page, focused_pane) = match settings.start_category {
            Some(id) => (Page::Category(id), FocusedPane::Content),
            None => (Page::Home, FocusedPane::Navigation),
        };
        let mut state = Self {
            source,
            source_label,
            cache: ContentCache::new(),
            last_refresh: None,
            nav_nodes: Vec::new(),
            nav_cursor: 0,
            focused_pane,
            page,
            content_cursor: 0,
            filter: PhotoFilter::All,
            view_mode: settings.view_mode,
            photo_page: 1,
            per_page: settings.per_page,
            lightbox: Lightbox::Closed,
            scroll_locked: false,
            carousel: Carousel::new(settings.carousel_interval),
            contact: ContactFlow::new(settings.error_dismiss),
            nav_width_percent: settings.nav_width_percent,
            should_quit: false,
        };

        let on_home = state.page == Page::Home;
        state.carousel.set_active(on_home, Instant::now());
        state.rebuild_nav_tree();
        state
    }

    /// Effects to run once at startup, with their loading flags raised.
    pub fn start(&mut self) -> Vec<SideEffect> {
        let effects = match self.source {
            SourceKind::Static => vec![SideEffect::LoadDocument],
            SourceKind::Api => self.mount_effects(),
        };
        for effect in &effects {
            self.mark_started(effect);
        }
        effects
    }

    pub fn rebuild_nav_tree(&mut self) {
        let mut nodes = vec![NavNode::Home, NavNode::Portfolio];

        for category in self.cache.categories() {
            nodes.push(NavNode::Category {
                id: category.id.clone(),
                name: category.name.clone(),
            });
        }

        nodes.push(NavNode::About);
        nodes.push(NavNode::Contact);
        self.nav_nodes = nodes;

        if self.nav_cursor >= self.nav_nodes.len() {
            self.nav_cursor = self.nav_nodes.len() - 1;
        }
    }

    /// Resources a page reads, in the order they are requested.
    pub fn page_queries(&self, page: &Page) -> Vec<Query> {
        match page {
            Page::Home => vec![
                Query::new(ResourceRequest::Photographer),
                Query::new(ResourceRequest::categories()),
                Query::new(ResourceRequest::testimonials()),
            ],
            Page::Portfolio => vec![
                Query::new(ResourceRequest::categories()),
                Query::new(ResourceRequest::photos(
                    self.filter.category_id(),
                    self.photo_page,
                    self.per_page,
                )),
            ],
            Page::Category(id) => vec![
                Query::new(ResourceRequest::categories()),
                Query::deferred(ResourceRequest::category_photos(Some(id))),
            ],
            Page::About => vec![
                Query::new(ResourceRequest::Photographer),
                Query::new(ResourceRequest::services()),
            ],
            Page::Contact => vec![
                Query::new(ResourceRequest::Photographer),
                Query::new(ResourceRequest::services()),
                Query::new(ResourceRequest::categories()),
            ],
        }
    }

    /// Fetches fired when the current page is displayed. The static
    /// document is loaded once at startup, so it has none.
    pub fn mount_effects(&self) -> Vec<SideEffect> {
        if self.source == SourceKind::Static {
            return Vec::new();
        }
        self.page_queries(&self.page)
            .iter()
            .filter_map(Query::on_mount)
            .map(|request| SideEffect::Fetch {
                request,
                force: false,
            })
            .collect()
    }

    pub fn refetch_effects(&self) -> Vec<SideEffect> {
        if self.source == SourceKind::Static {
            return vec![SideEffect::LoadDocument];
        }
        self.page_queries(&self.page)
            .iter()
            .filter_map(Query::refetch)
            .map(|request| SideEffect::Fetch {
                request,
                force: true,
            })
            .collect()
    }

    pub fn mark_started(&mut self, effect: &SideEffect) {
        match effect {
            SideEffect::LoadDocument => {
                self.cache.begin(crate::content::ResourceKind::Document)
            }
            SideEffect::Fetch { request, .. } => self.cache.begin(request.kind()),
            SideEffect::SubmitContact(_) | SideEffect::OpenUrl(_) => {}
        }
    }

    /// Photos of the gallery currently on screen.
    pub fn displayed_photos(&self) -> Vec<Photo> {
        match &self.page {
            Page::Portfolio => select_photos(&self.cache, &self.filter),
            Page::Category(id) => match self.category_view(id) {
                CategoryView::Found(_) => {
                    select_photos(&self.cache, &PhotoFilter::Category(id.clone()))
                }
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    pub fn category_view(&self, id: &str) -> CategoryView<'_> {
        let categories = &self.cache.categories;
        if categories.data.is_none() {
            return match &categories.error {
                Some(e) => CategoryView::Failed(e.clone()),
                None => CategoryView::Loading,
            };
        }
        match self.cache.category(id) {
            Some(category) => CategoryView::Found(category),
            None => CategoryView::NotFound(PortfolioError::NotFound(id.to_string())),
        }
    }

    /// Number of selectable rows in the content pane.
    pub fn content_len(&self) -> usize {
        match &self.page {
            Page::Home => self.cache.categories().len(),
            Page::Portfolio | Page::Category(_) => self.displayed_photos().len(),
            Page::About | Page::Contact => 0,
        }
    }

    pub fn clamp_content_cursor(&mut self) {
        let len = self.content_len();
        if self.content_cursor >= len {
            self.content_cursor = len.saturating_sub(1);
        }
    }

    pub fn selected_photo(&self) -> Option<Photo> {
        self.displayed_photos().into_iter().nth(self.content_cursor)
    }

    /// Contact form choices: loaded categories, then "other".
    pub fn contact_category_options(&self) -> Vec<String> {
        self.cache
            .categories()
            .iter()
            .map(|c| c.id.clone())
            .chain(std::iter::once(OTHER_CATEGORY.to_string()))
            .collect()
    }

    /// Whether keystrokes go to the contact form.
    pub fn is_form_mode(&self) -> bool {
        self.page == Page::Contact && self.focused_pane == FocusedPane::Content
    }

    /// Earliest moment the event loop must wake up for.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.carousel.deadline(), self.contact.error_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
