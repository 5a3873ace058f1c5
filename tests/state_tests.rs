use std::time::{Duration, Instant};

use chrono::NaiveDate;

use folio::app::actions::{Action, DataPayload, SideEffect};
use folio::app::contact::SubmitStatus;
use folio::app::gallery::PhotoFilter;
use folio::app::state::{AppState, CategoryView, FocusedPane, NavNode, Page, StateSettings};
use folio::app::update::update;
use folio::content::{
    Category, ContentDocument, Pagination, Photo, PhotoIndex, Photographer, ResourceKind,
    ResourceRequest, SourceKind, Testimonial,
};

fn make_photo(id: &str, category: &str) -> Photo {
    Photo {
        id: id.into(),
        category: category.into(),
        title: format!("Photo {}", id),
        image: format!("https://img.example.com/{}.jpg", id),
        date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        description: None,
        is_visible: true,
    }
}

fn make_category(id: &str, name: &str) -> Category {
    Category {
        id: id.into(),
        name: name.into(),
        description: String::new(),
        is_active: true,
    }
}

fn make_testimonial(id: &str) -> Testimonial {
    Testimonial {
        id: id.into(),
        name: format!("Client {}", id),
        text: "Lovely pictures.".into(),
        category: None,
        is_visible: true,
    }
}

fn make_document() -> ContentDocument {
    let mut photos = PhotoIndex::new();
    photos.insert(
        "weddings".into(),
        vec![make_photo("w1", "weddings"), make_photo("w2", "weddings")],
    );
    photos.insert("portraits".into(), vec![make_photo("p1", "portraits")]);

    ContentDocument {
        photographer: Some(Photographer {
            name: "Ana Lima".into(),
            bio: String::new(),
            email: "ana@example.com".into(),
            phone: String::new(),
            location: String::new(),
            experience: String::new(),
        }),
        categories: vec![
            make_category("weddings", "Weddings"),
            make_category("portraits", "Portraits"),
        ],
        photos,
        testimonials: vec![make_testimonial("t1"), make_testimonial("t2")],
        services: Vec::new(),
    }
}

fn static_state() -> AppState {
    let mut state = AppState::new(
        SourceKind::Static,
        "portfolio.json".into(),
        StateSettings::default(),
    );
    state.start();
    update(&mut state, Action::DataLoaded(DataPayload::Document(make_document())));
    state
}

fn api_state() -> AppState {
    AppState::new(
        SourceKind::Api,
        "http://localhost:8001/api".into(),
        StateSettings::default(),
    )
}

fn go_to(state: &mut AppState, page: Page) -> Vec<SideEffect> {
    state.focused_pane = FocusedPane::Navigation;
    state.nav_cursor = state
        .nav_nodes
        .iter()
        .position(|n| n.page() == page)
        .expect("page in navigation");
    update(state, Action::Select)
}

fn fetched_requests(effects: &[SideEffect]) -> Vec<ResourceRequest> {
    effects
        .iter()
        .filter_map(|e| match e {
            SideEffect::Fetch { request, .. } => Some(request.clone()),
            _ => None,
        })
        .collect()
}

// --- Startup ---

#[test]
fn test_initial_nav_without_categories() {
    let state = api_state();
    assert_eq!(
        state.nav_nodes,
        vec![NavNode::Home, NavNode::Portfolio, NavNode::About, NavNode::Contact]
    );
    assert_eq!(state.page, Page::Home);
}

#[test]
fn test_static_start_loads_document_once() {
    let mut state = AppState::new(
        SourceKind::Static,
        "portfolio.json".into(),
        StateSettings::default(),
    );
    let effects = state.start();
    assert_eq!(effects, vec![SideEffect::LoadDocument]);
    assert!(state.cache.categories.loading);
    assert!(state.cache.photos.loading);
}

#[test]
fn test_api_start_fetches_home_resources() {
    let mut state = api_state();
    let effects = state.start();
    assert_eq!(
        fetched_requests(&effects),
        vec![
            ResourceRequest::Photographer,
            ResourceRequest::categories(),
            ResourceRequest::testimonials(),
        ]
    );
    assert!(state.cache.photographer.loading);
    assert!(!state.cache.services.loading);
}

#[test]
fn test_document_populates_everything() {
    let state = static_state();
    assert!(!state.cache.is_loading());
    assert_eq!(state.nav_nodes.len(), 6);
    assert_eq!(
        state.nav_nodes[2],
        NavNode::Category {
            id: "weddings".into(),
            name: "Weddings".into()
        }
    );
    assert_eq!(state.carousel.len(), 2);
    assert!(state.carousel.is_running());
    assert!(state.last_refresh.is_some());
}

#[test]
fn test_load_failure_is_recoverable() {
    let mut state = AppState::new(
        SourceKind::Static,
        "portfolio.json".into(),
        StateSettings::default(),
    );
    state.start();
    update(
        &mut state,
        Action::LoadFailed {
            kind: ResourceKind::Document,
            error: "Failed to read portfolio.json".into(),
        },
    );
    assert_eq!(
        state.cache.categories.error.as_deref(),
        Some("Failed to read portfolio.json")
    );
    assert!(!state.cache.is_loading());

    let effects = update(&mut state, Action::Refresh);
    assert_eq!(effects, vec![SideEffect::LoadDocument]);
    assert!(state.cache.categories.loading);
    assert!(state.cache.categories.error.is_none());
}

#[test]
fn test_failed_refetch_keeps_previous_data() {
    let mut state = static_state();
    update(&mut state, Action::Refresh);
    update(
        &mut state,
        Action::LoadFailed {
            kind: ResourceKind::Document,
            error: "offline".into(),
        },
    );
    assert_eq!(state.cache.categories().len(), 2);
    assert_eq!(state.cache.categories.error.as_deref(), Some("offline"));
}

// --- Navigation ---

#[test]
fn test_api_navigation_fetches_page_resources() {
    let mut state = api_state();
    let effects = go_to(&mut state, Page::About);
    assert_eq!(state.page, Page::About);
    assert_eq!(
        fetched_requests(&effects),
        vec![ResourceRequest::Photographer, ResourceRequest::services()]
    );
}

#[test]
fn test_static_navigation_fetches_nothing() {
    let mut state = static_state();
    assert!(go_to(&mut state, Page::Portfolio).is_empty());
}

#[test]
fn test_leaving_home_stops_carousel() {
    let mut state = static_state();
    go_to(&mut state, Page::Portfolio);
    assert!(!state.carousel.is_running());
    go_to(&mut state, Page::Home);
    assert!(state.carousel.is_running());
}

#[test]
fn test_home_category_opens_category_page() {
    let mut state = static_state();
    state.focused_pane = FocusedPane::Content;
    update(&mut state, Action::MoveDown);
    update(&mut state, Action::Select);
    assert_eq!(state.page, Page::Category("portraits".into()));
    let ids: Vec<String> = state.displayed_photos().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["p1"]);
}

#[test]
fn test_unknown_category_is_not_found() {
    let mut state = static_state();
    state.page = Page::Category("underwater".into());
    assert!(matches!(
        state.category_view("underwater"),
        CategoryView::NotFound(_)
    ));
    assert!(state.displayed_photos().is_empty());

    state.focused_pane = FocusedPane::Content;
    update(&mut state, Action::Select);
    assert_eq!(state.page, Page::Portfolio);
    assert!(!state.lightbox.is_open());
}

fn start_on_category(source: SourceKind, id: &str) -> AppState {
    let settings = StateSettings {
        start_category: Some(id.into()),
        ..StateSettings::default()
    };
    AppState::new(source, "portfolio.json".into(), settings)
}

#[test]
fn test_start_category_opens_category_page() {
    let mut state = start_on_category(SourceKind::Api, "weddings");
    assert_eq!(state.page, Page::Category("weddings".into()));
    assert_eq!(state.focused_pane, FocusedPane::Content);
    assert!(!state.carousel.is_running());

    let effects = state.start();
    assert_eq!(
        fetched_requests(&effects),
        vec![
            ResourceRequest::categories(),
            ResourceRequest::category_photos(Some("weddings")).unwrap(),
        ]
    );
    assert_eq!(state.category_view("weddings"), CategoryView::Loading);
}

#[test]
fn test_unknown_start_category_is_not_found() {
    let mut state = start_on_category(SourceKind::Static, "underwater");
    state.start();
    update(&mut state, Action::DataLoaded(DataPayload::Document(make_document())));

    assert_eq!(state.page, Page::Category("underwater".into()));
    assert!(matches!(
        state.category_view("underwater"),
        CategoryView::NotFound(_)
    ));
    assert!(state.displayed_photos().is_empty());

    update(&mut state, Action::Select);
    assert_eq!(state.page, Page::Portfolio);
    assert_eq!(state.content_len(), 3);
}

#[test]
fn test_category_view_before_load() {
    let state = api_state();
    assert_eq!(state.category_view("weddings"), CategoryView::Loading);
}

#[test]
fn test_api_category_page_defers_photos_until_id_known() {
    let mut state = api_state();
    let queries = state.page_queries(&Page::Category("weddings".into()));
    assert_eq!(queries.len(), 2);
    state.page = Page::Category("weddings".into());
    let requests: Vec<ResourceRequest> = state
        .mount_effects()
        .into_iter()
        .filter_map(|e| match e {
            SideEffect::Fetch { request, force } => {
                assert!(!force);
                Some(request)
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        requests[1],
        ResourceRequest::category_photos(Some("weddings")).unwrap()
    );
}

// --- Gallery ---

#[test]
fn test_static_filter_is_local() {
    let mut state = static_state();
    go_to(&mut state, Page::Portfolio);
    assert_eq!(state.content_len(), 3);

    let effects = update(&mut state, Action::NextFilter);
    assert!(effects.is_empty());
    assert_eq!(state.filter, PhotoFilter::Category("weddings".into()));
    assert_eq!(state.content_len(), 2);
}

#[test]
fn test_filter_only_applies_on_portfolio() {
    let mut state = static_state();
    update(&mut state, Action::NextFilter);
    assert_eq!(state.filter, PhotoFilter::All);
}

#[test]
fn test_api_filter_refetches_first_page() {
    let mut state = api_state();
    go_to(&mut state, Page::Portfolio);
    update(
        &mut state,
        Action::DataLoaded(DataPayload::Categories(vec![make_category(
            "weddings", "Weddings",
        )])),
    );
    state.photo_page = 3;

    let effects = update(&mut state, Action::NextFilter);
    assert_eq!(
        effects,
        vec![SideEffect::Fetch {
            request: ResourceRequest::photos(Some("weddings"), 1, 50),
            force: false,
        }]
    );
    assert_eq!(state.photo_page, 1);
    assert!(state.cache.photos.loading);
}

#[test]
fn test_api_paging() {
    let mut state = api_state();
    go_to(&mut state, Page::Portfolio);
    update(
        &mut state,
        Action::DataLoaded(DataPayload::Photos {
            category: None,
            photos: vec![make_photo("w1", "weddings")],
            pagination: Some(Pagination {
                total: 60,
                page: 1,
                per_page: 50,
                total_pages: 2,
            }),
        }),
    );

    assert!(update(&mut state, Action::PreviousPage).is_empty());
    let effects = update(&mut state, Action::NextPage);
    assert_eq!(
        fetched_requests(&effects),
        vec![ResourceRequest::photos(None, 2, 50)]
    );
    assert_eq!(state.photo_page, 2);
}

#[test]
fn test_api_unfiltered_gallery_keeps_server_order() {
    let mut state = api_state();
    go_to(&mut state, Page::Portfolio);
    update(
        &mut state,
        Action::DataLoaded(DataPayload::Photos {
            category: None,
            photos: vec![
                make_photo("b1", "portraits"),
                make_photo("a1", "weddings"),
                make_photo("b2", "portraits"),
            ],
            pagination: None,
        }),
    );
    let ids: Vec<String> = state.displayed_photos().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["b1", "a1", "b2"]);

    state.focused_pane = FocusedPane::Content;
    update(&mut state, Action::Select);
    update(&mut state, Action::LightboxNext);
    assert_eq!(state.lightbox.current().unwrap().id, "a1");
}

#[test]
fn test_filter_change_forgets_previous_page_count() {
    let mut state = api_state();
    go_to(&mut state, Page::Portfolio);
    update(
        &mut state,
        Action::DataLoaded(DataPayload::Categories(vec![make_category(
            "weddings", "Weddings",
        )])),
    );
    update(
        &mut state,
        Action::DataLoaded(DataPayload::Photos {
            category: None,
            photos: vec![make_photo("w1", "weddings")],
            pagination: Some(Pagination {
                total: 120,
                page: 1,
                per_page: 50,
                total_pages: 3,
            }),
        }),
    );

    update(&mut state, Action::NextFilter);
    assert_eq!(state.cache.pagination, None);
    assert!(update(&mut state, Action::NextPage).is_empty());
    assert_eq!(state.photo_page, 1);
}

#[test]
fn test_view_mode_toggle() {
    let mut state = static_state();
    let before = state.view_mode;
    update(&mut state, Action::ToggleViewMode);
    assert_ne!(state.view_mode, before);
}

// --- Lightbox ---

#[test]
fn test_lightbox_locks_scrolling() {
    let mut state = static_state();
    go_to(&mut state, Page::Portfolio);
    state.focused_pane = FocusedPane::Content;
    update(&mut state, Action::MoveDown);
    update(&mut state, Action::Select);

    assert!(state.lightbox.is_open());
    assert_eq!(state.lightbox.index(), Some(1));
    assert!(state.scroll_locked);

    update(&mut state, Action::MoveDown);
    assert_eq!(state.content_cursor, 1);

    update(&mut state, Action::LightboxNext);
    assert_eq!(state.lightbox.current().unwrap().id, "p1");

    update(&mut state, Action::Back);
    assert!(!state.lightbox.is_open());
    assert!(!state.scroll_locked);
}

#[test]
fn test_open_in_browser_uses_lightbox_photo() {
    let mut state = static_state();
    go_to(&mut state, Page::Portfolio);
    state.focused_pane = FocusedPane::Content;
    update(&mut state, Action::Select);
    update(&mut state, Action::LightboxPrevious);

    let effects = update(&mut state, Action::OpenInBrowser);
    assert_eq!(
        effects,
        vec![SideEffect::OpenUrl("https://img.example.com/p1.jpg".into())]
    );
}

#[test]
fn test_lightbox_on_empty_gallery_stays_closed() {
    let mut state = api_state();
    go_to(&mut state, Page::Portfolio);
    state.focused_pane = FocusedPane::Content;
    update(&mut state, Action::Select);
    assert!(!state.lightbox.is_open());
    assert!(!state.scroll_locked);
}

#[test]
fn test_navigation_closes_lightbox() {
    let mut state = static_state();
    go_to(&mut state, Page::Portfolio);
    state.focused_pane = FocusedPane::Content;
    update(&mut state, Action::Select);
    go_to(&mut state, Page::About);
    assert!(!state.lightbox.is_open());
    assert!(!state.scroll_locked);
}

// --- Carousel ---

#[test]
fn test_tick_rotates_testimonials() {
    let mut state = static_state();
    let due = state.next_deadline().unwrap();
    update(&mut state, Action::Tick(due));
    assert_eq!(state.carousel.index(), 1);
}

#[test]
fn test_hidden_terminal_pauses_rotation() {
    let mut state = static_state();
    update(&mut state, Action::VisibilityChanged(false));
    assert!(state.next_deadline().is_none());
    update(&mut state, Action::Tick(Instant::now() + Duration::from_secs(60)));
    assert_eq!(state.carousel.index(), 0);
}

#[test]
fn test_manual_testimonial_choice() {
    let mut state = static_state();
    update(&mut state, Action::SetTestimonial(1));
    assert_eq!(state.carousel.index(), 1);
    update(&mut state, Action::StepTestimonial { forward: true });
    assert_eq!(state.carousel.index(), 0);
}

// --- Contact ---

fn type_text(state: &mut AppState, text: &str) {
    for ch in text.chars() {
        update(state, Action::FormInput(ch));
    }
}

#[test]
fn test_contact_flow_end_to_end() {
    let mut state = static_state();
    go_to(&mut state, Page::Contact);
    state.focused_pane = FocusedPane::Content;
    assert!(state.is_form_mode());

    type_text(&mut state, "Jane Doe");
    update(&mut state, Action::FormNextField);
    type_text(&mut state, "jane@example.com");
    update(&mut state, Action::FormNextField);
    update(&mut state, Action::FormNextField);
    type_text(&mut state, "Wedding shoot");
    update(&mut state, Action::FormNextField);
    update(&mut state, Action::FormCycleCategory { forward: true });
    update(&mut state, Action::FormNextField);
    update(&mut state, Action::FormNextField);
    type_text(&mut state, "Looking for a photographer for our June wedding.");

    let effects = update(&mut state, Action::SubmitContact);
    let [SideEffect::SubmitContact(submission)] = effects.as_slice() else {
        panic!("expected one submission, got {:?}", effects);
    };
    assert_eq!(submission.category, "weddings");

    // A second press while in flight does nothing.
    assert!(update(&mut state, Action::SubmitContact).is_empty());

    update(&mut state, Action::ContactSubmitted { server_message: None });
    let SubmitStatus::Sent(receipt) = &state.contact.status else {
        panic!("expected the success view");
    };
    assert_eq!(receipt.name, "Jane Doe");
    assert_eq!(receipt.subject, "Wedding shoot");
    assert_eq!(receipt.category, "Weddings");

    update(&mut state, Action::SendAnother);
    assert_eq!(state.contact.status, SubmitStatus::Editing);
}

#[test]
fn test_contact_other_category_name() {
    let mut state = static_state();
    let options = state.contact_category_options();
    assert_eq!(options, vec!["weddings", "portraits", "other"]);

    state.contact.form.name = "Jane Doe".into();
    state.contact.form.email = "jane@example.com".into();
    state.contact.form.subject = "Something else".into();
    state.contact.form.category = "other".into();
    state.contact.form.message = "A project that fits no category.".into();

    assert_eq!(update(&mut state, Action::SubmitContact).len(), 1);
    update(&mut state, Action::ContactSubmitted { server_message: None });
    let SubmitStatus::Sent(receipt) = &state.contact.status else {
        panic!("expected the success view");
    };
    assert_eq!(receipt.category, "Other");
}

#[test]
fn test_contact_failure_shows_error_then_dismisses() {
    let mut state = static_state();
    state.contact.form.name = "Jane Doe".into();
    state.contact.form.email = "jane@example.com".into();
    state.contact.form.subject = "Wedding shoot".into();
    state.contact.form.category = "weddings".into();
    state.contact.form.message = "Looking for a photographer.".into();

    update(&mut state, Action::SubmitContact);
    update(&mut state, Action::ContactFailed("Could not send your message: 502".into()));
    assert_eq!(state.contact.status, SubmitStatus::Editing);
    assert!(state.contact.error.is_some());

    let deadline = state.contact.error_deadline().unwrap();
    update(&mut state, Action::Tick(deadline));
    assert!(state.contact.error.is_none());
    assert_eq!(state.contact.form.name, "Jane Doe");
}

#[test]
fn test_invalid_contact_never_submits() {
    let mut state = static_state();
    state.contact.form.name = "A".into();
    state.contact.form.email = "bad".into();
    state.contact.form.subject = "Hi".into();
    state.contact.form.message = "short".into();

    assert!(update(&mut state, Action::SubmitContact).is_empty());
    assert_eq!(state.contact.status, SubmitStatus::Editing);
    assert!(state.contact.error.is_some());
}

#[test]
fn test_quit() {
    let mut state = static_state();
    update(&mut state, Action::Quit);
    assert!(state.should_quit);
}
