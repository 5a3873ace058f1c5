use std::time::Instant;

use tracing::debug;

use crate::app::actions::{Action, DataPayload, SideEffect};
use crate::app::contact::SubmitStatus;
use crate::app::gallery::PhotoFilter;
use crate::app::state::{AppState, CategoryView, FocusedPane, Page};
use crate::content::{ResourceRequest, SourceKind};

/// Apply `action` to the state and return the work it asks for. Fetches
/// among the returned effects already have their loading flags set.
pub fn update(state: &mut AppState, action: Action) -> Vec<SideEffect> {
    let effects = reduce(state, action);
    for effect in &effects {
        state.mark_started(effect);
    }
    effects
}

fn reduce(state: &mut AppState, action: Action) -> Vec<SideEffect> {
    let now = Instant::now();
    match action {
        Action::Quit => {
            state.should_quit = true;
            vec![]
        }
        Action::MoveUp => {
            match state.focused_pane {
                FocusedPane::Navigation => {
                    if state.nav_cursor > 0 {
                        state.nav_cursor -= 1;
                    }
                }
                FocusedPane::Content => {
                    if !state.scroll_locked && state.content_cursor > 0 {
                        state.content_cursor -= 1;
                    }
                }
            }
            vec![]
        }
        Action::MoveDown => {
            match state.focused_pane {
                FocusedPane::Navigation => {
                    if state.nav_cursor + 1 < state.nav_nodes.len() {
                        state.nav_cursor += 1;
                    }
                }
                FocusedPane::Content => {
                    let max = state.content_len().saturating_sub(1);
                    if !state.scroll_locked && state.content_cursor < max {
                        state.content_cursor += 1;
                    }
                }
            }
            vec![]
        }
        Action::Select => match state.focused_pane {
            FocusedPane::Navigation => match state.nav_nodes.get(state.nav_cursor).cloned() {
                Some(node) => navigate(state, node.page(), now),
                None => vec![],
            },
            FocusedPane::Content => select_content(state, now),
        },
        Action::Back => {
            if state.lightbox.is_open() {
                close_lightbox(state);
            } else if state.focused_pane == FocusedPane::Content {
                state.focused_pane = FocusedPane::Navigation;
            }
            vec![]
        }
        Action::SwitchPane => {
            state.focused_pane = match state.focused_pane {
                FocusedPane::Navigation => FocusedPane::Content,
                FocusedPane::Content => FocusedPane::Navigation,
            };
            vec![]
        }
        Action::Refresh => state.refetch_effects(),
        Action::OpenInBrowser => {
            let photo = state
                .lightbox
                .current()
                .cloned()
                .or_else(|| state.selected_photo());
            match photo {
                Some(photo) if !photo.image.is_empty() => vec![SideEffect::OpenUrl(photo.image)],
                _ => vec![],
            }
        }

        Action::NextFilter | Action::PreviousFilter => {
            if state.page != Page::Portfolio {
                return vec![];
            }
            let forward = matches!(action, Action::NextFilter);
            let ids: Vec<&str> = state
                .cache
                .categories()
                .iter()
                .map(|c| c.id.as_str())
                .collect();
            let filter = state.filter.cycle(&ids, forward);
            change_filter(state, filter)
        }
        Action::ToggleViewMode => {
            state.view_mode = state.view_mode.toggle();
            vec![]
        }
        Action::NextPage | Action::PreviousPage => {
            if state.page != Page::Portfolio || state.source != SourceKind::Api {
                return vec![];
            }
            let target = if matches!(action, Action::NextPage) {
                match state.cache.pagination {
                    Some(p) if p.has_next() => state.photo_page + 1,
                    _ => return vec![],
                }
            } else if state.photo_page > 1 {
                state.photo_page - 1
            } else {
                return vec![];
            };
            state.photo_page = target;
            state.content_cursor = 0;
            vec![photos_fetch(state)]
        }

        Action::LightboxNext => {
            state.lightbox.next();
            vec![]
        }
        Action::LightboxPrevious => {
            state.lightbox.previous();
            vec![]
        }
        Action::LightboxClose => {
            close_lightbox(state);
            vec![]
        }

        Action::SetTestimonial(index) => {
            state.carousel.set(index, now);
            vec![]
        }
        Action::StepTestimonial { forward } => {
            state.carousel.step(forward, now);
            vec![]
        }
        Action::VisibilityChanged(visible) => {
            debug!(visible = visible, "Visibility changed");
            state.carousel.set_visible(visible, now);
            vec![]
        }

        Action::FormInput(ch) => {
            state.contact.input(ch);
            vec![]
        }
        Action::FormBackspace => {
            state.contact.backspace();
            vec![]
        }
        Action::FormNextField => {
            state.contact.focus = state.contact.focus.next();
            vec![]
        }
        Action::FormPreviousField => {
            state.contact.focus = state.contact.focus.previous();
            vec![]
        }
        Action::FormCycleCategory { forward } => {
            let options = state.contact_category_options();
            state.contact.cycle_category(&options, forward);
            vec![]
        }
        Action::SubmitContact => match state.contact.begin_submit(now) {
            Some(submission) => vec![SideEffect::SubmitContact(submission)],
            None => vec![],
        },
        Action::SendAnother => {
            state.contact.send_another();
            vec![]
        }

        Action::DataLoaded(payload) => {
            apply_payload(state, payload, now);
            state.last_refresh = Some(chrono::Utc::now());
            vec![]
        }
        Action::LoadFailed { kind, error } => {
            state.cache.fail(kind, &error);
            vec![]
        }
        Action::ContactSubmitted { server_message } => {
            let category = match &state.contact.status {
                SubmitStatus::Submitting(submission) => submission.category.clone(),
                _ => return vec![],
            };
            let name = state.cache.contact_category_name(&category).to_string();
            state.contact.complete(&name, server_message);
            vec![]
        }
        Action::ContactFailed(error) => {
            state.contact.fail(error, now);
            vec![]
        }

        Action::Tick(at) => {
            state.carousel.tick(at);
            state.contact.expire(at);
            vec![]
        }
    }
}

fn navigate(state: &mut AppState, page: Page, now: Instant) -> Vec<SideEffect> {
    debug!(page = ?page, "Navigating");
    close_lightbox(state);
    state.page = page;
    state.content_cursor = 0;
    state.carousel.set_active(state.page == Page::Home, now);
    state.mount_effects()
}

fn select_content(state: &mut AppState, now: Instant) -> Vec<SideEffect> {
    match state.page.clone() {
        Page::Home => {
            let id = state
                .cache
                .categories()
                .get(state.content_cursor)
                .map(|c| c.id.clone());
            match id {
                Some(id) => navigate(state, Page::Category(id), now),
                None => vec![],
            }
        }
        Page::Category(id) => {
            if matches!(state.category_view(&id), CategoryView::NotFound(_)) {
                // Back to the full gallery.
                return navigate(state, Page::Portfolio, now);
            }
            open_lightbox(state);
            vec![]
        }
        Page::Portfolio => {
            open_lightbox(state);
            vec![]
        }
        Page::About | Page::Contact => vec![],
    }
}

fn open_lightbox(state: &mut AppState) {
    let photos = state.displayed_photos();
    if state.lightbox.open(photos, state.content_cursor) {
        state.scroll_locked = true;
    }
}

fn close_lightbox(state: &mut AppState) {
    if state.lightbox.close() {
        state.scroll_locked = false;
    }
}

fn change_filter(state: &mut AppState, filter: PhotoFilter) -> Vec<SideEffect> {
    if state.filter == filter {
        return vec![];
    }
    state.filter = filter;
    state.photo_page = 1;
    state.content_cursor = 0;
    // The previous filter's page count no longer applies.
    state.cache.pagination = None;
    match state.source {
        SourceKind::Api => vec![photos_fetch(state)],
        SourceKind::Static => vec![],
    }
}

fn photos_fetch(state: &AppState) -> SideEffect {
    SideEffect::Fetch {
        request: ResourceRequest::photos(
            state.filter.category_id(),
            state.photo_page,
            state.per_page,
        ),
        force: false,
    }
}

fn apply_payload(state: &mut AppState, payload: DataPayload, now: Instant) {
    match payload {
        DataPayload::Document(doc) => {
            state.cache.install_document(doc);
            state.carousel.reset(state.cache.testimonials().len(), now);
            state.rebuild_nav_tree();
        }
        DataPayload::Photographer(photographer) => {
            state.cache.photographer.resolve(photographer);
        }
        DataPayload::Categories(categories) => {
            state.cache.categories.resolve(categories);
            state.rebuild_nav_tree();
        }
        DataPayload::Photos {
            category,
            photos,
            pagination,
        } => {
            state.cache.install_photos(category.as_deref(), photos);
            if pagination.is_some() {
                state.cache.pagination = pagination;
            }
        }
        DataPayload::Testimonials(testimonials) => {
            let len = testimonials.len();
            state.cache.testimonials.resolve(testimonials);
            state.carousel.reset(len, now);
        }
        DataPayload::Services(services) => {
            state.cache.services.resolve(services);
        }
    }
    state.clamp_content_cursor();
}
