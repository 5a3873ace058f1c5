use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, error, info};

use crate::app::actions::{Action, DataPayload, SideEffect};
use crate::app::contact::{FormField, SubmitStatus};
use crate::app::state::{AppState, Page, StateSettings};
use crate::app::update::update;
use crate::app::view;
use crate::cache::SnapshotStore;
use crate::content::envelope::Fetched;
use crate::content::{
    Category, ContentSource, Pagination, Photo, Photographer, ResourceKind, ResourceRequest,
    Service, Testimonial,
};
use crate::error::PortfolioError;
use crate::ui::widgets::lightbox_area;

pub async fn run(
    source: ContentSource,
    settings: StateSettings,
    snapshots: Option<SnapshotStore>,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_loop(&mut terminal, source, settings, snapshots).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;

    result
}

/// Spawns side effects; results come back on the action channel.
struct EffectRunner {
    source: ContentSource,
    snapshots: Option<SnapshotStore>,
    action_tx: mpsc::UnboundedSender<Action>,
    semaphore: Arc<Semaphore>,
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    source: ContentSource,
    settings: StateSettings,
    snapshots: Option<SnapshotStore>,
) -> Result<()> {
    let mut state = AppState::new(source.kind(), source.label(), settings);

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let runner = EffectRunner {
        source,
        snapshots,
        action_tx,
        semaphore: Arc::new(Semaphore::new(4)),
    };

    // Initial data load
    for effect in state.start() {
        runner.spawn(effect);
    }

    let mut event_stream = crossterm::event::EventStream::new();

    loop {
        // Render
        terminal.draw(|f| view::render(f, &state))?;

        if state.should_quit {
            break;
        }

        let area = terminal
            .size()
            .map(|s| Rect::new(0, 0, s.width, s.height))
            .unwrap_or_default();

        // Wait for events
        tokio::select! {
            // Terminal events
            maybe_event = event_stream.next() => {
                if let Some(Ok(event)) = maybe_event
                    && let Some(action) = map_event_to_action(&event, &state, area) {
                        for effect in update(&mut state, action) {
                            runner.spawn(effect);
                        }
                    }
            }
            // Actions from background tasks
            Some(action) = action_rx.recv() => {
                for effect in update(&mut state, action) {
                    runner.spawn(effect);
                }
            }
            // Carousel rotation and error dismissal
            _ = wait_for(state.next_deadline()) => {
                for effect in update(&mut state, Action::Tick(Instant::now())) {
                    runner.spawn(effect);
                }
            }
        }
    }

    info!("folio shutting down");
    Ok(())
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

/// Translate a terminal event. `area` is the full terminal, used to hit
/// test mouse clicks against the lightbox.
pub fn map_event_to_action(event: &Event, state: &AppState, area: Rect) -> Option<Action> {
    let key = match event {
        Event::FocusLost => return Some(Action::VisibilityChanged(false)),
        Event::FocusGained => return Some(Action::VisibilityChanged(true)),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => {
            if !state.lightbox.is_open() {
                return None;
            }
            let modal = lightbox_area(area);
            let inside = *column >= modal.x
                && *column < modal.x + modal.width
                && *row >= modal.y
                && *row < modal.y + modal.height;
            // Clicking the backdrop closes; clicking the photo does not.
            return (!inside).then_some(Action::LightboxClose);
        }
        Event::Key(key) => key,
        _ => return None,
    };

    let KeyEvent {
        code,
        modifiers,
        kind: event::KeyEventKind::Press,
        ..
    } = key
    else {
        return None;
    };

    if *code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    // Lightbox swallows everything while open
    if state.lightbox.is_open() {
        return match code {
            KeyCode::Right => Some(Action::LightboxNext),
            KeyCode::Left => Some(Action::LightboxPrevious),
            KeyCode::Esc => Some(Action::LightboxClose),
            KeyCode::Char('o') => Some(Action::OpenInBrowser),
            _ => None,
        };
    }

    if state.is_form_mode() {
        return map_form_key(*code, *modifiers, state);
    }

    // Normal mode
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => Some(Action::Select),
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => Some(Action::Back),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchPane),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('o') => Some(Action::OpenInBrowser),
        KeyCode::Char('f') => Some(Action::NextFilter),
        KeyCode::Char('F') => Some(Action::PreviousFilter),
        KeyCode::Char('v') => Some(Action::ToggleViewMode),
        KeyCode::Char(']') => Some(Action::NextPage),
        KeyCode::Char('[') => Some(Action::PreviousPage),
        KeyCode::Char('<') | KeyCode::Char(',') if state.page == Page::Home => {
            Some(Action::StepTestimonial { forward: false })
        }
        KeyCode::Char('>') | KeyCode::Char('.') if state.page == Page::Home => {
            Some(Action::StepTestimonial { forward: true })
        }
        KeyCode::Char(c @ '1'..='9') if state.page == Page::Home => {
            let index = c.to_digit(10).map(|d| d as usize - 1)?;
            Some(Action::SetTestimonial(index))
        }
        _ => None,
    }
}

fn map_form_key(code: KeyCode, modifiers: KeyModifiers, state: &AppState) -> Option<Action> {
    if matches!(state.contact.status, SubmitStatus::Sent(_)) {
        return match code {
            KeyCode::Enter | KeyCode::Char('n') => Some(Action::SendAnother),
            KeyCode::Esc => Some(Action::Back),
            _ => None,
        };
    }

    let on_category = state.contact.focus == FormField::Category;
    match code {
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Tab | KeyCode::Down => Some(Action::FormNextField),
        KeyCode::BackTab | KeyCode::Up => Some(Action::FormPreviousField),
        KeyCode::Left if on_category => Some(Action::FormCycleCategory { forward: false }),
        KeyCode::Right if on_category => Some(Action::FormCycleCategory { forward: true }),
        KeyCode::Enter => Some(Action::SubmitContact),
        KeyCode::Backspace => Some(Action::FormBackspace),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::FormInput(c))
        }
        _ => None,
    }
}

impl EffectRunner {
    fn spawn(&self, effect: SideEffect) {
        match effect {
            SideEffect::LoadDocument => {
                let source = self.source.clone();
                let tx = self.action_tx.clone();

                tokio::spawn(async move {
                    debug!("Loading content document");
                    match source.load_document().await {
                        Ok(doc) => {
                            let _ = tx.send(Action::DataLoaded(DataPayload::Document(doc)));
                        }
                        Err(e) => {
                            error!(error = %e, "Failed to load content document");
                            let _ = tx.send(Action::LoadFailed {
                                kind: ResourceKind::Document,
                                error: e.to_string(),
                            });
                        }
                    }
                });
            }
            SideEffect::Fetch { request, force } => {
                let source = self.source.clone();
                let snapshots = self.snapshots.clone();
                let tx = self.action_tx.clone();
                let sem = self.semaphore.clone();

                tokio::spawn(async move {
                    let _permit = sem.acquire().await;
                    debug!(path = %request.path(), force = force, "Fetching");

                    let store = snapshots.as_ref();
                    let result = match &request {
                        ResourceRequest::Photographer => {
                            fetch_cached::<Photographer>(&source, store, &request, force)
                                .await
                                .map(|f| DataPayload::Photographer(f.data))
                        }
                        ResourceRequest::Categories { .. } => {
                            fetch_cached::<Vec<Category>>(&source, store, &request, force)
                                .await
                                .map(|f| DataPayload::Categories(f.data))
                        }
                        ResourceRequest::Photos { category, .. } => {
                            fetch_cached::<Vec<Photo>>(&source, store, &request, force)
                                .await
                                .map(|f| DataPayload::Photos {
                                    category: category.clone(),
                                    photos: f.data,
                                    pagination: f.pagination,
                                })
                        }
                        ResourceRequest::CategoryPhotos { category, .. } => {
                            fetch_cached::<Vec<Photo>>(&source, store, &request, force)
                                .await
                                .map(|f| DataPayload::Photos {
                                    category: Some(category.clone()),
                                    photos: f.data,
                                    pagination: None,
                                })
                        }
                        ResourceRequest::Testimonials { .. } => {
                            fetch_cached::<Vec<Testimonial>>(&source, store, &request, force)
                                .await
                                .map(|f| DataPayload::Testimonials(f.data))
                        }
                        ResourceRequest::Services { .. } => {
                            fetch_cached::<Vec<Service>>(&source, store, &request, force)
                                .await
                                .map(|f| DataPayload::Services(f.data))
                        }
                    };

                    match result {
                        Ok(payload) => {
                            let _ = tx.send(Action::DataLoaded(payload));
                        }
                        Err(e) => {
                            error!(path = %request.path(), error = %e, "Fetch failed");
                            let _ = tx.send(Action::LoadFailed {
                                kind: request.kind(),
                                error: e.to_string(),
                            });
                        }
                    }
                });
            }
            SideEffect::SubmitContact(submission) => {
                let source = self.source.clone();
                let tx = self.action_tx.clone();

                tokio::spawn(async move {
                    match source.submit_contact(&submission).await {
                        Ok(server_message) => {
                            info!(subject = %submission.subject, "Contact message sent");
                            let _ = tx.send(Action::ContactSubmitted { server_message });
                        }
                        Err(e) => {
                            error!(error = %e, "Contact submission failed");
                            let _ = tx.send(Action::ContactFailed(e.to_string()));
                        }
                    }
                });
            }
            SideEffect::OpenUrl(url) => {
                tokio::task::spawn_blocking(move || {
                    if let Err(e) = crate::util::browser::open_url(&url) {
                        error!(error = %e, "Failed to open URL");
                    }
                });
            }
        }
    }
}

/// Serve a fresh snapshot unless `force`, otherwise fetch and record one.
async fn fetch_cached<T>(
    source: &ContentSource,
    snapshots: Option<&SnapshotStore>,
    request: &ResourceRequest,
    force: bool,
) -> Result<Fetched<T>, PortfolioError>
where
    T: Serialize + DeserializeOwned,
{
    let key = request.cache_key();
    if !force
        && let Some(store) = snapshots
        && let Some((data, pagination)) = store.load::<(T, Option<Pagination>)>(&key)
    {
        return Ok(Fetched { data, pagination });
    }

    let fetched = source.fetch::<T>(request).await?;

    if let Some(store) = snapshots
        && let Err(e) = store.save(&key, &(&fetched.data, &fetched.pagination))
    {
        error!(key = %key, error = %e, "Failed to save snapshot");
    }

    Ok(fetched)
}
