use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
};

use crate::app::contact::{FormField, SubmitStatus};
use crate::app::gallery::{PhotoFilter, ViewMode};
use crate::app::state::{AppState, CategoryView};
use crate::content::{Photo, SourceKind};
use crate::ui::theme;
use crate::ui::widgets::{pane_block, render_message};
use crate::util::time::{format_long_date, format_short_date};

const GRID_COLUMNS: usize = 3;

const EMPTY_GALLERY: &str =
    "No photos in this collection yet. Planning a shoot? Say hello on the Contact page.";

fn retry_hint(error: &str) -> String {
    format!("{}\n\nPress r to retry.", error)
}

fn cursor_style(selected: bool, otherwise: Style) -> Style {
    if selected { theme::HIGHLIGHT } else { otherwise }
}

pub fn render_home(f: &mut Frame, area: Rect, state: &AppState, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(5),
            Constraint::Length(7),
        ])
        .split(area);

    render_hero(f, chunks[0], state);

    // Categories
    let block = pane_block("Collections", focused);
    let categories = state.cache.categories();
    if categories.is_empty() {
        let (msg, style) = match &state.cache.categories.error {
            Some(e) => (retry_hint(e), theme::ERROR),
            None if state.cache.categories.loading => ("Loading...".into(), theme::DIM),
            None => ("No collections yet".into(), theme::DIM),
        };
        render_message(f, chunks[1], block, &msg, style);
    } else {
        let items: Vec<ListItem> = categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let selected = focused && i == state.content_cursor;
                ListItem::new(vec![
                    Line::from(Span::styled(
                        category.name.as_str(),
                        cursor_style(selected, theme::HEADER),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", category.description),
                        cursor_style(selected, theme::DIM),
                    )),
                ])
            })
            .collect();
        let mut list_state = ListState::default().with_selected(Some(state.content_cursor));
        f.render_stateful_widget(List::new(items).block(block), chunks[1], &mut list_state);
    }

    render_testimonial(f, chunks[2], state);
}

fn render_hero(f: &mut Frame, area: Rect, state: &AppState) {
    let block = pane_block("Welcome", false);
    let photographer = &state.cache.photographer;

    let Some(p) = photographer.data.as_ref() else {
        let (msg, style) = match &photographer.error {
            Some(e) => (retry_hint(e), theme::ERROR),
            None => ("Loading...".into(), theme::DIM),
        };
        render_message(f, area, block, &msg, style);
        return;
    };

    let mut lines = vec![Line::from(Span::styled(p.name.as_str(), theme::TITLE))];
    let subtitle: Vec<&str> = [p.location.as_str(), p.experience.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !subtitle.is_empty() {
        lines.push(Line::from(Span::styled(subtitle.join(" · "), theme::DIM)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(p.bio.as_str()));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn render_testimonial(f: &mut Frame, area: Rect, state: &AppState) {
    let block = pane_block("Kind words", false);
    let testimonials = state.cache.testimonials();

    let Some(current) = testimonials.get(state.carousel.index()) else {
        let (msg, style) = match &state.cache.testimonials.error {
            Some(e) => (retry_hint(e), theme::ERROR),
            None if state.cache.testimonials.loading => ("Loading...".into(), theme::DIM),
            None => ("No testimonials yet".into(), theme::DIM),
        };
        render_message(f, area, block, &msg, style);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(format!("“{}”", current.text), theme::QUOTE)),
        Line::from(""),
    ];

    let mut byline = vec![Span::styled(format!("- {}", current.name), theme::HEADER)];
    if let Some(category) = current.category.as_deref() {
        byline.push(Span::styled(
            format!("  {}", state.cache.category_name(category)),
            theme::CATEGORY_TAG,
        ));
    }
    lines.push(Line::from(byline));

    if testimonials.len() > 1 {
        let dots: Vec<Span> = state
            .carousel
            .indicators()
            .into_iter()
            .map(|active| {
                if active {
                    Span::styled("● ", theme::INDICATOR_ON)
                } else {
                    Span::styled("○ ", theme::INDICATOR_OFF)
                }
            })
            .collect();
        lines.push(Line::from(dots));
    }

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

pub fn render_portfolio(f: &mut Frame, area: Rect, state: &AppState, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    render_filter_bar(f, chunks[0], state);

    let photos = state.displayed_photos();
    let mut title = format!("Portfolio ({}) [{}]", photos.len(), state.view_mode.label());
    if state.source == SourceKind::Api
        && let Some(p) = state.cache.pagination
    {
        title.push_str(&format!(" page {}/{}", p.page, p.total_pages.max(1)));
    }
    let block = pane_block(&title, focused);

    if photos.is_empty() {
        let (msg, style) = match &state.cache.photos.error {
            Some(e) => (retry_hint(e), theme::ERROR),
            None if state.cache.photos.loading => ("Loading...".into(), theme::DIM),
            None => (EMPTY_GALLERY.into(), theme::DIM),
        };
        render_message(f, chunks[1], block, &msg, style);
        return;
    }

    render_gallery(f, chunks[1], state, &photos, block, focused);
}

fn render_filter_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![filter_span("All", state.filter == PhotoFilter::All)];
    for category in state.cache.categories() {
        spans.push(Span::raw(" "));
        let active = state.filter.category_id() == Some(category.id.as_str());
        spans.push(filter_span(&category.name, active));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn filter_span(label: &str, active: bool) -> Span<'static> {
    if active {
        Span::styled(format!("[{}]", label), theme::NAV_ACTIVE)
    } else {
        Span::styled(format!(" {} ", label), theme::DIM)
    }
}

fn render_gallery(
    f: &mut Frame,
    area: Rect,
    state: &AppState,
    photos: &[Photo],
    block: ratatui::widgets::Block<'_>,
    focused: bool,
) {
    match state.view_mode {
        ViewMode::Grid => {
            let rows: Vec<Row> = photos
                .chunks(GRID_COLUMNS)
                .enumerate()
                .map(|(r, chunk)| {
                    let cells: Vec<Cell> = chunk
                        .iter()
                        .enumerate()
                        .map(|(c, photo)| {
                            let selected =
                                focused && r * GRID_COLUMNS + c == state.content_cursor;
                            Cell::from(Text::from(vec![
                                Line::from(Span::styled(
                                    photo.title.clone(),
                                    cursor_style(selected, theme::HEADER),
                                )),
                                Line::from(Span::styled(
                                    format!(
                                        "{} · {}",
                                        state.cache.category_name(&photo.category),
                                        format_short_date(&photo.date)
                                    ),
                                    cursor_style(selected, theme::DIM),
                                )),
                            ]))
                        })
                        .collect();
                    Row::new(cells).height(3)
                })
                .collect();

            let widths = [Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS];
            let mut table_state =
                TableState::default().with_selected(Some(state.content_cursor / GRID_COLUMNS));
            let table = Table::new(rows, widths).block(block);
            f.render_stateful_widget(table, area, &mut table_state);
        }
        ViewMode::List => {
            let items: Vec<ListItem> = photos
                .iter()
                .enumerate()
                .map(|(i, photo)| {
                    let selected = focused && i == state.content_cursor;
                    let mut lines = vec![Line::from(vec![
                        Span::styled(
                            format!("{:<40}", photo.title),
                            cursor_style(selected, theme::HEADER),
                        ),
                        Span::styled(
                            format!("{:<20}", state.cache.category_name(&photo.category)),
                            cursor_style(selected, theme::CATEGORY_TAG),
                        ),
                        Span::styled(
                            format!("Captured on {}", format_long_date(&photo.date)),
                            cursor_style(selected, theme::DIM),
                        ),
                    ])];
                    if let Some(description) = photo.description.as_deref() {
                        lines.push(Line::from(Span::styled(
                            format!("  {}", description),
                            theme::DIM,
                        )));
                    }
                    ListItem::new(lines)
                })
                .collect();
            let mut list_state = ListState::default().with_selected(Some(state.content_cursor));
            f.render_stateful_widget(List::new(items).block(block), area, &mut list_state);
        }
    }
}

pub fn render_category(f: &mut Frame, area: Rect, state: &AppState, id: &str, focused: bool) {
    let category = match state.category_view(id) {
        CategoryView::Loading => {
            render_message(f, area, pane_block(id, focused), "Loading...", theme::DIM);
            return;
        }
        CategoryView::Failed(error) => {
            render_message(f, area, pane_block(id, focused), &retry_hint(&error), theme::ERROR);
            return;
        }
        CategoryView::NotFound(error) => {
            let msg = format!(
                "{}\n\nThis collection does not exist. Press Enter to browse the full portfolio.",
                error
            );
            render_message(f, area, pane_block("Not found", focused), &msg, theme::WARNING);
            return;
        }
        CategoryView::Found(category) => category,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let header = vec![
        Line::from(Span::styled(category.name.as_str(), theme::TITLE)),
        Line::from(Span::styled(category.description.as_str(), theme::DIM)),
    ];
    f.render_widget(Paragraph::new(header).wrap(Wrap { trim: true }), chunks[0]);

    let photos = state.displayed_photos();
    let block = pane_block(&format!("{} ({})", category.name, photos.len()), focused);
    if photos.is_empty() {
        let (msg, style) = match &state.cache.photos.error {
            Some(e) => (retry_hint(e), theme::ERROR),
            None if state.cache.photos.loading => ("Loading...".into(), theme::DIM),
            None => (EMPTY_GALLERY.into(), theme::DIM),
        };
        render_message(f, chunks[1], block, &msg, style);
    } else {
        render_gallery(f, chunks[1], state, &photos, block, focused);
    }

    let others: Vec<&str> = state
        .cache
        .categories()
        .iter()
        .filter(|c| c.id != category.id)
        .map(|c| c.name.as_str())
        .collect();
    if !others.is_empty() {
        let line = Line::from(vec![
            Span::styled("Other collections: ", theme::DIM),
            Span::styled(others.join(", "), theme::CATEGORY_TAG),
        ]);
        f.render_widget(Paragraph::new(line), chunks[2]);
    }
}

pub fn render_about(f: &mut Frame, area: Rect, state: &AppState, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let block = pane_block("About", focused);
    let photographer = &state.cache.photographer;
    match photographer.data.as_ref() {
        Some(p) => {
            let mut lines = vec![
                Line::from(Span::styled(p.name.as_str(), theme::TITLE)),
                Line::from(""),
                Line::from(p.bio.as_str()),
                Line::from(""),
            ];
            for (label, value) in [
                ("Experience", &p.experience),
                ("Location", &p.location),
                ("Email", &p.email),
                ("Phone", &p.phone),
            ] {
                if !value.is_empty() {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{:<12}", label), theme::DIM),
                        Span::raw(value.as_str()),
                    ]));
                }
            }
            let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
            f.render_widget(para, chunks[0]);
        }
        None => {
            let (msg, style) = match &photographer.error {
                Some(e) => (retry_hint(e), theme::ERROR),
                None => ("Loading...".into(), theme::DIM),
            };
            render_message(f, chunks[0], block, &msg, style);
        }
    }

    render_services(f, chunks[1], state);
}

fn render_services(f: &mut Frame, area: Rect, state: &AppState) {
    let block = pane_block("Services", false);
    let services = state.cache.services();
    if services.is_empty() {
        let (msg, style) = match &state.cache.services.error {
            Some(e) => (retry_hint(e), theme::ERROR),
            None if state.cache.services.loading => ("Loading...".into(), theme::DIM),
            None => ("No services listed".into(), theme::DIM),
        };
        render_message(f, area, block, &msg, style);
        return;
    }

    let mut lines = Vec::new();
    for service in services {
        let mut heading = vec![Span::styled(service.name.as_str(), theme::HEADER)];
        if !service.price.is_empty() {
            heading.push(Span::styled(format!("  {}", service.price), theme::PRICE));
        }
        if !service.duration.is_empty() {
            heading.push(Span::styled(format!("  ({})", service.duration), theme::DIM));
        }
        lines.push(Line::from(heading));
        if !service.description.is_empty() {
            lines.push(Line::from(format!("  {}", service.description)));
        }
        lines.push(Line::from(""));
    }

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

pub fn render_contact(f: &mut Frame, area: Rect, state: &AppState, focused: bool) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(columns[0]);

    let block = pane_block("Get in touch", false);
    match state.cache.photographer.data.as_ref() {
        Some(p) => {
            let details = [
                ("Email", &p.email),
                ("Phone", &p.phone),
                ("Location", &p.location),
            ];
            let lines: Vec<Line> = details
                .into_iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(label, value)| {
                    Line::from(vec![
                        Span::styled(format!("{:<10}", label), theme::DIM),
                        Span::raw(value.as_str()),
                    ])
                })
                .collect();
            f.render_widget(Paragraph::new(lines).block(block), left[0]);
        }
        None => render_message(f, left[0], block, "Loading...", theme::DIM),
    }
    render_services(f, left[1], state);

    render_contact_form(f, columns[1], state, focused);
}

fn render_contact_form(f: &mut Frame, area: Rect, state: &AppState, focused: bool) {
    let contact = &state.contact;
    let block = pane_block("Send a message", focused);

    if let SubmitStatus::Sent(receipt) = &contact.status {
        let mut lines = vec![
            Line::from(Span::styled("Message sent!", theme::SUCCESS)),
            Line::from(""),
            Line::from(format!(
                "Thank you, {}. I'll get back to you about \"{}\" soon.",
                receipt.name, receipt.subject
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Project type  ", theme::DIM),
                Span::raw(receipt.category.as_str()),
            ]),
        ];
        if let Some(date) = receipt.date {
            lines.push(Line::from(vec![
                Span::styled("Preferred date  ", theme::DIM),
                Span::raw(format_long_date(&date)),
            ]));
        }
        if let Some(message) = receipt.server_message.as_deref() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(message, theme::DIM)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Enter to send another message",
            theme::DIM,
        )));
        let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        f.render_widget(para, area);
        return;
    }

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let active = focused && contact.focus == field;
        let value = if field == FormField::Category {
            match contact.form.category.as_str() {
                "" => "< choose >".to_string(),
                id => format!("< {} >", state.cache.contact_category_name(id)),
            }
        } else {
            let mut value = contact.form.field(field).to_string();
            if active {
                value.push('_');
            }
            value
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<28}", field.label()),
                if active { theme::NAV_ACTIVE } else { theme::DIM },
            ),
            Span::styled(value, if active { theme::HEADER } else { Style::default() }),
        ]));
    }

    lines.push(Line::from(""));
    if contact.is_submitting() {
        lines.push(Line::from(Span::styled("Sending...", theme::WARNING)));
    } else if let Some(error) = contact.error.as_deref() {
        lines.push(Line::from(Span::styled(error, theme::ERROR)));
    } else {
        lines.push(Line::from(Span::styled("Press Enter to send", theme::DIM)));
    }

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, area);
}
