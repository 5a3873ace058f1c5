use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::app::contact::SubmitStatus;
use crate::app::state::{AppState, FocusedPane, NavNode, Page};
use crate::ui::{pages, theme};
use crate::util::time::{format_long_date, relative_time};

pub fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        theme::BORDER_FOCUSED
    } else {
        theme::BORDER_UNFOCUSED
    };

    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style)
}

pub fn render_nav_pane(f: &mut Frame, area: Rect, state: &AppState) {
    let block = pane_block(
        "Navigation",
        state.focused_pane == FocusedPane::Navigation,
    );

    let items: Vec<ListItem> = state
        .nav_nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let (text, style) = match node {
                NavNode::Home => ("  Home".to_string(), theme::NAV_PAGE),
                NavNode::Portfolio => {
                    let count = state
                        .cache
                        .photos
                        .data
                        .as_ref()
                        .map(|index| index.values().map(Vec::len).sum::<usize>())
                        .unwrap_or(0);
                    let label = if count > 0 {
                        format!("  Portfolio ({})", count)
                    } else {
                        "  Portfolio".to_string()
                    };
                    (label, theme::NAV_PAGE)
                }
                NavNode::Category { name, .. } => (format!("    {}", name), theme::NAV_CATEGORY),
                NavNode::About => ("  About".to_string(), theme::NAV_PAGE),
                NavNode::Contact => ("  Contact".to_string(), theme::NAV_PAGE),
            };

            let style = if i == state.nav_cursor && state.focused_pane == FocusedPane::Navigation {
                theme::HIGHLIGHT
            } else if node.page() == state.page {
                theme::NAV_ACTIVE
            } else {
                style
            };

            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}

pub fn render_content_pane(f: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focused_pane == FocusedPane::Content;

    match &state.page {
        Page::Home => pages::render_home(f, area, state, focused),
        Page::Portfolio => pages::render_portfolio(f, area, state, focused),
        Page::Category(id) => pages::render_category(f, area, state, id, focused),
        Page::About => pages::render_about(f, area, state, focused),
        Page::Contact => pages::render_contact(f, area, state, focused),
    }
}

fn key_hints(state: &AppState) -> &'static str {
    if state.lightbox.is_open() {
        return "←/→: photos | o: open image | Esc/click outside: close";
    }
    if state.is_form_mode() {
        return match state.contact.status {
            SubmitStatus::Sent(_) => "Enter/n: send another | Esc: back",
            _ => "Tab: next field | ←/→: project type | Enter: send | Esc: back",
        };
    }
    match state.page {
        Page::Home => "j/k: nav | Tab: switch pane | Enter: select | </>: testimonials | q: quit",
        Page::Portfolio => {
            "j/k: nav | Enter: view | f/F: filter | v: layout | [/]: page | r: refresh | q: quit"
        }
        Page::Category(_) => "j/k: nav | Enter: view | o: open | r: refresh | q: quit",
        Page::About | Page::Contact => "j/k: nav | Tab: switch pane | r: refresh | q: quit",
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let hints = key_hints(state);

    let error = state.cache.first_error();
    let status = if state.cache.is_loading() {
        "Loading...".to_string()
    } else if let Some(err) = error {
        format!("Error: {} (r to retry)", err)
    } else {
        String::new()
    };

    let refresh_info = state
        .last_refresh
        .as_ref()
        .map(|t| format!(" | {}", relative_time(t)))
        .unwrap_or_default();

    let right_text = format!("{}{}", state.source_label, refresh_info);

    // Calculate available space
    let total_width = area.width as usize;
    let left_len = hints.chars().count();
    let right_len = right_text.chars().count();

    let center_width = total_width.saturating_sub(left_len + right_len + 2);
    let status = truncate(&status, center_width);
    let padding = center_width.saturating_sub(status.chars().count());

    let line = Line::from(vec![
        Span::styled(hints, theme::STATUS_BAR),
        Span::styled(" ", theme::STATUS_BAR),
        Span::styled(
            status,
            if error.is_some() {
                theme::ERROR.bg(ratatui::style::Color::DarkGray)
            } else {
                theme::STATUS_BAR
            },
        ),
        Span::styled(" ".repeat(padding), theme::STATUS_BAR),
        Span::styled(right_text, theme::STATUS_BAR),
    ]);

    let bar = Paragraph::new(line).style(theme::STATUS_BAR);
    f.render_widget(bar, area);
}

/// The lightbox modal inside the full terminal `area`. Clicks outside of
/// it count as backdrop clicks.
pub fn lightbox_area(area: Rect) -> Rect {
    let width = ((u32::from(area.width) * 4 / 5) as u16).max(30).min(area.width);
    let height = ((u32::from(area.height) * 3 / 5) as u16).max(10).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_lightbox(f: &mut Frame, state: &AppState) {
    let Some(photo) = state.lightbox.current() else {
        return;
    };

    let full = f.area();
    f.render_widget(Block::default().style(theme::BACKDROP), full);

    let modal = lightbox_area(full);
    f.render_widget(Clear, modal);

    let title = match state.lightbox.position() {
        Some((n, total)) if total > 1 => format!(" {} ({} / {}) ", photo.title, n, total),
        _ => format!(" {} ", photo.title),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::BORDER_FOCUSED);

    let mut lines = vec![
        Line::from(Span::styled(photo.title.as_str(), theme::TITLE)),
        Line::from(vec![
            Span::styled(
                state.cache.category_name(&photo.category).to_string(),
                theme::CATEGORY_TAG,
            ),
            Span::styled(format!("  {}", format_long_date(&photo.date)), theme::DIM),
        ]),
        Line::from(""),
    ];

    if let Some(description) = photo.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Line::from(description));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(photo.image.as_str(), theme::DIM)));
    lines.push(Line::from(""));

    let hint = if state.lightbox.has_navigation() {
        "← previous  → next  o open  Esc close"
    } else {
        "o open  Esc close"
    };
    lines.push(Line::from(Span::styled(hint, theme::DIM)));

    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(para, modal);
}

/// Inline error or empty-state message inside a titled pane.
pub fn render_message(
    f: &mut Frame,
    area: Rect,
    block: Block<'_>,
    message: &str,
    style: Style,
) {
    let para = Paragraph::new(Text::styled(message.to_string(), style))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}
