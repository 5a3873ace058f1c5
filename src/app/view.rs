use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::state::AppState;
use crate::ui::widgets;

pub fn render(f: &mut Frame, state: &AppState) {
    // Main layout: body + status bar
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    let body_area = vertical[0];
    let status_area = vertical[1];

    // Body: nav pane + page
    let nav_width = state.nav_width_percent;
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(nav_width),
            Constraint::Percentage(100 - nav_width),
        ])
        .split(body_area);

    widgets::render_nav_pane(f, horizontal[0], state);
    widgets::render_content_pane(f, horizontal[1], state);
    widgets::render_status_bar(f, status_area, state);

    // The lightbox covers everything, status bar included
    if state.lightbox.is_open() {
        widgets::render_lightbox(f, state);
    }
}
