use ratatui::style::{Color, Modifier, Style};

pub const HIGHLIGHT: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

pub const HEADER: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub const TITLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const DIM: Style = Style::new().fg(Color::DarkGray);

pub const ERROR: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

pub const SUCCESS: Style = Style::new().fg(Color::Green);

pub const WARNING: Style = Style::new().fg(Color::Yellow);

pub const BORDER_FOCUSED: Style = Style::new().fg(Color::Cyan);

pub const BORDER_UNFOCUSED: Style = Style::new().fg(Color::DarkGray);

pub const STATUS_BAR: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

pub const NAV_PAGE: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD);

pub const NAV_CATEGORY: Style = Style::new().fg(Color::White);

pub const NAV_ACTIVE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

pub const CATEGORY_TAG: Style = Style::new().fg(Color::Cyan);

pub const QUOTE: Style = Style::new().fg(Color::White).add_modifier(Modifier::ITALIC);

pub const PRICE: Style = Style::new().fg(Color::Yellow);

pub const INDICATOR_ON: Style = Style::new().fg(Color::Cyan);

pub const INDICATOR_OFF: Style = Style::new().fg(Color::DarkGray);

pub const BACKDROP: Style = Style::new().bg(Color::Black);
