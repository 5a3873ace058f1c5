pub mod app;
pub mod cache;
pub mod content;
pub mod error;
pub mod ui;
pub mod util;
