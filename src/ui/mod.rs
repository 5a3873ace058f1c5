pub mod pages;
pub mod theme;
pub mod widgets;
