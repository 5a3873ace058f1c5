pub mod actions;
pub mod carousel;
pub mod contact;
pub mod event_loop;
pub mod gallery;
pub mod lightbox;
pub mod state;
pub mod update;
pub mod view;
