//! User interface module - egui-based console

mod app;
mod components;
mod dialogs;
mod panels;
mod theme;

pub use app::VirtualManagerApp;
