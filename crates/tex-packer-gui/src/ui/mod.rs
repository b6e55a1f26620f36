//! UI modules

pub mod menu_bar;
pub mod preview_panel;
pub mod setup_panel;
