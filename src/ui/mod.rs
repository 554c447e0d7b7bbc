pub mod diagnostics_panel;
pub mod theme;
pub mod timeline_view;
pub mod toolbar;
