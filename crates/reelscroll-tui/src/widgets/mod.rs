mod progress_hud;
mod sections_strip;
mod status_bar;

pub use progress_hud::ProgressHudWidget;
pub use sections_strip::SectionsStripWidget;
pub use status_bar::StatusBarWidget;
