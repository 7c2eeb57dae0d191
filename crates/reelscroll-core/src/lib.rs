pub mod config;
pub mod error;
pub mod layout;
pub mod page;
pub mod scroll;
pub mod sections;

pub use config::{AppConfig, EasingType, ScrollConfig, SectionConfig, UiConfig};
pub use error::{Error, Result};
pub use page::Page;
pub use scroll::{attach, ScrollHandle, ScrollSmoother, ScrollToOptions, WheelEvent, WheelOutcome};
