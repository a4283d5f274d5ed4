pub mod app;
pub mod error;
pub mod text_renderer;
pub mod types;

pub use app::PlatformInterface;
pub use types::{
    AppEvent, CheckState, MessageSeverity, PlatformCommand, PlatformEventHandler,
    TreeItemDescriptor,
};
