mod capabilities;
mod context;
mod error;
mod events;
mod shared;


pub use capabilities::{Capabilities, DisplayMode, PanelContent, capabilities};
pub use context::{ExportRequest, OverlayToggles, RenderedPanel, Session};
pub use error::{Result, SessionError};
pub use events::{KeyCommand, Modifiers, PointerEvent, PointerGesture};
pub use shared::SharedSession;
