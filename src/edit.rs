mod error;
mod store;
mod tool;


pub use error::{EditError, Result};
pub use store::{DEFAULT_UNDO_DEPTH, GestureState, SegmentationStore, UndoEntry};
pub use tool::{ToolKind, ToolParams, disk_mask, region_fill_mask, tool_mask};
