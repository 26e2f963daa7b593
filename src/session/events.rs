use crate::edit::ToolKind;
use crate::model::LabelId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerGesture {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// A decoded pointer event in the display coordinates of one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub gesture: PointerGesture,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
    /// Index into [`Session::panels`](super::Session::panels).
    pub panel: usize,
}

impl PointerEvent {
    pub fn new(gesture: PointerGesture, x: f32, y: f32) -> Self {
        Self {
            gesture,
            x,
            y,
            modifiers: Modifiers::default(),
            panel: 0,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn on_panel(mut self, panel: usize) -> Self {
        self.panel = panel;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Undo,
    RotateClockwise,
    RotateCounterClockwise,
    ZoomIn,
    ZoomOut,
    ResetView,
    NextSlice,
    PreviousSlice,
    SelectTool(ToolKind),
    SelectLabel(LabelId),
}
