use std::fmt;

use serde::{Deserialize, Serialize};

use super::CoreError;

/// The fixed label enumeration overlaid and edited by the viewer.
pub const LABELS: [LabelId; 2] = [LabelId::One, LabelId::Two];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LabelId {
    #[default]
    One,
    Two,
}

impl LabelId {
    pub const fn value(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Zero-based slot used to index per-label tables.
    pub const fn slot(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl TryFrom<u8> for LabelId {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(CoreError::InvalidLabel(other)),
        }
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeRole {
    Image,
    Prediction,
    Reference,
    Editable,
}

impl fmt::Display for VolumeRole {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Image => "image",
            Self::Prediction => "prediction",
            Self::Reference => "reference",
            Self::Editable => "editable",
        };
        formatter.write_str(name)
    }
}

/// A pixel position in an oriented slice: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
}

impl Pixel {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// `(row, column)` index into an `Array2`.
    pub const fn index(self) -> (usize, usize) {
        (self.y, self.x)
    }
}
