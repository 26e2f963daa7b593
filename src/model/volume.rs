use ndarray::{Array3, Axis};

use super::{CoreError, LabelId, Result, VolumeMetadata};

/// Volume extents as `(W, H, D)`; slices are taken along the last axis.
pub type Shape3 = [usize; 3];

#[derive(Debug, Clone)]
pub struct Volume<T> {
    pub data: Array3<T>,
    pub metadata: VolumeMetadata,
}

impl<T> Volume<T> {
    pub fn new(data: Array3<T>, metadata: VolumeMetadata) -> Result<Self> {
        validate_extents(data.shape())?;
        Ok(Self { data, metadata })
    }

    pub fn from_data(data: Array3<T>) -> Result<Self> {
        Self::new(data, VolumeMetadata::default())
    }

    pub fn shape(&self) -> Shape3 {
        let (width, height, depth) = self.data.dim();
        [width, height, depth]
    }

    pub fn depth(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    pub fn check_depth(&self, index: usize) -> Result<()> {
        let depth = self.depth();
        if index < depth {
            Ok(())
        } else {
            Err(CoreError::DepthOutOfRange { index, depth })
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_extents(self.data.shape())
    }
}

impl Volume<f32> {
    /// Minimum and maximum over the finite samples; `None` when no sample is finite.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut iter = self.data.iter().copied().filter(|value| value.is_finite());
        let first = iter.next()?;
        let mut min = first;
        let mut max = first;
        for value in iter {
            if value < min {
                min = value;
            }
            if value > max {
                max = value;
            }
        }
        Some((min, max))
    }
}

impl Volume<u8> {
    pub fn zeros(shape: Shape3, metadata: VolumeMetadata) -> Result<Self> {
        Self::new(Array3::zeros((shape[0], shape[1], shape[2])), metadata)
    }

    pub fn count_label(&self, label: LabelId) -> usize {
        let value = label.value();
        self.data.iter().filter(|sample| **sample == value).count()
    }
}

pub type IntensityVolume = Volume<f32>;
pub type LabelVolume = Volume<u8>;

fn validate_extents(shape: &[usize]) -> Result<()> {
    match shape.iter().position(|size| *size == 0) {
        Some(axis) => Err(CoreError::ZeroSizedDimension { axis }),
        None => Ok(()),
    }
}
