use super::{CoreError, IntensityVolume, LabelVolume, Result, VolumeRole};

/// The arrays handed over by the volume provider for one case. Every label volume present
/// shares the image's shape.
#[derive(Debug, Clone)]
pub struct CaseVolumes {
    image: IntensityVolume,
    prediction: Option<LabelVolume>,
    reference: Option<LabelVolume>,
}

impl CaseVolumes {
    pub fn new(
        image: IntensityVolume,
        prediction: Option<LabelVolume>,
        reference: Option<LabelVolume>,
    ) -> Result<Self> {
        image.validate()?;
        let expected = image.shape();
        for (role, labels) in [
            (VolumeRole::Prediction, prediction.as_ref()),
            (VolumeRole::Reference, reference.as_ref()),
        ] {
            if let Some(labels) = labels {
                let found = labels.shape();
                if found != expected {
                    return Err(CoreError::ShapeMismatch {
                        role,
                        expected,
                        found,
                    });
                }
            }
        }
        Ok(Self {
            image,
            prediction,
            reference,
        })
    }

    pub fn image(&self) -> &IntensityVolume {
        &self.image
    }

    pub fn prediction(&self) -> Option<&LabelVolume> {
        self.prediction.as_ref()
    }

    pub fn reference(&self) -> Option<&LabelVolume> {
        self.reference.as_ref()
    }

    pub fn depth(&self) -> usize {
        self.image.depth()
    }
}
