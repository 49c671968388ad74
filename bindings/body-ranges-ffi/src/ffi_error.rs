use body_ranges::RangeTreeError;

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum BodyRangeError {
    #[error("Could not nest body ranges: {reason}")]
    InvalidRangeTree { reason: String },
}

impl From<RangeTreeError> for BodyRangeError {
    fn from(error: RangeTreeError) -> Self {
        Self::InvalidRangeTree {
            reason: error.to_string(),
        }
    }
}
