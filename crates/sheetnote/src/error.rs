//! Error taxonomy shared by every pipeline stage.

/// Errors that abort a recognition run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OmrError {
    /// No usable raster data at preprocessing or detection time.
    #[error("Failed to process the image")]
    ImageProcessingFailed,
    /// Staff detection produced an empty list.
    #[error("No musical staff detected in the image")]
    NoStaffDetected,
    /// Reserved for contrast-based rejection; not produced by the current stages.
    #[error("Image contrast is too low for reliable detection")]
    InsufficientContrast,
    /// Staff geometry with a non-positive or non-finite line spacing.
    #[error("invalid staff spacing: {0} (must be finite and > 0)")]
    InvalidStaffSpacing(f64),
    /// Staff geometry with a non-finite top line coordinate.
    #[error("invalid staff top: {0} (must be finite)")]
    InvalidStaffTop(f64),
}
