use thiserror::Error;

use crate::section::SectionKey;

/// Error taxonomy for the section indexing and rendering pipeline.
///
/// Per-section failures (`MalformedSection`, `UnsupportedSection`) are
/// recorded on the owning [`crate::section::SectionDescriptor`] during index
/// construction and never abort processing of sibling sections. Composition
/// level failures (`NoRenderableCurves`, `IncompatibleUnits`) are returned to
/// the caller, which is expected to surface a message and leave any
/// previously displayed chart unchanged.
#[derive(Debug, Error)]
pub enum VisError {
    /// A payload claimed tabulated shape but its sequences disagree.
    #[error("malformed section {key}: {reason}")]
    MalformedSection { key: SectionKey, reason: String },

    /// A section classified Plottable yielded no usable samples.
    #[error("section {key} yielded no usable curve samples")]
    EmptyCurve { key: SectionKey },

    /// Every candidate curve failed axis validation.
    #[error("no renderable curves: all {total} candidate curves were excluded by log-axis validation")]
    NoRenderableCurves { total: usize },

    /// Comparison mode was asked to overlay curves with mismatched units.
    #[error("incompatible units on {axis} axis: '{left}' vs '{right}'")]
    IncompatibleUnits {
        axis: &'static str,
        left: String,
        right: String,
    },

    /// An operation requiring a specific section kind was handed a
    /// descriptor of another kind. Informational during classification,
    /// an error when a consumer insists on the wrong descriptor.
    #[error("section {key} is not {expected}")]
    UnsupportedSection {
        key: SectionKey,
        expected: &'static str,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
