mod chart;
mod curve;
mod data;
mod error;
mod evaluation;
mod metadata;
mod payload;
mod section;
mod summary;

pub use chart::{AxisScale, ChartSpec, ExcludedCurve, OverlayMode, PlotComposer, PlotOptions};
pub use curve::{CurveExtractor, CurveRecord, InterpRegion, InterpolationLaw};
pub use data::{mf_description, mt_description, section_description};
pub use error::VisError;
pub use evaluation::{read_evaluation_from_json, Evaluation, RawSection};
pub use metadata::MetadataRenderer;
pub use payload::{FieldValue, SectionPayload, TabulatedPayload};
pub use section::{SectionDescriptor, SectionIndex, SectionKey, SectionKind};
pub use summary::{summarize, EvaluationSummaryRecord};
