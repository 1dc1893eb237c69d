use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::curve::CurveRecord;
use crate::error::VisError;

/// Legend suffix appended to curves excluded by log-axis validation.
const EXCLUDED_SUFFIX: &str = " (excluded: non-positive values)";

/// Scale selection for one chart axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisScale {
    Log,
    Linear,
}

/// Whether the chart shows one section or compares several.
///
/// Comparison mode additionally requires every overlaid curve to share
/// compatible axis units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayMode {
    Single,
    Comparison,
}

/// Caller-selected composition options.
///
/// Both axes default to logarithmic, the conventional presentation for
/// cross sections against incident energy.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    pub title: Option<String>,
    pub overlay_mode: OverlayMode,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            x_scale: AxisScale::Log,
            y_scale: AxisScale::Log,
            title: None,
            overlay_mode: OverlayMode::Single,
        }
    }
}

/// Advisory attached to a chart when a curve failed log-axis validation and
/// was left out rather than drawn broken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludedCurve {
    /// Caller-supplied label of the excluded curve.
    pub label: String,
    /// Axes that failed validation: "x", "y", or "x and y".
    pub axis: String,
    pub reason: String,
}

/// A complete chart specification for the external plotting backend.
///
/// Stateless: carries everything the backend needs to draw overlaid curves
/// with the selected scales, labels and legend. Curves appear in the order
/// the caller supplied them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: Option<String>,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    pub x_label: String,
    pub y_label: String,
    /// Rendered (label, curve) pairs in caller order.
    pub curves: Vec<(String, CurveRecord)>,
    /// Non-fatal exclusions, in caller order.
    pub advisories: Vec<ExcludedCurve>,
}

impl ChartSpec {
    /// Legend entries: rendered labels verbatim, then excluded curves listed
    /// for transparency with a deterministic suffix.
    pub fn legend(&self) -> Vec<String> {
        let mut entries: Vec<String> = self.curves.iter().map(|(label, _)| label.clone()).collect();
        entries.extend(
            self.advisories
                .iter()
                .map(|a| format!("{}{}", a.label, EXCLUDED_SUFFIX)),
        );
        entries
    }
}

/// Composes one or more labelled curves into a [`ChartSpec`].
pub struct PlotComposer;

impl PlotComposer {
    /// Compose a chart from labelled curves.
    ///
    /// For each log axis, any curve containing a non-positive sample on that
    /// axis is excluded with an [`ExcludedCurve`] advisory instead of being
    /// drawn as a broken log curve. If every curve is excluded the
    /// composition fails with [`VisError::NoRenderableCurves`]. In comparison
    /// mode, mismatched axis units across the candidates fail with
    /// [`VisError::IncompatibleUnits`] before any validation.
    pub fn compose(
        curves: Vec<(String, CurveRecord)>,
        options: &PlotOptions,
    ) -> Result<ChartSpec, VisError> {
        if options.overlay_mode == OverlayMode::Comparison {
            check_units(&curves)?;
        }

        let total = curves.len();
        let mut rendered = Vec::with_capacity(total);
        let mut advisories = Vec::new();
        for (label, curve) in curves {
            match log_axis_violation(&curve, options) {
                Some(axis) => {
                    debug!(%label, %axis, "excluding curve from log axis");
                    advisories.push(ExcludedCurve {
                        reason: format!("non-positive {} values on a logarithmic axis", axis),
                        label,
                        axis,
                    });
                }
                None => rendered.push((label, curve)),
            }
        }

        if rendered.is_empty() {
            return Err(VisError::NoRenderableCurves { total });
        }

        let (x_label, y_label) = {
            let first = &rendered[0].1;
            (first.x_label.clone(), first.y_label.clone())
        };

        Ok(ChartSpec {
            title: options.title.clone(),
            x_scale: options.x_scale,
            y_scale: options.y_scale,
            x_label,
            y_label,
            curves: rendered,
            advisories,
        })
    }
}

/// Returns the offending axis names when a curve cannot be drawn on the
/// requested log axes. A curve invalid on both axes reports "x and y".
fn log_axis_violation(curve: &CurveRecord, options: &PlotOptions) -> Option<String> {
    let x_bad = options.x_scale == AxisScale::Log && curve.x.iter().any(|&v| v <= 0.0);
    let y_bad = options.y_scale == AxisScale::Log && curve.y.iter().any(|&v| v <= 0.0);
    match (x_bad, y_bad) {
        (true, true) => Some("x and y".to_string()),
        (true, false) => Some("x".to_string()),
        (false, true) => Some("y".to_string()),
        (false, false) => None,
    }
}

fn check_units(curves: &[(String, CurveRecord)]) -> Result<(), VisError> {
    let mut iter = curves.iter();
    let Some((_, first)) = iter.next() else {
        return Ok(());
    };
    for (_, curve) in iter {
        if curve.x_unit != first.x_unit {
            return Err(VisError::IncompatibleUnits {
                axis: "x",
                left: first.x_unit.clone(),
                right: curve.x_unit.clone(),
            });
        }
        if curve.y_unit != first.y_unit {
            return Err(VisError::IncompatibleUnits {
                axis: "y",
                left: first.y_unit.clone(),
                right: curve.y_unit.clone(),
            });
        }
    }
    Ok(())
}
