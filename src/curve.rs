use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::VisError;
use crate::evaluation::Evaluation;
use crate::payload::{SectionPayload, TabulatedPayload};
use crate::section::{SectionDescriptor, SectionKind};

/// Interpolation law for one region of a tabulated curve.
///
/// The first five variants map 1-to-1 onto the ENDF TAB1 INT codes 1-5. The
/// law governs how values between the tabulated samples are reconstructed;
/// the extractor carries it through verbatim and never resamples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationLaw {
    /// INT=1: y constant between samples.
    Histogram,
    /// INT=2: y linear in x.
    LinLin,
    /// INT=3: y linear in ln(x).
    LinLog,
    /// INT=4: ln(y) linear in x.
    LogLin,
    /// INT=5: ln(y) linear in ln(x).
    LogLog,
    /// Step data already collapsed to explicit step points by the decoder.
    PiecewiseConstant,
}

impl InterpolationLaw {
    /// Map an ENDF TAB1 INT code onto a law. Codes outside 1-5 are not
    /// recognized.
    pub fn from_endf(code: i32) -> Option<InterpolationLaw> {
        match code {
            1 => Some(InterpolationLaw::Histogram),
            2 => Some(InterpolationLaw::LinLin),
            3 => Some(InterpolationLaw::LinLog),
            4 => Some(InterpolationLaw::LogLin),
            5 => Some(InterpolationLaw::LogLog),
            _ => None,
        }
    }
}

/// One interpolation region of a curve, covering sample indices
/// `[start, end)`. The regions of a curve partition `[0, len)` contiguously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpRegion {
    pub start: usize,
    pub end: usize,
    pub law: InterpolationLaw,
}

/// A renderable x/y series extracted from one plottable section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveRecord {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub x_unit: String,
    pub y_unit: String,
    /// Axis label built from the declared quantity and unit, e.g. "Energy (eV)".
    pub x_label: String,
    pub y_label: String,
    /// Interpolation regions partitioning `[0, x.len())`.
    pub regions: Vec<InterpRegion>,
    /// Set when the section declared no physical units and the record fell
    /// back to dimensionless.
    pub units_defaulted: bool,
}

impl CurveRecord {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Turns a plottable section descriptor into curve records.
///
/// A descriptive pass-through: the section's native TAB1 interpolation table
/// is resolved into `regions` verbatim and no resampling is performed.
/// Downstream rendering may resample for display only.
pub struct CurveExtractor;

impl CurveExtractor {
    /// Extract a single curve covering all interpolation regions of the
    /// section (the default for plotting).
    ///
    /// Exact consecutive duplicate (x, y) points are filtered out; duplicate
    /// x values with differing y (step discontinuities) are preserved. Fails
    /// with [`VisError::EmptyCurve`] when fewer than two samples survive.
    pub fn extract(
        descriptor: &SectionDescriptor,
        evaluation: &Evaluation,
    ) -> Result<CurveRecord, VisError> {
        let tab = plottable_payload(descriptor, evaluation)?;
        let regions = resolve_regions(tab, descriptor);
        let (x, y, regions) = filter_duplicates(&tab.x, &tab.y, regions);
        if x.len() < 2 {
            return Err(VisError::EmptyCurve {
                key: descriptor.key,
            });
        }

        let units_defaulted = tab.x_unit.is_none() || tab.y_unit.is_none();
        if units_defaulted {
            warn!(
                key = %descriptor.key,
                "section declares no physical units, defaulting to dimensionless"
            );
        }
        let x_unit = tab.x_unit.clone().unwrap_or_else(|| "dimensionless".to_string());
        let y_unit = tab.y_unit.clone().unwrap_or_else(|| "dimensionless".to_string());

        Ok(CurveRecord {
            x_label: axis_label(tab.x_quantity.as_deref(), &x_unit),
            y_label: axis_label(tab.y_quantity.as_deref(), &y_unit),
            x,
            y,
            x_unit,
            y_unit,
            regions,
            units_defaulted,
        })
    }

    /// Extract one curve per interpolation region, in region order.
    ///
    /// Adjacent regions share their boundary sample so each piece remains a
    /// drawable curve. Useful when a consumer wants disjoint energy ranges
    /// kept distinguishable; most callers want [`CurveExtractor::extract`].
    pub fn extract_regions(
        descriptor: &SectionDescriptor,
        evaluation: &Evaluation,
    ) -> Result<Vec<CurveRecord>, VisError> {
        let merged = Self::extract(descriptor, evaluation)?;
        let mut pieces = Vec::with_capacity(merged.regions.len());
        for region in &merged.regions {
            // Include the shared boundary point of the preceding region.
            let start = if region.start == 0 { 0 } else { region.start - 1 };
            let end = region.end;
            if end - start < 2 {
                continue;
            }
            pieces.push(CurveRecord {
                x: merged.x[start..end].to_vec(),
                y: merged.y[start..end].to_vec(),
                x_unit: merged.x_unit.clone(),
                y_unit: merged.y_unit.clone(),
                x_label: merged.x_label.clone(),
                y_label: merged.y_label.clone(),
                regions: vec![InterpRegion {
                    start: 0,
                    end: end - start,
                    law: region.law,
                }],
                units_defaulted: merged.units_defaulted,
            });
        }
        if pieces.is_empty() {
            return Err(VisError::EmptyCurve {
                key: descriptor.key,
            });
        }
        Ok(pieces)
    }
}

fn plottable_payload<'a>(
    descriptor: &SectionDescriptor,
    evaluation: &'a Evaluation,
) -> Result<&'a TabulatedPayload, VisError> {
    if descriptor.kind != SectionKind::Plottable {
        return Err(VisError::UnsupportedSection {
            key: descriptor.key,
            expected: "plottable",
        });
    }
    match evaluation
        .sections
        .get(descriptor.section_index)
        .map(|raw| &raw.payload)
    {
        Some(SectionPayload::Tabulated(tab)) => Ok(tab),
        _ => Err(VisError::UnsupportedSection {
            key: descriptor.key,
            expected: "plottable",
        }),
    }
}

/// Resolve the TAB1 NBT/INT arrays into regions partitioning `[0, n)`.
///
/// An absent or empty interpolation table means a single linear-linear
/// region, the TAB1 default. A table that stops short of the last sample is
/// padded with a trailing linear-linear region.
fn resolve_regions(tab: &TabulatedPayload, descriptor: &SectionDescriptor) -> Vec<InterpRegion> {
    let n = tab.x.len();
    if tab.breakpoints.is_empty() || tab.interpolation.is_empty() {
        return vec![InterpRegion {
            start: 0,
            end: n,
            law: InterpolationLaw::LinLin,
        }];
    }

    let mut regions = Vec::with_capacity(tab.breakpoints.len());
    let mut covered = 0usize;
    for (&nbt, &code) in tab.breakpoints.iter().zip(tab.interpolation.iter()) {
        let end = nbt.min(n);
        if end <= covered {
            continue;
        }
        let law = InterpolationLaw::from_endf(code).unwrap_or_else(|| {
            warn!(
                key = %descriptor.key,
                code,
                "unrecognized interpolation code, falling back to linear-linear"
            );
            InterpolationLaw::LinLin
        });
        regions.push(InterpRegion {
            start: covered,
            end,
            law,
        });
        covered = end;
    }
    if covered < n {
        debug!(
            key = %descriptor.key,
            covered,
            total = n,
            "interpolation table stops short of the last sample, padding with linear-linear"
        );
        regions.push(InterpRegion {
            start: covered,
            end: n,
            law: InterpolationLaw::LinLin,
        });
    }
    regions
}

/// Drop exact consecutive duplicate (x, y) points and remap the region
/// boundaries onto the surviving indices. Step discontinuities (same x,
/// differing y) pass through untouched.
fn filter_duplicates(
    x: &[f64],
    y: &[f64],
    regions: Vec<InterpRegion>,
) -> (Vec<f64>, Vec<f64>, Vec<InterpRegion>) {
    let n = x.len();
    let mut kept_x = Vec::with_capacity(n);
    let mut kept_y = Vec::with_capacity(n);
    // kept_before[i] = number of surviving points among the first i originals.
    let mut kept_before = Vec::with_capacity(n + 1);
    kept_before.push(0usize);
    for i in 0..n {
        let duplicate = i > 0 && x[i] == x[i - 1] && y[i] == y[i - 1];
        if !duplicate {
            kept_x.push(x[i]);
            kept_y.push(y[i]);
        }
        kept_before.push(kept_x.len());
    }

    let remapped = regions
        .into_iter()
        .filter_map(|r| {
            let start = kept_before[r.start];
            let end = kept_before[r.end];
            (end > start).then_some(InterpRegion {
                start,
                end,
                law: r.law,
            })
        })
        .collect();

    (kept_x, kept_y, remapped)
}

fn axis_label(quantity: Option<&str>, unit: &str) -> String {
    match quantity {
        Some(q) => format!("{} ({})", q, unit),
        None => unit.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::RawSection;
    use crate::section::{SectionIndex, SectionKey};

    fn evaluation_with_tab(tab: TabulatedPayload) -> Evaluation {
        Evaluation {
            material_id: Some(325),
            target: Some("Li6".to_string()),
            library: Some("FENDL-3.2".to_string()),
            sections: vec![RawSection {
                mf: 3,
                mt: 1,
                payload: SectionPayload::Tabulated(tab),
            }],
        }
    }

    fn extract_from(tab: TabulatedPayload) -> Result<CurveRecord, VisError> {
        let evaluation = evaluation_with_tab(tab);
        let index = SectionIndex::build(&evaluation);
        let descriptor = index.get(&SectionKey::new(3, 1)).unwrap();
        CurveExtractor::extract(descriptor, &evaluation)
    }

    fn regions_partition(curve: &CurveRecord) -> bool {
        let mut expected_start = 0usize;
        for region in &curve.regions {
            if region.start != expected_start || region.end <= region.start {
                return false;
            }
            expected_start = region.end;
        }
        expected_start == curve.len()
    }

    #[test]
    fn test_default_interpolation_is_single_linlin_region() {
        let curve = extract_from(TabulatedPayload {
            x: vec![1.0, 2.0, 3.0],
            y: vec![0.3, 0.2, 0.1],
            x_unit: Some("eV".to_string()),
            y_unit: Some("barns".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            curve.regions,
            vec![InterpRegion {
                start: 0,
                end: 3,
                law: InterpolationLaw::LinLin
            }]
        );
        assert!(regions_partition(&curve));
        assert!(!curve.units_defaulted);
    }

    #[test]
    fn test_nbt_int_resolved_verbatim() {
        let curve = extract_from(TabulatedPayload {
            x: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            y: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            x_unit: Some("eV".to_string()),
            y_unit: Some("barns".to_string()),
            breakpoints: vec![3, 5],
            interpolation: vec![2, 5],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(curve.regions.len(), 2);
        assert_eq!(curve.regions[0].law, InterpolationLaw::LinLin);
        assert_eq!(curve.regions[1].law, InterpolationLaw::LogLog);
        assert!(regions_partition(&curve));
    }

    #[test]
    fn test_short_interpolation_table_is_padded() {
        let curve = extract_from(TabulatedPayload {
            x: vec![1.0, 2.0, 3.0, 4.0],
            y: vec![1.0, 2.0, 3.0, 4.0],
            x_unit: Some("eV".to_string()),
            y_unit: Some("barns".to_string()),
            breakpoints: vec![2],
            interpolation: vec![1],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(curve.regions.len(), 2);
        assert_eq!(curve.regions[0].law, InterpolationLaw::Histogram);
        assert_eq!(curve.regions[1].law, InterpolationLaw::LinLin);
        assert!(regions_partition(&curve));
    }

    #[test]
    fn test_exact_duplicates_filtered_step_preserved() {
        let curve = extract_from(TabulatedPayload {
            // (2.0, 5.0) repeated exactly; (3.0, 1.0)/(3.0, 9.0) is a step.
            x: vec![1.0, 2.0, 2.0, 3.0, 3.0, 4.0],
            y: vec![5.0, 5.0, 5.0, 1.0, 9.0, 9.0],
            x_unit: Some("eV".to_string()),
            y_unit: Some("barns".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(curve.x, vec![1.0, 2.0, 3.0, 3.0, 4.0]);
        assert_eq!(curve.y, vec![5.0, 5.0, 1.0, 9.0, 9.0]);
        assert!(regions_partition(&curve));
    }

    #[test]
    fn test_all_duplicates_is_empty_curve() {
        let result = extract_from(TabulatedPayload {
            x: vec![1.0, 1.0, 1.0],
            y: vec![2.0, 2.0, 2.0],
            x_unit: Some("eV".to_string()),
            y_unit: Some("barns".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(VisError::EmptyCurve { .. })));
    }

    #[test]
    fn test_missing_units_default_with_flag() {
        let curve = extract_from(TabulatedPayload {
            x: vec![1.0, 2.0],
            y: vec![0.2, 0.1],
            ..Default::default()
        })
        .unwrap();
        assert!(curve.units_defaulted);
        assert_eq!(curve.x_unit, "dimensionless");
        assert_eq!(curve.y_unit, "dimensionless");
    }

    #[test]
    fn test_axis_labels_from_quantity_and_unit() {
        let curve = extract_from(TabulatedPayload {
            x: vec![1.0, 2.0],
            y: vec![0.2, 0.1],
            x_quantity: Some("Energy".to_string()),
            x_unit: Some("eV".to_string()),
            y_quantity: Some("Cross Section".to_string()),
            y_unit: Some("barns".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(curve.x_label, "Energy (eV)");
        assert_eq!(curve.y_label, "Cross Section (barns)");
    }

    #[test]
    fn test_non_plottable_descriptor_rejected() {
        let evaluation = Evaluation {
            material_id: None,
            target: None,
            library: None,
            sections: vec![RawSection {
                mf: 1,
                mt: 451,
                payload: SectionPayload::Structured(vec![]),
            }],
        };
        let index = SectionIndex::build(&evaluation);
        let descriptor = index.get(&SectionKey::new(1, 451)).unwrap();
        let result = CurveExtractor::extract(descriptor, &evaluation);
        assert!(matches!(result, Err(VisError::UnsupportedSection { .. })));
    }

    #[test]
    fn test_extract_regions_shares_boundary_points() {
        let evaluation = evaluation_with_tab(TabulatedPayload {
            x: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            y: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            x_unit: Some("eV".to_string()),
            y_unit: Some("barns".to_string()),
            breakpoints: vec![3, 5],
            interpolation: vec![2, 5],
            ..Default::default()
        });
        let index = SectionIndex::build(&evaluation);
        let descriptor = index.get(&SectionKey::new(3, 1)).unwrap();
        let pieces = CurveExtractor::extract_regions(descriptor, &evaluation).unwrap();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].x, vec![1.0, 2.0, 3.0]);
        // The second piece starts at the last sample of the first.
        assert_eq!(pieces[1].x, vec![3.0, 4.0, 5.0]);
        assert_eq!(pieces[1].regions[0].law, InterpolationLaw::LogLog);
    }
}
