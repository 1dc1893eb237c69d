use serde::{Deserialize, Serialize};

use crate::evaluation::Evaluation;
use crate::section::{SectionIndex, SectionKind};

/// Compact information record about one evaluation, used for display
/// headers and information panels. Derived once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummaryRecord {
    pub material_id: Option<i32>,
    pub target: Option<String>,
    pub library: Option<String>,
    pub plottable_sections: usize,
    pub textual_sections: usize,
    pub unsupported_sections: usize,
    /// MT numbers of the plottable cross-section (MF=3) sections, sorted.
    pub reaction_mts: Vec<i32>,
}

impl EvaluationSummaryRecord {
    /// Flat key/value view for an information panel or console print.
    pub fn fields(&self) -> Vec<(String, String)> {
        let display = |v: &Option<String>| v.clone().unwrap_or_else(|| "unknown".to_string());
        let mts: Vec<String> = self.reaction_mts.iter().map(|mt| mt.to_string()).collect();
        vec![
            (
                "material id".to_string(),
                self.material_id
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            ),
            ("target".to_string(), display(&self.target)),
            ("library".to_string(), display(&self.library)),
            (
                "plottable sections".to_string(),
                self.plottable_sections.to_string(),
            ),
            (
                "textual sections".to_string(),
                self.textual_sections.to_string(),
            ),
            (
                "unsupported sections".to_string(),
                self.unsupported_sections.to_string(),
            ),
            ("reaction MTs".to_string(), mts.join(", ")),
        ]
    }
}

/// Pure aggregation over a built index; never re-reads raw payloads.
pub fn summarize(evaluation: &Evaluation, index: &SectionIndex) -> EvaluationSummaryRecord {
    let reaction_mts: Vec<i32> = index
        .iter()
        .filter(|d| d.kind == SectionKind::Plottable && d.key.mf == 3)
        .map(|d| d.key.mt)
        .collect();
    EvaluationSummaryRecord {
        material_id: evaluation.material_id,
        target: evaluation.target.clone(),
        library: evaluation.library.clone(),
        plottable_sections: index.count_kind(SectionKind::Plottable),
        textual_sections: index.count_kind(SectionKind::Textual),
        unsupported_sections: index.count_kind(SectionKind::Unsupported),
        reaction_mts,
    }
}
