use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use crate::data::section_description;
use crate::error::VisError;
use crate::evaluation::Evaluation;
use crate::payload::{SectionPayload, TabulatedPayload};

/// Address of one section within an evaluation: the ENDF (MF, MT) pair.
///
/// Ordered so that index iteration lists sections sorted by file then
/// reaction number, the order evaluations are conventionally listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionKey {
    pub mf: i32,
    pub mt: i32,
}

impl SectionKey {
    pub fn new(mf: i32, mt: i32) -> Self {
        SectionKey { mf, mt }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(MF={}, MT={})", self.mf, self.mt)
    }
}

/// Classification of a section by payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    /// Numeric x/y table of matching length >= 2 with non-decreasing x.
    Plottable,
    /// Scalar/structured descriptive fields only.
    Textual,
    /// Neither shape, or a tabulated payload that failed validation.
    Unsupported,
}

/// Classification plus payload reference for one section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub key: SectionKey,
    pub kind: SectionKind,
    /// Index of the raw section within `Evaluation::sections`.
    pub section_index: usize,
    /// Human-readable section label, e.g. "Cross Sections - Total cross section".
    pub label: String,
    /// Malformation message when a payload claimed tabulated shape but
    /// failed validation; the section is then recorded as Unsupported.
    pub error: Option<String>,
}

/// Normalized index of an evaluation's sections keyed by (MF, MT).
///
/// Built once per evaluation by [`SectionIndex::build`]; a pure function of
/// the evaluation, holding no reference to it.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    map: BTreeMap<SectionKey, SectionDescriptor>,
}

impl SectionIndex {
    /// Classify every section of an evaluation.
    ///
    /// A zero-section evaluation yields an empty index. A malformed section
    /// is recorded as Unsupported with the failure message attached; it never
    /// prevents indexing of the other sections. When the decoder hands over
    /// duplicate (MF, MT) addresses the first occurrence wins.
    pub fn build(evaluation: &Evaluation) -> SectionIndex {
        let mut map = BTreeMap::new();
        for (section_index, raw) in evaluation.sections.iter().enumerate() {
            let key = SectionKey::new(raw.mf, raw.mt);
            let (kind, error) = classify(key, &raw.payload);
            let descriptor = SectionDescriptor {
                key,
                kind,
                section_index,
                label: section_description(raw.mf, raw.mt),
                error,
            };
            map.entry(key).or_insert(descriptor);
        }
        SectionIndex { map }
    }

    pub fn get(&self, key: &SectionKey) -> Option<&SectionDescriptor> {
        self.map.get(key)
    }

    /// Descriptors in (MF, MT) order.
    pub fn iter(&self) -> btree_map::Values<'_, SectionKey, SectionDescriptor> {
        self.map.values()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, SectionKey, SectionDescriptor> {
        self.map.keys()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of sections of the given kind.
    pub fn count_kind(&self, kind: SectionKind) -> usize {
        self.map.values().filter(|d| d.kind == kind).count()
    }
}

/// Classification rule: a pure function of payload shape, never of the
/// (MF, MT) address and never user-configurable. The key is used only to
/// address the recorded error, never to pick the kind.
fn classify(key: SectionKey, payload: &SectionPayload) -> (SectionKind, Option<String>) {
    match payload {
        SectionPayload::Tabulated(tab) => classify_tabulated(key, tab),
        SectionPayload::Structured(_) => (SectionKind::Textual, None),
        SectionPayload::Opaque(_) => (SectionKind::Unsupported, None),
    }
}

fn classify_tabulated(key: SectionKey, tab: &TabulatedPayload) -> (SectionKind, Option<String>) {
    if tab.x.len() != tab.y.len() {
        let malformed = VisError::MalformedSection {
            key,
            reason: format!(
                "x/y length mismatch: {} x values vs {} y values",
                tab.x.len(),
                tab.y.len()
            ),
        };
        return (SectionKind::Unsupported, Some(malformed.to_string()));
    }
    if tab.x.len() < 2 {
        return (SectionKind::Unsupported, None);
    }
    if tab.x.windows(2).any(|w| w[1] < w[0]) {
        return (SectionKind::Unsupported, None);
    }
    (SectionKind::Plottable, None)
}
