// Decoded evaluation model - the read-only input boundary from the decoder.
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::VisError;
use crate::payload::SectionPayload;

/// One raw section of an evaluation, tagged with its (MF, MT) address.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawSection {
    /// ENDF file number (data category).
    pub mf: i32,
    /// ENDF section number (reaction type).
    pub mt: i32,
    /// Decoded payload, opaque to the core except for shape inspection.
    pub payload: SectionPayload,
}

/// The decoded representation of one nuclear data file.
///
/// Produced by the external decoder and treated as read-only by every core
/// operation; the core never mutates an evaluation or holds onto it between
/// calls. Metadata fields are optional because older library files omit
/// them.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Evaluation {
    /// ENDF MAT number identifying the material.
    pub material_id: Option<i32>,
    /// Target nuclide name (e.g. "Li6").
    #[serde(default)]
    pub target: Option<String>,
    /// Evaluation library name/version (e.g. "FENDL-3.2").
    #[serde(default)]
    pub library: Option<String>,
    /// Raw section payloads in decoder order.
    #[serde(default)]
    pub sections: Vec<RawSection>,
}

impl Evaluation {
    /// Parse an evaluation from a JSON string produced by the decoder.
    pub fn from_json_str(json: &str) -> Result<Evaluation, VisError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Read a decoded evaluation from a JSON file.
pub fn read_evaluation_from_json<P: AsRef<Path>>(path: P) -> Result<Evaluation, VisError> {
    let contents = std::fs::read_to_string(path)?;
    Evaluation::from_json_str(&contents)
}
