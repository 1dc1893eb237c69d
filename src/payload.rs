use serde::{Deserialize, Serialize};

/// One decoded field value inside a structured (descriptive) section.
///
/// The decoder is duck-typed; anything it cannot express as a scalar or a
/// numeric array arrives as `Text` so no information is dropped when the
/// section is rendered.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
    Numbers(Vec<f64>),
}

impl FieldValue {
    /// Raw textual representation used by the metadata renderer.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Int(v) => v.to_string(),
            FieldValue::Float(v) => v.to_string(),
            FieldValue::Text(v) => v.clone(),
            FieldValue::Numbers(vs) => {
                let joined: Vec<String> = vs.iter().map(|v| format!("{:e}", v)).collect();
                format!("[{}]", joined.join(", "))
            }
        }
    }
}

/// Tabulated x/y payload of a section, in ENDF TAB1 layout.
///
/// `breakpoints` and `interpolation` carry the TAB1 NBT/INT arrays verbatim:
/// `breakpoints[i]` is the 1-based index of the last point governed by
/// interpolation code `interpolation[i]`. Both may be empty, in which case a
/// single linear-linear region spanning the whole table is assumed.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TabulatedPayload {
    /// Sample abscissae (typically incident energy), non-decreasing.
    pub x: Vec<f64>,
    /// Sample ordinates (typically cross section), same length as `x`.
    pub y: Vec<f64>,
    /// Physical quantity on the x axis, e.g. "Energy".
    #[serde(default)]
    pub x_quantity: Option<String>,
    /// Physical unit on the x axis, e.g. "eV".
    #[serde(default)]
    pub x_unit: Option<String>,
    /// Physical quantity on the y axis, e.g. "Cross Section".
    #[serde(default)]
    pub y_quantity: Option<String>,
    /// Physical unit on the y axis, e.g. "barns".
    #[serde(default)]
    pub y_unit: Option<String>,
    /// TAB1 NBT region breakpoints (1-based, last point of each region).
    #[serde(default)]
    pub breakpoints: Vec<usize>,
    /// TAB1 INT interpolation codes, one per region.
    #[serde(default)]
    pub interpolation: Vec<i32>,
}

/// Raw payload of one section as handed over by the external decoder.
///
/// Classification queries only the shape exposed here: a numeric x/y pair
/// (`Tabulated`), descriptive key/value fields (`Structured`), or an opaque
/// record blob (`Opaque`). Concrete decoder types never leak past this enum.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum SectionPayload {
    Tabulated(TabulatedPayload),
    Structured(Vec<(String, FieldValue)>),
    Opaque(String),
}
