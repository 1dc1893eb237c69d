use std::fmt::Write;

use crate::error::VisError;
use crate::evaluation::Evaluation;
use crate::payload::SectionPayload;
use crate::section::{SectionDescriptor, SectionKind};

/// Renders textual sections into structured field lists and text blocks.
///
/// Pure formatting: every field of the payload is rendered, opaque values as
/// their raw textual representation, so no information is silently dropped.
pub struct MetadataRenderer;

impl MetadataRenderer {
    /// Render a textual section as ordered (field name, formatted value)
    /// pairs in payload order.
    pub fn render(
        descriptor: &SectionDescriptor,
        evaluation: &Evaluation,
    ) -> Result<Vec<(String, String)>, VisError> {
        if descriptor.kind != SectionKind::Textual {
            return Err(VisError::UnsupportedSection {
                key: descriptor.key,
                expected: "textual",
            });
        }
        match evaluation
            .sections
            .get(descriptor.section_index)
            .map(|raw| &raw.payload)
        {
            Some(SectionPayload::Structured(fields)) => Ok(fields
                .iter()
                .map(|(name, value)| (name.clone(), value.render()))
                .collect()),
            _ => Err(VisError::UnsupportedSection {
                key: descriptor.key,
                expected: "textual",
            }),
        }
    }

    /// Render a textual section as a display-ready text block with a header
    /// line and the section description, suitable for a text viewer widget
    /// or console printer.
    pub fn render_block(
        descriptor: &SectionDescriptor,
        evaluation: &Evaluation,
    ) -> Result<String, VisError> {
        let fields = Self::render(descriptor, evaluation)?;
        let mut block = String::new();
        let _ = writeln!(
            block,
            "== Section MF={}, MT={} ==",
            descriptor.key.mf, descriptor.key.mt
        );
        let _ = writeln!(block, "Description: {}", descriptor.label);
        for (name, value) in &fields {
            let _ = writeln!(block, "  {}: {}", name, value);
        }
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::RawSection;
    use crate::payload::{FieldValue, TabulatedPayload};
    use crate::section::{SectionIndex, SectionKey};

    fn header_evaluation() -> Evaluation {
        Evaluation {
            material_id: Some(325),
            target: Some("Li6".to_string()),
            library: Some("FENDL-3.2".to_string()),
            sections: vec![RawSection {
                mf: 1,
                mt: 451,
                payload: SectionPayload::Structured(vec![
                    ("MAT".to_string(), FieldValue::Int(325)),
                    ("ZA".to_string(), FieldValue::Int(3006)),
                    ("AWR".to_string(), FieldValue::Float(5.963)),
                    (
                        "library".to_string(),
                        FieldValue::Text("FENDL-3.2".to_string()),
                    ),
                ]),
            }],
        }
    }

    #[test]
    fn test_render_preserves_field_order_and_content() {
        let evaluation = header_evaluation();
        let index = SectionIndex::build(&evaluation);
        let descriptor = index.get(&SectionKey::new(1, 451)).unwrap();
        let fields = MetadataRenderer::render(descriptor, &evaluation).unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], ("MAT".to_string(), "325".to_string()));
        assert_eq!(fields[1].0, "ZA");
        assert_eq!(fields[3], ("library".to_string(), "FENDL-3.2".to_string()));
    }

    #[test]
    fn test_render_block_has_header_and_description() {
        let evaluation = header_evaluation();
        let index = SectionIndex::build(&evaluation);
        let descriptor = index.get(&SectionKey::new(1, 451)).unwrap();
        let block = MetadataRenderer::render_block(descriptor, &evaluation).unwrap();
        assert!(block.starts_with("== Section MF=1, MT=451 =="));
        assert!(block.contains("Description: General information and section directory"));
        assert!(block.contains("  MAT: 325"));
    }

    #[test]
    fn test_plottable_descriptor_rejected() {
        let evaluation = Evaluation {
            material_id: None,
            target: None,
            library: None,
            sections: vec![RawSection {
                mf: 3,
                mt: 1,
                payload: SectionPayload::Tabulated(TabulatedPayload {
                    x: vec![1.0, 2.0],
                    y: vec![0.2, 0.1],
                    ..Default::default()
                }),
            }],
        };
        let index = SectionIndex::build(&evaluation);
        let descriptor = index.get(&SectionKey::new(3, 1)).unwrap();
        let result = MetadataRenderer::render(descriptor, &evaluation);
        assert!(matches!(
            result,
            Err(VisError::UnsupportedSection { expected: "textual", .. })
        ));
    }
}
