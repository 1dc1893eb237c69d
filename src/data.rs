// Static description tables for ENDF file (MF) and section (MT) numbers.
// Doc comments summarize the intent of each table; the literals provide the
// canonical strings shown in legends, headers and section listings.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Human-readable descriptions for ENDF MF (file) numbers.
///
/// Keys are MF numbers and values are the category name shown in section
/// listings and chart titles. MF numbers without an entry are rendered as
/// `"File {mf}"` by [`mf_description`].
pub static MF_DESCRIPTIONS: Lazy<HashMap<i32, &'static str>> = Lazy::new(|| {
    [
        (1, "General Information"),
        (2, "Resonance Parameters"),
        (3, "Cross Sections"),
        (4, "Angular Distributions"),
        (5, "Energy Distributions"),
        (6, "Energy-Angle Distributions"),
        (7, "Thermal Scattering Data"),
        (8, "Radioactivity and Fission-Product Yields"),
        (9, "Multiplicities"),
        (10, "Cross Sections for Production of Radioactive Nuclides"),
        (12, "Multiplicities and Transition Probability Arrays"),
        (13, "Photon Production Cross Sections"),
        (14, "Photon Angular Distributions"),
        (15, "Continuous Photon Energy Spectra"),
        (23, "Smooth Photon Interaction Cross Sections"),
        (27, "Atomic Form Factors"),
    ]
    .iter()
    .cloned()
    .collect()
});

/// Human-readable descriptions for ENDF MT (reaction) numbers.
///
/// Covers the reaction channels commonly present in incident-neutron
/// evaluations. MT numbers without an entry are rendered as `"MT={mt}"` by
/// [`mt_description`].
pub static MT_DESCRIPTIONS: Lazy<HashMap<i32, &'static str>> = Lazy::new(|| {
    [
        (1, "Total cross section"),
        (2, "Elastic scattering"),
        (3, "Nonelastic cross section"),
        (4, "Inelastic cross section"),
        (5, "Sum of all reactions not given explicitly"),
        (11, "(n,2nd)"),
        (16, "(n,2n)"),
        (17, "(n,3n)"),
        (18, "Fission"),
        (22, "(n,na)"),
        (24, "(n,2na)"),
        (28, "(n,np)"),
        (32, "(n,nd)"),
        (33, "(n,nt)"),
        (37, "(n,4n)"),
        (41, "(n,2np)"),
        (51, "Inelastic scattering to 1st excited state"),
        (91, "Inelastic scattering to continuum"),
        (101, "Neutron disappearance"),
        (102, "Radiative capture (n,gamma)"),
        (103, "(n,p)"),
        (104, "(n,d)"),
        (105, "(n,t)"),
        (106, "(n,3He)"),
        (107, "(n,a)"),
        (108, "(n,2a)"),
        (451, "File information and dictionary"),
    ]
    .iter()
    .cloned()
    .collect()
});

/// Description for an MF (file) number, falling back to `"File {mf}"`.
pub fn mf_description(mf: i32) -> String {
    MF_DESCRIPTIONS
        .get(&mf)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("File {}", mf))
}

/// Description for an MT (reaction) number, falling back to `"MT={mt}"`.
pub fn mt_description(mt: i32) -> String {
    MT_DESCRIPTIONS
        .get(&mt)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("MT={}", mt))
}

/// Combined description for an (MF, MT) section.
///
/// The header section (1, 451) gets its canonical name; everything else is
/// rendered as `"{file category} - {reaction}"`.
pub fn section_description(mf: i32, mt: i32) -> String {
    if mf == 1 && mt == 451 {
        return "General information and section directory".to_string();
    }
    format!("{} - {}", mf_description(mf), mt_description(mt))
}
