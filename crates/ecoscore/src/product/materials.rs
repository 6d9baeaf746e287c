//! Approximate CO2-equivalent factors (kg CO2e per kg of material) for common
//! garment materials.

/// Factor applied to materials missing from the catalogue.
pub const DEFAULT_MATERIAL_IMPACT: f64 = 10.0;

const MATERIAL_IMPACTS: &[(&str, f64)] = &[
    // natural fibres
    ("cotton", 8.0),
    ("organic_cotton", 4.0),
    ("linen", 5.5),
    ("hemp", 3.5),
    ("wool", 12.0),
    ("silk", 15.0),
    // synthetics
    ("polyester", 9.5),
    ("recycled_polyester", 5.0),
    ("nylon", 12.0),
    ("acrylic", 11.0),
    ("elastane", 10.0),
    // regenerated
    ("viscose", 7.0),
    ("lyocell", 4.5),
    ("modal", 5.0),
    // leather and alternatives
    ("leather", 17.0),
    ("vegan_leather", 8.0),
    ("faux_leather", 9.0),
    // hardware and trims
    ("rubber", 6.0),
    ("metal", 15.0),
    ("plastic", 10.0),
    ("recycled_plastic", 5.5),
    ("wood", 2.0),
    ("bamboo", 3.0),
    ("glass", 8.5),
];

/// Lower-cases and replaces spaces/hyphens with underscores.
pub fn normalize_material_id(material: &str) -> String {
    material
        .trim()
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}

pub fn known_material_impact(material: &str) -> Option<f64> {
    let normalized = normalize_material_id(material);
    MATERIAL_IMPACTS
        .iter()
        .find(|(id, _)| *id == normalized)
        .map(|(_, impact)| *impact)
}

pub fn material_impact(material: &str) -> f64 {
    known_material_impact(material).unwrap_or(DEFAULT_MATERIAL_IMPACT)
}
