use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

/// Parse a CSS/SVG color name (`darkred`) or a hex code (`#8b0000`).
pub fn parse_color(name: &str) -> Option<Srgb<u8>> {
    let name = name.trim();
    if let Some(c) = palette::named::from_str(&name.to_ascii_lowercase()) {
        return Some(c);
    }
    if name.starts_with('#') {
        return name.parse::<Srgb<u8>>().ok();
    }
    None
}

// ---------------------------------------------------------------------------
// Color mapping: population → colour
// ---------------------------------------------------------------------------

/// Fixed colour per population. Configured names win; the rest are filled
/// from a generated palette.
#[derive(Debug, Clone)]
pub struct ColorMap {
    order: Vec<String>,
    mapping: BTreeMap<String, Srgb<u8>>,
    default_color: Srgb<u8>,
}

impl ColorMap {
    pub fn new(populations: &[String], configured: &BTreeMap<String, String>) -> Self {
        let unassigned: Vec<&String> = populations
            .iter()
            .filter(|p| configured.get(*p).and_then(|c| parse_color(c)).is_none())
            .collect();
        let mut generated = generate_palette(unassigned.len()).into_iter();

        let mapping = populations
            .iter()
            .filter_map(|p| {
                let color = configured
                    .get(p)
                    .and_then(|c| parse_color(c))
                    .or_else(|| generated.next())?;
                Some((p.clone(), color))
            })
            .collect();

        ColorMap {
            order: populations.to_vec(),
            mapping,
            default_color: Srgb::new(128, 128, 128),
        }
    }

    pub fn color_for(&self, population: &str) -> Srgb<u8> {
        self.mapping
            .get(population)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries in population order.
    pub fn legend_entries(&self) -> Vec<(String, Srgb<u8>)> {
        self.order
            .iter()
            .map(|p| (p.clone(), self.color_for(p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_hex() {
        assert_eq!(parse_color("darkred"), Some(Srgb::new(139, 0, 0)));
        assert_eq!(parse_color("Navy"), Some(Srgb::new(0, 0, 128)));
        assert_eq!(parse_color("#006400"), Some(Srgb::new(0, 100, 0)));
        assert_eq!(parse_color("bogus"), None);
    }

    #[test]
    fn unconfigured_populations_get_palette_colors() {
        let pops: Vec<String> = vec!["PJL".into(), "GIH".into(), "STU".into()];
        let mut configured = BTreeMap::new();
        configured.insert("PJL".to_string(), "darkred".to_string());

        let map = ColorMap::new(&pops, &configured);
        assert_eq!(map.color_for("PJL"), Srgb::new(139, 0, 0));
        assert_ne!(map.color_for("GIH"), map.color_for("STU"));

        let legend = map.legend_entries();
        let names: Vec<&str> = legend.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["PJL", "GIH", "STU"]);
    }
}
