//! Font metrics and naming
//!
//! Every weight is drawn on the same nine-cell em: eight cells above the
//! baseline and one below, with glyph advances counted in whole cells.

use norad::fontinfo::NonNegativeIntegerOrFloat;

/// Vertical metrics of one weight, in design units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: f64,
    pub ascender: f64,
    pub descender: f64,
    pub underline_position: f64,
}

impl FontMetrics {
    /// Metrics for a weight drawn with `size` units per grid cell
    pub fn for_size(size: f64) -> Self {
        Self {
            units_per_em: size * 9.0,
            ascender: size * 8.0,
            descender: -size,
            underline_position: -size,
        }
    }

    #[cfg(test)]
    pub fn line_height(&self) -> f64 {
        self.ascender - self.descender
    }
}

/// Naming and metrics written to the UFO font info
#[derive(Debug, Clone, PartialEq)]
pub struct FontInfo {
    pub family_name: String,
    pub style_name: String,
    pub copyright: Option<String>,
    pub version: (u32, u32),
    pub metrics: FontMetrics,
}

impl FontInfo {
    pub fn new(family_name: &str, style_name: &str, size: f64) -> Self {
        Self {
            family_name: family_name.to_string(),
            style_name: style_name.to_string(),
            copyright: None,
            version: (1, 0),
            metrics: FontMetrics::for_size(size),
        }
    }

    /// Get a display name combining family and style names
    pub fn get_display_name(&self) -> String {
        let parts: Vec<&str> = [&self.family_name, &self.style_name]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect();

        if parts.is_empty() {
            "Untitled Font".to_string()
        } else {
            parts.join(" ")
        }
    }

    /// File stem used for the written source, e.g. `Family-Bold`
    pub fn file_stem(&self) -> String {
        let family: String = self.family_name.split_whitespace().collect();
        format!("{}-{}", family, self.style_name)
    }

    /// Convert to norad FontInfo
    pub fn to_norad_font_info(&self) -> norad::FontInfo {
        let mut info = norad::FontInfo::default();

        // Set family and style names
        if !self.family_name.is_empty() {
            info.family_name = Some(self.family_name.clone());
            info.open_type_name_preferred_family_name = Some(self.family_name.clone());
        }
        if !self.style_name.is_empty() {
            info.style_name = Some(self.style_name.clone());
            info.postscript_weight_name = Some(self.style_name.clone());
        }
        info.postscript_font_name = Some(self.file_stem());
        info.postscript_full_name = Some(self.get_display_name());
        info.copyright = self.copyright.clone();
        info.version_major = Some(self.version.0 as i32);
        info.version_minor = Some(self.version.1);

        // Set numeric values
        let metrics = &self.metrics;
        if let Some(units_per_em) = NonNegativeIntegerOrFloat::new(metrics.units_per_em) {
            info.units_per_em = Some(units_per_em);
        }
        info.ascender = Some(metrics.ascender);
        info.descender = Some(metrics.descender);
        info.postscript_underline_position = Some(metrics.underline_position);
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_scale_with_cell_size() {
        let metrics = FontMetrics::for_size(10.0);
        assert_eq!(metrics.units_per_em, 90.0);
        assert_eq!(metrics.ascender, 80.0);
        assert_eq!(metrics.descender, -10.0);
        assert_eq!(metrics.underline_position, -10.0);
        assert_eq!(metrics.line_height(), 90.0);
    }

    #[test]
    fn norad_info_carries_names_and_metrics() {
        let mut font_info = FontInfo::new("Pixel Mono", "Bold", 244.0);
        font_info.copyright = Some("Example".to_string());
        let info = font_info.to_norad_font_info();
        assert_eq!(info.family_name.as_deref(), Some("Pixel Mono"));
        assert_eq!(info.style_name.as_deref(), Some("Bold"));
        assert_eq!(
            info.open_type_name_preferred_family_name.as_deref(),
            Some("Pixel Mono")
        );
        assert_eq!(info.postscript_font_name.as_deref(), Some("PixelMono-Bold"));
        assert_eq!(info.ascender, Some(1952.0));
        assert_eq!(info.descender, Some(-244.0));
        let upm = info.units_per_em.map(|v| v.to_string().parse::<f64>().unwrap());
        assert_eq!(upm, Some(2196.0));
        assert_eq!(info.copyright.as_deref(), Some("Example"));
    }

    #[test]
    fn display_name_falls_back() {
        assert_eq!(FontInfo::new("", "", 1.0).get_display_name(), "Untitled Font");
        assert_eq!(FontInfo::new("Pixel", "Thin", 1.0).get_display_name(), "Pixel Thin");
    }
}
