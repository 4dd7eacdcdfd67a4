//! Colour helpers: hex parsing, linear interpolation and the fixed palettes.

use ledger_core::model::{EntityCategory, EvidenceKind, FlowCategory, StageKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb`.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let hex = text.trim().strip_prefix('#')?;
        fn hex2(s: &str) -> Option<u8> {
            u8::from_str_radix(s, 16).ok()
        }
        match hex.len() {
            3 => {
                let mut it = hex.chars().map(|c| c.to_digit(16).map(|v| (v * 17) as u8));
                Some(Self::new(it.next()??, it.next()??, it.next()??))
            }
            6 => Some(Self::new(
                hex2(hex.get(0..2)?)?,
                hex2(hex.get(2..4)?)?,
                hex2(hex.get(4..6)?)?,
            )),
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn rgba(self, alpha: f64) -> String {
        let alpha = alpha.clamp(0.0, 1.0);
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            crate::util::fmt(alpha)
        )
    }
}

/// Maps a numeric domain onto a two-stop colour ramp. Values outside the domain clamp.
#[derive(Debug, Clone, Copy)]
pub struct LinearColorScale {
    pub domain: (f64, f64),
    pub range: (Rgb, Rgb),
}

impl LinearColorScale {
    pub fn new(domain: (f64, f64), range: (Rgb, Rgb)) -> Self {
        Self { domain, range }
    }

    /// Pale grey to green across 0..=100, used for dimension levels.
    pub fn level_ramp() -> Self {
        Self::new((0.0, 100.0), (Rgb::new(0xf3, 0xf4, 0xf6), Rgb::new(0x10, 0xb9, 0x81)))
    }

    pub fn color(&self, v: f64) -> String {
        let (d0, d1) = self.domain;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.0 } else { (v - d0) / span };
        self.range.0.lerp(self.range.1, t).to_hex()
    }
}

pub const GREEN: &str = "#10b981";
pub const INDIGO: &str = "#6366f1";
pub const AMBER: &str = "#f59e0b";
pub const RED: &str = "#ef4444";
pub const BLUE: &str = "#3b82f6";
pub const VIOLET: &str = "#8b5cf6";
pub const PINK: &str = "#f472b6";
pub const GREY_300: &str = "#d1d5db";
pub const GREY_500: &str = "#6b7280";
pub const GREY_600: &str = "#4b5563";
pub const GREY_800: &str = "#1f2937";
pub const GREY_50: &str = "#f9fafb";
pub const GREY_100: &str = "#f3f4f6";

pub fn flow_category_color(category: FlowCategory) -> &'static str {
    match category {
        FlowCategory::People => GREEN,
        FlowCategory::Institution => INDIGO,
        FlowCategory::Value => AMBER,
    }
}

pub fn stage_color(kind: StageKind) -> &'static str {
    match kind {
        StageKind::Origin => GREEN,
        StageKind::Process => INDIGO,
        StageKind::Application => AMBER,
        StageKind::Impact => RED,
    }
}

pub fn evidence_color(kind: EvidenceKind) -> &'static str {
    match kind {
        EvidenceKind::Quantitative => BLUE,
        EvidenceKind::Qualitative => VIOLET,
        EvidenceKind::Narrative => GREEN,
    }
}

pub fn entity_fallback_color(category: EntityCategory) -> &'static str {
    match category {
        EntityCategory::Foundation => VIOLET,
        EntityCategory::Intermediary => AMBER,
        EntityCategory::Community => GREEN,
    }
}

pub fn loop_color(reinforcing: bool) -> &'static str {
    if reinforcing { BLUE } else { RED }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Rgb::parse_hex("#fff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::parse_hex("#10b981"), Some(Rgb::new(16, 185, 129)));
        assert_eq!(Rgb::parse_hex("10b981"), None);
        assert_eq!(Rgb::parse_hex("#12345"), None);
    }

    #[test]
    fn level_ramp_hits_both_ends() {
        let s = LinearColorScale::level_ramp();
        assert_eq!(s.color(0.0), "#f3f4f6");
        assert_eq!(s.color(100.0), "#10b981");
        assert_eq!(s.color(250.0), "#10b981");
        assert_ne!(s.color(30.0), s.color(70.0));
    }

    #[test]
    fn rgba_formats_alpha() {
        assert_eq!(Rgb::new(16, 185, 129).rgba(0.85), "rgba(16, 185, 129, 0.85)");
    }
}
