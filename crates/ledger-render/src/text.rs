use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 12.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_size,
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.font_weight = Some("bold".to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Width from terminal column counts, so CJK and emoji count double.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    fn factors(&self) -> (f64, f64) {
        let cw = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let lh = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };
        (cw, lh)
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let (char_width_factor, line_height_factor) = self.factors();
        let font_size = style.font_size.max(1.0);
        let bold = style.font_weight.as_deref() == Some("bold");

        let mut line_count = 0usize;
        let mut max_cols = 0usize;
        for line in text.split('\n') {
            line_count += 1;
            max_cols = max_cols.max(UnicodeWidthStr::width(line));
        }
        let line_count = line_count.max(1);

        let mut width = max_cols as f64 * font_size * char_width_factor;
        if bold {
            width *= 1.05;
        }
        TextMetrics {
            width,
            height: line_count as f64 * font_size * line_height_factor,
            line_count,
        }
    }
}

/// Greedy word wrap to `max_width`. Words longer than a line stay whole on their own line.
pub fn wrap_text(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
    max_width: f64,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measurer.measure(&candidate, style).width <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_wide_glyphs_as_two_columns() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::sized(10.0);
        let ascii = m.measure("ab", &style);
        let wide = m.measure("日本", &style);
        assert_eq!(ascii.width * 2.0, wide.width);
        assert_eq!(ascii.line_count, 1);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::sized(10.0);
        // 6px per column: 60px fits 10 columns.
        let lines = wrap_text(&m, "Granular, revocable consent mechanisms", &style, 60.0);
        assert_eq!(lines, vec!["Granular,", "revocable", "consent", "mechanisms"]);
        assert_eq!(wrap_text(&m, "", &style, 60.0), vec![String::new()]);
    }
}
