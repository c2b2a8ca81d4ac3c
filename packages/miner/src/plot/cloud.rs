//! Word cloud layout and rendering.
//!
//! Words are placed largest first along an Archimedean spiral from the
//! centre; a word takes the first spiral point where its bounding box fits
//! inside the canvas without touching an already placed word.

use plotters::coord::Shift;
use plotters::prelude::*;

use super::plot_error;
use crate::error::Result;

const MIN_FONT: f64 = 12.0;
const MAX_FONT: f64 = 96.0;
/// Average glyph width relative to the font size.
const GLYPH_WIDTH: f64 = 0.6;
const LINE_HEIGHT: f64 = 1.2;
const SPIRAL_STEP: f64 = 0.1;
const SPIRAL_GROWTH: f64 = 2.0;
const MAX_STEPS: usize = 20_000;

/// A word with its position and box, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: f64,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PlacedWord {
    fn overlaps(&self, other: &PlacedWord) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

fn font_size(count: usize, min: usize, max: usize, ceiling: f64) -> f64 {
    let ceiling = ceiling.clamp(MIN_FONT, MAX_FONT);
    if max == min {
        return ceiling;
    }
    let share = (count - min) as f64 / (max - min) as f64;
    MIN_FONT + share * (ceiling - MIN_FONT)
}

/// Place words on a canvas of `size` pixels.
///
/// Input order does not matter. Words that find no free spot are left out.
pub fn layout_cloud(words: &[(&str, usize)], size: (u32, u32)) -> Vec<PlacedWord> {
    let (canvas_w, canvas_h) = (f64::from(size.0), f64::from(size.1));
    let mut sorted: Vec<(&str, usize)> = words.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let max = sorted.first().map(|w| w.1).unwrap_or(0);
    let min = sorted.last().map(|w| w.1).unwrap_or(0);
    let ceiling = canvas_h / 5.0;
    let aspect = if canvas_w > 0.0 { canvas_h / canvas_w } else { 1.0 };

    let mut placed: Vec<PlacedWord> = Vec::with_capacity(sorted.len());
    for (word, count) in sorted {
        let font = font_size(count, min, max, ceiling);
        let width = (word.chars().count() as f64 * font * GLYPH_WIDTH).ceil();
        let height = (font * LINE_HEIGHT).ceil();

        let mut spot = None;
        for step in 0..MAX_STEPS {
            let t = step as f64 * SPIRAL_STEP;
            let radius = SPIRAL_GROWTH * t;
            let x = (canvas_w - width) / 2.0 + radius * t.cos();
            let y = (canvas_h - height) / 2.0 + radius * t.sin() * aspect;
            if x < 0.0 || y < 0.0 || x + width > canvas_w || y + height > canvas_h {
                continue;
            }
            let candidate = PlacedWord {
                word: word.to_string(),
                count,
                font_size: font,
                x: x as i32,
                y: y as i32,
                width: width as i32,
                height: height as i32,
            };
            if !placed.iter().any(|p| p.overlaps(&candidate)) {
                spot = Some(candidate);
                break;
            }
        }

        match spot {
            Some(candidate) => placed.push(candidate),
            None => tracing::debug!(word, count, "No room left in word cloud"),
        }
    }
    placed
}

/// Render words into the drawing area, sized by count.
pub fn draw_word_cloud<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    words: &[(&str, usize)],
) -> Result<()> {
    let placed = layout_cloud(words, area.dim_in_pixel());
    for (i, word) in placed.iter().enumerate() {
        let style = ("sans-serif", word.font_size)
            .into_font()
            .color(&Palette99::pick(i));
        area.draw(&Text::new(word.word.clone(), (word.x, word.y), style))
            .map_err(plot_error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Vec<(&'static str, usize)> {
        vec![
            ("landlord", 40),
            ("tenant", 35),
            ("rent", 20),
            ("notice", 18),
            ("unit", 12),
            ("tribunal", 9),
            ("deposit", 5),
            ("repair", 3),
            ("order", 2),
            ("fee", 1),
        ]
    }

    #[test]
    fn test_places_all_words_on_roomy_canvas() {
        assert_eq!(layout_cloud(&words(), (800, 600)).len(), 10);
    }

    #[test]
    fn test_no_overlaps_and_within_bounds() {
        let placed = layout_cloud(&words(), (400, 300));
        for (i, a) in placed.iter().enumerate() {
            assert!(a.x >= 0 && a.y >= 0);
            assert!(a.x + a.width <= 400 && a.y + a.height <= 300, "{a:?}");
            for b in &placed[i + 1..] {
                assert!(!a.overlaps(b), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn test_larger_counts_get_larger_fonts() {
        let placed = layout_cloud(&words(), (800, 600));
        assert_eq!(placed[0].word, "landlord");
        assert!(placed.windows(2).all(|w| w[0].font_size >= w[1].font_size));
        assert!((placed[0].font_size - 96.0).abs() < f64::EPSILON);
        assert!((placed[9].font_size - MIN_FONT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tiny_canvas_drops_words() {
        let placed = layout_cloud(&words(), (60, 30));
        assert!(placed.len() < 10);
    }

    #[test]
    fn test_empty_input() {
        assert!(layout_cloud(&[], (100, 100)).is_empty());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            layout_cloud(&words(), (500, 400)),
            layout_cloud(&words(), (500, 400))
        );
    }
}
