//! Word-cloud layout.
//!
//! Tokenizes the full text (independently of the ranked top-N list), weights
//! font size by frequency, and places words on an Archimedean spiral with
//! rectangle collision tests. Layout is deterministic: jitter comes from a
//! hash of the word index, not an RNG, so the same text always produces the
//! same cloud.

use crate::text::frequency::count_tokens;
use crate::text::normalize::{strip_punctuation, strip_tags};
use crate::text::segment::tokenize;

/// A word with its computed position and size on the cloud canvas.
#[derive(Debug, Clone)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub font_size: f32,
    /// Top-left corner of the word's bounding box
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Index into the render palette
    pub color_index: usize,
}

/// A finished layout in canvas coordinates.
#[derive(Debug, Clone)]
pub struct CloudLayout {
    pub words: Vec<PlacedWord>,
    pub width: f32,
    pub height: f32,
}

/// Word-cloud generator.
pub struct WordCloud {
    max_words: usize,
    min_word_len: usize,
    min_font: f32,
    max_font: f32,
    width: f32,
    height: f32,
}

/// Spiral step granularity (radians per step)
const SPIRAL_STEP: f32 = 0.3;
/// Spiral radius growth per radian
const SPIRAL_GROWTH: f32 = 2.4;
/// Max spiral steps before a word is given up on
const MAX_STEPS: usize = 800;
/// Gap kept between placed boxes
const BOX_PADDING: f32 = 2.0;

impl Default for WordCloud {
    fn default() -> Self {
        Self {
            max_words: 200,
            min_word_len: 2,
            min_font: 14.0,
            max_font: 68.0,
            width: 800.0,
            height: 500.0,
        }
    }
}

impl WordCloud {
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    pub fn with_min_word_len(mut self, min_word_len: usize) -> Self {
        self.min_word_len = min_word_len;
        self
    }

    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Generate a layout for `text`, or `None` if the text yields no words.
    pub fn generate(&self, text: &str) -> Option<CloudLayout> {
        if text.trim().is_empty() {
            return None;
        }

        let stripped = strip_punctuation(&strip_tags(text));
        let tokens = tokenize(&stripped)
            .into_iter()
            .filter(|t| t.chars().count() >= self.min_word_len);
        let mut counts = count_tokens(tokens);
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(self.max_words);

        if counts.is_empty() {
            return None;
        }

        let max_count = counts[0].count as f32;
        let cx = self.width * 0.5;
        let cy = self.height * 0.5;

        let mut placed: Vec<PlacedWord> = Vec::new();
        for (i, tc) in counts.iter().enumerate() {
            let weight = (tc.count as f32 / max_count).sqrt();
            let font_size = self.min_font + (self.max_font - self.min_font) * weight;
            let w = approx_text_width(&tc.token, font_size);
            let h = font_size * 1.2;

            let phase = layout_hash(i) * std::f32::consts::TAU;
            if let Some((x, y)) = self.find_spot(cx, cy, w, h, phase, &placed) {
                placed.push(PlacedWord {
                    text: tc.token.clone(),
                    count: tc.count,
                    font_size,
                    x,
                    y,
                    width: w,
                    height: h,
                    color_index: i,
                });
            }
        }

        Some(CloudLayout {
            words: placed,
            width: self.width,
            height: self.height,
        })
    }

    /// Walk the spiral outward until the box fits without touching anything.
    fn find_spot(
        &self,
        cx: f32,
        cy: f32,
        w: f32,
        h: f32,
        phase: f32,
        placed: &[PlacedWord],
    ) -> Option<(f32, f32)> {
        for step in 0..MAX_STEPS {
            let t = step as f32 * SPIRAL_STEP;
            let r = SPIRAL_GROWTH * t;
            let x = cx + r * (t + phase).cos() - w * 0.5;
            // Flatten vertically so the cloud fills a wide canvas
            let y = cy + r * 0.55 * (t + phase).sin() - h * 0.5;

            if x < 0.0 || y < 0.0 || x + w > self.width || y + h > self.height {
                continue;
            }
            if !placed.iter().any(|p| boxes_overlap(x, y, w, h, p)) {
                return Some((x, y));
            }
        }
        None
    }
}

fn boxes_overlap(x: f32, y: f32, w: f32, h: f32, p: &PlacedWord) -> bool {
    x < p.x + p.width + BOX_PADDING
        && p.x < x + w + BOX_PADDING
        && y < p.y + p.height + BOX_PADDING
        && p.y < y + h + BOX_PADDING
}

/// Approximate rendered width: ASCII glyphs are roughly half an em wide,
/// everything else (CJK in particular) a full em.
fn approx_text_width(text: &str, font_size: f32) -> f32 {
    text.chars()
        .map(|c| if c.is_ascii() { 0.55 } else { 1.0 })
        .sum::<f32>()
        * font_size
}

fn layout_hash(seed: usize) -> f32 {
    let x = seed.wrapping_mul(2654435761) ^ seed.wrapping_mul(340573321);
    ((x & 0xFFFF) as f32) / 65535.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "rust rust rust cloud cloud words words tokens layout \
                        spiral canvas canvas frequency frequency frequency";

    #[test]
    fn empty_text_yields_no_layout() {
        assert!(WordCloud::default().generate("").is_none());
        assert!(WordCloud::default().generate("  \n ").is_none());
    }

    #[test]
    fn text_with_only_short_tokens_yields_no_layout() {
        assert!(WordCloud::default().generate("a b c").is_none());
    }

    #[test]
    fn places_words_without_overlap() {
        let layout = WordCloud::default().generate(TEXT).unwrap();
        assert!(!layout.words.is_empty());
        for (i, a) in layout.words.iter().enumerate() {
            for b in layout.words.iter().skip(i + 1) {
                let disjoint = a.x + a.width <= b.x
                    || b.x + b.width <= a.x
                    || a.y + a.height <= b.y
                    || b.y + b.height <= a.y;
                assert!(disjoint, "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn more_frequent_words_get_larger_fonts() {
        let layout = WordCloud::default().generate(TEXT).unwrap();
        let font_of = |word: &str| {
            layout
                .words
                .iter()
                .find(|p| p.text == word)
                .map(|p| p.font_size)
                .unwrap()
        };
        assert!(font_of("rust") > font_of("tokens"));
        assert!(font_of("frequency") > font_of("spiral"));
    }

    #[test]
    fn layout_is_deterministic() {
        let a = WordCloud::default().generate(TEXT).unwrap();
        let b = WordCloud::default().generate(TEXT).unwrap();
        assert_eq!(a.words.len(), b.words.len());
        for (wa, wb) in a.words.iter().zip(&b.words) {
            assert_eq!(wa.text, wb.text);
            assert_eq!(wa.x, wb.x);
            assert_eq!(wa.y, wb.y);
        }
    }

    #[test]
    fn chinese_text_lays_out() {
        let layout = WordCloud::default()
            .generate("你好 你好 世界 世界 世界")
            .unwrap();
        let tokens: Vec<&str> = layout.words.iter().map(|p| p.text.as_str()).collect();
        assert!(tokens.contains(&"你好"));
        assert!(tokens.contains(&"世界"));
    }
}
