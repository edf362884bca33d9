//! Word Cloud Module
//! Title term frequencies and a deterministic word cloud layout.
//!
//! Sizes are estimated from character counts so the layout stays independent
//! of any font backend; the viewer scales the canvas to the space it gets.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use stop_words::{get, LANGUAGE};

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w[\w']+").expect("valid token regex"));
static STOP_WORDS: Lazy<HashSet<String>> = Lazy::new(|| {
    get(LANGUAGE::English)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect()
});

/// Horizontal advance per character, relative to the font size.
const CHAR_WIDTH_RATIO: f32 = 0.58;
const LINE_HEIGHT_RATIO: f32 = 1.15;
const MIN_FONT_SIZE: f32 = 4.0;
const FONT_STEP: f32 = 1.0;
const RELATIVE_SCALING: f32 = 0.5;
const WORD_MARGIN: f32 = 2.0;
/// Side of one occupancy cell, in pixels.
const GRID_CELL: f32 = 2.0;
/// Share of the canvas the estimated text area may cover at start size.
const TARGET_FILL: f32 = 0.4;

/// A term and its frequency relative to the most frequent term.
#[derive(Debug, Clone, PartialEq)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
    pub weight: f32,
}

/// A word positioned on the canvas; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub weight: f32,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlacedWord {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Count title terms, most frequent first, keeping at most `max_words`.
pub fn word_frequencies(text: &str, max_words: usize) -> Vec<WordFrequency> {
    // lowercase key -> surface form -> count
    let mut forms: HashMap<String, HashMap<String, usize>> = HashMap::new();

    for token in tokenize(text) {
        let token = if token.ends_with("'s") || token.ends_with("'S") {
            &token[..token.len() - 2]
        } else {
            token
        };
        if token.is_empty() || token.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let key = token.to_lowercase();
        if STOP_WORDS.contains(&key) {
            continue;
        }
        *forms
            .entry(key)
            .or_default()
            .entry(token.to_string())
            .or_default() += 1;
    }

    // Fold plurals into their singular when both were seen
    let plurals: Vec<String> = forms
        .keys()
        .filter(|k| k.ends_with('s') && !k.ends_with("ss"))
        .filter(|k| forms.contains_key(&k[..k.len() - 1]))
        .cloned()
        .collect();
    for plural in plurals {
        if let Some(plural_forms) = forms.remove(&plural) {
            let singular = forms.entry(plural[..plural.len() - 1].to_string()).or_default();
            let total: usize = plural_forms.values().sum();
            // Attribute the plural count to the singular's dominant form
            let dominant = singular
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(form, _)| form.clone());
            if let Some(form) = dominant {
                *singular.entry(form).or_default() += total;
            }
        }
    }

    let mut counted: Vec<(String, usize)> = forms
        .into_values()
        .filter_map(|variants| {
            let total = variants.values().sum();
            variants
                .into_iter()
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
                .map(|(form, _)| (form, total))
        })
        .collect();
    counted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counted.truncate(max_words);

    let max_count = counted.first().map(|(_, c)| *c).unwrap_or(1) as f32;
    counted
        .into_iter()
        .map(|(word, count)| WordFrequency {
            weight: count as f32 / max_count,
            word,
            count,
        })
        .collect()
}

/// Occupied cells of the canvas with a summed-area table over them, so a
/// rectangle can be tested for collisions in constant time.
struct Occupancy {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
    sums: Vec<u32>,
}

impl Occupancy {
    fn new(width: f32, height: f32) -> Self {
        let cols = (width / GRID_CELL).floor().max(0.0) as usize;
        let rows = (height / GRID_CELL).floor().max(0.0) as usize;
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
            sums: vec![0; (cols + 1) * (rows + 1)],
        }
    }

    fn sum_at(&self, col: usize, row: usize) -> u32 {
        self.sums[row * (self.cols + 1) + col]
    }

    fn is_free(&self, col: usize, row: usize, w: usize, h: usize) -> bool {
        let total = self.sum_at(col + w, row + h) + self.sum_at(col, row)
            - self.sum_at(col + w, row)
            - self.sum_at(col, row + h);
        total == 0
    }

    /// Free top-left cell for a `w` x `h` block closest to the canvas centre.
    fn nearest_free(&self, w: usize, h: usize) -> Option<(usize, usize)> {
        if w == 0 || h == 0 || w > self.cols || h > self.rows {
            return None;
        }
        let row_offsets = centre_out(self.rows, h);
        let col_offsets = centre_out(self.cols, w);
        let mut best: Option<(f32, usize, usize)> = None;

        for &(row, dy) in &row_offsets {
            if best.is_some_and(|(d, _, _)| d <= dy * dy) {
                break;
            }
            for &(col, dx) in &col_offsets {
                let dist = dx * dx + dy * dy;
                if best.is_some_and(|(d, _, _)| d <= dist) {
                    break;
                }
                if self.is_free(col, row, w, h) {
                    best = Some((dist, col, row));
                    break;
                }
            }
        }
        best.map(|(_, col, row)| (col, row))
    }

    fn mark(&mut self, col: usize, row: usize, w: usize, h: usize) {
        for r in row..row + h {
            let start = r * self.cols + col;
            self.cells[start..start + w].fill(true);
        }

        let stride = self.cols + 1;
        for r in 0..self.rows {
            let mut run = 0;
            for c in 0..self.cols {
                run += u32::from(self.cells[r * self.cols + c]);
                self.sums[(r + 1) * stride + c + 1] = self.sums[r * stride + c + 1] + run;
            }
        }
    }
}

/// Start positions of a `span`-cell block along an axis of `len` cells with
/// the block's offset from the centre (relative to `len`), nearest first.
fn centre_out(len: usize, span: usize) -> Vec<(usize, f32)> {
    let mut offsets: Vec<(usize, f32)> = (0..=len - span)
        .map(|start| {
            let offset = (start as f32 + span as f32 / 2.0 - len as f32 / 2.0) / len as f32;
            (start, offset)
        })
        .collect();
    offsets.sort_by(|a, b| a.1.abs().total_cmp(&b.1.abs()));
    offsets
}

/// Word positions on a fixed-size canvas.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WordCloudLayout {
    pub width: f32,
    pub height: f32,
    pub words: Vec<PlacedWord>,
}

impl WordCloudLayout {
    /// Place words largest first, each as close to the centre as it fits.
    ///
    /// Each size follows from the previous word's size and the ratio of
    /// their frequencies. A word that does not fit is shrunk step by step and
    /// later words start from the shrunk size; once a word cannot fit even at
    /// the minimum size the layout stops.
    pub fn generate(freqs: &[WordFrequency], width: u32, height: u32) -> Self {
        let (width, height) = (width as f32, height as f32);
        let mut layout = Self {
            width,
            height,
            words: Vec::new(),
        };
        let Some(first) = freqs.first() else {
            return layout;
        };
        let mut grid = Occupancy::new(width, height);

        let mut font = Self::start_font(freqs, width, height);
        let mut last_weight = first.weight;

        for freq in freqs {
            let ratio = freq.weight / last_weight;
            font = ((RELATIVE_SCALING * ratio + 1.0 - RELATIVE_SCALING) * font).round();
            let chars = freq.word.chars().count() as f32;

            let placed = loop {
                if font < MIN_FONT_SIZE {
                    break None;
                }
                let w = chars * font * CHAR_WIDTH_RATIO;
                let h = font * LINE_HEIGHT_RATIO;
                let cells_w = ((w + WORD_MARGIN) / GRID_CELL).ceil() as usize;
                let cells_h = ((h + WORD_MARGIN) / GRID_CELL).ceil() as usize;

                if let Some((col, row)) = grid.nearest_free(cells_w, cells_h) {
                    grid.mark(col, row, cells_w, cells_h);
                    break Some(PlacedWord {
                        text: freq.word.clone(),
                        count: freq.count,
                        weight: freq.weight,
                        font_size: font,
                        x: col as f32 * GRID_CELL,
                        y: row as f32 * GRID_CELL,
                        width: w,
                        height: h,
                    });
                }
                font -= FONT_STEP;
            };

            match placed {
                Some(word) => layout.words.push(word),
                None => break,
            }
            last_weight = freq.weight;
        }

        layout
    }

    /// Size of the first word: large enough that all words together would
    /// cover `TARGET_FILL` of the canvas, but never wider than the canvas.
    fn start_font(freqs: &[WordFrequency], width: f32, height: f32) -> f32 {
        let mut relative = 1.0;
        let mut last_weight = freqs.first().map_or(1.0, |f| f.weight);
        let mut unit_area = 0.0;
        for freq in freqs {
            relative *= RELATIVE_SCALING * freq.weight / last_weight + 1.0 - RELATIVE_SCALING;
            last_weight = freq.weight;
            let chars = freq.word.chars().count() as f32;
            unit_area += chars * CHAR_WIDTH_RATIO * LINE_HEIGHT_RATIO * relative * relative;
        }

        let by_area = (TARGET_FILL * width * height / unit_area.max(f32::EPSILON)).sqrt();
        let first_chars = freqs
            .first()
            .map_or(1, |f| f.word.chars().count().max(1)) as f32;
        by_area
            .min(height * 0.45)
            .min(width * 0.95 / (first_chars * CHAR_WIDTH_RATIO))
            .round()
    }

    /// Word under a canvas point, if any.
    pub fn word_at(&self, x: f32, y: f32) -> Option<&PlacedWord> {
        self.words.iter().find(|w| w.contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlap(a: &PlacedWord, b: &PlacedWord) -> bool {
        a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
    }

    fn assert_well_placed(layout: &WordCloudLayout) {
        for (i, a) in layout.words.iter().enumerate() {
            assert!(a.x >= 0.0 && a.y >= 0.0);
            assert!(a.x + a.width <= layout.width && a.y + a.height <= layout.height);
            assert!(a.font_size >= MIN_FONT_SIZE);
            for b in &layout.words[i + 1..] {
                assert!(!overlap(a, b), "{} / {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn tokenizer_follows_word_pattern() {
        assert_eq!(
            tokenize("COVID-19: a virus's spike (SARS-CoV-2) isn't x"),
            vec!["COVID", "19", "virus's", "spike", "SARS", "CoV", "isn't"]
        );
    }

    #[test]
    fn frequencies_drop_stop_words_and_numbers() {
        let freqs = word_frequencies("The vaccine and the vaccine of 2020 spike", 10);
        let words: Vec<&str> = freqs.iter().map(|f| f.word.as_str()).collect();
        assert_eq!(words, vec!["vaccine", "spike"]);
        assert_eq!(freqs[0].count, 2);
        assert_eq!(freqs[0].weight, 1.0);
        assert_eq!(freqs[1].weight, 0.5);
    }

    #[test]
    fn case_variants_merge_under_dominant_form() {
        let freqs = word_frequencies("Coronavirus coronavirus Coronavirus pandemic", 10);
        assert_eq!(freqs[0].word, "Coronavirus");
        assert_eq!(freqs[0].count, 3);
    }

    #[test]
    fn plurals_fold_into_singular() {
        let freqs = word_frequencies("vaccine vaccines vaccines protein", 10);
        assert_eq!(freqs[0].word, "vaccine");
        assert_eq!(freqs[0].count, 3);
        assert!(freqs.iter().all(|f| f.word != "vaccines"));
    }

    #[test]
    fn possessive_suffix_is_stripped() {
        let freqs = word_frequencies("Wuhan's outbreak Wuhan", 10);
        assert_eq!(freqs[0].word, "Wuhan");
        assert_eq!(freqs[0].count, 2);
    }

    #[test]
    fn max_words_is_respected() {
        let text = (0..50)
            .map(|i| format!("term{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(word_frequencies(&text, 5).len(), 5);
    }

    fn sample_layout() -> WordCloudLayout {
        let text = "coronavirus coronavirus coronavirus vaccine vaccine spike protein \
                    transmission mortality pandemic epidemiology immunity antibody \
                    respiratory infection clinical outcomes hospital";
        WordCloudLayout::generate(&word_frequencies(text, 200), 800, 400)
    }

    #[test]
    fn layout_stays_on_canvas_without_overlap() {
        let layout = sample_layout();
        assert_eq!(layout.words.len(), 15);
        assert_eq!(layout.words[0].text, "coronavirus");
        assert_eq!(layout.words[0].count, 3);
        assert_well_placed(&layout);
    }

    #[test]
    fn sizes_never_grow_down_the_list() {
        let layout = sample_layout();
        for pair in layout.words.windows(2) {
            assert!(pair[1].font_size <= pair[0].font_size);
        }
    }

    #[test]
    fn long_tail_of_terms_is_placed() {
        // Zipf-like counts over 200 distinct terms
        let freqs: Vec<WordFrequency> = (0..200)
            .map(|i| WordFrequency {
                word: format!("term{i}"),
                count: 1000 / (i + 1),
                weight: (1000 / (i + 1)) as f32 / 1000.0,
            })
            .collect();
        let layout = WordCloudLayout::generate(&freqs, 800, 400);

        assert!(layout.words.len() >= 150, "placed {}", layout.words.len());
        assert_well_placed(&layout);
    }

    #[test]
    fn word_lookup_by_point() {
        let layout = sample_layout();
        let top = &layout.words[0];
        let hit = layout.word_at(top.x + top.width / 2.0, top.y + top.height / 2.0);
        assert_eq!(hit.map(|w| w.text.as_str()), Some("coronavirus"));
        assert!(layout.word_at(-1.0, -1.0).is_none());
    }

    #[test]
    fn layout_is_deterministic() {
        assert_eq!(sample_layout(), sample_layout());
    }

    #[test]
    fn empty_text_gives_empty_layout() {
        let layout = WordCloudLayout::generate(&word_frequencies("", 200), 800, 400);
        assert!(layout.words.is_empty());
        assert_eq!(layout.width, 800.0);
    }
}
