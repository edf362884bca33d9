//! Chart Plotter Module
//! Draws the dashboard charts using egui_plot and the egui painter.

use crate::charts::WordCloudLayout;
use egui::{Align2, Color32, FontId, RichText, Sense, Vec2};
use egui_plot::{Bar, BarChart, Plot};

/// Bar colour shared by the timeline and journal charts.
pub const BAR_COLOR: Color32 = Color32::from_rgb(76, 114, 176);

/// Viridis-like ramp, darkest for the least frequent words.
pub const CLOUD_PALETTE: [Color32; 8] = [
    Color32::from_rgb(72, 40, 120),
    Color32::from_rgb(62, 74, 137),
    Color32::from_rgb(49, 104, 142),
    Color32::from_rgb(38, 130, 142),
    Color32::from_rgb(31, 158, 137),
    Color32::from_rgb(53, 183, 121),
    Color32::from_rgb(109, 205, 89),
    Color32::from_rgb(180, 222, 44),
];

const CLOUD_BACKGROUND: Color32 = Color32::BLACK;

/// One-time rendering configuration applied at start-up.
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    pub chart_height: f32,
    pub bar_width: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            chart_height: 360.0,
            bar_width: 0.6,
        }
    }
}

impl ChartStyle {
    /// Light "whitegrid" look for the whole application.
    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_visuals(egui::Visuals::light());
    }
}

/// Creates the dashboard visualizations.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Vertical bars, one per year.
    pub fn draw_timeline(ui: &mut egui::Ui, style: &ChartStyle, yearly: &[(i32, usize)]) {
        ui.label(RichText::new("Publications by Year").size(15.0).strong());
        if yearly.is_empty() {
            Self::empty_placeholder(ui);
            return;
        }

        let bars: Vec<Bar> = yearly
            .iter()
            .map(|&(year, count)| {
                Bar::new(year as f64, count as f64)
                    .width(style.bar_width)
                    .name(year.to_string())
            })
            .collect();

        Plot::new("timeline_chart")
            .height(style.chart_height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Papers")
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| {
                // Only whole years get a tick label
                if mark.value.fract() == 0.0 {
                    format!("{}", mark.value as i64)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name("Papers"));
            });
    }

    /// Horizontal bars, most frequent journal at the top.
    pub fn draw_top_journals(
        ui: &mut egui::Ui,
        style: &ChartStyle,
        journals: &[(String, usize)],
    ) {
        ui.label(RichText::new("Top Journals").size(15.0).strong());
        if journals.is_empty() {
            Self::empty_placeholder(ui);
            return;
        }

        let n = journals.len();
        let labels: Vec<String> = journals.iter().map(|(name, _)| name.clone()).collect();
        let bars: Vec<Bar> = journals
            .iter()
            .enumerate()
            .map(|(i, (name, count))| {
                Bar::new(Self::journal_slot(i, n), *count as f64)
                    .width(style.bar_width)
                    .name(name)
            })
            .collect();

        Plot::new("journal_chart")
            .height(style.chart_height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Papers")
            .include_x(0.0)
            .y_axis_min_width(140.0)
            .y_axis_formatter(move |mark, _range| {
                let slot = mark.value.round();
                if (mark.value - slot).abs() > f64::EPSILON || slot < 0.0 {
                    return String::new();
                }
                // Slot 0 is the bottom bar
                let idx = n.checked_sub(1 + slot as usize);
                idx.and_then(|i| labels.get(i)).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .horizontal()
                        .color(BAR_COLOR)
                        .name("Papers"),
                );
            });
    }

    /// Vertical position of the `rank`-th journal out of `n` (rank 0 on top).
    pub fn journal_slot(rank: usize, n: usize) -> f64 {
        n.saturating_sub(rank + 1) as f64
    }

    /// Paint a laid-out word cloud scaled to the available width.
    pub fn draw_word_cloud(ui: &mut egui::Ui, layout: &WordCloudLayout) {
        if layout.words.is_empty() || layout.width <= 0.0 {
            Self::empty_placeholder(ui);
            return;
        }

        let scale = (ui.available_width() / layout.width).min(1.5);
        let size = Vec2::new(layout.width * scale, layout.height * scale);
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 4.0, CLOUD_BACKGROUND);

        for word in &layout.words {
            let pos = rect.min + Vec2::new(word.x * scale, word.y * scale);
            painter.text(
                pos,
                Align2::LEFT_TOP,
                &word.text,
                FontId::proportional(word.font_size * scale),
                Self::cloud_color(word.weight),
            );
        }

        let hovered = response
            .hover_pos()
            .map(|pos| (pos - rect.min) / scale)
            .and_then(|p| layout.word_at(p.x, p.y));
        if let Some(word) = hovered {
            let label = format!("{}: {} occurrences", word.text, word.count);
            response.on_hover_text_at_pointer(label);
        }
    }

    /// Palette entry for a normalised frequency.
    pub fn cloud_color(weight: f32) -> Color32 {
        let last = CLOUD_PALETTE.len() - 1;
        let idx = (weight.clamp(0.0, 1.0) * last as f32).round() as usize;
        CLOUD_PALETTE[idx.min(last)]
    }

    fn empty_placeholder(ui: &mut egui::Ui) {
        ui.add_space(20.0);
        ui.label(
            RichText::new("No papers in the selected range")
                .size(13.0)
                .color(Color32::GRAY),
        );
    }
}
