//! Dashboard Viewer Widget
//! Central panel: metrics, tabbed charts, data sample and key insights.

use crate::charts::{ChartPlotter, ChartStyle};
use crate::data::CleanRecord;
use crate::stats::DashboardView;
use egui::{Color32, RichText};

/// Tabs of the visualization area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Timeline,
    Journals,
    WordCloud,
    DataSample,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 4] = [
        DashboardTab::Timeline,
        DashboardTab::Journals,
        DashboardTab::WordCloud,
        DashboardTab::DataSample,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Timeline => "📈 Timeline",
            DashboardTab::Journals => "📊 Journals",
            DashboardTab::WordCloud => "☁️ Word Cloud",
            DashboardTab::DataSample => "📝 Data Sample",
        }
    }
}

const SAMPLE_HEADERS: [&str; 8] = [
    "title",
    "abstract",
    "publish_time",
    "journal",
    "authors",
    "source",
    "year",
    "abstract_word_count",
];

/// Widest a sample cell may grow before its text is truncated.
const CELL_WIDTH: f32 = 180.0;

/// Central dashboard area.
#[derive(Default)]
pub struct Dashboard {
    pub tab: DashboardTab,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        style: &ChartStyle,
        view: &DashboardView,
        diagnostic: Option<&str>,
    ) {
        ui.heading(RichText::new("📊 CORD-19 Research Dataset Explorer").size(26.0));
        ui.add_space(8.0);

        if let Some(message) = diagnostic {
            Self::draw_diagnostic(ui, message);
            ui.add_space(8.0);
        }

        Self::draw_metrics(ui, view);
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            for tab in DashboardTab::ALL {
                ui.selectable_value(&mut self.tab, tab, RichText::new(tab.label()).size(14.0));
            }
        });
        ui.separator();
        ui.add_space(6.0);

        match self.tab {
            DashboardTab::Timeline => ChartPlotter::draw_timeline(ui, style, &view.yearly),
            DashboardTab::Journals => {
                ChartPlotter::draw_top_journals(ui, style, &view.top_journals)
            }
            DashboardTab::WordCloud => {
                if !view.cloud_is_current() {
                    ui.label(
                        RichText::new("Word cloud updates when the slider is released")
                            .size(12.0)
                            .color(Color32::GRAY),
                    );
                }
                ChartPlotter::draw_word_cloud(ui, &view.word_cloud)
            }
            DashboardTab::DataSample => Self::draw_sample(ui, &view.sample),
        }

        ui.add_space(16.0);
        ui.heading(RichText::new("💡 Key Insights").size(20.0));
        ui.add_space(4.0);
        ui.label(format!(
            "• Average abstract length: {}",
            view.insights.average_length_text()
        ));
        ui.label(format!(
            "• Papers with abstracts: {}",
            view.insights.abstracts_text()
        ));
    }

    fn draw_diagnostic(ui: &mut egui::Ui, message: &str) {
        egui::Frame::none()
            .fill(Color32::from_rgb(255, 243, 205))
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!(
                        "⚠ Metadata file unreadable, showing sample data: {message}"
                    ))
                    .size(12.0)
                    .color(Color32::from_rgb(133, 100, 4)),
                );
            });
    }

    fn draw_metrics(ui: &mut egui::Ui, view: &DashboardView) {
        let metrics = [
            ("Total Papers", view.total_papers.to_string()),
            ("Time Range", view.range.label()),
            ("Journals", view.journal_count.to_string()),
        ];

        ui.columns(metrics.len(), |columns| {
            for (ui, (label, value)) in columns.iter_mut().zip(metrics) {
                ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
                ui.label(RichText::new(value).size(28.0).strong());
            }
        });
    }

    fn draw_sample(ui: &mut egui::Ui, sample: &[CleanRecord]) {
        if sample.is_empty() {
            ui.label(
                RichText::new("No papers in the selected range")
                    .size(13.0)
                    .color(Color32::GRAY),
            );
            return;
        }

        egui::ScrollArea::horizontal().show(ui, |ui| {
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    egui::Grid::new("data_sample_table")
                        .striped(true)
                        .min_col_width(60.0)
                        .max_col_width(CELL_WIDTH)
                        .spacing([8.0, 4.0])
                        .show(ui, |ui| {
                            for name in SAMPLE_HEADERS {
                                ui.label(RichText::new(name).strong().size(11.0));
                            }
                            ui.end_row();

                            for record in sample {
                                for cell in sample_cells(record) {
                                    let label = egui::Label::new(RichText::new(&cell).size(11.0))
                                        .truncate();
                                    ui.add(label).on_hover_text(cell);
                                }
                                ui.end_row();
                            }
                        });
                });
        });
    }
}

/// Table cells for one record, in `SAMPLE_HEADERS` order.
fn sample_cells(record: &CleanRecord) -> [String; 8] {
    let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "None".to_string());
    [
        text(&record.title),
        text(&record.abstract_text),
        record
            .published
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "NaT".to_string()),
        record.journal.clone(),
        text(&record.authors),
        text(&record.source),
        record
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "None".to_string()),
        record.abstract_word_count.to_string(),
    ]
}
