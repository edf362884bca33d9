//! Control Panel Widget
//! Left side panel with the year-range filter and data source status.

use crate::data::DataOrigin;
use crate::stats::YearRange;
use egui::{Color32, RichText, Slider};

/// Left side control panel owning the year-range selection.
pub struct ControlPanel {
    /// Valid-year bounds of the loaded data; `None` disables the selector.
    pub bounds: Option<(i32, i32)>,
    pub range: YearRange,
    pub origin: Option<DataOrigin>,
    pub record_count: usize,
    default_range: YearRange,
}

impl ControlPanel {
    pub fn new(default_range: (i32, i32)) -> Self {
        let default_range = YearRange::new(default_range.0, default_range.1);
        Self {
            bounds: None,
            range: default_range,
            origin: None,
            record_count: 0,
            default_range,
        }
    }

    /// Reset the selector for freshly loaded data.
    pub fn update_data(&mut self, bounds: Option<(i32, i32)>, origin: DataOrigin, count: usize) {
        self.bounds = bounds;
        self.origin = Some(origin);
        self.record_count = count;
        if let Some(bounds) = bounds {
            self.range = self.default_range.clamped(bounds);
        }
    }

    /// Restore `lo <= hi` after one end moved past the other.
    pub fn settle_range(&mut self, lo_moved: bool) {
        if self.range.lo > self.range.hi {
            if lo_moved {
                self.range.hi = self.range.lo;
            } else {
                self.range.lo = self.range.hi;
            }
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(5.0);
        ui.label(RichText::new("🔧 Filters").size(18.0).strong());
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("Select Year Range").size(14.0).strong());
        ui.add_space(5.0);

        match self.bounds {
            Some((min, max)) => {
                let before = self.range;
                let from = ui
                    .horizontal(|ui| {
                        ui.label("From");
                        ui.add(Slider::new(&mut self.range.lo, min..=max))
                    })
                    .inner;
                let to = ui
                    .horizontal(|ui| {
                        ui.label("To   ");
                        ui.add(Slider::new(&mut self.range.hi, min..=max))
                    })
                    .inner;
                self.settle_range(self.range.lo != before.lo);

                ui.label(
                    RichText::new(format!("{} – {}", self.range.lo, self.range.hi))
                        .size(12.0)
                        .color(Color32::GRAY),
                );

                let dragging = from.dragged() || to.dragged();
                if self.range != before && dragging {
                    action = ControlPanelAction::RangeChanged;
                } else if self.range != before || from.drag_stopped() || to.drag_stopped() {
                    action = ControlPanelAction::RangeSettled;
                }
            }
            None => {
                // Placeholder over a copy; the stored range is left alone
                let year = self.range.lo;
                let mut shown = year;
                ui.add_enabled_ui(false, |ui| {
                    ui.add(Slider::new(&mut shown, year..=year));
                });
                ui.label(
                    RichText::new("No records with a valid publish date")
                        .size(12.0)
                        .color(Color32::GRAY),
                );
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let origin_text = self
                    .origin
                    .as_ref()
                    .map(DataOrigin::describe)
                    .unwrap_or_else(|| "No data loaded".to_string());
                ui.label(RichText::new(origin_text).size(12.0));
                ui.label(
                    RichText::new(format!("{} records", self.record_count))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            });

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("🔄 Reload data").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::Reload;
            }
        });

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    /// A slider is still being dragged.
    RangeChanged,
    /// The range changed and no slider is held any more.
    RangeSettled,
    Reload,
}
