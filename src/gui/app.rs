//! CORD-19 Explorer Main Application
//! Main window with the filter panel and the dashboard.

use crate::charts::ChartStyle;
use crate::config::DashboardConfig;
use crate::data::{CleanRecord, DataCleaner, DataLoader, DataOrigin};
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard};
use crate::stats::{DashboardView, SummaryCalculator};
use egui::SidePanel;
use tracing::{debug, info};

/// Main application window.
pub struct ExplorerApp {
    config: DashboardConfig,
    style: ChartStyle,
    control_panel: ControlPanel,
    dashboard: Dashboard,

    // Cleaned once per load; the view is rebuilt when the range changes
    records: Vec<CleanRecord>,
    origin: DataOrigin,
    view: DashboardView,
}

impl ExplorerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let style = ChartStyle::default();
        style.apply(&cc.egui_ctx);
        Self::with_config(config, style)
    }

    /// Build the application state without a window.
    pub fn with_config(config: DashboardConfig, style: ChartStyle) -> Self {
        let mut control_panel = ControlPanel::new(config.default_year_range);
        let (records, origin) = Self::load(&config, &mut control_panel);
        let view = DashboardView::compute(&records, control_panel.range, &config);
        Self {
            config,
            style,
            control_panel,
            dashboard: Dashboard::new(),
            records,
            origin,
            view,
        }
    }

    /// Run load and clean, then reset the selector for the new records.
    fn load(
        config: &DashboardConfig,
        control_panel: &mut ControlPanel,
    ) -> (Vec<CleanRecord>, DataOrigin) {
        let loaded = DataLoader::from_config(config).load_or_sample();
        let records = DataCleaner::clean(&loaded.records);

        let bounds = SummaryCalculator::year_bounds(&records);
        info!(
            records = records.len(),
            ?bounds,
            origin = %loaded.origin.describe(),
            "dataset ready"
        );

        control_panel.update_data(bounds, loaded.origin.clone(), records.len());
        (records, loaded.origin)
    }

    fn reload(&mut self) {
        let (records, origin) = Self::load(&self.config, &mut self.control_panel);
        self.records = records;
        self.origin = origin;
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        let range = self.control_panel.range;
        debug!(range = %range.label(), "recomputing dashboard");
        self.view = DashboardView::compute(&self.records, range, &self.config);
    }

    /// Cheap refresh while a slider is held; the word cloud waits for release.
    fn refresh_aggregates(&mut self) {
        let range = self.control_panel.range;
        let fresh = DashboardView::aggregates(&self.records, range, &self.config);
        let previous = std::mem::replace(&mut self.view, fresh);
        self.view.take_cloud_from(previous);
    }
}

#[cfg(test)]
impl ExplorerApp {
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn origin(&self) -> &DataOrigin {
        &self.origin
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                let action = self.control_panel.show(ui);

                match action {
                    ControlPanelAction::RangeChanged => self.refresh_aggregates(),
                    ControlPanelAction::RangeSettled => self.refresh_view(),
                    ControlPanelAction::Reload => self.reload(),
                    ControlPanelAction::None => {}
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.dashboard
                    .show(ui, &self.style, &self.view, self.origin.diagnostic());
            });
        });
    }
}
