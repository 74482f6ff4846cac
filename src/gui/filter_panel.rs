//! Filter Panel Widget
//! Left side panel with the two multi-valued category selectors.

use crate::data::FilterSelection;
use egui::{RichText, ScrollArea};
use std::collections::BTreeSet;

/// Region and period selectors. Option lists come from the distinct
/// sorted values of the loaded dataset; the selection itself is the
/// filter state applied every frame.
pub struct FilterPanel {
    pub selection: FilterSelection,
    regions: Vec<String>,
    periods: Vec<String>,
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self {
            selection: FilterSelection::default(),
            regions: Vec::new(),
            periods: Vec::new(),
        }
    }
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the selector options after the dataset load.
    pub fn set_options(&mut self, regions: Vec<String>, periods: Vec<String>) {
        self.regions = regions;
        self.periods = periods;
        self.selection.clear();
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("🔎 Filters").size(14.0).strong());
        ui.add_space(5.0);

        Self::checkbox_list(
            ui,
            "Region(s)",
            "region_filter",
            &self.regions,
            &mut self.selection.regions,
        );
        ui.add_space(10.0);
        Self::checkbox_list(
            ui,
            "Period(s)",
            "period_filter",
            &self.periods,
            &mut self.selection.periods,
        );

        ui.add_space(8.0);
        ui.add_enabled_ui(!self.selection.is_empty(), |ui| {
            if ui.small_button("Reset filters").clicked() {
                self.selection.clear();
            }
        });
    }

    /// Scrollable checkbox list over one category. An empty selection
    /// means "no restriction", so nothing is pre-checked.
    fn checkbox_list(
        ui: &mut egui::Ui,
        label: &str,
        id: &str,
        options: &[String],
        selected: &mut BTreeSet<String>,
    ) {
        ui.label(label);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(140.0)
                    .show(ui, |ui| {
                        for option in options {
                            let mut checked = selected.contains(option);
                            if ui.checkbox(&mut checked, option).changed() {
                                if checked {
                                    selected.insert(option.clone());
                                } else {
                                    selected.remove(option);
                                }
                            }
                        }
                    });
            });

        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                *selected = options.iter().cloned().collect();
            }
            if ui.small_button("Clear All").clicked() {
                selected.clear();
            }
        });
    }
}
