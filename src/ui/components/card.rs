//! Card frame and section helpers shared by the panels

use egui::{Color32, Ui};

use crate::ui::theme::Theme;

/// Styled section header with an icon
pub fn section_header(ui: &mut Ui, icon: &str, title: &str) {
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(icon).size(20.0).color(Theme::PRIMARY_LIGHT));
        ui.add_space(8.0);
        ui.label(egui::RichText::new(title).size(17.0).strong());
    });
    ui.add_space(12.0);
}

/// Rounded frame that fills the available width
pub fn card(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::none()
        .fill(Theme::BG_SECONDARY)
        .rounding(egui::Rounding::same(12.0))
        .stroke(egui::Stroke::new(1.0, Theme::BORDER_LIGHT))
        .inner_margin(egui::Margin::same(20.0))
        .outer_margin(egui::Margin::symmetric(0.0, 4.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
}

/// Centered placeholder for an empty table
pub fn empty_state(ui: &mut Ui, icon: &str, title: &str, hint: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(32.0);
        ui.label(egui::RichText::new(icon).size(36.0).color(Theme::TEXT_MUTED));
        ui.add_space(8.0);
        ui.label(egui::RichText::new(title).size(16.0).strong());
        ui.add_space(4.0);
        ui.label(egui::RichText::new(hint).size(13.0).color(Theme::TEXT_SECONDARY));
        ui.add_space(32.0);
    });
}

/// Filled button used for the primary action of a form
pub fn primary_button(ui: &mut Ui, text: &str, enabled: bool) -> egui::Response {
    let button = egui::Button::new(egui::RichText::new(text).color(Color32::WHITE))
        .fill(Theme::PRIMARY)
        .rounding(egui::Rounding::same(8.0))
        .min_size(egui::vec2(130.0, 34.0));
    ui.add_enabled(enabled, button)
}

/// Muted button for secondary actions
pub fn secondary_button(ui: &mut Ui, text: &str, enabled: bool) -> egui::Response {
    let button = egui::Button::new(text)
        .fill(Theme::BG_TERTIARY)
        .rounding(egui::Rounding::same(8.0))
        .min_size(egui::vec2(100.0, 34.0));
    ui.add_enabled(enabled, button)
}

/// Label/value row inside a two-column grid
pub fn detail_row(ui: &mut Ui, label: &str, value: impl Into<egui::WidgetText>) {
    ui.label(egui::RichText::new(label).color(Theme::TEXT_SECONDARY));
    ui.label(value);
    ui.end_row();
}
