//! Disk format badge component

use egui::{Response, Rounding, Ui, Vec2};

use crate::core::DiskFormat;
use crate::ui::theme::Theme;

pub struct FormatBadge;

impl FormatBadge {
    /// Render a pill with the format name
    pub fn show(ui: &mut Ui, format: DiskFormat) -> Response {
        let color = Theme::format_color(format);

        let (rect, response) = ui.allocate_exact_size(Vec2::new(64.0, 22.0), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();

            painter.rect_filled(rect, Rounding::same(11.0), color.linear_multiply(0.15));
            painter.rect_stroke(
                rect,
                Rounding::same(11.0),
                egui::Stroke::new(1.0, color.linear_multiply(0.3)),
            );

            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format.label(),
                egui::FontId::proportional(12.0),
                color,
            );
        }

        response.on_hover_text(format!("Stored as .{}", format.extension()))
    }

    /// Render a small colored dot followed by the format name
    pub fn inline(ui: &mut Ui, format: DiskFormat) -> Response {
        let color = Theme::format_color(format);

        let response = ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::new(8.0, 8.0), egui::Sense::hover());
            if ui.is_rect_visible(rect) {
                ui.painter().circle_filled(rect.center(), 3.5, color);
            }

            ui.add_space(6.0);

            ui.label(egui::RichText::new(format.label()).size(12.0).color(color));
        });

        response.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_badge_is_narrower_than_pill() {
        let ctx = egui::Context::default();
        let mut widths = (0.0, 0.0);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.horizontal(|ui| {
                    widths.0 = FormatBadge::inline(ui, DiskFormat::Raw).rect.width();
                    widths.1 = FormatBadge::show(ui, DiskFormat::Raw).rect.width();
                });
            });
        });

        // Dot plus a three-letter label
        assert!(widths.0 > 8.0, "inline width {}", widths.0);
        assert!(widths.0 < widths.1);
    }
}
