//! Create-container dialog

use egui::{Color32, Context};

use crate::ui::dialogs::{ContainerDraft, DialogOutcome};
use crate::ui::theme::{Icons, Theme};

/// Render the dialog. While `creating` is set the inputs are locked and the
/// window stays open until the app closes it on success.
pub fn render(ctx: &Context, draft: &mut ContainerDraft, creating: bool) -> DialogOutcome {
    let mut open = true;
    let mut outcome = DialogOutcome::Open;

    egui::Window::new("Create Container")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(Icons::IMAGE).size(18.0).color(Theme::PRIMARY));
                ui.label(egui::RichText::new(draft.image.reference()).strong());
            });
            ui.label(
                egui::RichText::new(&draft.image.id)
                    .small()
                    .monospace()
                    .color(Theme::TEXT_MUTED),
            );

            ui.add_space(16.0);

            ui.label(
                egui::RichText::new("Container name (optional)")
                    .size(13.0)
                    .color(Theme::TEXT_SECONDARY),
            );
            let response = ui.add_enabled(
                !creating,
                egui::TextEdit::singleline(&mut draft.name)
                    .hint_text("Leave empty for a generated name")
                    .desired_width(f32::INFINITY),
            );
            let submitted_with_enter =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                let label = if creating { "Creating..." } else { "Create" };
                let create_btn =
                    egui::Button::new(egui::RichText::new(label).color(Color32::WHITE))
                        .fill(Theme::PRIMARY)
                        .rounding(egui::Rounding::same(8.0))
                        .min_size(egui::vec2(110.0, 32.0));

                if ui.add_enabled(!creating, create_btn).clicked()
                    || (submitted_with_enter && !creating)
                {
                    outcome = DialogOutcome::Submitted;
                }

                if creating {
                    ui.spinner();
                }

                if ui.add_enabled(!creating, egui::Button::new("Cancel")).clicked() {
                    outcome = DialogOutcome::Closed;
                }
            });
        });

    if !open && !creating {
        outcome = DialogOutcome::Closed;
    }
    outcome
}
