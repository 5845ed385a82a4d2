//! Confirmation dialog

use egui::Context;

use crate::ui::dialogs::{Confirmation, DialogOutcome};
use crate::ui::theme::Theme;

pub fn render(ctx: &Context, confirmation: &Confirmation) -> DialogOutcome {
    let mut open = true;
    let mut outcome = DialogOutcome::Open;

    egui::Window::new(confirmation.title.as_str())
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(350.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(confirmation.message.as_str());

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui
                    .button(egui::RichText::new("Confirm").color(Theme::ERROR))
                    .clicked()
                {
                    outcome = DialogOutcome::Submitted;
                }

                if ui.button("Cancel").clicked() {
                    outcome = DialogOutcome::Closed;
                }
            });
        });

    if !open {
        outcome = DialogOutcome::Closed;
    }
    outcome
}
