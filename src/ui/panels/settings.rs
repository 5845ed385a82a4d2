//! Settings panel

use egui::{Color32, Context, Ui, Vec2};

use crate::core::settings::{Theme as SettingsTheme, DAEMON_URL_ENV};
use crate::core::{AppState, Settings};
use crate::ui::app::{Notification, NotificationLevel};
use crate::ui::components::{card, section_header};
use crate::ui::theme::{Icons, Theme};

/// Custom toggle switch widget
fn toggle_switch(ui: &mut Ui, on: &mut bool) -> egui::Response {
    let desired_size = Vec2::new(44.0, 24.0);
    let (rect, mut response) = ui.allocate_exact_size(desired_size, egui::Sense::click());

    if response.clicked() {
        *on = !*on;
        response.mark_changed();
    }

    if ui.is_rect_visible(rect) {
        let how_on = ui.ctx().animate_bool_responsive(response.id, *on);

        let track_color = if *on { Theme::SUCCESS } else { Theme::BG_TERTIARY };
        ui.painter().rect(
            rect,
            egui::Rounding::same(12.0),
            track_color,
            egui::Stroke::new(1.0, if *on { Theme::SUCCESS } else { Theme::BORDER }),
        );

        let circle_x = egui::lerp((rect.left() + 12.0)..=(rect.right() - 12.0), how_on);
        ui.painter().circle(
            egui::pos2(circle_x, rect.center().y),
            9.0,
            Color32::WHITE,
            egui::Stroke::NONE,
        );
    }

    response
}

/// Setting row with label, description and a right-aligned widget
fn setting_row(ui: &mut Ui, label: &str, description: &str, add_widget: impl FnOnce(&mut Ui)) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.add_space(2.0);
            ui.label(egui::RichText::new(label).size(14.0));
            ui.label(
                egui::RichText::new(description)
                    .size(12.0)
                    .color(Theme::TEXT_SECONDARY),
            );
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            add_widget(ui);
        });
    });
    ui.add_space(14.0);
}

pub fn render(
    ui: &mut Ui,
    state: &AppState,
    ctx: &Context,
    notifications: &mut Vec<Notification>,
) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(680.0);

                let Ok(mut settings) = state.settings.write() else {
                    ui.label(egui::RichText::new("Settings are unavailable").color(Theme::ERROR));
                    return;
                };

                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new("Configure the daemon connection and console behavior")
                        .size(14.0)
                        .color(Theme::TEXT_SECONDARY),
                );
                ui.add_space(16.0);

                section_header(ui, Icons::IMAGE, "Container Daemon");
                card(ui, |ui| {
                    setting_row(
                        ui,
                        "Daemon URL",
                        &format!("Overridden at startup by {}", DAEMON_URL_ENV),
                        |ui| {
                            ui.add(
                                egui::TextEdit::singleline(&mut settings.daemon_url)
                                    .desired_width(240.0),
                            );
                        },
                    );

                    setting_row(
                        ui,
                        "Request timeout",
                        "Give up on a daemon request after this long",
                        |ui| {
                            ui.add(
                                egui::DragValue::new(&mut settings.request_timeout_secs)
                                    .range(1..=120)
                                    .suffix(" sec"),
                            );
                        },
                    );

                    setting_row(
                        ui,
                        "Confirm image deletion",
                        "Ask before deleting a Docker image",
                        |ui| {
                            toggle_switch(ui, &mut settings.confirm_image_delete);
                        },
                    );
                });

                ui.add_space(20.0);

                section_header(ui, Icons::SETTINGS, "Appearance");
                card(ui, |ui| {
                    setting_row(ui, "Theme", "Choose your preferred color scheme", |ui| {
                        egui::ComboBox::from_id_salt("theme_select")
                            .width(130.0)
                            .selected_text(settings.theme.label())
                            .show_ui(ui, |ui| {
                                for theme in SettingsTheme::all() {
                                    let selected = settings.theme == *theme;
                                    if ui.selectable_label(selected, theme.label()).clicked() {
                                        settings.theme = *theme;
                                        Theme::apply(ctx, *theme);
                                    }
                                }
                            });
                    });

                    setting_row(
                        ui,
                        "Notification duration",
                        "How long messages stay on screen",
                        |ui| {
                            ui.add(
                                egui::DragValue::new(&mut settings.notification_secs)
                                    .range(1..=30)
                                    .suffix(" sec"),
                            );
                        },
                    );
                });

                ui.add_space(20.0);

                section_header(ui, Icons::FOLDER, "Data");
                card(ui, |ui| {
                    let data_dir = Settings::data_directory();
                    setting_row(
                        ui,
                        "Data directory",
                        &data_dir.to_string_lossy(),
                        |ui| {
                            let note = "Disks and machines are kept for this session only";
                            ui.label(egui::RichText::new(note).small().color(Theme::TEXT_MUTED));
                        },
                    );
                });

                ui.add_space(32.0);

                drop(settings);

                ui.horizontal(|ui| {
                    let save_btn = egui::Button::new(
                        egui::RichText::new("Save Settings").color(Color32::WHITE),
                    )
                    .fill(Theme::PRIMARY)
                    .rounding(egui::Rounding::same(8.0))
                    .min_size(egui::vec2(140.0, 40.0));

                    if ui.add(save_btn).clicked() {
                        match state.save_settings() {
                            Ok(()) => notifications.push(Notification::new(
                                "Settings saved",
                                NotificationLevel::Success,
                            )),
                            Err(e) => {
                                tracing::error!("Failed to save settings: {}", e);
                                notifications.push(Notification::new(
                                    format!("Failed to save settings: {}", e),
                                    NotificationLevel::Error,
                                ));
                            }
                        }
                    }

                    ui.add_space(12.0);

                    let reset_btn = egui::Button::new("Reset to Defaults")
                        .fill(Theme::BG_TERTIARY)
                        .rounding(egui::Rounding::same(8.0))
                        .min_size(egui::vec2(140.0, 40.0));

                    if ui.add(reset_btn).clicked() {
                        let defaults = Settings::default();
                        Theme::apply(ctx, defaults.theme);
                        if let Ok(mut settings) = state.settings.write() {
                            *settings = defaults;
                        }
                    }
                });

                ui.add_space(32.0);

                egui::Frame::none()
                    .fill(Theme::BG_TERTIARY.linear_multiply(0.4))
                    .rounding(egui::Rounding::same(12.0))
                    .inner_margin(egui::Margin::same(20.0))
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new(format!(
                                    "{} v{}",
                                    crate::APP_NAME,
                                    crate::APP_VERSION
                                ))
                                .size(15.0)
                                .strong(),
                            );
                            ui.add_space(6.0);
                            ui.label(
                                egui::RichText::new(
                                    "Manage virtual disks, virtual machines and Docker images",
                                )
                                .size(13.0)
                                .color(Theme::TEXT_SECONDARY),
                            );
                        });
                    });

                ui.add_space(24.0);
            });
        });
}
