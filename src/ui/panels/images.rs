//! Docker images panel

use egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::core::request::RequestPhase;
use crate::core::{AppState, ImageBrowser};
use crate::daemon::DockerImage;
use crate::ui::components::{card, empty_state, secondary_button};
use crate::ui::dialogs::{Confirmation, ContainerDraft, DialogState};
use crate::ui::theme::{Icons, Theme};

enum RowAction {
    Run(DockerImage),
    Delete(DockerImage),
}

pub fn render(
    ui: &mut Ui,
    state: &AppState,
    browser: &mut ImageBrowser,
    search_query: &str,
    dialog: &mut DialogState,
) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("Daemon: {}", state.client().base_url()))
                .size(12.0)
                .color(Theme::TEXT_MUTED),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let loading = browser.refresh_phase() == RequestPhase::Pending;
            let label = if loading {
                "Refreshing...".to_string()
            } else {
                format!("{} Refresh", Icons::REFRESH)
            };
            if secondary_button(ui, &label, !loading).clicked() {
                browser.refresh(&state.client());
            }
            if loading || browser.is_deleting() {
                ui.spinner();
            }
        });
    });

    ui.add_space(8.0);

    let catalog = browser.catalog();
    let rows = catalog.filter(search_query);
    let mut action = None;

    card(ui, |ui| {
        if !catalog.loaded() {
            if browser.is_loading() {
                ui.vertical_centered(|ui| {
                    ui.add_space(32.0);
                    ui.spinner();
                    ui.label(egui::RichText::new("Loading images...").color(Theme::TEXT_SECONDARY));
                    ui.add_space(32.0);
                });
            } else {
                empty_state(
                    ui,
                    Icons::IMAGE,
                    "Images not loaded",
                    "Check the daemon address in Settings, then refresh",
                );
            }
        } else if catalog.images().is_empty() {
            empty_state(
                ui,
                Icons::IMAGE,
                "No Docker images found",
                "Pull an image with the Docker CLI",
            );
        } else if rows.is_empty() {
            empty_state(
                ui,
                Icons::SEARCH,
                "No images match your search",
                "Search matches repository or tag",
            );
        } else {
            action = image_table(ui, &rows);
        }
    });

    match action {
        Some(RowAction::Run(image)) => {
            *dialog = DialogState::CreateContainer(ContainerDraft::new(image));
        }
        Some(RowAction::Delete(image)) => {
            let confirm = state
                .settings
                .read()
                .map(|s| s.confirm_image_delete)
                .unwrap_or(true);
            if confirm {
                *dialog = DialogState::Confirm(Confirmation::delete_image(&image));
            } else {
                browser.delete(&state.client(), &image.id);
            }
        }
        None => {}
    }
}

fn short_id(id: &str) -> &str {
    let id = id.strip_prefix("sha256:").unwrap_or(id);
    id.get(..12).unwrap_or(id)
}

fn image_table(ui: &mut Ui, rows: &[&DockerImage]) -> Option<RowAction> {
    let mut action = None;

    ui.push_id("image_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().at_least(160.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(140.0))
            .header(24.0, |mut header| {
                for title in ["Repository", "Tag", "Image ID", "Created", "Size", ""] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for image in rows {
                    body.row(30.0, |mut row| {
                        row.col(|ui| {
                            ui.label(image.repository.as_str());
                        });
                        row.col(|ui| {
                            ui.label(image.tag.as_str());
                        });
                        row.col(|ui| {
                            ui.label(egui::RichText::new(short_id(&image.id)).monospace())
                                .on_hover_text(image.id.as_str());
                        });
                        row.col(|ui| {
                            ui.label(image.created.as_str());
                        });
                        row.col(|ui| {
                            ui.label(image.size.as_str());
                        });
                        row.col(|ui| {
                            if ui.small_button(format!("{} Run", Icons::PLAY)).clicked() {
                                action = Some(RowAction::Run((*image).clone()));
                            }
                            let delete = egui::RichText::new(format!("{} Delete", Icons::TRASH))
                                .color(Theme::ERROR);
                            if ui.small_button(delete).clicked() {
                                action = Some(RowAction::Delete((*image).clone()));
                            }
                        });
                    });
                }
            });
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_drops_digest_prefix() {
        assert_eq!(short_id("sha256:0123456789abcdef0123"), "0123456789ab");
        assert_eq!(short_id("abc"), "abc");
    }
}
