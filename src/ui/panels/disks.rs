//! Virtual disks panel

use egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::core::{
    AppState, DiskForm, DiskFormat, DiskQuery, DiskRows, DiskSort, DiskType, VirtualDisk,
};
use crate::ui::app::{Notification, NotificationLevel};
use crate::ui::components::{card, empty_state, primary_button, section_header, FormatBadge};
use crate::ui::dialogs::{disk_details, DialogState, DiskEdit};
use crate::ui::theme::{Icons, Theme};

/// Panel-local state that outlives a frame
#[derive(Debug, Default)]
pub struct DisksView {
    pub form: DiskForm,
    pub query: DiskQuery,
    /// Disk picked in the manage section
    pub manage: Option<DiskEdit>,
    /// Table rows for `query`, kept until the store changes
    pub rows: DiskRows,
}

pub fn render(
    ui: &mut Ui,
    state: &AppState,
    view: &mut DisksView,
    dialog: &mut DialogState,
    notifications: &mut Vec<Notification>,
) {
    let disks = state.disks.disks();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            section_header(ui, Icons::DISK, "Create Virtual Disk");
            card(ui, |ui| create_form(ui, state, &mut view.form, notifications));

            ui.add_space(16.0);

            section_header(ui, Icons::EDIT, "Manage Disk");
            card(ui, |ui| manage_section(ui, state, &disks, &mut view.manage, notifications));

            ui.add_space(16.0);

            section_header(ui, Icons::FOLDER, "Disks");
            card(ui, |ui| {
                sort_controls(ui, &mut view.query);
                ui.add_space(8.0);

                let rows = view.rows.rows(&state.disks, &view.query);
                if disks.is_empty() {
                    empty_state(
                        ui,
                        Icons::DISK,
                        "No virtual disks yet",
                        "Create one above to get started",
                    );
                } else if rows.is_empty() {
                    empty_state(
                        ui,
                        Icons::SEARCH,
                        "No disks match your search",
                        "Try a different name",
                    );
                } else if let Some(edit) = disk_table(ui, rows) {
                    *dialog = DialogState::DiskDetails(edit);
                }
            });
        });
}

fn create_form(
    ui: &mut Ui,
    state: &AppState,
    form: &mut DiskForm,
    notifications: &mut Vec<Notification>,
) {
    egui::Grid::new("create_disk_grid")
        .num_columns(2)
        .spacing([16.0, 10.0])
        .show(ui, |ui| {
            ui.label("Name");
            ui.add(
                egui::TextEdit::singleline(&mut form.name)
                    .hint_text("e.g. ubuntu-root")
                    .desired_width(260.0),
            );
            ui.end_row();

            ui.label("Size");
            ui.add(egui::DragValue::new(&mut form.size_gb).range(1..=65536).suffix(" GB"));
            ui.end_row();

            ui.label("Type");
            ui.horizontal(|ui| {
                for disk_type in DiskType::all() {
                    ui.radio_value(&mut form.disk_type, *disk_type, disk_type.label());
                }
            });
            ui.end_row();

            ui.label("Format");
            egui::ComboBox::from_id_salt("create_disk_format")
                .selected_text(form.format.label())
                .show_ui(ui, |ui| {
                    for format in DiskFormat::all() {
                        ui.selectable_value(&mut form.format, *format, format.label());
                    }
                });
            ui.end_row();
        });

    ui.add_space(12.0);

    if primary_button(ui, "+ Create Disk", true).clicked() {
        match form.validate() {
            Ok(spec) => {
                let disk = state.disks.add_disk(spec);
                notifications.push(Notification::new(
                    format!("Disk '{}' created", disk.name),
                    NotificationLevel::Success,
                ));
                form.reset();
            }
            Err(e) => {
                notifications.push(Notification::new(e.to_string(), NotificationLevel::Warning))
            }
        }
    }
}

fn manage_section(
    ui: &mut Ui,
    state: &AppState,
    disks: &[VirtualDisk],
    manage: &mut Option<DiskEdit>,
    notifications: &mut Vec<Notification>,
) {
    if disks.is_empty() {
        ui.label(
            egui::RichText::new("Create a disk to convert or resize it")
                .color(Theme::TEXT_SECONDARY),
        );
        return;
    }

    // Forget a selection whose disk is gone
    let selected = manage
        .as_ref()
        .and_then(|edit| disks.iter().find(|d| d.id == edit.id));
    let selected_text = selected.map_or("Select a disk", |d| d.name.as_str());

    let mut picked = None;
    egui::ComboBox::from_id_salt("manage_disk_select")
        .width(260.0)
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for disk in disks {
                let is_selected = selected.is_some_and(|s| s.id == disk.id);
                if ui.selectable_label(is_selected, disk.name.as_str()).clicked() {
                    picked = Some(DiskEdit::for_disk(disk));
                }
            }
        });

    if let Some(edit) = picked {
        *manage = Some(edit);
    }

    let Some(edit) = manage.as_mut() else {
        return;
    };
    let Some(disk) = state.disks.get_disk(&edit.id) else {
        *manage = None;
        return;
    };

    ui.add_space(8.0);
    disk_details::edit_controls(ui, edit, &disk, state, notifications);
}

fn sort_controls(ui: &mut Ui, query: &mut DiskQuery) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Sort by").color(Theme::TEXT_SECONDARY));
        egui::ComboBox::from_id_salt("disk_sort")
            .selected_text(query.sort.label())
            .show_ui(ui, |ui| {
                for sort in DiskSort::all() {
                    ui.selectable_value(&mut query.sort, *sort, sort.label());
                }
            });
        let arrow = if query.descending { "⬇ Descending" } else { "⬆ Ascending" };
        if ui.button(arrow).clicked() {
            query.descending = !query.descending;
        }
    });
}

/// Returns the disk whose details were requested
fn disk_table(ui: &mut Ui, rows: &[VirtualDisk]) -> Option<DiskEdit> {
    let mut details = None;

    ui.push_id("disk_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().at_least(140.0))
            .column(Column::auto().at_least(70.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(140.0))
            .column(Column::auto())
            .header(24.0, |mut header| {
                for title in ["Name", "Size", "Type", "Format", "Created", ""] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for disk in rows {
                    body.row(30.0, |mut row| {
                        row.col(|ui| {
                            ui.label(disk.name.as_str());
                        });
                        row.col(|ui| {
                            ui.label(format!("{} GB", disk.size_gb));
                        });
                        row.col(|ui| {
                            ui.label(disk.disk_type.label());
                        });
                        row.col(|ui| {
                            FormatBadge::show(ui, disk.format);
                        });
                        row.col(|ui| {
                            ui.label(
                                disk.created_at
                                    .with_timezone(&chrono::Local)
                                    .format("%Y-%m-%d %H:%M")
                                    .to_string(),
                            );
                        });
                        row.col(|ui| {
                            if ui.small_button("Details").clicked() {
                                details = Some(DiskEdit::for_disk(disk));
                            }
                        });
                    });
                }
            });
    });

    details
}
