//! Disk details dialog with convert and resize controls

use egui::Context;

use crate::core::{AppState, DiskFormat, VirtualDisk};
use crate::ui::app::{Notification, NotificationLevel};
use crate::ui::components::{detail_row, FormatBadge};
use crate::ui::dialogs::{DialogOutcome, DiskEdit};
use crate::ui::theme::Theme;

pub fn render(
    ctx: &Context,
    edit: &mut DiskEdit,
    state: &AppState,
    notifications: &mut Vec<Notification>,
) -> DialogOutcome {
    let Some(disk) = state.disks.get_disk(&edit.id) else {
        return DialogOutcome::Closed;
    };

    let mut open = true;
    let mut outcome = DialogOutcome::Open;

    egui::Window::new(format!("Disk: {}", disk.name))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(440.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(Theme::BG_SECONDARY)
                .rounding(egui::Rounding::same(8.0))
                .inner_margin(egui::Margin::same(12.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    egui::Grid::new("disk_details_grid")
                        .num_columns(2)
                        .spacing([16.0, 6.0])
                        .show(ui, |ui| {
                            detail_row(ui, "ID", disk.id.to_string());
                            detail_row(ui, "File", disk.file_name());
                            detail_row(ui, "Size", format!("{} GB", disk.size_gb));
                            detail_row(ui, "Type", disk.disk_type.label());
                            ui.label(egui::RichText::new("Format").color(Theme::TEXT_SECONDARY));
                            FormatBadge::show(ui, disk.format);
                            ui.end_row();
                            detail_row(
                                ui,
                                "Created",
                                disk.created_at
                                    .with_timezone(&chrono::Local)
                                    .format("%Y-%m-%d %H:%M:%S")
                                    .to_string(),
                            );
                        });
                });

            ui.add_space(16.0);
            edit_controls(ui, edit, &disk, state, notifications);

            ui.add_space(16.0);
            if ui.button("Close").clicked() {
                outcome = DialogOutcome::Closed;
            }
        });

    if !open {
        outcome = DialogOutcome::Closed;
    }
    outcome
}

/// Convert and resize controls for one disk. Values go straight to the store.
pub fn edit_controls(
    ui: &mut egui::Ui,
    edit: &mut DiskEdit,
    disk: &VirtualDisk,
    state: &AppState,
    notifications: &mut Vec<Notification>,
) {
    ui.label(egui::RichText::new("Convert").strong());
    ui.horizontal(|ui| {
        egui::ComboBox::from_id_salt("convert_format")
            .selected_text(edit.new_format.label())
            .show_ui(ui, |ui| {
                for format in DiskFormat::all() {
                    ui.selectable_value(&mut edit.new_format, *format, format.label());
                }
            });
        let changed = edit.new_format != disk.format;
        if ui.add_enabled(changed, egui::Button::new("Convert")).clicked() {
            state.disks.convert_disk_format(&disk.id, edit.new_format);
            notifications.push(Notification::new(
                format!("Converted '{}' to {}", disk.name, edit.new_format.label()),
                NotificationLevel::Success,
            ));
        }
    });

    ui.add_space(8.0);
    ui.label(egui::RichText::new("Resize").strong());
    ui.horizontal(|ui| {
        ui.add(
            egui::DragValue::new(&mut edit.new_size_gb)
                .range(1..=65536)
                .suffix(" GB"),
        );
        let changed = edit.new_size_gb != disk.size_gb;
        if ui.add_enabled(changed, egui::Button::new("Resize")).clicked() {
            state.disks.resize_disk(&disk.id, edit.new_size_gb);
            notifications.push(Notification::new(
                format!("Resized '{}' to {} GB", disk.name, edit.new_size_gb),
                NotificationLevel::Success,
            ));
        }
    });
    if edit.new_size_gb < disk.size_gb {
        ui.label(
            egui::RichText::new("Shrinking may discard data at the end of the disk")
                .small()
                .color(Theme::WARNING),
        );
    }
}
