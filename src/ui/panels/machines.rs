//! Virtual machines panel

use egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::core::{AppState, DiskId, VirtualDisk, VirtualMachine, VmForm};
use crate::ui::app::{Notification, NotificationLevel};
use crate::ui::components::{card, empty_state, primary_button, section_header, FormatBadge};
use crate::ui::theme::{Icons, Theme};

pub fn render(
    ui: &mut Ui,
    state: &AppState,
    form: &mut VmForm,
    notifications: &mut Vec<Notification>,
) {
    let disks = state.disks.disks();
    let machines = state.machines.vms();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            section_header(ui, Icons::MACHINE, "Create Virtual Machine");
            card(ui, |ui| create_form(ui, state, &disks, form, notifications));

            ui.add_space(16.0);

            section_header(ui, Icons::FOLDER, "Virtual Machines");
            card(ui, |ui| {
                if machines.is_empty() {
                    empty_state(
                        ui,
                        Icons::MACHINE,
                        "No virtual machines yet",
                        "Create a disk first, then build a machine on top of it",
                    );
                } else {
                    machine_table(ui, &machines, &disks);
                }
            });
        });
}

fn disk_name(disks: &[VirtualDisk], id: &DiskId) -> Option<String> {
    disks.iter().find(|d| d.id == *id).map(|d| d.name.clone())
}

fn create_form(
    ui: &mut Ui,
    state: &AppState,
    disks: &[VirtualDisk],
    form: &mut VmForm,
    notifications: &mut Vec<Notification>,
) {
    egui::Grid::new("create_vm_grid")
        .num_columns(2)
        .spacing([16.0, 10.0])
        .show(ui, |ui| {
            ui.label("Name");
            ui.add(
                egui::TextEdit::singleline(&mut form.name)
                    .hint_text("e.g. build-runner")
                    .desired_width(260.0),
            );
            ui.end_row();

            ui.label("CPU cores");
            ui.add(egui::DragValue::new(&mut form.cpu).range(1..=128));
            ui.end_row();

            ui.label("Memory");
            ui.add(egui::DragValue::new(&mut form.memory_gb).range(1..=1024).suffix(" GB"));
            ui.end_row();

            ui.label("Disk");
            let selected_text = form
                .disk_id
                .and_then(|id| disk_name(disks, &id))
                .unwrap_or_else(|| "Select a disk".to_string());
            ui.add_enabled_ui(!disks.is_empty(), |ui| {
                egui::ComboBox::from_id_salt("vm_disk_select")
                    .width(260.0)
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        for disk in disks {
                            let label = format!(
                                "{} ({} GB, {})",
                                disk.name,
                                disk.size_gb,
                                disk.format.label()
                            );
                            ui.selectable_value(&mut form.disk_id, Some(disk.id), label);
                        }
                    });
            });
            ui.end_row();

            ui.label("ISO image");
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut form.iso_file)
                        .hint_text("Optional installer image")
                        .desired_width(200.0),
                );
                let browse_btn = egui::Button::new("Browse...")
                    .fill(Theme::BG_TERTIARY)
                    .rounding(egui::Rounding::same(6.0));
                if ui.add(browse_btn).clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("ISO image", &["iso"])
                        .pick_file()
                    {
                        form.iso_file = path.to_string_lossy().to_string();
                    }
                }
            });
            ui.end_row();
        });

    if disks.is_empty() {
        ui.label(
            egui::RichText::new("A virtual machine needs a disk. Create one in Virtual Disks.")
                .small()
                .color(Theme::WARNING),
        );
    }

    ui.add_space(12.0);

    if primary_button(ui, "+ Create Machine", true).clicked() {
        match form.validate() {
            Ok(spec) => {
                let vm = state.machines.add_vm(spec);
                notifications.push(Notification::new(
                    format!("Virtual machine '{}' created", vm.name),
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

fn machine_table(ui: &mut Ui, machines: &[VirtualMachine], disks: &[VirtualDisk]) {
    ui.push_id("vm_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().at_least(140.0))
            .column(Column::auto().at_least(50.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(140.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(130.0))
            .header(24.0, |mut header| {
                for title in ["Name", "CPU", "Memory", "Disk", "ISO", "Created"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for vm in machines {
                    body.row(28.0, |mut row| {
                        row.col(|ui| {
                            ui.label(vm.name.as_str());
                        });
                        row.col(|ui| {
                            ui.label(vm.cpu.to_string());
                        });
                        row.col(|ui| {
                            ui.label(format!("{} GB", vm.memory_gb))
                                .on_hover_text(format!("{} MB", vm.memory_mb()));
                        });
                        row.col(|ui| match disks.iter().find(|d| d.id == vm.disk_id) {
                            Some(disk) => {
                                ui.label(disk.name.as_str());
                                FormatBadge::inline(ui, disk.format);
                            }
                            None => {
                                ui.label(
                                    egui::RichText::new(format!("{} missing disk", Icons::WARNING))
                                        .color(Theme::ERROR),
                                )
                                .on_hover_text(vm.disk_id.to_string());
                            }
                        });
                        row.col(|ui| match (vm.iso_display_name(), &vm.iso_file) {
                            (Some(name), Some(path)) => {
                                ui.label(name).on_hover_text(path.as_str());
                            }
                            _ => {
                                ui.label(egui::RichText::new("None").color(Theme::TEXT_MUTED));
                            }
                        });
                        row.col(|ui| {
                            ui.label(
                                vm.created_at
                                    .with_timezone(&chrono::Local)
                                    .format("%Y-%m-%d %H:%M")
                                    .to_string(),
                            );
                        });
                    });
                }
            });
    });
}
