//! Main application UI

use std::time::{Duration, Instant};

use egui::{CentralPanel, Context, SidePanel, TopBottomPanel};
use tracing::{error, info};

use super::dialogs::{self, ConfirmAction, DialogOutcome, DialogState};
use super::panels;
use super::panels::disks::DisksView;
use super::theme::{Icons, Theme};
use crate::core::request::RequestPhase;
use crate::core::{AppState, ImageBrowser, ImageEvent, SubscriptionId, VmForm};

/// Active view/tab in the main panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Disks,
    Machines,
    Images,
    Settings,
}

impl ActiveView {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disks => "Virtual Disks",
            Self::Machines => "Virtual Machines",
            Self::Images => "Docker Images",
            Self::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Disks => Icons::DISK,
            Self::Machines => Icons::MACHINE,
            Self::Images => Icons::IMAGE,
            Self::Settings => Icons::SETTINGS,
        }
    }

    pub fn all() -> &'static [ActiveView] {
        &[Self::Disks, Self::Machines, Self::Images, Self::Settings]
    }
}

/// Main application struct
pub struct VirtualManagerApp {
    /// Application state
    state: AppState,
    /// Current active view
    active_view: ActiveView,
    /// Dialog state
    dialog: DialogState,
    /// Disk form, manage selection and table query
    disks_view: DisksView,
    /// Create-VM form
    vm_form: VmForm,
    /// Docker image list and its in-flight requests
    images: ImageBrowser,
    /// Search text for the image table
    image_search: String,
    /// Notifications queue
    notifications: Vec<Notification>,
    /// First frame flag
    first_frame: bool,
    /// Store subscriptions that repaint the window on every change
    repaint_hooks: (SubscriptionId, SubscriptionId),
}

/// Notification message
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl VirtualManagerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let theme = state
            .settings
            .read()
            .map(|s| s.theme)
            .unwrap_or_default();
        Theme::apply(&cc.egui_ctx, theme);

        let images = ImageBrowser::new(state.runtime().clone());

        let ctx = cc.egui_ctx.clone();
        let disk_hook = state.disks.subscribe(move |_| ctx.request_repaint());
        let ctx = cc.egui_ctx.clone();
        let machine_hook = state.machines.subscribe(move |_| ctx.request_repaint());

        Self {
            state,
            active_view: ActiveView::Disks,
            dialog: DialogState::None,
            disks_view: DisksView::default(),
            vm_form: VmForm::default(),
            images,
            image_search: String::new(),
            notifications: Vec::new(),
            first_frame: true,
            repaint_hooks: (disk_hook, machine_hook),
        }
    }

    /// Add a notification
    pub fn notify(&mut self, message: impl Into<String>, level: NotificationLevel) {
        self.notifications.push(Notification::new(message, level));
    }

    /// Clean up old notifications
    fn cleanup_notifications(&mut self) {
        let timeout = self
            .state
            .settings
            .read()
            .map(|s| s.notification_duration())
            .unwrap_or(Duration::from_secs(4));
        self.notifications
            .retain(|n| n.created_at.elapsed() < timeout);
    }

    /// Apply finished daemon requests and announce them
    fn process_image_events(&mut self) {
        let mut refreshed = None;
        for event in self.images.poll() {
            match event {
                ImageEvent::Refreshed(count) => refreshed = Some(count),
                ImageEvent::RefreshFailed(e) => {
                    self.notify(format!("Failed to load images: {}", e), NotificationLevel::Error);
                }
                ImageEvent::Deleted(_) => {
                    self.notify("Image deleted", NotificationLevel::Success);
                }
                ImageEvent::DeleteFailed(e) => {
                    self.notify(format!("Failed to delete image: {}", e), NotificationLevel::Error);
                }
                ImageEvent::ContainerCreated {
                    image_id,
                    container_id,
                } => {
                    self.dialog.container_created(&image_id);
                    let short = container_id.get(..12).unwrap_or(container_id.as_str());
                    self.notify(
                        format!("Container {} created", short),
                        NotificationLevel::Success,
                    );
                }
                ImageEvent::ContainerFailed(e) => {
                    self.dialog.container_failed();
                    self.notify(
                        format!("Failed to create container: {}", e),
                        NotificationLevel::Error,
                    );
                }
            }
        }

        // One toast per settled refresh, however many overlapped
        if let (Some(count), RequestPhase::Succeeded) = (refreshed, self.images.refresh_phase()) {
            self.notify(
                format!("Docker images refreshed ({} images)", count),
                NotificationLevel::Success,
            );
        }
    }

    /// Render the sidebar navigation
    fn render_sidebar(&mut self, ctx: &Context) {
        SidePanel::left("sidebar")
            .resizable(false)
            .default_width(220.0)
            .frame(
                egui::Frame::none()
                    .fill(ctx.style().visuals.widgets.noninteractive.bg_fill)
                    .stroke(egui::Stroke::new(1.0, Theme::BORDER_LIGHT)),
            )
            .show(ctx, |ui| {
                ui.add_space(20.0);

                ui.horizontal(|ui| {
                    ui.add_space(16.0);
                    ui.label(egui::RichText::new("◈").size(24.0).color(Theme::PRIMARY));
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(crate::APP_NAME).size(18.0).strong());
                });

                ui.add_space(24.0);

                for view in ActiveView::all() {
                    let view = *view;
                    let selected = self.active_view == view;

                    let bg_color = if selected {
                        Theme::PRIMARY.linear_multiply(0.15)
                    } else {
                        egui::Color32::TRANSPARENT
                    };
                    let text_color = if selected {
                        Theme::PRIMARY_LIGHT
                    } else {
                        Theme::TEXT_SECONDARY
                    };

                    let frame = egui::Frame::none()
                        .fill(bg_color)
                        .rounding(egui::Rounding::same(8.0))
                        .inner_margin(egui::Margin::symmetric(16.0, 12.0));

                    let response = frame.show(ui, |ui| {
                        ui.set_width(ui.available_width() - 16.0);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(view.icon()).size(16.0).color(text_color));
                            ui.add_space(12.0);
                            let label = egui::RichText::new(view.label()).size(14.0);
                            ui.label(label.color(text_color));
                        });
                    });

                    let response = response.response.interact(egui::Sense::click());
                    if response.clicked() {
                        self.active_view = view;
                    }
                    if response.hovered() && !selected {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }

                    ui.add_space(2.0);
                }

                ui.add_space(20.0);

                ui.horizontal(|ui| {
                    ui.add_space(16.0);
                    ui.label(egui::RichText::new("QUICK STATS").small().color(Theme::TEXT_MUTED));
                });
                ui.add_space(12.0);

                let stats = [
                    (self.state.disk_count(), "Disks", Theme::PRIMARY),
                    (self.state.machine_count(), "VMs", Theme::SUCCESS),
                    (self.images.catalog().images().len(), "Images", Theme::INFO),
                ];

                egui::Frame::none()
                    .fill(Theme::BG_TERTIARY.linear_multiply(0.5))
                    .rounding(egui::Rounding::same(8.0))
                    .inner_margin(egui::Margin::same(12.0))
                    .outer_margin(egui::Margin::symmetric(16.0, 0.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            for (count, label, color) in stats {
                                ui.vertical(|ui| {
                                    ui.label(
                                        egui::RichText::new(count.to_string())
                                            .size(20.0)
                                            .strong()
                                            .color(color),
                                    );
                                    ui.label(
                                        egui::RichText::new(label).small().color(Theme::TEXT_MUTED),
                                    );
                                });
                                ui.add_space(18.0);
                            }
                        });
                    });

                ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                    ui.add_space(16.0);
                    ui.horizontal(|ui| {
                        ui.add_space(16.0);
                        ui.label(
                            egui::RichText::new(format!("v{}", crate::APP_VERSION))
                                .small()
                                .color(Theme::TEXT_MUTED),
                        );
                    });
                    ui.add_space(8.0);
                });
            });
    }

    /// Render the top bar with the view title and search box
    fn render_top_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::none()
                    .fill(ctx.style().visuals.panel_fill)
                    .stroke(egui::Stroke::new(1.0, Theme::BORDER_LIGHT))
                    .inner_margin(egui::Margin::symmetric(20.0, 12.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(self.active_view.label())
                            .size(24.0)
                            .strong(),
                    );

                    ui.add_space(24.0);

                    let search = match self.active_view {
                        ActiveView::Disks => {
                            Some((&mut self.disks_view.query.search, "Search disks..."))
                        }
                        ActiveView::Images => {
                            Some((&mut self.image_search, "Search repository or tag..."))
                        }
                        ActiveView::Machines | ActiveView::Settings => None,
                    };

                    if let Some((query, hint)) = search {
                        egui::Frame::none()
                            .fill(Theme::BG_SECONDARY)
                            .rounding(egui::Rounding::same(8.0))
                            .stroke(egui::Stroke::new(1.0, Theme::BORDER_LIGHT))
                            .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    ui.label(
                                        egui::RichText::new(Icons::SEARCH)
                                            .size(14.0)
                                            .color(Theme::TEXT_MUTED),
                                    );
                                    ui.add_space(8.0);
                                    ui.add(
                                        egui::TextEdit::singleline(query)
                                            .hint_text(hint)
                                            .desired_width(220.0)
                                            .frame(false),
                                    );
                                });
                            });
                    }
                });
            });
    }

    /// Render the main content area
    fn render_main_content(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| match self.active_view {
            ActiveView::Disks => {
                panels::disks::render(
                    ui,
                    &self.state,
                    &mut self.disks_view,
                    &mut self.dialog,
                    &mut self.notifications,
                );
            }
            ActiveView::Machines => {
                panels::machines::render(
                    ui,
                    &self.state,
                    &mut self.vm_form,
                    &mut self.notifications,
                );
            }
            ActiveView::Images => {
                panels::images::render(
                    ui,
                    &self.state,
                    &mut self.images,
                    &self.image_search,
                    &mut self.dialog,
                );
            }
            ActiveView::Settings => {
                panels::settings::render(ui, &self.state, ctx, &mut self.notifications);
            }
        });
    }

    /// Render notifications
    fn render_notifications(&mut self, ctx: &Context) {
        if self.notifications.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notifications"))
            .fixed_pos(egui::pos2(ctx.screen_rect().width() - 360.0, 80.0))
            .show(ctx, |ui| {
                for notification in &self.notifications {
                    let (icon, accent) = match notification.level {
                        NotificationLevel::Info => (Icons::INFO, Theme::INFO),
                        NotificationLevel::Success => (Icons::SUCCESS, Theme::SUCCESS),
                        NotificationLevel::Warning => (Icons::WARNING, Theme::WARNING),
                        NotificationLevel::Error => (Icons::ERROR, Theme::ERROR),
                    };

                    egui::Frame::none()
                        .fill(ctx.style().visuals.window_fill)
                        .rounding(egui::Rounding::same(10.0))
                        .stroke(egui::Stroke::new(1.0, accent.linear_multiply(0.5)))
                        .shadow(egui::Shadow {
                            offset: egui::vec2(0.0, 4.0),
                            blur: 12.0,
                            spread: 2.0,
                            color: egui::Color32::from_black_alpha(60),
                        })
                        .inner_margin(egui::Margin::same(16.0))
                        .show(ui, |ui| {
                            ui.set_width(320.0);
                            ui.horizontal(|ui| {
                                egui::Frame::none()
                                    .fill(accent.linear_multiply(0.2))
                                    .rounding(egui::Rounding::same(6.0))
                                    .inner_margin(egui::Margin::same(6.0))
                                    .show(ui, |ui| {
                                        let icon = egui::RichText::new(icon).size(14.0);
                                        ui.label(icon.color(accent));
                                    });
                                ui.add_space(12.0);
                                ui.vertical(|ui| {
                                    let message = notification.message.as_str();
                                    ui.label(egui::RichText::new(message).size(13.0));
                                });
                            });
                        });

                    ui.add_space(10.0);
                }
            });
    }

    /// Render dialogs
    fn render_dialogs(&mut self, ctx: &Context) {
        let dialog = std::mem::take(&mut self.dialog);

        self.dialog = match dialog {
            DialogState::None => DialogState::None,
            DialogState::DiskDetails(mut edit) => {
                let outcome = dialogs::disk_details::render(
                    ctx,
                    &mut edit,
                    &self.state,
                    &mut self.notifications,
                );
                match outcome {
                    DialogOutcome::Closed => DialogState::None,
                    _ => DialogState::DiskDetails(edit),
                }
            }
            DialogState::CreateContainer(mut draft) => {
                let creating = draft.submitted;
                match dialogs::create_container::render(ctx, &mut draft, creating) {
                    DialogOutcome::Closed => DialogState::None,
                    DialogOutcome::Submitted => {
                        draft.submitted = true;
                        self.images
                            .create_container(&self.state.client(), &draft.image.id, &draft.name);
                        self.notify(
                            format!("Starting a container from {}", draft.image.reference()),
                            NotificationLevel::Info,
                        );
                        DialogState::CreateContainer(draft)
                    }
                    DialogOutcome::Open => DialogState::CreateContainer(draft),
                }
            }
            DialogState::Confirm(confirmation) => {
                match dialogs::confirm::render(ctx, &confirmation) {
                    DialogOutcome::Open => DialogState::Confirm(confirmation),
                    DialogOutcome::Closed => DialogState::None,
                    DialogOutcome::Submitted => {
                        match confirmation.action {
                            ConfirmAction::DeleteImage(id) => {
                                self.images.delete(&self.state.client(), &id);
                            }
                        }
                        DialogState::None
                    }
                }
            }
        };
    }
}

impl eframe::App for VirtualManagerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Load the image list once the window is up
        if self.first_frame {
            self.first_frame = false;
            self.images.refresh(&self.state.client());
            info!("First frame rendered");
        }

        self.process_image_events();

        self.cleanup_notifications();

        // Keep polling while requests are in flight or toasts are fading
        ctx.request_repaint_after(Duration::from_millis(100));

        self.render_sidebar(ctx);
        self.render_top_bar(ctx);
        self.render_main_content(ctx);
        self.render_notifications(ctx);
        self.render_dialogs(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let (disk_hook, machine_hook) = self.repaint_hooks;
        self.state.disks.unsubscribe(disk_hook);
        self.state.machines.unsubscribe(machine_hook);

        if let Err(e) = self.state.save_settings() {
            error!("Failed to save settings: {}", e);
        }

        info!("Application exiting");
    }
}
