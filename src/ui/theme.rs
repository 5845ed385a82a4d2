//! Theme and styling for the UI

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

use crate::core::settings::Theme as ThemeSetting;
use crate::core::DiskFormat;

/// Application color palette
pub struct Theme;

impl Theme {
    pub const PRIMARY: Color32 = Color32::from_rgb(36, 150, 237); // Docker blue
    pub const PRIMARY_LIGHT: Color32 = Color32::from_rgb(125, 190, 245);
    pub const PRIMARY_DARK: Color32 = Color32::from_rgb(29, 122, 193);

    pub const SUCCESS: Color32 = Color32::from_rgb(16, 185, 129);
    pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11);
    pub const ERROR: Color32 = Color32::from_rgb(244, 63, 94);
    pub const INFO: Color32 = Color32::from_rgb(6, 182, 212);

    pub const BG_PRIMARY: Color32 = Color32::from_rgb(17, 19, 26);
    pub const BG_SECONDARY: Color32 = Color32::from_rgb(24, 27, 37);
    pub const BG_TERTIARY: Color32 = Color32::from_rgb(35, 39, 52);
    pub const BG_HOVER: Color32 = Color32::from_rgb(45, 50, 66);
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(30, 33, 45);

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(248, 250, 252);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(161, 167, 180);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(113, 118, 132);

    pub const BORDER: Color32 = Color32::from_rgb(50, 55, 70);
    pub const BORDER_LIGHT: Color32 = Color32::from_rgb(38, 42, 55);

    pub fn apply(ctx: &egui::Context, theme: ThemeSetting) {
        match theme {
            ThemeSetting::Dark => Self::apply_dark(ctx),
            ThemeSetting::Light => Self::apply_light(ctx),
        }
    }

    /// Apply dark theme to egui
    pub fn apply_dark(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = Visuals::dark();

        visuals.panel_fill = Self::BG_PRIMARY;
        visuals.window_fill = Self::BG_ELEVATED;
        visuals.extreme_bg_color = Self::BG_PRIMARY;
        visuals.faint_bg_color = Self::BG_TERTIARY;

        visuals.widgets.noninteractive.bg_fill = Self::BG_SECONDARY;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(0.5, Self::BORDER_LIGHT);

        visuals.widgets.inactive.bg_fill = Self::BG_TERTIARY;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Self::TEXT_SECONDARY);
        visuals.widgets.inactive.bg_stroke = Stroke::new(0.5, Self::BORDER);

        visuals.widgets.hovered.bg_fill = Self::BG_HOVER;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Self::PRIMARY.linear_multiply(0.6));

        visuals.widgets.active.bg_fill = Self::PRIMARY;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, Self::PRIMARY_DARK);

        visuals.widgets.open.bg_fill = Self::BG_ELEVATED;
        visuals.widgets.open.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.open.bg_stroke = Stroke::new(1.0, Self::PRIMARY.linear_multiply(0.5));

        visuals.selection.bg_fill = Self::PRIMARY.linear_multiply(0.25);
        visuals.selection.stroke = Stroke::new(1.0, Self::PRIMARY);
        visuals.window_stroke = Stroke::new(0.5, Self::BORDER);
        visuals.window_shadow = egui::Shadow {
            offset: egui::vec2(0.0, 10.0),
            blur: 30.0,
            spread: 8.0,
            color: Color32::from_black_alpha(120),
        };

        style.visuals = visuals;
        Self::apply_common(&mut style);
        ctx.set_style(style);
    }

    /// Apply light theme to egui
    pub fn apply_light(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = Visuals::light();

        let bg_primary = Color32::from_rgb(249, 250, 251);
        let bg_secondary = Color32::from_rgb(243, 244, 246);
        let bg_tertiary = Color32::from_rgb(229, 231, 235);
        let bg_hover = Color32::from_rgb(209, 213, 219);
        let text_primary = Color32::from_rgb(17, 24, 39);
        let text_secondary = Color32::from_rgb(75, 85, 99);
        let border = Color32::from_rgb(209, 213, 219);

        visuals.panel_fill = bg_primary;
        visuals.window_fill = Color32::WHITE;
        visuals.extreme_bg_color = Color32::WHITE;
        visuals.faint_bg_color = bg_secondary;

        visuals.widgets.noninteractive.bg_fill = bg_secondary;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_primary);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(0.5, border);

        visuals.widgets.inactive.bg_fill = bg_tertiary;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_secondary);
        visuals.widgets.inactive.bg_stroke = Stroke::new(0.5, border);

        visuals.widgets.hovered.bg_fill = bg_hover;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_primary);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Self::PRIMARY.linear_multiply(0.7));

        visuals.widgets.active.bg_fill = Self::PRIMARY;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, Self::PRIMARY_DARK);

        visuals.selection.bg_fill = Self::PRIMARY.linear_multiply(0.15);
        visuals.selection.stroke = Stroke::new(1.0, Self::PRIMARY);
        visuals.window_stroke = Stroke::new(0.5, border);

        style.visuals = visuals;
        Self::apply_common(&mut style);
        ctx.set_style(style);
    }

    /// Text styles, rounding and spacing shared by both themes
    fn apply_common(style: &mut Style) {
        let widgets = &mut style.visuals.widgets;
        for state in [
            &mut widgets.noninteractive,
            &mut widgets.inactive,
            &mut widgets.hovered,
            &mut widgets.active,
            &mut widgets.open,
        ] {
            state.rounding = Rounding::same(6.0);
        }
        style.visuals.widgets.hovered.expansion = 1.0;
        style.visuals.window_rounding = Rounding::same(10.0);
        style.visuals.menu_rounding = Rounding::same(8.0);
        style.visuals.striped = true;

        style.text_styles = [
            (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
        ]
        .into();

        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.window_margin = egui::Margin::same(16.0);
        style.spacing.button_padding = egui::vec2(14.0, 8.0);
        style.spacing.combo_width = 120.0;
        style.interaction.tooltip_delay = 0.3;
    }

    /// Badge color for a disk format
    pub fn format_color(format: DiskFormat) -> Color32 {
        match format {
            DiskFormat::Raw => Self::TEXT_SECONDARY,
            DiskFormat::Qcow2 => Self::PRIMARY,
            DiskFormat::Vmdk => Self::SUCCESS,
            DiskFormat::Vdi => Self::WARNING,
        }
    }
}

/// Icon characters (using Unicode symbols)
pub struct Icons;

impl Icons {
    pub const DISK: &'static str = "🖴";
    pub const MACHINE: &'static str = "🖥";
    pub const IMAGE: &'static str = "📦";
    pub const SETTINGS: &'static str = "⚙";
    pub const PLAY: &'static str = "▶";
    pub const REFRESH: &'static str = "↻";
    pub const SEARCH: &'static str = "🔍";
    pub const TRASH: &'static str = "🗑";
    pub const EDIT: &'static str = "✎";
    pub const FOLDER: &'static str = "📁";
    pub const WARNING: &'static str = "⚠";
    pub const INFO: &'static str = "ℹ";
    pub const SUCCESS: &'static str = "✓";
    pub const ERROR: &'static str = "✕";
}
