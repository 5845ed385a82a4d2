//! Virtual Manager - Desktop console for virtual disks, virtual machines and Docker images
//!
//! Disks and machines are tracked in memory for the current session. Docker
//! images are listed, deleted and started through a container daemon over HTTP.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![allow(dead_code)] // Store and client APIs are wider than the views use

mod core;
mod daemon;
mod persistence;
mod ui;

use anyhow::{Context, Result};
use single_instance::SingleInstance;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::AppState;
use crate::persistence::Database;
use crate::ui::VirtualManagerApp;

/// Application name constant
pub const APP_NAME: &str = "Virtual Manager";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    init_logging();

    info!("{} v{} starting...", APP_NAME, APP_VERSION);

    // Only one console per session
    let instance = SingleInstance::new("virtual-manager")
        .context("Failed to create single instance lock")?;
    if !instance.is_single() {
        error!("Another instance of {} is already running", APP_NAME);
        eprintln!("{} is already running!", APP_NAME);
        return Ok(());
    }

    let db = Database::new()?;
    db.initialize()?;
    info!("Database initialized");

    // Daemon requests run here; the UI thread only drains their results
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("daemon-io")
        .build()
        .context("Failed to start async runtime")?;

    let app_state = AppState::new(db, runtime.handle().clone())?;
    info!("Application state initialized");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_icon(load_app_icon()),
        ..Default::default()
    };

    info!("Starting GUI...");
    eframe::run_native(
        &format!("{} v{}", APP_NAME, APP_VERSION),
        native_options,
        Box::new(|cc| Ok(Box::new(VirtualManagerApp::new(cc, app_state)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    runtime.shutdown_timeout(std::time::Duration::from_secs(1));
    info!("{} shutting down", APP_NAME);
    Ok(())
}

/// Initialize the logging system
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("virtual_manager=info,eframe=warn,egui=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the window icon: a blue disk platter with a hub
fn load_app_icon() -> egui::IconData {
    let size = 64;
    let mut rgba = vec![0u8; size * size * 4];
    let radius = size as f32 / 2.0 - 2.0;

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let cx = x as f32 - size as f32 / 2.0;
            let cy = y as f32 - size as f32 / 2.0;
            let dist = (cx * cx + cy * cy).sqrt();

            if dist < radius && dist > radius * 0.18 {
                let t = dist / radius;
                rgba[idx] = (36.0 + t * 20.0) as u8;
                rgba[idx + 1] = (150.0 - t * 40.0) as u8;
                rgba[idx + 2] = (237.0 - t * 50.0) as u8;
                rgba[idx + 3] = 255;
            }
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}
