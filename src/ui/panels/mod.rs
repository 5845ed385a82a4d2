//! Main content panels, one per view

pub mod disks;
pub mod images;
pub mod machines;
pub mod settings;
