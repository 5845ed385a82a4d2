//! Core module - Entity stores, forms, settings and the image browser

mod app_state;
pub mod disk;
mod disk_store;
pub mod forms;
pub mod images;
pub mod request;
pub mod settings;
mod store;
pub mod vm;
mod vm_store;

pub use app_state::AppState;
pub use disk::{DiskFormat, DiskId, DiskQuery, DiskSort, DiskSpec, DiskType, VirtualDisk};
pub use disk_store::{DiskRows, DiskStore};
pub use forms::{DiskForm, FormError, VmForm};
pub use images::{ImageBrowser, ImageCatalog, ImageEvent};
pub use settings::Settings;
pub use store::{MonotonicClock, Snapshot, Store, SubscriptionId};
pub use vm::{VirtualMachine, VmId, VmSpec};
pub use vm_store::VmStore;
