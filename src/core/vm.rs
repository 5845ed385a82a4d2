//! Virtual machine records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::disk::DiskId;

/// Unique identifier for a virtual machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VmId(pub Uuid);

impl VmId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for VmId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied fields for a new virtual machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmSpec {
    pub name: String,
    /// Core count
    pub cpu: u32,
    /// Memory in GB
    pub memory_gb: u32,
    pub disk_id: DiskId,
    /// Installation media, if any
    pub iso_file: Option<String>,
}

/// A virtual machine definition. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachine {
    pub id: VmId,
    pub name: String,
    pub cpu: u32,
    pub memory_gb: u32,
    /// Weak reference; the disk may not exist
    pub disk_id: DiskId,
    pub iso_file: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl VirtualMachine {
    pub fn from_spec(spec: VmSpec, created_at: DateTime<Utc>) -> Self {
        Self {
            id: VmId::new(),
            name: spec.name,
            cpu: spec.cpu,
            memory_gb: spec.memory_gb,
            disk_id: spec.disk_id,
            iso_file: spec.iso_file,
            created_at,
        }
    }

    pub fn memory_mb(&self) -> u64 {
        u64::from(self.memory_gb) * 1024
    }

    /// Final path component of the ISO, for compact display
    pub fn iso_display_name(&self) -> Option<&str> {
        self.iso_file.as_deref().map(|path| {
            path.rsplit(['/', '\\'])
                .next()
                .filter(|name| !name.is_empty())
                .unwrap_or(path)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm(iso_file: Option<&str>) -> VirtualMachine {
        VirtualMachine::from_spec(
            VmSpec {
                name: "web".into(),
                cpu: 2,
                memory_gb: 4,
                disk_id: DiskId::new(),
                iso_file: iso_file.map(String::from),
            },
            Utc::now(),
        )
    }

    #[test]
    fn memory_is_reported_in_mib() {
        assert_eq!(vm(None).memory_mb(), 4096);
    }

    #[test]
    fn iso_display_name_strips_directories() {
        assert_eq!(
            vm(Some("/srv/isos/ubuntu-24.04.iso")).iso_display_name(),
            Some("ubuntu-24.04.iso")
        );
        assert_eq!(
            vm(Some("C:\\isos\\win.iso")).iso_display_name(),
            Some("win.iso")
        );
        assert_eq!(vm(Some("plain.iso")).iso_display_name(), Some("plain.iso"));
        assert_eq!(vm(None).iso_display_name(), None);
    }
}
