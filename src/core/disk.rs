//! Virtual disk records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a virtual disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiskId(pub Uuid);

impl DiskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DiskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DiskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage allocation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiskType {
    Fixed,
    #[default]
    Dynamic,
}

impl DiskType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::Dynamic => "Dynamic",
        }
    }

    pub fn all() -> &'static [DiskType] {
        &[DiskType::Fixed, DiskType::Dynamic]
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiskFormat {
    Raw,
    #[default]
    Qcow2,
    Vmdk,
    Vdi,
}

impl DiskFormat {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Qcow2 => "qcow2",
            Self::Vmdk => "vmdk",
            Self::Vdi => "vdi",
        }
    }

    /// File extension conventionally used for images of this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Raw => "img",
            Self::Qcow2 => "qcow2",
            Self::Vmdk => "vmdk",
            Self::Vdi => "vdi",
        }
    }

    pub fn all() -> &'static [DiskFormat] {
        &[
            DiskFormat::Raw,
            DiskFormat::Qcow2,
            DiskFormat::Vmdk,
            DiskFormat::Vdi,
        ]
    }
}

/// Caller-supplied fields for a new disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskSpec {
    pub name: String,
    pub size_gb: u64,
    pub disk_type: DiskType,
    pub format: DiskFormat,
}

impl DiskSpec {
    pub fn new(
        name: impl Into<String>,
        size_gb: u64,
        disk_type: DiskType,
        format: DiskFormat,
    ) -> Self {
        Self {
            name: name.into(),
            size_gb,
            disk_type,
            format,
        }
    }
}

/// A virtual disk known to this session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualDisk {
    pub id: DiskId,
    pub name: String,
    /// Size in GB
    pub size_gb: u64,
    pub disk_type: DiskType,
    pub format: DiskFormat,
    pub created_at: DateTime<Utc>,
}

impl VirtualDisk {
    pub fn from_spec(spec: DiskSpec, created_at: DateTime<Utc>) -> Self {
        Self {
            id: DiskId::new(),
            name: spec.name,
            size_gb: spec.size_gb,
            disk_type: spec.disk_type,
            format: spec.format,
            created_at,
        }
    }

    /// Name as it would appear on disk, e.g. `disk1.qcow2`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.format.extension())
    }
}

/// Sort key for disk tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiskSort {
    #[default]
    CreatedAt,
    Name,
    Size,
    Format,
}

impl DiskSort {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreatedAt => "Created",
            Self::Name => "Name",
            Self::Size => "Size",
            Self::Format => "Format",
        }
    }

    pub fn all() -> &'static [DiskSort] {
        &[
            DiskSort::CreatedAt,
            DiskSort::Name,
            DiskSort::Size,
            DiskSort::Format,
        ]
    }
}

/// Filter and ordering applied to the disk table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskQuery {
    pub search: String,
    pub sort: DiskSort,
    pub descending: bool,
}

impl DiskQuery {
    /// Matching disks in display order. The sort is stable, so ties keep insertion order.
    pub fn apply(&self, disks: &[VirtualDisk]) -> Vec<VirtualDisk> {
        let needle = self.search.trim().to_lowercase();
        let mut rows: Vec<VirtualDisk> = disks
            .iter()
            .filter(|d| needle.is_empty() || d.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        match self.sort {
            DiskSort::CreatedAt => rows.sort_by_key(|d| d.created_at),
            DiskSort::Name => rows.sort_by_key(|d| d.name.to_lowercase()),
            DiskSort::Size => rows.sort_by_key(|d| d.size_gb),
            DiskSort::Format => rows.sort_by_key(|d| d.format),
        }
        if self.descending {
            rows.reverse();
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn disk(name: &str, size_gb: u64, format: DiskFormat, offset_secs: i64) -> VirtualDisk {
        let base = DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        VirtualDisk::from_spec(
            DiskSpec::new(name, size_gb, DiskType::Dynamic, format),
            base + Duration::seconds(offset_secs),
        )
    }

    #[test]
    fn formats_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&DiskFormat::Qcow2).unwrap(), "\"qcow2\"");
        assert_eq!(serde_json::to_string(&DiskType::Fixed).unwrap(), "\"fixed\"");
        let parsed: DiskFormat = serde_json::from_str("\"vdi\"").unwrap();
        assert_eq!(parsed, DiskFormat::Vdi);
    }

    #[test]
    fn file_name_uses_format_extension() {
        assert_eq!(disk("boot", 10, DiskFormat::Raw, 0).file_name(), "boot.img");
        assert_eq!(disk("data", 10, DiskFormat::Vmdk, 0).file_name(), "data.vmdk");
    }

    #[test]
    fn query_filters_case_insensitively() {
        let disks = vec![
            disk("Ubuntu-root", 20, DiskFormat::Qcow2, 0),
            disk("scratch", 5, DiskFormat::Raw, 1),
        ];
        let query = DiskQuery {
            search: "ubuntu".into(),
            ..Default::default()
        };
        let rows = query.apply(&disks);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ubuntu-root");
    }

    #[test]
    fn query_sorts_by_size_descending() {
        let disks = vec![
            disk("a", 20, DiskFormat::Qcow2, 0),
            disk("b", 80, DiskFormat::Raw, 1),
            disk("c", 5, DiskFormat::Vdi, 2),
        ];
        let query = DiskQuery {
            sort: DiskSort::Size,
            descending: true,
            ..Default::default()
        };
        let names: Vec<_> = query.apply(&disks).into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn default_query_keeps_creation_order() {
        let disks = vec![
            disk("first", 1, DiskFormat::Raw, 0),
            disk("second", 1, DiskFormat::Raw, 10),
        ];
        let names: Vec<_> = DiskQuery::default()
            .apply(&disks)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
