//! Form state for creating disks and virtual machines
//!
//! The stores accept anything; these forms are where user input is checked
//! before it reaches them.

use thiserror::Error;

use super::disk::{DiskFormat, DiskId, DiskSpec, DiskType};
use super::vm::VmSpec;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Name is required")]
    MissingName,
    #[error("Size must be at least 1 GB")]
    InvalidSize,
    #[error("At least one CPU core is required")]
    InvalidCpu,
    #[error("Memory must be at least 1 GB")]
    InvalidMemory,
    #[error("Select a disk for the virtual machine")]
    MissingDisk,
}

/// Create-disk form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskForm {
    pub name: String,
    pub size_gb: u64,
    pub disk_type: DiskType,
    pub format: DiskFormat,
}

impl Default for DiskForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            size_gb: 20,
            disk_type: DiskType::Dynamic,
            format: DiskFormat::Qcow2,
        }
    }
}

impl DiskForm {
    pub fn validate(&self) -> Result<DiskSpec, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        if self.size_gb == 0 {
            return Err(FormError::InvalidSize);
        }
        Ok(DiskSpec::new(name, self.size_gb, self.disk_type, self.format))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Create-VM form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmForm {
    pub name: String,
    pub cpu: u32,
    pub memory_gb: u32,
    pub disk_id: Option<DiskId>,
    pub iso_file: String,
}

impl Default for VmForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            cpu: 2,
            memory_gb: 4,
            disk_id: None,
            iso_file: String::new(),
        }
    }
}

impl VmForm {
    pub fn validate(&self) -> Result<VmSpec, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        if self.cpu == 0 {
            return Err(FormError::InvalidCpu);
        }
        if self.memory_gb == 0 {
            return Err(FormError::InvalidMemory);
        }
        let disk_id = self.disk_id.ok_or(FormError::MissingDisk)?;
        let iso = self.iso_file.trim();

        Ok(VmSpec {
            name: name.to_string(),
            cpu: self.cpu,
            memory_gb: self.memory_gb,
            disk_id,
            iso_file: (!iso.is_empty()).then(|| iso.to_string()),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_form_defaults() {
        let form = DiskForm::default();
        assert_eq!(form.size_gb, 20);
        assert_eq!(form.disk_type, DiskType::Dynamic);
        assert_eq!(form.format, DiskFormat::Qcow2);
    }

    #[test]
    fn disk_form_trims_name() {
        let form = DiskForm {
            name: "  disk1 ".into(),
            ..Default::default()
        };
        let spec = form.validate().unwrap();
        assert_eq!(spec.name, "disk1");
        assert_eq!(spec.size_gb, 20);
    }

    #[test]
    fn disk_form_rejects_blank_name_and_zero_size() {
        let blank = DiskForm {
            name: "   ".into(),
            ..Default::default()
        };
        assert_eq!(blank.validate(), Err(FormError::MissingName));

        let empty = DiskForm {
            name: "d".into(),
            size_gb: 0,
            ..Default::default()
        };
        assert_eq!(empty.validate(), Err(FormError::InvalidSize));
    }

    #[test]
    fn disk_form_reset_restores_defaults() {
        let mut form = DiskForm {
            name: "x".into(),
            size_gb: 99,
            disk_type: DiskType::Fixed,
            format: DiskFormat::Vdi,
        };
        form.reset();
        assert_eq!(form, DiskForm::default());
    }

    #[test]
    fn vm_form_requires_disk() {
        let form = VmForm {
            name: "vm".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(FormError::MissingDisk));
    }

    #[test]
    fn vm_form_rejects_zero_resources() {
        let disk = Some(DiskId::new());
        let no_cpu = VmForm {
            name: "vm".into(),
            cpu: 0,
            disk_id: disk,
            ..Default::default()
        };
        assert_eq!(no_cpu.validate(), Err(FormError::InvalidCpu));

        let no_memory = VmForm {
            name: "vm".into(),
            memory_gb: 0,
            disk_id: disk,
            ..Default::default()
        };
        assert_eq!(no_memory.validate(), Err(FormError::InvalidMemory));
    }

    #[test]
    fn vm_form_blank_iso_becomes_none() {
        let disk_id = DiskId::new();
        let form = VmForm {
            name: "vm".into(),
            disk_id: Some(disk_id),
            iso_file: "  ".into(),
            ..Default::default()
        };
        let spec = form.validate().unwrap();
        assert_eq!(spec.iso_file, None);
        assert_eq!(spec.disk_id, disk_id);

        let with_iso = VmForm {
            iso_file: " /isos/a.iso ".into(),
            ..form
        };
        assert_eq!(with_iso.validate().unwrap().iso_file.as_deref(), Some("/isos/a.iso"));
    }
}
