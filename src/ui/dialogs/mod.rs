//! Dialog windows

pub mod confirm;
pub mod create_container;
pub mod disk_details;

use crate::core::{DiskFormat, DiskId, VirtualDisk};
use crate::daemon::DockerImage;

/// State for dialog windows
#[derive(Debug, Clone, Default)]
pub enum DialogState {
    #[default]
    None,
    DiskDetails(DiskEdit),
    CreateContainer(ContainerDraft),
    Confirm(Confirmation),
}

/// What a dialog asked for on this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Open,
    Closed,
    Submitted,
}

/// Pending convert/resize values for one disk
#[derive(Debug, Clone)]
pub struct DiskEdit {
    pub id: DiskId,
    pub new_format: DiskFormat,
    pub new_size_gb: u64,
}

impl DiskEdit {
    pub fn for_disk(disk: &VirtualDisk) -> Self {
        Self {
            id: disk.id,
            new_format: disk.format,
            new_size_gb: disk.size_gb,
        }
    }
}

/// Image and optional container name for the create-container dialog
#[derive(Debug, Clone)]
pub struct ContainerDraft {
    pub image: DockerImage,
    pub name: String,
    /// Set once the create request for this draft is in flight
    pub submitted: bool,
}

impl ContainerDraft {
    pub fn new(image: DockerImage) -> Self {
        Self {
            image,
            name: String::new(),
            submitted: false,
        }
    }

    /// Whether this draft is waiting on a container for `image_id`
    pub fn awaits(&self, image_id: &str) -> bool {
        self.submitted && self.image.id == image_id
    }
}

impl DialogState {
    /// Close the create-container dialog if it submitted the request for `image_id`.
    /// A dialog opened for another image stays as it is.
    pub fn container_created(&mut self, image_id: &str) {
        if matches!(self, DialogState::CreateContainer(draft) if draft.awaits(image_id)) {
            *self = DialogState::None;
        }
    }

    /// Re-enable a submitted create-container dialog so the user can retry
    pub fn container_failed(&mut self) {
        if let DialogState::CreateContainer(draft) = self {
            draft.submitted = false;
        }
    }
}

/// Action carried out when a confirmation is accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteImage(String),
}

#[derive(Debug, Clone)]
pub struct Confirmation {
    pub title: String,
    pub message: String,
    pub action: ConfirmAction,
}

impl Confirmation {
    pub fn delete_image(image: &DockerImage) -> Self {
        Self {
            title: "Delete image".to_string(),
            message: format!(
                "Delete {}? Containers using this image must be removed first.",
                image.reference()
            ),
            action: ConfirmAction::DeleteImage(image.id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: &str) -> DockerImage {
        DockerImage {
            id: id.into(),
            repository: "alpine".into(),
            tag: "latest".into(),
            created: "2026-01-01".into(),
            size: "7.8MB".into(),
        }
    }

    #[test]
    fn created_container_closes_only_its_own_dialog() {
        let mut dialog = DialogState::CreateContainer(ContainerDraft::new(image("b2")));
        dialog.container_created("a1");
        assert!(matches!(dialog, DialogState::CreateContainer(_)));

        let mut draft = ContainerDraft::new(image("a1"));
        draft.submitted = true;
        let mut dialog = DialogState::CreateContainer(draft);
        dialog.container_created("b2");
        assert!(matches!(dialog, DialogState::CreateContainer(_)));
        dialog.container_created("a1");
        assert!(matches!(dialog, DialogState::None));
    }

    #[test]
    fn unsubmitted_draft_for_same_image_stays_open() {
        let mut dialog = DialogState::CreateContainer(ContainerDraft::new(image("a1")));
        dialog.container_created("a1");
        assert!(matches!(dialog, DialogState::CreateContainer(_)));
    }

    #[test]
    fn failed_create_reenables_draft() {
        let mut draft = ContainerDraft::new(image("a1"));
        draft.submitted = true;
        let mut dialog = DialogState::CreateContainer(draft);

        dialog.container_failed();

        match dialog {
            DialogState::CreateContainer(draft) => assert!(!draft.submitted),
            other => panic!("unexpected dialog {other:?}"),
        }
    }
}
