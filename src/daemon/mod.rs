//! Daemon module - REST access to the external container daemon

mod client;

pub use client::{ClientError, CreateContainerRequest, DaemonClient, DockerImage, DEFAULT_TIMEOUT};
