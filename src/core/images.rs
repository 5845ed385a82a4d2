//! Docker image browser - local display cache plus the remote actions on it

use tokio::runtime::Handle;
use tracing::{info, warn};

use super::request::{RequestPhase, RequestTracker};
use crate::daemon::{ClientError, DaemonClient, DockerImage};

/// Images last reported by the daemon. Display cache only; never a source of truth.
#[derive(Debug, Clone, Default)]
pub struct ImageCatalog {
    images: Vec<DockerImage>,
    loaded: bool,
}

impl ImageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list on success. On failure nothing changes and the error is handed back.
    pub fn apply_listing(
        &mut self,
        listing: Result<Vec<DockerImage>, ClientError>,
    ) -> Result<usize, ClientError> {
        let images = listing?;
        self.images = images;
        self.loaded = true;
        Ok(self.images.len())
    }

    /// Drop an image the daemon confirmed as deleted
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|image| image.id != id);
        self.images.len() != before
    }

    pub fn images(&self) -> &[DockerImage] {
        &self.images
    }

    /// Whether at least one listing has succeeded
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn get(&self, id: &str) -> Option<&DockerImage> {
        self.images.iter().find(|image| image.id == id)
    }

    /// Images whose repository or tag contains `query`, ignoring case
    pub fn filter(&self, query: &str) -> Vec<&DockerImage> {
        let needle = query.trim().to_lowercase();
        self.images
            .iter()
            .filter(|image| {
                needle.is_empty()
                    || image.repository.to_lowercase().contains(&needle)
                    || image.tag.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Result of a finished remote action, for the view to announce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageEvent {
    Refreshed(usize),
    RefreshFailed(ClientError),
    Deleted(String),
    DeleteFailed(ClientError),
    ContainerCreated {
        image_id: String,
        container_id: String,
    },
    ContainerFailed(ClientError),
}

/// Image list view state: the catalog plus the requests that feed it
pub struct ImageBrowser {
    catalog: ImageCatalog,
    listing: RequestTracker<Vec<DockerImage>>,
    deleting: RequestTracker<String>,
    creating: RequestTracker<(String, String)>,
    runtime: Handle,
}

impl ImageBrowser {
    pub fn new(runtime: Handle) -> Self {
        Self {
            catalog: ImageCatalog::new(),
            listing: RequestTracker::new(),
            deleting: RequestTracker::new(),
            creating: RequestTracker::new(),
            runtime,
        }
    }

    pub fn catalog(&self) -> &ImageCatalog {
        &self.catalog
    }

    pub fn refresh(&mut self, client: &DaemonClient) {
        let client = client.clone();
        self.listing
            .spawn(&self.runtime, async move { client.list_images().await });
    }

    pub fn delete(&mut self, client: &DaemonClient, id: &str) {
        let client = client.clone();
        let id = id.to_string();
        self.deleting.spawn(&self.runtime, async move {
            client.delete_image(&id).await.map(|()| id)
        });
    }

    pub fn create_container(&mut self, client: &DaemonClient, image_id: &str, name: &str) {
        let client = client.clone();
        let image_id = image_id.to_string();
        let name = name.to_string();
        self.creating.spawn(&self.runtime, async move {
            let container_id = client.create_container(&image_id, Some(&name)).await?;
            Ok::<_, ClientError>((image_id, container_id))
        });
    }

    /// Apply finished requests to the catalog and report what happened
    pub fn poll(&mut self) -> Vec<ImageEvent> {
        let mut events = Vec::new();

        for outcome in self.listing.poll() {
            match self.catalog.apply_listing(outcome) {
                Ok(count) => {
                    info!("Image list refreshed ({} images)", count);
                    events.push(ImageEvent::Refreshed(count));
                }
                Err(e) => {
                    warn!("Image list refresh failed: {}", e);
                    events.push(ImageEvent::RefreshFailed(e));
                }
            }
        }

        for outcome in self.deleting.poll() {
            match outcome {
                Ok(id) => {
                    self.catalog.remove(&id);
                    info!("Deleted image {}", id);
                    events.push(ImageEvent::Deleted(id));
                }
                Err(e) => events.push(ImageEvent::DeleteFailed(e)),
            }
        }

        for outcome in self.creating.poll() {
            match outcome {
                Ok::<_, ClientError>((image_id, container_id)) => {
                    info!("Created container {} from image {}", container_id, image_id);
                    events.push(ImageEvent::ContainerCreated {
                        image_id,
                        container_id,
                    });
                }
                Err(e) => events.push(ImageEvent::ContainerFailed(e)),
            }
        }

        events
    }

    /// Phase of the image listing as of the last `poll`
    pub fn refresh_phase(&self) -> RequestPhase {
        self.listing.phase()
    }

    pub fn is_loading(&self) -> bool {
        self.listing.phase() == RequestPhase::Pending
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting.phase() == RequestPhase::Pending
    }

    pub fn is_creating(&self) -> bool {
        self.creating.phase() == RequestPhase::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daemon::DEFAULT_TIMEOUT;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::time::{Duration, Instant};
    use tokio::runtime::Runtime;

    fn image(id: &str, repository: &str, tag: &str) -> DockerImage {
        DockerImage {
            id: id.into(),
            repository: repository.into(),
            tag: tag.into(),
            created: "2026-01-01T00:00:00Z".into(),
            size: "12.5MB".into(),
        }
    }

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap()
    }

    fn settle(browser: &mut ImageBrowser) -> Vec<ImageEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        loop {
            events.extend(browser.poll());
            let busy = browser.is_loading() || browser.is_deleting() || browser.is_creating();
            if !busy || Instant::now() > deadline {
                return events;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn images_body() -> String {
        json!([
            {"id": "a1", "repository": "alpine", "tag": "latest", "created": "2026-01-01", "size": "7.8MB"},
            {"id": "n1", "repository": "nginx", "tag": "1.27", "created": "2026-01-02", "size": "190MB"}
        ])
        .to_string()
    }

    #[test]
    fn failed_listing_leaves_catalog_untouched() {
        let mut catalog = ImageCatalog::new();
        catalog
            .apply_listing(Ok(vec![image("a1", "alpine", "latest")]))
            .unwrap();

        let err = catalog
            .apply_listing(Err(ClientError::Transport("connection refused".into())))
            .unwrap_err();

        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(catalog.images(), &[image("a1", "alpine", "latest")]);
        assert!(catalog.loaded());
    }

    #[test]
    fn empty_listing_differs_from_failure() {
        let mut ok = ImageCatalog::new();
        assert_eq!(ok.apply_listing(Ok(vec![])), Ok(0));
        assert!(ok.loaded());

        let mut failed = ImageCatalog::new();
        assert!(failed.apply_listing(Err(ClientError::Timeout)).is_err());
        assert!(!failed.loaded());
    }

    #[test]
    fn filter_matches_repository_or_tag() {
        let mut catalog = ImageCatalog::new();
        catalog
            .apply_listing(Ok(vec![
                image("a1", "Alpine", "latest"),
                image("p1", "postgres", "16-alpine"),
                image("r1", "redis", "7"),
            ]))
            .unwrap();

        let ids: Vec<_> = catalog.filter("ALPINE").iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "p1"]);
        assert_eq!(catalog.filter("").len(), 3);
        assert!(catalog.filter("mysql").is_empty());
    }

    #[test]
    fn remove_only_touches_matching_id() {
        let mut catalog = ImageCatalog::new();
        catalog
            .apply_listing(Ok(vec![image("a1", "alpine", "latest"), image("r1", "redis", "7")]))
            .unwrap();

        assert!(catalog.remove("a1"));
        assert!(!catalog.remove("a1"));
        assert_eq!(catalog.images(), &[image("r1", "redis", "7")]);
    }

    #[test]
    fn refresh_populates_then_transport_failure_keeps_list() {
        let rt = runtime();
        let mut server = Server::new();
        let ok = server
            .mock("GET", "/api/docker/images")
            .with_status(200)
            .with_body(images_body())
            .expect(1)
            .create();
        let client = DaemonClient::new(&server.url(), DEFAULT_TIMEOUT).unwrap();
        let mut browser = ImageBrowser::new(rt.handle().clone());

        assert_eq!(browser.refresh_phase(), RequestPhase::Idle);
        browser.refresh(&client);
        assert!(browser.is_loading());
        assert_eq!(browser.refresh_phase(), RequestPhase::Pending);
        assert_eq!(settle(&mut browser), vec![ImageEvent::Refreshed(2)]);
        assert_eq!(browser.refresh_phase(), RequestPhase::Succeeded);
        ok.assert();

        // Unmatched requests get a bare 501, which is a transport failure
        server.reset();
        browser.refresh(&client);
        let events = settle(&mut browser);

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ImageEvent::RefreshFailed(_)));
        assert_eq!(browser.refresh_phase(), RequestPhase::Failed);
        let ids: Vec<_> = browser.catalog().images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "n1"]);
    }

    #[test]
    fn delete_removes_only_after_confirmation() {
        let rt = runtime();
        let mut server = Server::new();
        server
            .mock("GET", "/api/docker/images")
            .with_status(200)
            .with_body(images_body())
            .create();
        server
            .mock("DELETE", "/api/docker/images/a1")
            .with_status(200)
            .with_body(json!({"message": "Image deleted successfully"}).to_string())
            .create();
        server
            .mock("DELETE", "/api/docker/images/n1")
            .with_status(500)
            .with_body(json!({"error": "image is being used by running container"}).to_string())
            .create();
        let client = DaemonClient::new(&server.url(), DEFAULT_TIMEOUT).unwrap();
        let mut browser = ImageBrowser::new(rt.handle().clone());
        browser.refresh(&client);
        settle(&mut browser);

        browser.delete(&client, "n1");
        // Not removed while the request is in flight
        assert!(browser.catalog().get("n1").is_some());
        let events = settle(&mut browser);
        assert_eq!(
            events,
            vec![ImageEvent::DeleteFailed(ClientError::Daemon {
                status: 500,
                message: "image is being used by running container".into(),
            })]
        );
        assert_eq!(browser.catalog().images().len(), 2);

        browser.delete(&client, "a1");
        assert_eq!(settle(&mut browser), vec![ImageEvent::Deleted("a1".into())]);
        let ids: Vec<_> = browser.catalog().images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["n1"]);
    }

    #[test]
    fn create_container_reports_assigned_id() {
        let rt = runtime();
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/api/docker/containers/create")
            .match_body(Matcher::Json(json!({"imageId": "a1"})))
            .with_status(201)
            .with_body(json!({"containerId": "f00d"}).to_string())
            .create();
        let client = DaemonClient::new(&server.url(), DEFAULT_TIMEOUT).unwrap();
        let mut browser = ImageBrowser::new(rt.handle().clone());

        browser.create_container(&client, "a1", "  ");
        assert!(browser.is_creating());
        assert_eq!(
            settle(&mut browser),
            vec![ImageEvent::ContainerCreated {
                image_id: "a1".into(),
                container_id: "f00d".into(),
            }]
        );
        mock.assert();
        assert!(browser.catalog().images().is_empty());
    }
}
