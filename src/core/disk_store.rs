//! Disk store - session-scoped collection of virtual disks

use std::sync::Arc;

use tracing::{debug, info};

use super::disk::{DiskFormat, DiskId, DiskQuery, DiskSpec, VirtualDisk};
use super::store::{MonotonicClock, Snapshot, Store, SubscriptionId};

/// Authoritative in-memory collection of disks for the current session.
///
/// Nothing here validates its input: sizes of zero, empty names, shrinking
/// resizes and same-format conversions are all accepted as given.
#[derive(Clone, Default)]
pub struct DiskStore {
    store: Arc<Store<VirtualDisk>>,
    clock: Arc<MonotonicClock>,
}

impl DiskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new disk with a fresh id and creation time
    pub fn add_disk(&self, spec: DiskSpec) -> VirtualDisk {
        let disk = VirtualDisk::from_spec(spec, self.clock.now());
        let added = disk.clone();
        self.store.replace_with(move |disks| {
            let mut next = disks.to_vec();
            next.push(added);
            next
        });
        info!(
            "Added disk {} ({}, {} GB, {})",
            disk.id,
            disk.name,
            disk.size_gb,
            disk.format.label()
        );
        disk
    }

    pub fn get_disk(&self, id: &DiskId) -> Option<VirtualDisk> {
        self.store.snapshot().iter().find(|d| d.id == *id).cloned()
    }

    /// Relabel a disk's format. Unknown ids are ignored.
    pub fn convert_disk_format(&self, id: &DiskId, new_format: DiskFormat) {
        self.update(id, |disk| disk.format = new_format);
        debug!("Convert disk {} to {}", id, new_format.label());
    }

    /// Set a disk's size in GB. Unknown ids are ignored.
    pub fn resize_disk(&self, id: &DiskId, new_size_gb: u64) {
        self.update(id, |disk| disk.size_gb = new_size_gb);
        debug!("Resize disk {} to {} GB", id, new_size_gb);
    }

    pub fn disks(&self) -> Snapshot<VirtualDisk> {
        self.store.snapshot()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn subscribe(
        &self,
        callback: impl Fn(&Snapshot<VirtualDisk>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    fn update(&self, id: &DiskId, apply: impl Fn(&mut VirtualDisk)) {
        self.store.replace_with(|disks| {
            if !disks.iter().any(|d| d.id == *id) {
                debug!("Disk {} not found, collection left as is", id);
            }
            disks
                .iter()
                .map(|disk| {
                    let mut disk = disk.clone();
                    if disk.id == *id {
                        apply(&mut disk);
                    }
                    disk
                })
                .collect()
        });
    }
}

/// Filtered and sorted disk rows, recomputed only when the store revision
/// or the query differs from the last call
#[derive(Debug, Default)]
pub struct DiskRows {
    key: Option<(u64, DiskQuery)>,
    rows: Vec<VirtualDisk>,
    recomputed: u64,
}

impl DiskRows {
    pub fn rows(&mut self, store: &DiskStore, query: &DiskQuery) -> &[VirtualDisk] {
        // Read before the snapshot, so a racing write only causes one extra recompute
        let revision = store.revision();
        let fresh = matches!(&self.key, Some((rev, cached)) if *rev == revision && cached == query);
        if !fresh {
            self.rows = query.apply(&store.disks());
            self.key = Some((revision, query.clone()));
            self.recomputed += 1;
        }
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::disk::DiskType;

    fn sample() -> DiskSpec {
        DiskSpec::new("disk1", 20, DiskType::Dynamic, DiskFormat::Qcow2)
    }

    #[test]
    fn add_then_convert_format() {
        let store = DiskStore::new();
        let disk = store.add_disk(sample());
        assert_eq!(store.len(), 1);
        assert_eq!(store.disks()[0].format, DiskFormat::Qcow2);

        store.convert_disk_format(&disk.id, DiskFormat::Vmdk);

        let updated = store.get_disk(&disk.id).unwrap();
        assert_eq!(updated.format, DiskFormat::Vmdk);
        assert_eq!(updated.name, disk.name);
        assert_eq!(updated.size_gb, disk.size_gb);
        assert_eq!(updated.disk_type, disk.disk_type);
        assert_eq!(updated.created_at, disk.created_at);
    }

    #[test]
    fn resize_changes_only_size() {
        let store = DiskStore::new();
        let disk = store.add_disk(sample());

        store.resize_disk(&disk.id, 40);

        let updated = store.get_disk(&disk.id).unwrap();
        assert_eq!(updated.size_gb, 40);
        assert_eq!(VirtualDisk { size_gb: 20, ..updated }, disk);
    }

    #[test]
    fn shrinking_and_zero_sizes_are_accepted() {
        let store = DiskStore::new();
        let disk = store.add_disk(sample());

        store.resize_disk(&disk.id, 5);
        assert_eq!(store.get_disk(&disk.id).unwrap().size_gb, 5);
        store.resize_disk(&disk.id, 0);
        assert_eq!(store.get_disk(&disk.id).unwrap().size_gb, 0);
    }

    #[test]
    fn unknown_id_leaves_collection_equal() {
        let store = DiskStore::new();
        store.add_disk(sample());
        store.add_disk(DiskSpec::new("disk2", 8, DiskType::Fixed, DiskFormat::Raw));
        let before = store.disks();

        store.convert_disk_format(&DiskId::new(), DiskFormat::Vdi);
        store.resize_disk(&DiskId::new(), 999);

        let after = store.disks();
        assert_eq!(*before, *after);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn ids_unique_and_timestamps_non_decreasing() {
        let store = DiskStore::new();
        let disks: Vec<_> = (0..50)
            .map(|i| {
                let spec = DiskSpec::new(format!("d{i}"), 1, DiskType::Fixed, DiskFormat::Raw);
                store.add_disk(spec)
            })
            .collect();

        let mut ids: Vec<_> = disks.iter().map(|d| d.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), disks.len());

        for pair in disks.windows(2) {
            assert!(pair[0].created_at <= pair[1].created_at);
        }
    }

    #[test]
    fn get_disk_is_idempotent() {
        let store = DiskStore::new();
        let disk = store.add_disk(sample());
        let first = store.get_disk(&disk.id);
        let second = store.get_disk(&disk.id);
        assert_eq!(first, second);
        assert_eq!(first, Some(disk));
    }

    #[test]
    fn get_disk_missing_is_none() {
        let store = DiskStore::new();
        store.add_disk(sample());
        assert!(store.get_disk(&DiskId::new()).is_none());
    }

    #[test]
    fn get_disk_reflects_latest_write() {
        let store = DiskStore::new();
        let disk = store.add_disk(sample());
        store.resize_disk(&disk.id, 30);
        store.convert_disk_format(&disk.id, DiskFormat::Raw);
        store.resize_disk(&disk.id, 50);

        let latest = store.get_disk(&disk.id).unwrap();
        assert_eq!(latest.size_gb, 50);
        assert_eq!(latest.format, DiskFormat::Raw);
    }

    #[test]
    fn empty_name_is_stored_as_given() {
        let store = DiskStore::new();
        let disk = store.add_disk(DiskSpec::new("", 0, DiskType::Fixed, DiskFormat::Vdi));
        assert_eq!(store.get_disk(&disk.id).unwrap().name, "");
    }

    #[test]
    fn clones_share_the_same_collection() {
        let store = DiskStore::new();
        let view = store.clone();
        store.add_disk(sample());
        assert_eq!(view.len(), 1);
        assert_eq!(view.revision(), store.revision());
    }

    #[test]
    fn rows_follow_revision_and_query() {
        let store = DiskStore::new();
        let mut rows = DiskRows::default();
        let mut query = DiskQuery::default();
        store.add_disk(sample());

        assert_eq!(rows.rows(&store, &query).len(), 1);
        assert_eq!(rows.rows(&store, &query).len(), 1);
        assert_eq!(rows.recomputed, 1);

        let second = store.add_disk(DiskSpec::new("backup", 8, DiskType::Fixed, DiskFormat::Raw));
        assert_eq!(rows.rows(&store, &query).len(), 2);
        assert_eq!(rows.recomputed, 2);

        store.resize_disk(&second.id, 16);
        let resized = rows.rows(&store, &query).iter().find(|d| d.id == second.id).cloned();
        assert_eq!(resized.map(|d| d.size_gb), Some(16));
        assert_eq!(rows.recomputed, 3);

        query.search = "back".into();
        let names: Vec<_> = rows.rows(&store, &query).iter().map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["backup"]);
        assert_eq!(rows.recomputed, 4);
    }
}
