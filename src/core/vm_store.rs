//! VM store - session-scoped collection of virtual machine definitions

use std::sync::Arc;

use tracing::info;

use super::store::{MonotonicClock, Snapshot, Store, SubscriptionId};
use super::vm::{VirtualMachine, VmSpec};

/// In-memory collection of virtual machines. Records are append-only and
/// `disk_id` is stored without checking the disk store.
#[derive(Clone, Default)]
pub struct VmStore {
    store: Arc<Store<VirtualMachine>>,
    clock: Arc<MonotonicClock>,
}

impl VmStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vm(&self, spec: VmSpec) -> VirtualMachine {
        let vm = VirtualMachine::from_spec(spec, self.clock.now());
        let added = vm.clone();
        self.store.replace_with(move |vms| {
            let mut next = vms.to_vec();
            next.push(added);
            next
        });
        info!(
            "Added VM {} ({}, {} vCPU, {} GB, disk {})",
            vm.id, vm.name, vm.cpu, vm.memory_gb, vm.disk_id
        );
        vm
    }

    pub fn vms(&self) -> Snapshot<VirtualMachine> {
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
        callback: impl Fn(&Snapshot<VirtualMachine>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}
