use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Identifier of a graphics resource, unique within its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    MeshBuffer,
    Material,
}

#[derive(Debug, Default)]
struct PoolCounters {
    next_id: AtomicU64,
    live_meshes: AtomicUsize,
    live_materials: AtomicUsize,
    released: AtomicU64,
}

impl PoolCounters {
    fn live(&self, kind: ResourceKind) -> &AtomicUsize {
        match kind {
            ResourceKind::MeshBuffer => &self.live_meshes,
            ResourceKind::Material => &self.live_materials,
        }
    }
}

/// Allocator for mesh buffers and materials.
///
/// Cloning shares the same counters, so the factory that allocates and the
/// code that inspects residency see the same numbers.
#[derive(Debug, Clone, Default)]
pub struct ResourcePool {
    counters: Arc<PoolCounters>,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&self, kind: ResourceKind) -> ResourceHandle {
        let id = ResourceId(self.counters.next_id.fetch_add(1, Ordering::Relaxed));
        self.counters.live(kind).fetch_add(1, Ordering::Relaxed);
        ResourceHandle {
            id,
            kind,
            counters: Arc::clone(&self.counters),
        }
    }

    /// Handles currently alive.
    pub fn live(&self) -> usize {
        self.live_of(ResourceKind::MeshBuffer) + self.live_of(ResourceKind::Material)
    }

    pub fn live_of(&self, kind: ResourceKind) -> usize {
        self.counters.live(kind).load(Ordering::Relaxed)
    }

    /// Handles ever allocated.
    pub fn allocated(&self) -> u64 {
        self.counters.next_id.load(Ordering::Relaxed)
    }

    /// Handles ever released.
    pub fn released(&self) -> u64 {
        self.counters.released.load(Ordering::Relaxed)
    }
}

/// Exclusive ownership of one graphics resource.
///
/// Not `Clone`: the resource is released when the handle drops, so a handle
/// can only ever be released once.
#[derive(Debug)]
pub struct ResourceHandle {
    id: ResourceId,
    kind: ResourceKind,
    counters: Arc<PoolCounters>,
}

impl ResourceHandle {
    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl Drop for ResourceHandle {
    fn drop(&mut self) {
        self.counters.live(self.kind).fetch_sub(1, Ordering::Relaxed);
        self.counters.released.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(id = self.id.0, kind = ?self.kind, "released graphics resource");
    }
}
