use odonto_core::access::Capability;
use odonto_core::resource::{
    ReconcilePolicy, Resource, ResourceGateway, filter_by_query, merge_entity, remove_entity,
};
use odonto_core::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::busy::BusyGuard;
use crate::session::SessionManager;

/// Outcome of a request that may have outlived its session.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled<T> {
    /// The response was applied to the local collection
    Applied(T),
    /// The session ended while the request was in flight; nothing changed
    Discarded,
}

impl<T> Settled<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Discarded => None,
        }
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, Self::Discarded)
    }
}

/// A collection tagged with the session epoch it was loaded under.
struct Snapshot<R> {
    epoch: u64,
    items: Vec<R>,
}

impl<R> Snapshot<R> {
    /// The items if they belong to `epoch`; nothing otherwise.
    fn visible(&self, epoch: u64) -> &[R] {
        if self.epoch == epoch {
            self.items.as_slice()
        } else {
            &[]
        }
    }

    /// The items for writing under `epoch`, dropping those of an earlier
    /// session first. `None` once a later session owns the cache.
    fn for_epoch(&mut self, epoch: u64) -> Option<&mut Vec<R>> {
        if epoch < self.epoch {
            return None;
        }
        if self.epoch != epoch {
            self.items.clear();
            self.epoch = epoch;
        }
        Some(&mut self.items)
    }
}

/// Local cache of one resource collection plus the mutations that keep
/// it in line with the backend.
///
/// After a successful mutation the collection is reconciled according to
/// `R::POLICY`. A failed request never touches the collection. The cache
/// only ever shows what was loaded during the current session: once the
/// session epoch moves on, reads see an empty collection.
pub struct ListController<R: Resource> {
    gateway: Arc<dyn ResourceGateway<R>>,
    session: Arc<SessionManager>,
    cache: RwLock<Snapshot<R>>,
    busy: AtomicBool,
    view: Option<Capability>,
    manage: Option<Capability>,
}

impl<R: Resource> ListController<R> {
    /// Creates an ungated controller with an empty collection.
    pub fn new(gateway: Arc<dyn ResourceGateway<R>>, session: Arc<SessionManager>) -> Self {
        Self {
            gateway,
            session,
            cache: RwLock::new(Snapshot {
                epoch: 0,
                items: Vec::new(),
            }),
            busy: AtomicBool::new(false),
            view: None,
            manage: None,
        }
    }

    /// Requires `view` for fetches and `manage` for mutations.
    pub fn with_capabilities(mut self, view: Capability, manage: Capability) -> Self {
        self.view = Some(view);
        self.manage = Some(manage);
        self
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// A snapshot of the cached collection, in backend order.
    pub async fn items(&self) -> Vec<R> {
        let cache = self.cache.read().await;
        cache.visible(self.session.epoch()).to_vec()
    }

    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.visible(self.session.epoch()).len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Looks up an entity in the cached collection.
    pub async fn find(&self, id: &str) -> Option<R> {
        let cache = self.cache.read().await;
        cache
            .visible(self.session.epoch())
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    /// The cached entities matching `query`, in collection order.
    pub async fn filtered(&self, query: &str) -> Vec<R> {
        let cache = self.cache.read().await;
        filter_by_query(cache.visible(self.session.epoch()), query)
    }

    /// Whether a mutation is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Replaces the cached collection with the backend's.
    ///
    /// On failure the previous collection is kept.
    pub async fn fetch_all(&self) -> Result<Settled<usize>> {
        self.check(self.view).await?;
        let epoch = self.session.epoch();
        self.reload(epoch).await
    }

    pub async fn create(&self, input: &R::Input) -> Result<Settled<R>> {
        self.check(self.manage).await?;
        let _busy = BusyGuard::acquire(&self.busy)?;
        let epoch = self.session.epoch();

        tracing::debug!(kind = R::KIND, ?input, "Creating");
        let result = self.gateway.create(input).await;
        let Some(entity) = self.session.settle(epoch, result).await? else {
            return Ok(Settled::Discarded);
        };

        tracing::info!(kind = R::KIND, id = entity.id(), "Created");
        self.reconcile_upsert(epoch, entity).await
    }

    pub async fn update(&self, id: &str, input: &R::Input) -> Result<Settled<R>> {
        self.check(self.manage).await?;
        let _busy = BusyGuard::acquire(&self.busy)?;
        let epoch = self.session.epoch();

        tracing::debug!(kind = R::KIND, id, ?input, "Updating");
        let result = self.gateway.update(id, input).await;
        let Some(entity) = self.session.settle(epoch, result).await? else {
            return Ok(Settled::Discarded);
        };

        tracing::info!(kind = R::KIND, id = entity.id(), "Updated");
        self.reconcile_upsert(epoch, entity).await
    }

    /// Deletes an entity. A rejected delete (e.g. a conflict with records
    /// that reference it) leaves the collection unchanged.
    pub async fn delete(&self, id: &str) -> Result<Settled<()>> {
        self.check(self.manage).await?;
        let _busy = BusyGuard::acquire(&self.busy)?;
        let epoch = self.session.epoch();

        let result = self.gateway.delete(id).await;
        if let Err(e) = &result {
            tracing::warn!(kind = R::KIND, id, "Delete rejected: {}", e);
        }
        if self.session.settle(epoch, result).await?.is_none() {
            return Ok(Settled::Discarded);
        }

        tracing::info!(kind = R::KIND, id, "Deleted");
        match R::POLICY {
            ReconcilePolicy::Merge => {
                if let Some(items) = self.cache.write().await.for_epoch(epoch) {
                    remove_entity(items, id);
                }
                Ok(Settled::Applied(()))
            }
            ReconcilePolicy::Refetch => Ok(match self.reload(epoch).await? {
                Settled::Applied(_) => Settled::Applied(()),
                Settled::Discarded => Settled::Discarded,
            }),
        }
    }

    async fn reconcile_upsert(&self, epoch: u64, entity: R) -> Result<Settled<R>> {
        match R::POLICY {
            ReconcilePolicy::Merge => {
                if let Some(items) = self.cache.write().await.for_epoch(epoch) {
                    merge_entity(items, entity.clone());
                }
                Ok(Settled::Applied(entity))
            }
            ReconcilePolicy::Refetch => Ok(match self.reload(epoch).await? {
                Settled::Applied(_) => Settled::Applied(entity),
                Settled::Discarded => Settled::Discarded,
            }),
        }
    }

    async fn reload(&self, epoch: u64) -> Result<Settled<usize>> {
        let result = self.gateway.list().await;
        if let Err(e) = &result {
            tracing::warn!(kind = R::KIND, "Fetch failed, keeping cached collection: {}", e);
        }
        let Some(items) = self.session.settle(epoch, result).await? else {
            return Ok(Settled::Discarded);
        };

        let count = items.len();
        if let Some(cached) = self.cache.write().await.for_epoch(epoch) {
            *cached = items;
        }
        tracing::debug!(kind = R::KIND, count, "Collection refreshed");
        Ok(Settled::Applied(count))
    }

    async fn check(&self, capability: Option<Capability>) -> Result<()> {
        match capability {
            Some(capability) => self.session.require(capability).await.map(|_| ()),
            None => Ok(()),
        }
    }
}
