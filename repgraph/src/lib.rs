//! Replication dispatch: route incremental updates to live objects.
//!
//! Archives that can be patched after they are sent (property collections,
//! replicated variables) carry a replication id. This crate hands those ids
//! out per game and keeps the registry that maps an id back to the object
//! that owns it, so a `PowerPropertyUpdate` lands on the right collection.
//!
//! Everything here is single-threaded and owned by one game instance.

mod error;
mod game;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use codec::{PowerPropertyUpdate, ReplicatedPropertyCollection, ReplicatedVariable};
use tracing::{debug, warn};

pub use error::{DispatchError, DispatchResult};
pub use game::Game;

/// Identifier of a live replicated object within one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReplicationId(pub u64);

impl ReplicationId {
    /// Carried by objects that have not been registered yet.
    pub const INVALID: Self = Self(0);

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ReplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic replication id source for one game.
#[derive(Debug, Clone)]
pub struct ReplicationIdAllocator {
    next: u64,
}

impl Default for ReplicationIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplicationIdAllocator {
    /// Creates an allocator whose first id is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the id the next allocation will try first.
    #[must_use]
    pub const fn peek(&self) -> ReplicationId {
        ReplicationId(self.next)
    }

    /// Hands out the next id for which `taken` is false.
    pub fn allocate(
        &mut self,
        mut taken: impl FnMut(ReplicationId) -> bool,
    ) -> DispatchResult<ReplicationId> {
        loop {
            if self.next == 0 {
                return Err(DispatchError::IdsExhausted);
            }
            let id = ReplicationId(self.next);
            self.next = self.next.wrapping_add(1);
            if !taken(id) {
                return Ok(id);
            }
        }
    }
}

/// A live object that accepts updates addressed by replication id.
pub trait ArchiveMessageHandler {
    /// Returns the id this handler is registered under, or [`ReplicationId::INVALID`].
    fn replication_id(&self) -> ReplicationId;

    /// Stores the id assigned at registration.
    fn set_replication_id(&mut self, id: ReplicationId);

    /// Applies a power property update. Handlers without properties reject it.
    fn apply_property(&mut self, update: &PowerPropertyUpdate) -> DispatchResult<()> {
        let _ = update;
        Err(DispatchError::UnsupportedUpdate {
            id: self.replication_id(),
        })
    }
}

impl ArchiveMessageHandler for ReplicatedPropertyCollection {
    fn replication_id(&self) -> ReplicationId {
        ReplicationId(self.replication_id)
    }

    fn set_replication_id(&mut self, id: ReplicationId) {
        self.replication_id = id.raw();
    }

    fn apply_property(&mut self, update: &PowerPropertyUpdate) -> DispatchResult<()> {
        self.set(update.property_id, update.value);
        Ok(())
    }
}

impl<T> ArchiveMessageHandler for ReplicatedVariable<T> {
    fn replication_id(&self) -> ReplicationId {
        ReplicationId(self.replication_id)
    }

    fn set_replication_id(&mut self, id: ReplicationId) {
        self.replication_id = id.raw();
    }
}

/// Shared handle to a registered handler.
pub type HandlerRef = Rc<RefCell<dyn ArchiveMessageHandler>>;

/// Registry of live handlers keyed by replication id.
///
/// Handlers are held weakly; the registry never keeps an object alive.
#[derive(Default)]
pub struct ArchiveMessageDispatcher {
    handlers: HashMap<ReplicationId, Weak<RefCell<dyn ArchiveMessageHandler>>>,
}

impl fmt::Debug for ArchiveMessageDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.handlers.keys().copied().collect();
        ids.sort_unstable();
        f.debug_struct("ArchiveMessageDispatcher")
            .field("ids", &ids)
            .finish()
    }
}

impl ArchiveMessageDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered ids, including ones whose handler was dropped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns `true` if `id` is registered to a live handler.
    #[must_use]
    pub fn contains(&self, id: ReplicationId) -> bool {
        self.live(id).is_some()
    }

    /// Registers `handler`, assigning an id from `ids` if it has none.
    ///
    /// Registering the same handler again returns its existing id. A handler
    /// whose id belongs to a different live handler is rejected.
    /// A handler that is mutably borrowed elsewhere is reported as busy.
    pub fn register(
        &mut self,
        handler: &HandlerRef,
        ids: &mut ReplicationIdAllocator,
    ) -> DispatchResult<ReplicationId> {
        let current = current_id(handler)?;

        if !current.is_valid() {
            let mut slot = handler.try_borrow_mut().map_err(|_| DispatchError::HandlerBusy {
                id: ReplicationId::INVALID,
            })?;
            let id = ids.allocate(|candidate| self.handlers.contains_key(&candidate))?;
            slot.set_replication_id(id);
            drop(slot);
            self.handlers.insert(id, Rc::downgrade(handler));
            debug!(%id, "registered handler");
            return Ok(id);
        }

        match self.live(current) {
            Some(existing) if same_handler(&existing, handler) => Ok(current),
            Some(_) => {
                warn!(id = %current, "replication id collision, registration rejected");
                Err(DispatchError::ReplicationIdCollision { id: current })
            }
            None => {
                self.handlers.insert(current, Rc::downgrade(handler));
                debug!(id = %current, "registered handler with explicit id");
                Ok(current)
            }
        }
    }

    /// Removes `handler` from the registry.
    pub fn unregister(&mut self, handler: &HandlerRef) -> DispatchResult<()> {
        let id = current_id(handler)?;
        match self.handlers.get(&id).and_then(Weak::upgrade) {
            Some(existing) if same_handler(&existing, handler) => {
                self.handlers.remove(&id);
                debug!(%id, "unregistered handler");
                Ok(())
            }
            _ => {
                warn!(%id, "unregister of unknown handler");
                Err(DispatchError::UnknownHandler { id })
            }
        }
    }

    /// Returns the live handler registered under `id`.
    #[must_use]
    pub fn lookup(&self, id: ReplicationId) -> Option<HandlerRef> {
        let found = self.live(id);
        if found.is_none() {
            warn!(%id, "lookup of unknown replication id");
        }
        found
    }

    /// Applies `update` to the handler it addresses.
    pub fn route_property_update(&self, update: &PowerPropertyUpdate) -> DispatchResult<()> {
        let id = ReplicationId(update.replication_id);
        let handler = self
            .lookup(id)
            .ok_or(DispatchError::UnknownHandler { id })?;
        let mut handler = handler
            .try_borrow_mut()
            .map_err(|_| DispatchError::HandlerBusy { id })?;
        handler.apply_property(update)
    }

    /// Drops entries whose handler no longer exists. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.handlers.len();
        self.handlers.retain(|_, handler| handler.strong_count() > 0);
        let removed = before - self.handlers.len();
        if removed > 0 {
            debug!(removed, "pruned dropped handlers");
        }
        removed
    }

    fn live(&self, id: ReplicationId) -> Option<HandlerRef> {
        self.handlers.get(&id).and_then(Weak::upgrade)
    }
}

fn current_id(handler: &HandlerRef) -> DispatchResult<ReplicationId> {
    handler
        .try_borrow()
        .map(|handler| handler.replication_id())
        .map_err(|_| DispatchError::HandlerBusy {
            id: ReplicationId::INVALID,
        })
}

// Compares data addresses only; vtable pointers are not unique.
fn same_handler(a: &HandlerRef, b: &HandlerRef) -> bool {
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(id: u64) -> Rc<RefCell<ReplicatedPropertyCollection>> {
        Rc::new(RefCell::new(ReplicatedPropertyCollection::new(id)))
    }

    #[test]
    fn allocator_starts_at_one_and_skips_taken() {
        let mut ids = ReplicationIdAllocator::new();
        assert_eq!(ids.allocate(|_| false).unwrap(), ReplicationId(1));
        assert_eq!(
            ids.allocate(|id| id == ReplicationId(2)).unwrap(),
            ReplicationId(3)
        );
        assert_eq!(ids.peek(), ReplicationId(4));
    }

    #[test]
    fn allocator_exhaustion() {
        let mut ids = ReplicationIdAllocator { next: u64::MAX };
        assert_eq!(ids.allocate(|_| false).unwrap(), ReplicationId(u64::MAX));
        assert_eq!(ids.allocate(|_| false), Err(DispatchError::IdsExhausted));
    }

    #[test]
    fn register_assigns_and_is_idempotent() {
        let mut dispatcher = ArchiveMessageDispatcher::new();
        let mut ids = ReplicationIdAllocator::new();
        let handler: HandlerRef = collection(0);

        let first = dispatcher.register(&handler, &mut ids).unwrap();
        let second = dispatcher.register(&handler, &mut ids).unwrap();
        assert_eq!(first, ReplicationId(1));
        assert_eq!(first, second);
        assert_eq!(handler.borrow().replication_id(), first);
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn explicit_collision_keeps_first_owner() {
        let mut dispatcher = ArchiveMessageDispatcher::new();
        let mut ids = ReplicationIdAllocator::new();
        let first: HandlerRef = collection(9);
        let second: HandlerRef = collection(9);

        dispatcher.register(&first, &mut ids).unwrap();
        assert_eq!(
            dispatcher.register(&second, &mut ids),
            Err(DispatchError::ReplicationIdCollision {
                id: ReplicationId(9)
            })
        );
        let owner = dispatcher.lookup(ReplicationId(9)).unwrap();
        assert!(same_handler(&owner, &first));
    }

    #[test]
    fn dropped_handler_frees_its_id() {
        let mut dispatcher = ArchiveMessageDispatcher::new();
        let mut ids = ReplicationIdAllocator::new();
        {
            let temporary: HandlerRef = collection(5);
            dispatcher.register(&temporary, &mut ids).unwrap();
        }
        assert!(!dispatcher.contains(ReplicationId(5)));
        let replacement: HandlerRef = collection(5);
        assert_eq!(
            dispatcher.register(&replacement, &mut ids).unwrap(),
            ReplicationId(5)
        );
        assert_eq!(dispatcher.prune(), 0);
    }

    #[test]
    fn unregister_unknown_is_error() {
        let mut dispatcher = ArchiveMessageDispatcher::new();
        let handler: HandlerRef = collection(3);
        assert_eq!(
            dispatcher.unregister(&handler),
            Err(DispatchError::UnknownHandler {
                id: ReplicationId(3)
            })
        );
    }

    #[test]
    fn variables_reject_property_updates() {
        let mut dispatcher = ArchiveMessageDispatcher::new();
        let mut ids = ReplicationIdAllocator::new();
        let name: HandlerRef = Rc::new(RefCell::new(ReplicatedVariable::new(0, String::new())));
        let id = dispatcher.register(&name, &mut ids).unwrap();
        let update = PowerPropertyUpdate {
            replication_id: id.raw(),
            property_id: 0x3ba,
            value: 1,
        };
        assert_eq!(
            dispatcher.route_property_update(&update),
            Err(DispatchError::UnsupportedUpdate { id })
        );
    }

    #[test]
    fn busy_handler_is_reported() {
        let mut dispatcher = ArchiveMessageDispatcher::new();
        let mut ids = ReplicationIdAllocator::new();
        let handler: HandlerRef = collection(0);
        let id = dispatcher.register(&handler, &mut ids).unwrap();
        let _guard = handler.borrow();
        let update = PowerPropertyUpdate {
            replication_id: id.raw(),
            property_id: 0x3ba,
            value: 1,
        };
        assert_eq!(
            dispatcher.route_property_update(&update),
            Err(DispatchError::HandlerBusy { id })
        );
    }

    #[test]
    fn register_of_borrowed_handler_is_busy() {
        let mut dispatcher = ArchiveMessageDispatcher::new();
        let mut ids = ReplicationIdAllocator::new();
        let handler: HandlerRef = collection(0);
        {
            let _guard = handler.borrow_mut();
            assert_eq!(
                dispatcher.register(&handler, &mut ids),
                Err(DispatchError::HandlerBusy {
                    id: ReplicationId::INVALID
                })
            );
        }
        {
            // shared borrows still block assigning an id
            let _guard = handler.borrow();
            assert!(matches!(
                dispatcher.register(&handler, &mut ids),
                Err(DispatchError::HandlerBusy { .. })
            ));
        }
        assert!(dispatcher.is_empty());
        assert_eq!(ids.peek(), ReplicationId(1));
        assert_eq!(dispatcher.register(&handler, &mut ids), Ok(ReplicationId(1)));
    }

    #[test]
    fn unregister_of_borrowed_handler_is_busy() {
        let mut dispatcher = ArchiveMessageDispatcher::new();
        let mut ids = ReplicationIdAllocator::new();
        let handler: HandlerRef = collection(0);
        let id = dispatcher.register(&handler, &mut ids).unwrap();
        {
            let _guard = handler.borrow_mut();
            assert!(matches!(
                dispatcher.unregister(&handler),
                Err(DispatchError::HandlerBusy { .. })
            ));
        }
        assert!(dispatcher.contains(id));
        assert_eq!(dispatcher.unregister(&handler), Ok(()));
    }
}
