//! Per-game replication context.

use codec::{decode_message_archive, CodecLimits, PowerPropertyUpdate};
use schema::DataRefTable;
use tracing::warn;
use wire::GameMessage;

use crate::error::DispatchResult;
use crate::{ArchiveMessageDispatcher, HandlerRef, ReplicationId, ReplicationIdAllocator};

/// One running game: its replication id source and handler registry.
#[derive(Debug, Default)]
pub struct Game {
    ids: ReplicationIdAllocator,
    dispatcher: ArchiveMessageDispatcher,
}

impl Game {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler`, assigning the game's next id if it has none.
    pub fn register(&mut self, handler: &HandlerRef) -> DispatchResult<ReplicationId> {
        self.dispatcher.register(handler, &mut self.ids)
    }

    pub fn unregister(&mut self, handler: &HandlerRef) -> DispatchResult<()> {
        self.dispatcher.unregister(handler)
    }

    #[must_use]
    pub fn lookup(&self, id: ReplicationId) -> Option<HandlerRef> {
        self.dispatcher.lookup(id)
    }

    /// Returns the id the next automatic registration will try first.
    #[must_use]
    pub const fn next_replication_id(&self) -> ReplicationId {
        self.ids.peek()
    }

    #[must_use]
    pub const fn dispatcher(&self) -> &ArchiveMessageDispatcher {
        &self.dispatcher
    }

    /// Decodes a `PowerPropertyUpdate` carried by `message` and routes it.
    ///
    /// A failed decode leaves every handler untouched.
    pub fn apply_update_message(
        &self,
        message: &GameMessage,
        refs: &dyn DataRefTable,
        limits: &CodecLimits,
    ) -> DispatchResult<PowerPropertyUpdate> {
        let update: PowerPropertyUpdate =
            decode_message_archive(message, refs, limits).map_err(|err| {
                warn!(id = message.id, %err, "discarding property update");
                err
            })?;
        self.dispatcher.route_property_update(&update)?;
        Ok(update)
    }
}
