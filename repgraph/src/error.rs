//! Error types for replication dispatch.

use codec::CodecError;
use thiserror::Error;

use crate::ReplicationId;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors that can occur while registering handlers or routing updates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A different live handler already owns the identifier.
    #[error("replication id {id} is already owned by another handler")]
    ReplicationIdCollision { id: ReplicationId },

    /// No live handler is registered under the identifier.
    #[error("no handler registered for replication id {id}")]
    UnknownHandler { id: ReplicationId },

    /// The handler is borrowed elsewhere while an update was routed to it.
    #[error("handler for replication id {id} is busy")]
    HandlerBusy { id: ReplicationId },

    /// The handler does not accept this kind of update.
    #[error("handler for replication id {id} does not accept property updates")]
    UnsupportedUpdate { id: ReplicationId },

    /// Every identifier has been handed out.
    #[error("replication ids exhausted")]
    IdsExhausted,

    /// The update payload did not decode.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}
