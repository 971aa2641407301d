//! Archive encoding and decoding for the arcwire protocol.
//!
//! This is the main codec crate that ties together bitstream, schema and wire
//! to serialize server entities into the positional archive format the game
//! client expects.
//!
//! # Features
//!
//! - One traversal per archive type, shared by collect, write, read and layout passes
//! - Cooked booleans replayed in traversal order
//! - Player, region, avatar-state and option archives
//! - Power property deltas addressed by replication id
//! - Layout recording for fingerprinting the compatibility surface
//!
//! # Design Principles
//!
//! - **Positional format** - There are no field names on the wire; order is the contract.
//! - **Bounded decoding** - List counts and string lengths are checked against limits.
//! - **Fresh values** - Decoding builds a new value; a failed decode leaves nothing behind.
//!
//! # Example
//!
//! ```
//! use codec::{decode_archive, encode_archive, CodecLimits, StashTabOption};
//! use schema::{DataRef, IdentityTable};
//!
//! let mut option = StashTabOption {
//!     prototype: DataRef(7),
//!     name: "Gear".to_owned(),
//!     asset_ref: 1001,
//!     field2: 2,
//!     field3: 0,
//! };
//! let bytes = encode_archive(&mut option, &IdentityTable).unwrap();
//! let decoded: StashTabOption =
//!     decode_archive(&bytes, &IdentityTable, &CodecLimits::default()).unwrap();
//! assert_eq!(decoded, option);
//! ```

mod archive;
mod avatar;
mod common;
mod error;
mod limits;
mod message;
mod mission;
mod options;
mod player;
mod region;
mod social;
mod update;

pub use archive::{
    archive_layout, decode_archive, encode_archive, peek_replication_policy, transfer_fixed_list,
    transfer_list, transfer_optional, Archive, ArchiveMode, ArchiveObject, ArchiveReader,
    ArchiveWriter, BoolCollector, LayoutRecorder,
};
pub use avatar::{LocomotionState, PathNode, UpdateAvatarStateArchive};
pub use common::{PropertyEntry, ReplicatedPropertyCollection, ReplicatedVariable, Vector3};
pub use error::{CodecError, CodecResult, LimitKind};
pub use limits::CodecLimits;
pub use message::{archive_message, decode_framed_archive, decode_message_archive};
pub use mission::{Mission, MissionManager, MissionObjective};
pub use options::{ArmorRarityVaporizeThreshold, ChatChannelFilter, GameplayOptions, StashTabOption};
pub use player::Player;
pub use region::{
    ObjectiveConnection, ObjectiveGraph, ObjectiveNode, RegionArchive, UiDataProvider, UiWidget,
};
pub use social::{AchievementState, Community, CommunityCircle, CommunityMember, GuildMemberInfo};
pub use update::PowerPropertyUpdate;
pub use wire::Limits as WireLimits;
