//! Player entity archive.

use schema::{DataRef, ReplicationPolicy};

use crate::archive::{transfer_list, transfer_optional, Archive, ArchiveObject};
use crate::common::{ReplicatedPropertyCollection, ReplicatedVariable};
use crate::error::CodecResult;
use crate::mission::MissionManager;
use crate::options::{GameplayOptions, StashTabOption};
use crate::social::{AchievementState, Community, GuildMemberInfo};

/// Full player state sent when a player entity enters the client's interest area.
///
/// The boolean slots are cooked together: mission `suspended` flags, then
/// `email_verified`, the guild and community presence flags, `unk_bool`, and
/// finally the chat filter subscriptions inside the gameplay options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub replication_policy: ReplicationPolicy,
    pub property_collection: ReplicatedPropertyCollection,
    pub mission_manager: MissionManager,
    pub avatar_properties: ReplicatedPropertyCollection,
    pub shard_id: u64,
    pub name: ReplicatedVariable<String>,
    pub console_account_id1: u64,
    pub console_account_id2: u64,
    pub unk_name: ReplicatedVariable<String>,
    pub match_queue_status: u64,
    pub email_verified: bool,
    pub account_creation_timestamp: u64,
    pub party_id: ReplicatedVariable<u64>,
    pub guild_info: Option<GuildMemberInfo>,
    pub unknown_string: String,
    pub community: Option<Community>,
    pub unk_bool: bool,
    pub stash_inventories: Vec<DataRef>,
    pub available_badges: Vec<u32>,
    pub gameplay_options: GameplayOptions,
    pub achievement_states: Vec<AchievementState>,
    pub stash_tab_options: Vec<StashTabOption>,
}

impl ArchiveObject for Player {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.policy(&mut self.replication_policy)?;
        self.property_collection.transfer(ar)?;
        self.mission_manager.transfer(ar)?;
        self.avatar_properties.transfer(ar)?;
        ar.var_u64(&mut self.shard_id)?;
        self.name.transfer(ar)?;
        ar.var_u64(&mut self.console_account_id1)?;
        ar.var_u64(&mut self.console_account_id2)?;
        self.unk_name.transfer(ar)?;
        ar.var_u64(&mut self.match_queue_status)?;
        ar.bool(&mut self.email_verified)?;
        ar.var_u64(&mut self.account_creation_timestamp)?;
        self.party_id.transfer(ar)?;
        transfer_optional(ar, &mut self.guild_info)?;
        ar.string(&mut self.unknown_string)?;
        transfer_optional(ar, &mut self.community)?;
        ar.bool(&mut self.unk_bool)?;
        transfer_list(ar, &mut self.stash_inventories)?;
        transfer_list(ar, &mut self.available_badges)?;
        self.gameplay_options.transfer(ar)?;
        transfer_list(ar, &mut self.achievement_states)?;
        transfer_list(ar, &mut self.stash_tab_options)
    }
}
