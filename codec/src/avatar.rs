//! Avatar state update sent by the client while moving.

use schema::{
    LocomotionMessageFlags, ReplicationPolicy, MOVE_SPEED_PRECISION, ORIENTATION_PRECISION,
    POSITION_PRECISION, RANGE_PRECISION,
};

use crate::archive::{transfer_list, Archive, ArchiveObject};
use crate::common::Vector3;
use crate::error::CodecResult;

/// One vertex of a navigation path.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub vertex: Vector3,
    pub vertex_side: i32,
}

impl ArchiveObject for PathNode {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        self.vertex.transfer_with(ar, POSITION_PRECISION)?;
        ar.var_i32(&mut self.vertex_side)
    }
}

/// Locomotion fields; each group is present only when its message flag is set.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocomotionState {
    pub locomotion_flags: u64,
    pub method: u32,
    pub move_speed: f32,
    pub height: u32,
    pub follow_entity_id: u64,
    pub follow_range_start: f32,
    pub follow_range_end: f32,
    pub path_goal_node_index: i32,
    pub path_nodes: Vec<PathNode>,
}

impl LocomotionState {
    /// Transfers the groups selected by `flags`.
    pub fn transfer_with<A: Archive>(
        &mut self,
        ar: &mut A,
        flags: LocomotionMessageFlags,
    ) -> CodecResult<()> {
        if flags.contains(LocomotionMessageFlags::HAS_LOCOMOTION_FLAGS) {
            ar.var_u64(&mut self.locomotion_flags)?;
        }
        if flags.contains(LocomotionMessageFlags::HAS_METHOD) {
            ar.var_u32(&mut self.method)?;
        }
        if flags.contains(LocomotionMessageFlags::HAS_MOVE_SPEED) {
            ar.zigzag_f32(&mut self.move_speed, MOVE_SPEED_PRECISION)?;
        }
        if flags.contains(LocomotionMessageFlags::HAS_HEIGHT) {
            ar.var_u32(&mut self.height)?;
        }
        if flags.contains(LocomotionMessageFlags::HAS_FOLLOW_ENTITY_ID) {
            ar.var_u64(&mut self.follow_entity_id)?;
        }
        if flags.contains(LocomotionMessageFlags::HAS_FOLLOW_ENTITY_RANGE) {
            ar.zigzag_f32(&mut self.follow_range_start, RANGE_PRECISION)?;
            ar.zigzag_f32(&mut self.follow_range_end, RANGE_PRECISION)?;
        }
        if flags.contains(LocomotionMessageFlags::UPDATE_PATH_NODES) {
            ar.fixed_i32(&mut self.path_goal_node_index)?;
            transfer_list(ar, &mut self.path_nodes)?;
        }
        Ok(())
    }
}

/// Avatar position and locomotion update.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateAvatarStateArchive {
    pub replication_policy: ReplicationPolicy,
    pub avatar_index: i32,
    pub entity_id: u64,
    pub using_gamepad_input: bool,
    pub avatar_world_instance_id: u32,
    pub field_flags: LocomotionMessageFlags,
    pub position: Vector3,
    /// Only `x` (yaw) travels unless `HAS_FULL_ORIENTATION` is set.
    pub orientation: Vector3,
    pub locomotion_state: LocomotionState,
}

impl ArchiveObject for UpdateAvatarStateArchive {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.policy(&mut self.replication_policy)?;
        ar.fixed_i32(&mut self.avatar_index)?;
        ar.var_u64(&mut self.entity_id)?;
        ar.bool(&mut self.using_gamepad_input)?;
        ar.var_u32(&mut self.avatar_world_instance_id)?;

        let mut raw_flags = self.field_flags.bits();
        ar.var_u32(&mut raw_flags)?;
        self.field_flags = LocomotionMessageFlags::from_bits_retain(raw_flags);

        self.position.transfer_with(ar, POSITION_PRECISION)?;
        if self
            .field_flags
            .contains(LocomotionMessageFlags::HAS_FULL_ORIENTATION)
        {
            self.orientation.transfer_with(ar, ORIENTATION_PRECISION)?;
        } else {
            ar.zigzag_f32(&mut self.orientation.x, ORIENTATION_PRECISION)?;
        }
        self.locomotion_state.transfer_with(ar, self.field_flags)
    }
}
