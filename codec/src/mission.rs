//! Mission manager archive.

use schema::DataRef;

use crate::archive::{transfer_list, Archive, ArchiveObject};
use crate::error::CodecResult;

/// Progress of one mission objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissionObjective {
    pub index: u32,
    pub state: u32,
    pub time_expire: u64,
    pub current_count: u32,
    pub required_count: u32,
    pub failure_count: u32,
}

impl ArchiveObject for MissionObjective {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u32(&mut self.index)?;
        ar.var_u32(&mut self.state)?;
        ar.var_u64(&mut self.time_expire)?;
        ar.var_u32(&mut self.current_count)?;
        ar.var_u32(&mut self.required_count)?;
        ar.var_u32(&mut self.failure_count)
    }
}

/// One active mission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mission {
    pub state: u32,
    pub time_expire: u64,
    pub prototype: DataRef,
    pub random: u32,
    pub objectives: Vec<MissionObjective>,
    pub participants: Vec<u64>,
    pub suspended: bool,
}

impl ArchiveObject for Mission {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u32(&mut self.state)?;
        ar.var_u64(&mut self.time_expire)?;
        ar.data_ref(&mut self.prototype)?;
        ar.var_u32(&mut self.random)?;
        transfer_list(ar, &mut self.objectives)?;
        transfer_list(ar, &mut self.participants)?;
        ar.bool(&mut self.suspended)
    }
}

/// Missions tracked for a player or region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissionManager {
    pub prototype: DataRef,
    pub missions: Vec<Mission>,
}

impl ArchiveObject for MissionManager {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.data_ref(&mut self.prototype)?;
        transfer_list(ar, &mut self.missions)
    }
}
