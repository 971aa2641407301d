//! Region archive and the UI and objective data it carries.

use schema::{DataRef, ReplicationPolicy, POSITION_PRECISION};

use crate::archive::{transfer_list, Archive, ArchiveObject};
use crate::common::{ReplicatedPropertyCollection, Vector3};
use crate::error::CodecResult;
use crate::mission::MissionManager;

/// A UI widget bound to the region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UiWidget {
    pub widget: DataRef,
    pub context: DataRef,
    pub visible: bool,
}

impl ArchiveObject for UiWidget {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.data_ref(&mut self.widget)?;
        ar.data_ref(&mut self.context)?;
        ar.bool(&mut self.visible)
    }
}

/// Widgets the region asks the client to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UiDataProvider {
    pub widgets: Vec<UiWidget>,
}

impl ArchiveObject for UiDataProvider {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        transfer_list(ar, &mut self.widgets)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveNode {
    pub id: u64,
    pub area: DataRef,
    pub position: Vector3,
}

impl ArchiveObject for ObjectiveNode {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u64(&mut self.id)?;
        ar.data_ref(&mut self.area)?;
        self.position.transfer_with(ar, POSITION_PRECISION)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveConnection {
    pub from: u64,
    pub to: u64,
}

impl ArchiveObject for ObjectiveConnection {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u64(&mut self.from)?;
        ar.var_u64(&mut self.to)
    }
}

/// Navigation graph between region objectives.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveGraph {
    pub nodes: Vec<ObjectiveNode>,
    pub connections: Vec<ObjectiveConnection>,
}

impl ArchiveObject for ObjectiveGraph {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        transfer_list(ar, &mut self.nodes)?;
        transfer_list(ar, &mut self.connections)
    }
}

/// Region state sent when a client enters a region.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionArchive {
    pub replication_policy: ReplicationPolicy,
    pub property_collection: ReplicatedPropertyCollection,
    pub mission_manager: MissionManager,
    pub ui_data_provider: UiDataProvider,
    pub objective_graph: ObjectiveGraph,
}

impl ArchiveObject for RegionArchive {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.policy(&mut self.replication_policy)?;
        self.property_collection.transfer(ar)?;
        self.mission_manager.transfer(ar)?;
        self.ui_data_provider.transfer(ar)?;
        self.objective_graph.transfer(ar)
    }
}
