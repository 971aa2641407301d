#![allow(dead_code)]

use codec::{
    AchievementState, ArmorRarityVaporizeThreshold, ChatChannelFilter, Community, CommunityCircle,
    CommunityMember, GameplayOptions, GuildMemberInfo, LocomotionState, Mission, MissionManager,
    MissionObjective, ObjectiveConnection, ObjectiveGraph, ObjectiveNode, PathNode, Player,
    RegionArchive, ReplicatedPropertyCollection, ReplicatedVariable, StashTabOption,
    UiDataProvider, UiWidget, UpdateAvatarStateArchive, Vector3,
};
use schema::{DataRef, LocomotionMessageFlags, ReplicationPolicy};

pub fn properties(replication_id: u64) -> ReplicatedPropertyCollection {
    let mut collection = ReplicatedPropertyCollection::new(replication_id);
    collection.set(0x3ba, 1);
    collection.set((5 << 12) | 0x3ba, 300);
    collection.set(0xFFFF_FFFF, u64::MAX);
    collection
}

pub fn mission_manager() -> MissionManager {
    MissionManager {
        prototype: DataRef(10),
        missions: vec![
            Mission {
                state: 3,
                time_expire: 1_700_000_000,
                prototype: DataRef(11),
                random: 0xDEAD,
                objectives: vec![
                    MissionObjective {
                        index: 0,
                        state: 2,
                        time_expire: 0,
                        current_count: 4,
                        required_count: 10,
                        failure_count: 0,
                    },
                    MissionObjective {
                        index: 1,
                        state: 1,
                        time_expire: 90,
                        current_count: 0,
                        required_count: 1,
                        failure_count: 2,
                    },
                ],
                participants: vec![1, 0x2000_0000_0000_0042],
                suspended: true,
            },
            Mission {
                state: 1,
                time_expire: 0,
                prototype: DataRef(12),
                random: 0,
                objectives: Vec::new(),
                participants: Vec::new(),
                suspended: false,
            },
        ],
    }
}

pub fn gameplay_options() -> GameplayOptions {
    GameplayOptions {
        chat_channel_filters: vec![
            ChatChannelFilter {
                channel: DataRef(20),
                subscribed: true,
            },
            ChatChannelFilter {
                channel: DataRef(21),
                subscribed: false,
            },
            ChatChannelFilter {
                channel: DataRef(22),
                subscribed: true,
            },
        ],
        chat_tab_channels: vec![DataRef(20), DataRef(22)],
        option_settings: vec![0, 1, -1, i64::MAX, i64::MIN],
        armor_rarity_vaporize_thresholds: vec![ArmorRarityVaporizeThreshold {
            slot: 2,
            rarity: DataRef(30),
        }],
    }
}

pub fn stash_tab(name: &str) -> StashTabOption {
    StashTabOption {
        prototype: DataRef(7),
        name: name.to_owned(),
        asset_ref: 1001,
        field2: 2,
        field3: 0,
    }
}

pub fn maximal_player() -> Player {
    Player {
        replication_policy: ReplicationPolicy::OWNER | ReplicationPolicy::PARTY,
        property_collection: properties(1),
        mission_manager: mission_manager(),
        avatar_properties: properties(2),
        shard_id: 3,
        name: ReplicatedVariable::new(4, "Wolverine".to_owned()),
        console_account_id1: 0x0123_4567_89AB_CDEF,
        console_account_id2: 5,
        unk_name: ReplicatedVariable::new(5, "Logan".to_owned()),
        match_queue_status: 2,
        email_verified: true,
        account_creation_timestamp: 1_400_000_000_000,
        party_id: ReplicatedVariable::new(6, 77),
        guild_info: Some(GuildMemberInfo {
            guild_id: 900,
            guild_name: "X-Men".to_owned(),
            membership: 3,
        }),
        unknown_string: "motd".to_owned(),
        community: Some(Community {
            circles: vec![
                CommunityCircle {
                    name: "Friends".to_owned(),
                    id: 1,
                },
                CommunityCircle {
                    name: "Nearby".to_owned(),
                    id: 4,
                },
            ],
            members: vec![CommunityMember {
                name: "Storm".to_owned(),
                db_id: 0x2000_0000_0000_0001,
                region: DataRef(40),
                difficulty: DataRef(41),
                avatar: DataRef(42),
                level: 60,
                online_status: 1,
                circles: vec![1, 4],
            }],
        }),
        unk_bool: true,
        stash_inventories: vec![DataRef(50), DataRef(51)],
        available_badges: vec![1, 2, 300],
        gameplay_options: gameplay_options(),
        achievement_states: vec![
            AchievementState {
                id: 1,
                count: 5,
                completed_date: 1_500_000_000,
            },
            AchievementState {
                id: 2,
                count: 0,
                completed_date: 0,
            },
        ],
        stash_tab_options: vec![stash_tab("Gear"), stash_tab("Crafting")],
    }
}

pub fn maximal_region() -> RegionArchive {
    RegionArchive {
        replication_policy: ReplicationPolicy::PROXIMITY | ReplicationPolicy::DISCOVERY,
        property_collection: properties(100),
        mission_manager: mission_manager(),
        ui_data_provider: UiDataProvider {
            widgets: vec![
                UiWidget {
                    widget: DataRef(60),
                    context: DataRef::NONE,
                    visible: true,
                },
                UiWidget {
                    widget: DataRef(61),
                    context: DataRef(62),
                    visible: false,
                },
            ],
        },
        objective_graph: ObjectiveGraph {
            nodes: vec![
                ObjectiveNode {
                    id: 1,
                    area: DataRef(70),
                    position: Vector3::new(128.5, -64.125, 0.0),
                },
                ObjectiveNode {
                    id: 2,
                    area: DataRef(71),
                    position: Vector3::new(-3000.0, 12.875, 96.25),
                },
            ],
            connections: vec![ObjectiveConnection { from: 1, to: 2 }],
        },
    }
}

pub fn maximal_avatar_state() -> UpdateAvatarStateArchive {
    UpdateAvatarStateArchive {
        replication_policy: ReplicationPolicy::OWNER,
        avatar_index: 1,
        entity_id: 1000,
        using_gamepad_input: true,
        avatar_world_instance_id: 7,
        field_flags: LocomotionMessageFlags::all(),
        position: Vector3::new(1024.125, -512.5, 16.0),
        orientation: Vector3::new(1.5, -0.25, 3.125),
        locomotion_state: LocomotionState {
            locomotion_flags: 0x40,
            method: 2,
            move_speed: 600.0,
            height: 0,
            follow_entity_id: 1001,
            follow_range_start: 100.0,
            follow_range_end: 250.0,
            path_goal_node_index: 1,
            path_nodes: vec![
                PathNode {
                    vertex: Vector3::new(1024.125, -512.5, 16.0),
                    vertex_side: 0,
                },
                PathNode {
                    vertex: Vector3::new(1100.0, -480.25, 16.0),
                    vertex_side: -1,
                },
            ],
        },
    }
}
