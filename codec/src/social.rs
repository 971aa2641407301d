//! Guild, community and achievement archives carried by a player.

use schema::DataRef;

use crate::archive::{transfer_list, Archive, ArchiveObject};
use crate::error::CodecResult;

/// Guild membership replicated with the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuildMemberInfo {
    pub guild_id: u64,
    pub guild_name: String,
    pub membership: u32,
}

impl ArchiveObject for GuildMemberInfo {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u64(&mut self.guild_id)?;
        ar.string(&mut self.guild_name)?;
        ar.var_u32(&mut self.membership)
    }
}

/// A named group of community members (friends, party, nearby).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommunityCircle {
    pub name: String,
    pub id: u32,
}

impl ArchiveObject for CommunityCircle {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.string(&mut self.name)?;
        ar.var_u32(&mut self.id)
    }
}

/// Another player as seen by the community panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommunityMember {
    pub name: String,
    pub db_id: u64,
    pub region: DataRef,
    pub difficulty: DataRef,
    pub avatar: DataRef,
    pub level: u32,
    pub online_status: i32,
    pub circles: Vec<u32>,
}

impl ArchiveObject for CommunityMember {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.string(&mut self.name)?;
        ar.var_u64(&mut self.db_id)?;
        ar.data_ref(&mut self.region)?;
        ar.data_ref(&mut self.difficulty)?;
        ar.data_ref(&mut self.avatar)?;
        ar.var_u32(&mut self.level)?;
        ar.var_i32(&mut self.online_status)?;
        transfer_list(ar, &mut self.circles)
    }
}

/// Circles and members of a player's community panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Community {
    pub circles: Vec<CommunityCircle>,
    pub members: Vec<CommunityMember>,
}

impl ArchiveObject for Community {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        transfer_list(ar, &mut self.circles)?;
        transfer_list(ar, &mut self.members)
    }
}

/// Progress toward one achievement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AchievementState {
    pub id: u32,
    pub count: u32,
    pub completed_date: u64,
}

impl ArchiveObject for AchievementState {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u32(&mut self.id)?;
        ar.var_u32(&mut self.count)?;
        ar.var_u64(&mut self.completed_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{decode_archive, encode_archive};
    use crate::CodecLimits;
    use schema::IdentityTable;

    #[test]
    fn community_roundtrip() {
        let mut community = Community {
            circles: vec![CommunityCircle {
                name: "Friends".to_owned(),
                id: 1,
            }],
            members: vec![CommunityMember {
                name: "Storm".to_owned(),
                db_id: 0x2000_0000_0000_0001,
                region: DataRef(11),
                difficulty: DataRef(12),
                avatar: DataRef(13),
                level: 60,
                online_status: -1,
                circles: vec![1],
            }],
        };
        let bytes = encode_archive(&mut community, &IdentityTable).unwrap();
        let decoded: Community =
            decode_archive(&bytes, &IdentityTable, &CodecLimits::default()).unwrap();
        assert_eq!(decoded, community);
    }

    #[test]
    fn achievement_layout() {
        let mut state = AchievementState {
            id: 5,
            count: 1,
            completed_date: 128,
        };
        let bytes = encode_archive(&mut state, &IdentityTable).unwrap();
        assert_eq!(bytes, vec![0x05, 0x01, 0x80, 0x01]);
    }
}
