//! Player option archives.

use schema::DataRef;

use crate::archive::{transfer_list, Archive, ArchiveObject};
use crate::error::CodecResult;

/// Subscription state of one chat channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChatChannelFilter {
    pub channel: DataRef,
    pub subscribed: bool,
}

impl ArchiveObject for ChatChannelFilter {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.data_ref(&mut self.channel)?;
        ar.bool(&mut self.subscribed)
    }
}

/// Rarity at or below which armor in one equipment slot is vaporized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorRarityVaporizeThreshold {
    pub slot: u32,
    pub rarity: DataRef,
}

impl ArchiveObject for ArmorRarityVaporizeThreshold {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.var_u32(&mut self.slot)?;
        ar.data_ref(&mut self.rarity)
    }
}

/// Chat and gameplay settings of a player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameplayOptions {
    pub chat_channel_filters: Vec<ChatChannelFilter>,
    pub chat_tab_channels: Vec<DataRef>,
    pub option_settings: Vec<i64>,
    pub armor_rarity_vaporize_thresholds: Vec<ArmorRarityVaporizeThreshold>,
}

impl ArchiveObject for GameplayOptions {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        transfer_list(ar, &mut self.chat_channel_filters)?;
        transfer_list(ar, &mut self.chat_tab_channels)?;
        transfer_list(ar, &mut self.option_settings)?;
        transfer_list(ar, &mut self.armor_rarity_vaporize_thresholds)
    }
}

/// Name and icon of one stash tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StashTabOption {
    pub prototype: DataRef,
    pub name: String,
    pub asset_ref: u64,
    pub field2: i32,
    pub field3: i32,
}

impl ArchiveObject for StashTabOption {
    fn transfer<A: Archive>(&mut self, ar: &mut A) -> CodecResult<()> {
        ar.data_ref(&mut self.prototype)?;
        ar.string(&mut self.name)?;
        ar.var_u64(&mut self.asset_ref)?;
        ar.fixed_i32(&mut self.field2)?;
        ar.fixed_i32(&mut self.field3)
    }
}
