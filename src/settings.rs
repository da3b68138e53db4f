// CLASSIFICATION: COMMUNITY
// Filename: settings.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! The fixed table of persisted setup-form settings.

use serde::Deserialize;

use crate::store::{Namespace, VARIABLE_WIDTH};

/// Namespace shared by every setting the setup forms edit.
pub const FWCONFIG_NAMESPACE: Namespace = Namespace::from_bytes([
    0xcd, 0x7c, 0xc2, 0x58, 0x31, 0xdb, 0x40, 0x2f, 0x9e, 0x6e, 0x7a, 0x53, 0x1c, 0x4f, 0x25,
    0x85,
]);

/// Settings seeded at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingId {
    HypEnable,
    HypLogMask,
    HypWindowsDebugHook,
    HypWin2000Mask,
    CpuClock,
}

impl SettingId {
    pub const ALL: [SettingId; 5] = [
        SettingId::HypEnable,
        SettingId::HypLogMask,
        SettingId::HypWindowsDebugHook,
        SettingId::HypWin2000Mask,
        SettingId::CpuClock,
    ];

    /// Variable name in the store.
    pub const fn name(self) -> &'static str {
        match self {
            SettingId::HypEnable => "HypEnable",
            SettingId::HypLogMask => "HypLogMask",
            SettingId::HypWindowsDebugHook => "HypWindowsDebugHook",
            SettingId::HypWin2000Mask => "HypWin2000Mask",
            SettingId::CpuClock => "CpuClock",
        }
    }
}

/// Compiled-in default for every setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingDefaults {
    pub hyp_enable: u32,
    pub hyp_log_mask: u32,
    pub hyp_windows_debug_hook: u32,
    pub hyp_win2000_mask: u32,
    /// 0 = unmanaged, 1 = 600 MHz, 2 = maximum.
    pub cpu_clock: u32,
}

impl SettingDefaults {
    pub fn get(&self, id: SettingId) -> u32 {
        match id {
            SettingId::HypEnable => self.hyp_enable,
            SettingId::HypLogMask => self.hyp_log_mask,
            SettingId::HypWindowsDebugHook => self.hyp_windows_debug_hook,
            SettingId::HypWin2000Mask => self.hyp_win2000_mask,
            SettingId::CpuClock => self.cpu_clock,
        }
    }
}

/// One persisted `u32` tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSetting {
    pub id: SettingId,
    pub namespace: Namespace,
    pub default: u32,
}

impl ConfigSetting {
    pub const WIDTH: usize = VARIABLE_WIDTH;

    pub fn name(&self) -> &'static str {
        self.id.name()
    }
}

/// Build the bootstrap table for `defaults`, in [`SettingId::ALL`] order.
pub fn setting_table(namespace: Namespace, defaults: &SettingDefaults) -> Vec<ConfigSetting> {
    SettingId::ALL
        .iter()
        .map(|&id| ConfigSetting {
            id,
            namespace,
            default: defaults.get(id),
        })
        .collect()
}
