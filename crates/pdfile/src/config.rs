// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Build options for a patch file.

use crate::chunk::WrapPolicy;
use crate::element::{Delta, Position, Size};
use crate::patch::DEFAULT_FONT_SIZE;
use serde::{Deserialize, Serialize};

/// Main-canvas and writer settings. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchFileConfig {
    /// Main window position.
    pub screen_position: Position,
    /// Main window size.
    pub size: Size,
    /// Main canvas font size.
    pub font_size: u32,
    /// Cursor the first auto-placed element steps from.
    pub origin: Position,
    /// Initial auto-placement step.
    pub delta: Delta,
    /// Line wrapping for long records.
    pub wrap: WrapPolicy,
}

impl Default for PatchFileConfig {
    fn default() -> Self {
        Self {
            screen_position: Position::ORIGIN,
            size: Size::default(),
            font_size: DEFAULT_FONT_SIZE,
            origin: Position::ORIGIN,
            delta: Delta::default(),
            wrap: WrapPolicy::default(),
        }
    }
}
