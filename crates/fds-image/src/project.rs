//! Project model and music compiler interface

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use crate::errors::SongCompileError;

use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionAudio {
    #[default]
    None,
    Fds,
    Vrc6,
    Vrc7,
    Mmc5,
    N163,
    S5b,
    Epsm,
}

impl ExpansionAudio {
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fds => "FDS",
            Self::Vrc6 => "VRC6",
            Self::Vrc7 => "VRC7",
            Self::Mmc5 => "MMC5",
            Self::N163 => "N163",
            Self::S5b => "S5B",
            Self::Epsm => "EPSM",
        }
    }

    // The FDS player only drives the 2A03 and the disk system sound channel.
    pub fn is_fds_compatible(self) -> bool {
        matches!(self, Self::None | Self::Fds)
    }
}

/// Selects the player template.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempoMode {
    #[default]
    FamiStudio,
    FamiTracker,
}

impl TempoMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::FamiStudio => "FamiStudio",
            Self::FamiTracker => "FamiTracker",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Machine {
    Ntsc,
    Pal,
}

#[derive(Debug, Clone)]
pub struct Song {
    pub id: usize,
    pub name: String,
    pub uses_dpcm: bool,
}

#[derive(Debug, Default, Clone)]
pub struct Project {
    pub name: String,
    pub author: String,

    pub tempo_mode: TempoMode,
    pub expansion: ExpansionAudio,

    pub songs: Vec<Song>,

    /// Packed DPCM sample data (empty if the project has no samples)
    pub dpcm_data: Vec<u8>,
}

impl Project {
    pub fn uses_samples(&self) -> bool {
        !self.dpcm_data.is_empty()
    }
}

pub trait SongCompiler {
    fn compile_song(
        &mut self,
        song: &Song,
        song_data_addr: u16,
        dpcm_addr: u16,
        machine: Machine,
    ) -> Result<Vec<u8>, SongCompileError>;
}
