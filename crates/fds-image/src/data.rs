//! JSON project file

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use crate::errors::{DeserializeError, ProjectFileError, SongCompileError};
use crate::project::{ExpansionAudio, Machine, Project, Song, SongCompiler, TempoMode};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

extern crate relative_path;
use relative_path::RelativePathBuf;

use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct ProjectSong {
    pub name: String,

    /// Compiled song data
    pub data: RelativePathBuf,

    #[serde(default)]
    pub uses_dpcm: bool,
}

#[derive(Deserialize, Debug)]
pub struct ProjectData {
    pub name: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub famitracker_tempo: bool,

    #[serde(default)]
    pub expansion: ExpansionAudio,

    /// Packed DPCM sample data
    pub dpcm: Option<RelativePathBuf>,

    pub songs: Vec<ProjectSong>,
}

pub struct ProjectFile {
    pub path: PathBuf,
    pub file_name: String,
    pub parent_path: PathBuf,

    pub contents: ProjectData,
}

pub fn load_project_file(path: PathBuf) -> Result<ProjectFile, DeserializeError> {
    let file_name = path
        .file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string();

    let parent_path = match path.parent() {
        Some(p) => p.to_owned(),
        None => return Err(DeserializeError::NoParentPath(file_name)),
    };

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => return Err(DeserializeError::OpenError(file_name, e)),
    };
    let reader = BufReader::new(file);

    let contents = match serde_json::from_reader(reader) {
        Ok(m) => m,
        Err(e) => return Err(DeserializeError::SerdeError(file_name, e)),
    };

    Ok(ProjectFile {
        path,
        file_name,
        parent_path,
        contents,
    })
}

/// A `SongCompiler` that reads songs that have already been compiled.
///
/// The compiled data MUST have been built for `SONG_DATA_ADDR` and `DPCM_ADDR`.
pub struct PrecompiledSongs {
    paths: Vec<PathBuf>,
}

impl PrecompiledSongs {
    pub fn path(&self, song_id: usize) -> Option<&Path> {
        self.paths.get(song_id).map(PathBuf::as_path)
    }
}

impl SongCompiler for PrecompiledSongs {
    fn compile_song(
        &mut self,
        song: &Song,
        _song_data_addr: u16,
        _dpcm_addr: u16,
        _machine: Machine,
    ) -> Result<Vec<u8>, SongCompileError> {
        let path = match self.path(song.id) {
            Some(p) => p,
            None => return Err(SongCompileError::UnknownSong(song.id)),
        };

        std::fs::read(path).map_err(|e| SongCompileError::IoError(path.to_owned(), e))
    }
}

impl ProjectFile {
    /// Builds the project model.
    ///
    /// If `song_names` is not empty, only the named songs are exported (in project order).
    pub fn to_project(
        &self,
        song_names: &[String],
    ) -> Result<(Project, PrecompiledSongs), ProjectFileError> {
        let data = &self.contents;

        if let Some(n) = song_names
            .iter()
            .find(|n| !data.songs.iter().any(|s| &s.name == *n))
        {
            return Err(ProjectFileError::UnknownSong(n.clone()));
        }

        let selected = data
            .songs
            .iter()
            .filter(|s| song_names.is_empty() || song_names.contains(&s.name));

        let mut songs = Vec::new();
        let mut paths = Vec::new();

        for (id, s) in selected.enumerate() {
            songs.push(Song {
                id,
                name: s.name.clone(),
                uses_dpcm: s.uses_dpcm,
            });
            paths.push(s.data.to_path(&self.parent_path));
        }

        let dpcm_data = match &data.dpcm {
            Some(p) => {
                let path = p.to_path(&self.parent_path);
                match std::fs::read(&path) {
                    Ok(d) => d,
                    Err(e) => return Err(ProjectFileError::DpcmIoError(path, e)),
                }
            }
            None => Vec::new(),
        };

        let project = Project {
            name: data.name.clone(),
            author: data.author.clone(),
            tempo_mode: match data.famitracker_tempo {
                true => TempoMode::FamiTracker,
                false => TempoMode::FamiStudio,
            },
            expansion: data.expansion,
            songs,
            dpcm_data,
        };

        Ok((project, PrecompiledSongs { paths }))
    }
}
