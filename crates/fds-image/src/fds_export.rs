//! FDS disk image export

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use crate::anchor;
use crate::disk_constants::{
    song_file_name, DPCM_ADDR, DPCM_FILE_NAME, FILE_COUNT_OFFSET, IMAGE_CAPACITY, MAX_DPCM_SIZE,
    MAX_SONGS, MAX_SONG_SIZE, SONG_DATA_ADDR, TEMPLATE_KEEP_AFTER_ANCHOR, TOC_ANCHOR,
    TOC_HEADER_SKIP, TOC_SIZE,
};
use crate::errors::{FdsExportError, InvalidTemplateError};
use crate::file_slot::{append_file, file_slot_size, read_file_slots};
use crate::log::ExportLog;
use crate::project::{Machine, Project, SongCompiler, TempoMode};
use crate::templates::TemplateStore;
use crate::toc::{ProjectInfo, SongEntry, Toc};

use std::fmt::Display;
use std::path::Path;

#[derive(Debug, Default, Clone)]
pub struct ExportOptions {
    /// Overrides the project name
    pub name: Option<String>,
    /// Overrides the project author
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportWarning {
    // original size
    DpcmTruncated(usize),
    // song name, original size
    SongTruncated(String, usize),
    // number of songs in the project
    TooManySongs(usize),
    // first dropped song, number of dropped songs
    DiskFull(String, usize),
}

impl Display for ExportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DpcmTruncated(size) => write!(
                f,
                "DPCM samples size ({} bytes) is larger than the maximum allowed for FDS export ({} bytes), truncating",
                size, MAX_DPCM_SIZE
            ),
            Self::SongTruncated(name, size) => write!(
                f,
                "Song '{}' has a size of {} bytes, which is larger than the maximum allowed for FDS export ({} bytes), truncating. The song will be corrupted",
                name, size, MAX_SONG_SIZE
            ),
            Self::TooManySongs(n) => write!(
                f,
                "Project has {} songs, only the first {} songs will be exported",
                n, MAX_SONGS
            ),
            Self::DiskFull(name, n) => write!(
                f,
                "Not enough space on the disk for song '{}', {} songs will not be exported",
                name, n
            ),
        }
    }
}

/// Data clipped to a size budget.
#[derive(Debug, PartialEq)]
pub struct Budgeted<'a> {
    pub data: &'a [u8],
    /// Set if `data` was truncated
    pub original_size: Option<usize>,
}

pub fn apply_size_budget(data: &[u8], max_size: usize) -> Budgeted<'_> {
    if data.len() > max_size {
        Budgeted {
            data: &data[..max_size],
            original_size: Some(data.len()),
        }
    } else {
        Budgeted {
            data,
            original_size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSong {
    pub name: String,
    pub file_index: u8,
    pub size: usize,
}

pub struct FdsImage {
    data: Vec<u8>,
    toc: Toc,
    songs: Vec<ExportedSong>,
    dpcm_size: Option<usize>,
    template_size: usize,
    next_file_index: u8,
    warnings: Vec<ExportWarning>,
}

impl FdsImage {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn toc(&self) -> &Toc {
        &self.toc
    }

    pub fn songs(&self) -> &[ExportedSong] {
        &self.songs
    }

    pub fn n_songs(&self) -> usize {
        self.songs.len()
    }

    pub fn dpcm_size(&self) -> Option<usize> {
        self.dpcm_size
    }

    pub fn template_size(&self) -> usize {
        self.template_size
    }

    pub fn next_file_index(&self) -> u8 {
        self.next_file_index
    }

    pub fn warnings(&self) -> &[ExportWarning] {
        &self.warnings
    }
}

struct Template {
    data: Vec<u8>,
    first_free_file: u8,
}

fn load_template(
    templates: &impl TemplateStore,
    mode: TempoMode,
) -> Result<Template, FdsExportError> {
    let mut data = templates.load_template(mode)?;

    let anchor = anchor::truncate_at(&mut data, TOC_ANCHOR, TEMPLATE_KEEP_AFTER_ANCHOR)?;

    let files = read_file_slots(&data)?;
    let toc_file = files.last().ok_or(InvalidTemplateError::NoFiles)?;

    // Also catches a `TOC_ANCHOR` collision earlier in the template
    if toc_file.name != *TOC_ANCHOR
        || toc_file.slot_offset + 3 != anchor
        || toc_file.slot_end() != data.len()
    {
        return Err(InvalidTemplateError::TocIsNotLastFile.into());
    }
    if toc_file.length != TOC_SIZE {
        return Err(InvalidTemplateError::InvalidTocSize(TOC_SIZE, toc_file.length).into());
    }
    if data.len() > IMAGE_CAPACITY {
        return Err(InvalidTemplateError::TooLarge(data.len()).into());
    }

    let first_free_file = match u8::try_from(files.len()) {
        Ok(n) if n < u8::MAX => n,
        _ => return Err(InvalidTemplateError::TooManyFiles(files.len()).into()),
    };

    Ok(Template {
        data,
        first_free_file,
    })
}

fn increment_file_index(i: u8) -> Result<u8, FdsExportError> {
    i.checked_add(1).ok_or(FdsExportError::TooManyFiles)
}

/// Builds a disk image in memory.
///
/// Oversized DPCM data and songs are truncated and songs that do not fit on the disk
/// are dropped.  Both are reported in `FdsImage::warnings()`.
pub fn build_fds_image(
    project: &Project,
    compiler: &mut impl SongCompiler,
    templates: &impl TemplateStore,
    options: &ExportOptions,
) -> Result<FdsImage, FdsExportError> {
    if project.songs.is_empty() {
        return Err(FdsExportError::NoSongs);
    }
    if !project.expansion.is_fds_compatible() {
        return Err(FdsExportError::UnsupportedExpansion(project.expansion));
    }

    let template = load_template(templates, project.tempo_mode)?;
    let template_size = template.data.len();

    let mut image = template.data;
    image.reserve(IMAGE_CAPACITY - template_size);

    let mut file_index = template.first_free_file;
    let mut warnings = Vec::new();

    let mut dpcm_size = None;
    let dpcm_file_index = if project.uses_samples() {
        let dpcm = apply_size_budget(&project.dpcm_data, MAX_DPCM_SIZE);
        if let Some(s) = dpcm.original_size {
            warnings.push(ExportWarning::DpcmTruncated(s));
        }

        let slot_size = file_slot_size(dpcm.data.len());
        if image.len() + slot_size > IMAGE_CAPACITY {
            return Err(FdsExportError::DpcmDoesNotFit(slot_size));
        }

        let i = file_index;
        append_file(&mut image, i, DPCM_ADDR, DPCM_FILE_NAME, dpcm.data);
        file_index = increment_file_index(file_index)?;
        dpcm_size = Some(dpcm.data.len());

        Some(i)
    } else {
        None
    };

    let songs = if project.songs.len() > MAX_SONGS {
        warnings.push(ExportWarning::TooManySongs(project.songs.len()));
        &project.songs[..MAX_SONGS]
    } else {
        &project.songs[..]
    };

    let mut toc = Toc::default();
    let mut exported_songs = Vec::with_capacity(songs.len());

    for (i, song) in songs.iter().enumerate() {
        let song_data = compiler
            .compile_song(song, SONG_DATA_ADDR, DPCM_ADDR, Machine::Ntsc)
            .map_err(|e| FdsExportError::SongCompileError(song.name.clone(), e))?;

        let song_data = apply_size_budget(&song_data, MAX_SONG_SIZE);
        if let Some(s) = song_data.original_size {
            warnings.push(ExportWarning::SongTruncated(song.name.clone(), s));
        }

        if image.len() + file_slot_size(song_data.data.len()) > IMAGE_CAPACITY {
            warnings.push(ExportWarning::DiskFull(song.name.clone(), songs.len() - i));
            break;
        }

        let flags = match dpcm_file_index {
            Some(d) if song.uses_dpcm => d,
            _ => 0,
        };

        toc.songs[i] = SongEntry::new(&song.name, file_index, flags, SONG_DATA_ADDR);

        append_file(
            &mut image,
            file_index,
            SONG_DATA_ADDR,
            &song_file_name(i),
            song_data.data,
        );

        exported_songs.push(ExportedSong {
            name: song.name.clone(),
            file_index,
            size: song_data.data.len(),
        });

        file_index = increment_file_index(file_index)?;
    }

    let max_song_index = match exported_songs.len().checked_sub(1) {
        Some(i) => u8::try_from(i).map_err(|_| FdsExportError::TooManyFiles)?,
        None => return Err(FdsExportError::NoSongsFit),
    };

    toc.project_info = ProjectInfo::new(
        max_song_index,
        dpcm_file_index.unwrap_or(0),
        options.name.as_deref().unwrap_or(&project.name),
        options.author.as_deref().unwrap_or(&project.author),
    );

    image[FILE_COUNT_OFFSET] = file_index;

    image.resize(IMAGE_CAPACITY, 0);

    // Only search the template, song data may contain the anchor.
    let toc_bytes = toc.to_bytes();
    anchor::patch_at(
        &mut image[..template_size],
        TOC_ANCHOR,
        TOC_HEADER_SKIP,
        &toc_bytes,
    )?;

    assert_eq!(image.len(), IMAGE_CAPACITY);

    Ok(FdsImage {
        data: image,
        toc,
        songs: exported_songs,
        dpcm_size,
        template_size,
        next_file_index: file_index,
        warnings,
    })
}

/// Builds a disk image and writes it to `path`.
///
/// `path` is only written to if the disk image was successfully built.
pub fn export_fds_file(
    path: &Path,
    project: &Project,
    compiler: &mut impl SongCompiler,
    templates: &impl TemplateStore,
    options: &ExportOptions,
    log: &mut ExportLog,
) -> Result<FdsImage, FdsExportError> {
    let image = match build_fds_image(project, compiler, templates, options) {
        Ok(image) => image,
        Err(e) => {
            log.error(&e);
            return Err(e);
        }
    };

    for w in image.warnings() {
        log.warning(w);
    }

    log.info(format_args!("Template size: {} bytes", image.template_size()));
    if let Some(s) = image.dpcm_size() {
        log.info(format_args!("DPCM samples size: {} bytes", s));
    }
    for s in image.songs() {
        log.info(format_args!(
            "Song '{}' size: {} bytes (file {})",
            s.name, s.size, s.file_index
        ));
    }

    if let Err(e) = std::fs::write(path, image.data()) {
        let e = FdsExportError::WriteError(path.to_owned(), e);
        log.error(&e);
        return Err(e);
    }

    log.info(format_args!(
        "FDS export successful, final file size {} bytes",
        image.data().len()
    ));

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_budget() {
        let data = [1, 2, 3, 4, 5];

        assert_eq!(
            apply_size_budget(&data, 5),
            Budgeted {
                data: &data,
                original_size: None
            }
        );
        assert_eq!(
            apply_size_budget(&data, 10),
            Budgeted {
                data: &data,
                original_size: None
            }
        );
        assert_eq!(
            apply_size_budget(&data, 3),
            Budgeted {
                data: &[1, 2, 3],
                original_size: Some(5)
            }
        );
        assert_eq!(apply_size_budget(&data, 0).data, [0u8; 0]);
    }
}
