//! A single location for all of the errors in the disk image assembler

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use crate::project::{ExpansionAudio, TempoMode};

use std::fmt::Display;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum DeserializeError {
    NoParentPath(String),
    OpenError(String, io::Error),
    SerdeError(String, serde_json::error::Error),
}

#[derive(Debug)]
pub enum ProjectFileError {
    UnknownSong(String),
    DpcmIoError(PathBuf, io::Error),
}

#[derive(Debug)]
pub enum TemplateError {
    NotFound(TempoMode),
    IoError(PathBuf, io::Error),
}

#[derive(Debug, PartialEq)]
pub enum AnchorError {
    NotFound(String),
    // anchor offset, requested end, buffer size
    OutOfBounds(usize, usize, usize),
}

#[derive(Debug)]
pub enum InvalidTemplateError {
    TooSmall(usize),
    NoFileAmountBlock,
    // offset, block code
    InvalidBlockCode(usize, u8),
    // offset
    FileSlotOutOfBounds(usize),
    NoFiles,
    TocIsNotLastFile,
    // expected, actual
    InvalidTocSize(usize, usize),
    TooManyFiles(usize),
    TooLarge(usize),
}

#[derive(Debug)]
pub enum SongCompileError {
    UnknownSong(usize),
    IoError(PathBuf, io::Error),
    Other(String),
}

#[derive(Debug)]
pub enum FdsExportError {
    NoSongs,
    UnsupportedExpansion(ExpansionAudio),

    TemplateError(TemplateError),
    AnchorError(AnchorError),
    InvalidTemplate(InvalidTemplateError),

    // song name, error
    SongCompileError(String, SongCompileError),

    // slot size
    DpcmDoesNotFit(usize),
    NoSongsFit,
    TooManyFiles,

    WriteError(PathBuf, io::Error),
}

#[derive(Debug)]
pub enum ReadImageError {
    // expected, actual
    InvalidImageSize(usize, usize),
    InvalidFileSlots(InvalidTemplateError),
    NoTocFile,
}

// From Traits
// ===========

impl From<TemplateError> for FdsExportError {
    fn from(e: TemplateError) -> Self {
        Self::TemplateError(e)
    }
}

impl From<AnchorError> for FdsExportError {
    fn from(e: AnchorError) -> Self {
        Self::AnchorError(e)
    }
}

impl From<InvalidTemplateError> for FdsExportError {
    fn from(e: InvalidTemplateError) -> Self {
        Self::InvalidTemplate(e)
    }
}

impl From<InvalidTemplateError> for ReadImageError {
    fn from(e: InvalidTemplateError) -> Self {
        Self::InvalidFileSlots(e)
    }
}

// Display
// =======

impl Display for DeserializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoParentPath(filename) => {
                write!(f, "Cannot load {}: No parent path", filename)
            }
            Self::OpenError(filename, e) => write!(f, "Unable to open {}: {}", filename, e),
            Self::SerdeError(filename, e) => write!(f, "Unable to read {}: {}", filename, e),
        }
    }
}

impl Display for ProjectFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSong(name) => write!(f, "Cannot find song: {}", name),
            Self::DpcmIoError(path, e) => {
                write!(f, "Unable to read DPCM data {}: {}", path.display(), e)
            }
        }
    }
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(mode) => {
                write!(f, "Cannot find {} tempo disk template", mode.name())
            }
            Self::IoError(path, e) => {
                write!(f, "Unable to read disk template {}: {}", path.display(), e)
            }
        }
    }
}

impl Display for AnchorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(marker) => write!(f, "Cannot find {:?} in disk template", marker),
            Self::OutOfBounds(offset, end, size) => write!(
                f,
                "Anchor at {:#x} requires {:#x} bytes, buffer is only {:#x} bytes",
                offset, end, size
            ),
        }
    }
}

impl Display for InvalidTemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooSmall(size) => write!(f, "disk template too small ({} bytes)", size),
            Self::NoFileAmountBlock => write!(f, "missing file amount block"),
            Self::InvalidBlockCode(offset, code) => {
                write!(f, "invalid block code {} at {:#x}", code, offset)
            }
            Self::FileSlotOutOfBounds(offset) => {
                write!(f, "file at {:#x} extends past the end of the disk", offset)
            }
            Self::NoFiles => write!(f, "no files"),
            Self::TocIsNotLastFile => write!(f, "table of contents is not the last file"),
            Self::InvalidTocSize(expected, actual) => write!(
                f,
                "table of contents file is {} bytes, expected {} bytes",
                actual, expected
            ),
            Self::TooManyFiles(n) => write!(f, "too many files ({})", n),
            Self::TooLarge(size) => write!(f, "disk template too large ({} bytes)", size),
        }
    }
}

impl Display for SongCompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSong(id) => write!(f, "unknown song id {}", id),
            Self::IoError(path, e) => write!(f, "unable to read {}: {}", path.display(), e),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

impl Display for FdsExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSongs => write!(f, "No songs to export"),
            Self::UnsupportedExpansion(e) => write!(
                f,
                "Cannot export a project using {} expansion audio to FDS",
                e.name()
            ),
            Self::TemplateError(e) => e.fmt(f),
            Self::AnchorError(e) => e.fmt(f),
            Self::InvalidTemplate(e) => write!(f, "Invalid disk template: {}", e),
            Self::SongCompileError(name, e) => {
                write!(f, "Cannot compile song {}: {}", name, e)
            }
            Self::DpcmDoesNotFit(size) => write!(
                f,
                "DPCM samples ({} bytes) do not fit in the disk image",
                size
            ),
            Self::NoSongsFit => write!(f, "No songs fit in the disk image"),
            Self::TooManyFiles => write!(f, "Too many files in the disk image"),
            Self::WriteError(path, e) => write!(f, "Error writing {}: {}", path.display(), e),
        }
    }
}

impl Display for ReadImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidImageSize(expected, actual) => write!(
                f,
                "Invalid disk image size: {} bytes, expected {} bytes",
                actual, expected
            ),
            Self::InvalidFileSlots(e) => write!(f, "Invalid disk image: {}", e),
            Self::NoTocFile => write!(f, "Cannot find the table of contents"),
        }
    }
}
