//! FDS disk image assembler

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

pub mod anchor;
pub mod data;
pub mod disk_constants;
pub mod errors;
pub mod fds_export;
pub mod file_slot;
pub mod image_reader;
pub mod log;
pub mod project;
pub mod templates;
pub mod text;
pub mod toc;

pub use data::{load_project_file, PrecompiledSongs, ProjectFile};
pub use fds_export::{build_fds_image, export_fds_file, ExportOptions, ExportWarning, FdsImage};
pub use image_reader::{read_fds_image, FdsImageContents};
pub use log::{ExportLog, LogSeverity};
pub use project::{ExpansionAudio, Machine, Project, Song, SongCompiler, TempoMode};
pub use templates::{TemplateDirectory, TemplateStore};
