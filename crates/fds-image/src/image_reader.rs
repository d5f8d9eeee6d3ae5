//! Disk image inspector

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use crate::disk_constants::{IMAGE_CAPACITY, TOC_ANCHOR, TOC_SIZE};
use crate::errors::{InvalidTemplateError, ReadImageError};
use crate::file_slot::{read_file_count, read_file_slots, FileInfo};
use crate::toc::Toc;

pub struct FdsImageContents {
    pub file_count: u8,
    pub files: Vec<FileInfo>,
    pub toc: Toc,
}

impl FdsImageContents {
    pub fn file(&self, index: u8) -> Option<&FileInfo> {
        self.files.iter().find(|f| f.index == index)
    }
}

pub fn read_fds_image(data: &[u8]) -> Result<FdsImageContents, ReadImageError> {
    if data.len() != IMAGE_CAPACITY {
        return Err(ReadImageError::InvalidImageSize(IMAGE_CAPACITY, data.len()));
    }

    let file_count = read_file_count(data)?;
    let files = read_file_slots(data)?;

    let toc_file = match files.iter().find(|f| f.name == *TOC_ANCHOR) {
        Some(f) => f,
        None => return Err(ReadImageError::NoTocFile),
    };

    let toc = match Toc::from_bytes(&data[toc_file.data_range()]) {
        Some(toc) => toc,
        None => {
            return Err(InvalidTemplateError::InvalidTocSize(TOC_SIZE, toc_file.length).into())
        }
    };

    Ok(FdsImageContents {
        file_count,
        files,
        toc,
    })
}
