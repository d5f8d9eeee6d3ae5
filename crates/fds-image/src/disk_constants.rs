//! Disk image constants

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

// These values MUST match the player template.

#![allow(clippy::assertions_on_constants)]

/// Size of a single headerless FDS disk side.
pub const IMAGE_CAPACITY: usize = 65500;

// Disk info block (block code 1) is followed by the file amount block (block code 2).
pub const FILE_AMOUNT_BLOCK_OFFSET: usize = 0x38;
pub const FILE_COUNT_OFFSET: usize = FILE_AMOUNT_BLOCK_OFFSET + 1;
pub const FIRST_FILE_OFFSET: usize = FILE_AMOUNT_BLOCK_OFFSET + 2;

pub const FILE_AMOUNT_BLOCK_CODE: u8 = 2;
pub const FILE_HEADER_BLOCK_CODE: u8 = 3;
pub const FILE_DATA_BLOCK_CODE: u8 = 4;

pub const FILE_TYPE_PRG: u8 = 0;

pub const FILE_NAME_SIZE: usize = 8;

// header block code, index, index, name, load address, length, file type, data block code
pub const FILE_SLOT_HEADER_SIZE: usize = 1 + 2 + FILE_NAME_SIZE + 2 + 2 + 2;

pub const SONG_DATA_ADDR: u16 = 0x6000;
pub const DPCM_ADDR: u16 = 0xc000;

pub const MAX_DPCM_SIZE: usize = 0x2000;
pub const MAX_SONG_SIZE: usize = (DPCM_ADDR - SONG_DATA_ADDR) as usize;

pub const MAX_SONGS: usize = 64;

pub const TEXT_FIELD_SIZE: usize = 28;
pub const PROJECT_INFO_SIZE: usize = 64;
pub const SONG_ENTRY_SIZE: usize = 32;

pub const TOC_SIZE: usize = PROJECT_INFO_SIZE + MAX_SONGS * SONG_ENTRY_SIZE;

/// File name of the table of contents placeholder file.
///
/// The TOC file MUST be the last file in the template.
pub const TOC_ANCHOR: &[u8; FILE_NAME_SIZE] = b"SONG_TOC";

/// Number of bytes between the start of `TOC_ANCHOR` and the TOC file payload.
// name, load address, length, file type, data block code
pub const TOC_HEADER_SKIP: usize = FILE_NAME_SIZE + 2 + 2 + 1 + 1;

/// Number of template bytes to keep, counted from the start of `TOC_ANCHOR`.
pub const TEMPLATE_KEEP_AFTER_ANCHOR: usize = TOC_HEADER_SKIP + TOC_SIZE;

pub const DPCM_FILE_NAME: &[u8; FILE_NAME_SIZE] = b"DPCMDATA";

pub fn song_file_name(song_number: usize) -> [u8; FILE_NAME_SIZE] {
    let s = format!("SONG{:04}", song_number % 10000);

    let mut out = [0; FILE_NAME_SIZE];
    out.copy_from_slice(s.as_bytes());
    out
}

const _: () = assert!(FILE_SLOT_HEADER_SIZE == 17);
const _: () = assert!(TOC_HEADER_SKIP + 3 == FILE_SLOT_HEADER_SIZE);
const _: () = assert!(TOC_SIZE < u16::MAX as usize);
const _: () = assert!(MAX_SONG_SIZE < u16::MAX as usize);
const _: () = assert!(MAX_DPCM_SIZE < u16::MAX as usize);
const _: () = assert!(DPCM_ADDR as usize + MAX_DPCM_SIZE <= 0xe000);
const _: () = assert!(MAX_SONGS < u8::MAX as usize);
