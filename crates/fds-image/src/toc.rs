//! Table of contents records

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use crate::disk_constants::{
    MAX_SONGS, PROJECT_INFO_SIZE, SONG_ENTRY_SIZE, TEXT_FIELD_SIZE, TOC_SIZE,
};
use crate::text::{decode_text_field, encode_text_field};

const N_RESERVED_BYTES: usize = 6;

const NAME_OFFSET: usize = 2 + N_RESERVED_BYTES;
const AUTHOR_OFFSET: usize = NAME_OFFSET + TEXT_FIELD_SIZE;

const _: () = assert!(AUTHOR_OFFSET + TEXT_FIELD_SIZE == PROJECT_INFO_SIZE);
const _: () = assert!(TEXT_FIELD_SIZE + 4 == SONG_ENTRY_SIZE);

fn text_field(data: &[u8], offset: usize) -> [u8; TEXT_FIELD_SIZE] {
    let mut out = [0; TEXT_FIELD_SIZE];
    out.copy_from_slice(&data[offset..offset + TEXT_FIELD_SIZE]);
    out
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub max_song_index: u8,
    pub first_dpcm_bank: u8,
    // Encoded text
    pub name: [u8; TEXT_FIELD_SIZE],
    pub author: [u8; TEXT_FIELD_SIZE],
}

impl ProjectInfo {
    pub fn new(max_song_index: u8, first_dpcm_bank: u8, name: &str, author: &str) -> Self {
        Self {
            max_song_index,
            first_dpcm_bank,
            name: encode_text_field(name),
            author: encode_text_field(author),
        }
    }

    pub fn name_string(&self) -> String {
        decode_text_field(&self.name)
    }

    pub fn author_string(&self) -> String {
        decode_text_field(&self.author)
    }

    pub fn to_bytes(&self) -> [u8; PROJECT_INFO_SIZE] {
        let mut out = [0; PROJECT_INFO_SIZE];

        out[0] = self.max_song_index;
        out[1] = self.first_dpcm_bank;
        // reserved bytes are zero
        out[NAME_OFFSET..AUTHOR_OFFSET].copy_from_slice(&self.name);
        out[AUTHOR_OFFSET..].copy_from_slice(&self.author);

        out
    }

    pub fn from_bytes(data: &[u8; PROJECT_INFO_SIZE]) -> Self {
        Self {
            max_song_index: data[0],
            first_dpcm_bank: data[1],
            name: text_field(data, NAME_OFFSET),
            author: text_field(data, AUTHOR_OFFSET),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SongEntry {
    // Encoded text
    pub name: [u8; TEXT_FIELD_SIZE],
    /// File index of the song data
    pub bank: u8,
    /// DPCM file index, 0 if the song does not use DPCM samples
    pub flags: u8,
    pub address: u16,
}

impl SongEntry {
    pub fn new(name: &str, bank: u8, flags: u8, address: u16) -> Self {
        Self {
            name: encode_text_field(name),
            bank,
            flags,
            address,
        }
    }

    pub fn name_string(&self) -> String {
        decode_text_field(&self.name)
    }

    pub fn uses_dpcm(&self) -> bool {
        self.flags != 0
    }

    pub fn to_bytes(&self) -> [u8; SONG_ENTRY_SIZE] {
        let mut out = [0; SONG_ENTRY_SIZE];

        out[..TEXT_FIELD_SIZE].copy_from_slice(&self.name);
        out[TEXT_FIELD_SIZE] = self.bank;
        out[TEXT_FIELD_SIZE + 1] = self.flags;
        out[TEXT_FIELD_SIZE + 2..].copy_from_slice(&self.address.to_le_bytes());

        out
    }

    pub fn from_bytes(data: &[u8; SONG_ENTRY_SIZE]) -> Self {
        Self {
            name: text_field(data, 0),
            bank: data[TEXT_FIELD_SIZE],
            flags: data[TEXT_FIELD_SIZE + 1],
            address: u16::from_le_bytes([data[TEXT_FIELD_SIZE + 2], data[TEXT_FIELD_SIZE + 3]]),
        }
    }
}

/// The project info followed by `MAX_SONGS` song entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toc {
    pub project_info: ProjectInfo,
    pub songs: [SongEntry; MAX_SONGS],
}

impl Default for Toc {
    fn default() -> Self {
        Self {
            project_info: ProjectInfo::default(),
            songs: std::array::from_fn(|_| SongEntry::default()),
        }
    }
}

impl Toc {
    /// Returns the entries of the songs that are on the disk.
    pub fn used_songs(&self) -> &[SongEntry] {
        let n_songs = usize::from(self.project_info.max_song_index) + 1;
        &self.songs[..n_songs.min(MAX_SONGS)]
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(TOC_SIZE);

        out.extend(self.project_info.to_bytes());
        for s in &self.songs {
            out.extend(s.to_bytes());
        }

        assert_eq!(out.len(), TOC_SIZE);

        out
    }

    /// Returns `None` if `data` is not `TOC_SIZE` bytes in size.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() != TOC_SIZE {
            return None;
        }

        let (info, entries) = data.split_at(PROJECT_INFO_SIZE);
        let project_info = ProjectInfo::from_bytes(info.try_into().ok()?);

        let mut songs = std::array::from_fn(|_| SongEntry::default());
        for (s, d) in songs.iter_mut().zip(entries.chunks_exact(SONG_ENTRY_SIZE)) {
            *s = SongEntry::from_bytes(d.try_into().ok()?);
        }

        Some(Self {
            project_info,
            songs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::BLANK;

    #[test]
    fn test_project_info_layout() {
        let info = ProjectInfo::new(3, 5, "AB", "c");
        let bytes = info.to_bytes();

        assert_eq!(bytes.len(), PROJECT_INFO_SIZE);
        assert_eq!(bytes[0], 3);
        assert_eq!(bytes[1], 5);
        assert_eq!(bytes[2..8], [0; 6]);

        // name field is bytes 8..36, centered
        assert_eq!(bytes[8 + 12], BLANK);
        assert_eq!(bytes[8 + 13], 0);
        assert_eq!(bytes[8 + 14], 1);
        assert_eq!(bytes[8 + 15], BLANK);

        // author field is bytes 36..64
        assert_eq!(bytes[36 + 13], 28);
        assert_eq!(bytes[36 + 12], BLANK);
        assert_eq!(bytes[36 + 14], BLANK);
    }

    #[test]
    fn test_song_entry_layout() {
        let entry = SongEntry::new("Intro", 7, 4, 0x6000);
        let bytes = entry.to_bytes();

        assert_eq!(bytes.len(), SONG_ENTRY_SIZE);
        assert_eq!(bytes[28], 7);
        assert_eq!(bytes[29], 4);
        assert_eq!(bytes[30..32], [0x00, 0x60]);
        assert_eq!(decode_text_field(&bytes[..28]), "Intro");
    }

    #[test]
    fn test_unused_song_entry_is_zero() {
        assert_eq!(SongEntry::default().to_bytes(), [0; SONG_ENTRY_SIZE]);
    }

    #[test]
    fn test_toc_round_trip() {
        let mut toc = Toc {
            project_info: ProjectInfo::new(2, 4, "My Album", "Some Author"),
            ..Default::default()
        };
        toc.songs[0] = SongEntry::new("First", 5, 4, 0x6000);
        toc.songs[1] = SongEntry::new("Second song", 6, 0, 0x6000);
        toc.songs[2] = SongEntry::new("Third!", 7, 4, 0x6123);

        let bytes = toc.to_bytes();
        assert_eq!(bytes.len(), TOC_SIZE);

        let decoded = Toc::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, toc);

        assert_eq!(decoded.project_info.name_string(), "My Album");
        assert_eq!(decoded.project_info.author_string(), "Some Author");
        assert_eq!(decoded.used_songs().len(), 3);
        assert_eq!(decoded.used_songs()[1].name_string(), "Second song");
        assert!(!decoded.used_songs()[1].uses_dpcm());
        assert_eq!(decoded.used_songs()[2].address, 0x6123);
    }

    #[test]
    fn test_toc_from_bytes_invalid_size() {
        assert!(Toc::from_bytes(&[0; TOC_SIZE - 1]).is_none());
        assert!(Toc::from_bytes(&[0; TOC_SIZE + 1]).is_none());
    }
}
