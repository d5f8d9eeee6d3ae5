//! Disk file slots

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use crate::disk_constants::{
    FILE_AMOUNT_BLOCK_CODE, FILE_AMOUNT_BLOCK_OFFSET, FILE_COUNT_OFFSET, FILE_DATA_BLOCK_CODE,
    FILE_HEADER_BLOCK_CODE, FILE_NAME_SIZE, FILE_SLOT_HEADER_SIZE, FILE_TYPE_PRG,
    FIRST_FILE_OFFSET,
};
use crate::errors::InvalidTemplateError;

use std::ops::Range;

pub fn file_slot_size(payload_len: usize) -> usize {
    FILE_SLOT_HEADER_SIZE + payload_len
}

/// Appends a file header block and file data block to `image`.
///
/// The caller is responsible for keeping `payload` smaller than 64KiB.
pub fn append_file(
    image: &mut Vec<u8>,
    file_index: u8,
    load_addr: u16,
    name: &[u8; FILE_NAME_SIZE],
    payload: &[u8],
) {
    assert!(payload.len() <= u16::MAX.into());

    let len = payload.len() as u16;

    image.reserve(file_slot_size(payload.len()));

    image.push(FILE_HEADER_BLOCK_CODE);
    // File number and file ID.  Both are the same.
    image.push(file_index);
    image.push(file_index);
    image.extend(name);
    image.extend(load_addr.to_le_bytes());
    image.extend(len.to_le_bytes());
    image.push(FILE_TYPE_PRG);

    image.push(FILE_DATA_BLOCK_CODE);
    image.extend(payload);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub index: u8,
    pub file_id: u8,
    pub name: [u8; FILE_NAME_SIZE],
    pub load_addr: u16,
    pub file_type: u8,

    pub slot_offset: usize,
    pub data_offset: usize,
    pub length: usize,
}

impl FileInfo {
    pub fn name_string(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }

    pub fn data_range(&self) -> Range<usize> {
        self.data_offset..self.data_offset + self.length
    }

    pub fn slot_end(&self) -> usize {
        self.data_offset + self.length
    }
}

/// Reads the file amount block
pub fn read_file_count(image: &[u8]) -> Result<u8, InvalidTemplateError> {
    if image.len() < FIRST_FILE_OFFSET {
        return Err(InvalidTemplateError::TooSmall(image.len()));
    }
    if image[FILE_AMOUNT_BLOCK_OFFSET] != FILE_AMOUNT_BLOCK_CODE {
        return Err(InvalidTemplateError::NoFileAmountBlock);
    }
    Ok(image[FILE_COUNT_OFFSET])
}

/// Walks the file slots in `image`.
///
/// Stops at the end of `image` or on the first zero byte (the padding after the last file).
pub fn read_file_slots(image: &[u8]) -> Result<Vec<FileInfo>, InvalidTemplateError> {
    read_file_count(image)?;

    let mut files = Vec::new();
    let mut pos = FIRST_FILE_OFFSET;

    while let Some(&block_code) = image.get(pos) {
        if block_code == 0 {
            break;
        }
        if block_code != FILE_HEADER_BLOCK_CODE {
            return Err(InvalidTemplateError::InvalidBlockCode(pos, block_code));
        }

        let header = match image.get(pos..pos + FILE_SLOT_HEADER_SIZE) {
            Some(h) => h,
            None => return Err(InvalidTemplateError::FileSlotOutOfBounds(pos)),
        };

        let data_block_code = header[FILE_SLOT_HEADER_SIZE - 1];
        if data_block_code != FILE_DATA_BLOCK_CODE {
            return Err(InvalidTemplateError::InvalidBlockCode(
                pos + FILE_SLOT_HEADER_SIZE - 1,
                data_block_code,
            ));
        }

        let mut name = [0; FILE_NAME_SIZE];
        name.copy_from_slice(&header[3..3 + FILE_NAME_SIZE]);

        let info = FileInfo {
            index: header[1],
            file_id: header[2],
            name,
            load_addr: u16::from_le_bytes([header[11], header[12]]),
            file_type: header[15],

            slot_offset: pos,
            data_offset: pos + FILE_SLOT_HEADER_SIZE,
            length: u16::from_le_bytes([header[13], header[14]]).into(),
        };

        if info.slot_end() > image.len() {
            return Err(InvalidTemplateError::FileSlotOutOfBounds(pos));
        }

        pos = info.slot_end();
        files.push(info);
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_disk() -> Vec<u8> {
        let mut disk = vec![0xee; FILE_AMOUNT_BLOCK_OFFSET];
        disk[0] = 1;
        disk.push(FILE_AMOUNT_BLOCK_CODE);
        disk.push(0);
        disk
    }

    #[test]
    fn test_append_file() {
        let mut image = vec![0xff];
        append_file(&mut image, 6, 0x6000, b"SONG0001", &[10, 20, 30]);

        assert_eq!(image.len(), 1 + file_slot_size(3));
        assert_eq!(file_slot_size(3), 20);

        #[rustfmt::skip]
        let expected: [u8; 21] = [
            0xff,
            3, 6, 6,
            b'S', b'O', b'N', b'G', b'0', b'0', b'0', b'1',
            0x00, 0x60,
            3, 0,
            0,
            4,
            10, 20, 30,
        ];
        assert_eq!(image, expected);
    }

    #[test]
    fn test_append_empty_file() {
        let mut image = Vec::new();
        append_file(&mut image, 0xff, 0xc000, b"DPCMDATA", &[]);

        assert_eq!(image.len(), FILE_SLOT_HEADER_SIZE);
        assert_eq!(image[1], 0xff);
        assert_eq!(image[2], 0xff);
        assert_eq!(image[13..15], [0, 0]);
    }

    #[test]
    fn test_read_file_slots() {
        let mut disk = blank_disk();
        append_file(&mut disk, 0, 0x6000, b"FILE0000", &[1, 2]);
        append_file(&mut disk, 1, 0xc000, b"FILE0001", &[3; 300]);

        let files = read_file_slots(&disk).unwrap();
        assert_eq!(files.len(), 2);

        assert_eq!(files[0].index, 0);
        assert_eq!(files[0].name_string(), "FILE0000");
        assert_eq!(files[0].load_addr, 0x6000);
        assert_eq!(files[0].slot_offset, FIRST_FILE_OFFSET);
        assert_eq!(&disk[files[0].data_range()], [1, 2]);

        assert_eq!(files[1].index, 1);
        assert_eq!(files[1].file_id, 1);
        assert_eq!(files[1].load_addr, 0xc000);
        assert_eq!(files[1].length, 300);
        assert_eq!(files[1].slot_end(), disk.len());
    }

    #[test]
    fn test_read_file_slots_stops_at_padding() {
        let mut disk = blank_disk();
        append_file(&mut disk, 0, 0x6000, b"FILE0000", &[1, 2]);
        disk.resize(disk.len() + 100, 0);

        assert_eq!(read_file_slots(&disk).unwrap().len(), 1);
    }

    #[test]
    fn test_read_file_slots_errors() {
        assert!(matches!(
            read_file_slots(&[0; 10]),
            Err(InvalidTemplateError::TooSmall(10))
        ));

        let mut disk = blank_disk();
        disk[FILE_AMOUNT_BLOCK_OFFSET] = 0;
        assert!(matches!(
            read_file_slots(&disk),
            Err(InvalidTemplateError::NoFileAmountBlock)
        ));

        let mut disk = blank_disk();
        disk.push(7);
        assert!(matches!(
            read_file_slots(&disk),
            Err(InvalidTemplateError::InvalidBlockCode(FIRST_FILE_OFFSET, 7))
        ));

        let mut disk = blank_disk();
        append_file(&mut disk, 0, 0x6000, b"FILE0000", &[1, 2, 3, 4]);
        disk.truncate(disk.len() - 1);
        assert!(matches!(
            read_file_slots(&disk),
            Err(InvalidTemplateError::FileSlotOutOfBounds(FIRST_FILE_OFFSET))
        ));
    }
}
