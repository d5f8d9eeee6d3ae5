//! Centered text encoding

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use crate::disk_constants::TEXT_FIELD_SIZE;

pub const BLANK: u8 = 255;

const FIRST_LOWERCASE_CODE: u8 = 26;
const FIRST_DIGIT_CODE: u8 = 52;
const FIRST_PUNCTUATION_CODE: u8 = 62;

// Order MUST match the player's font
const PUNCTUATION: [char; 6] = ['.', '-', '\'', '!', '?', ':'];

pub fn char_to_code(c: char) -> u8 {
    match c {
        'A'..='Z' => c as u8 - b'A',
        'a'..='z' => c as u8 - b'a' + FIRST_LOWERCASE_CODE,
        '0'..='9' => c as u8 - b'0' + FIRST_DIGIT_CODE,
        c => match PUNCTUATION.iter().position(|&p| p == c) {
            Some(i) => FIRST_PUNCTUATION_CODE + i as u8,
            None => BLANK,
        },
    }
}

pub fn code_to_char(code: u8) -> char {
    match code {
        0..=25 => char::from(b'A' + code),
        26..=51 => char::from(b'a' + code - FIRST_LOWERCASE_CODE),
        52..=61 => char::from(b'0' + code - FIRST_DIGIT_CODE),
        62..=67 => PUNCTUATION[usize::from(code - FIRST_PUNCTUATION_CODE)],
        _ => ' ',
    }
}

/// Encodes `s` into exactly `width` codes.
///
/// `s` is truncated to `width` characters and centered with blank codes.
pub fn encode_centered_text(s: &str, width: usize) -> Vec<u8> {
    let mut out = vec![BLANK; width];
    write_centered_text(&mut out, s);
    out
}

pub fn encode_text_field(s: &str) -> [u8; TEXT_FIELD_SIZE] {
    let mut out = [BLANK; TEXT_FIELD_SIZE];
    write_centered_text(&mut out, s);
    out
}

fn write_centered_text(out: &mut [u8], s: &str) {
    let width = out.len();
    let len = s.chars().take(width).count();
    let start = (width - len) / 2;

    out.fill(BLANK);

    for (o, c) in out[start..].iter_mut().zip(s.chars()) {
        *o = char_to_code(c);
    }
}

/// Decodes a text field, removing the centering blanks.
pub fn decode_text_field(data: &[u8]) -> String {
    let s: String = data.iter().map(|&c| code_to_char(c)).collect();
    s.trim().to_owned()
}
