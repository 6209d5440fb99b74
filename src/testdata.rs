// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Synthetic terminfo files for tests

const NAMES: &[u8] = b"test|synthetic terminal\0";
const BOOLEANS: &[u8] = &[1, 0, 1];
const NUMBERS: &[i16] = &[80, 24];

/// Build a 16-bit terminfo file with `str_count` string slots
///
/// Slots not listed in `strings` are marked absent. The names and boolean
/// sections have an odd combined size, so the file contains the padding byte.
pub fn make_entry(str_count: u16, strings: &[(u16, &[u8])]) -> Vec<u8> {
    let mut offsets = vec![-1i16; usize::from(str_count)];
    let mut table = vec![];
    for (slot, value) in strings {
        offsets[usize::from(*slot)] = table.len() as i16;
        table.extend_from_slice(value);
        table.push(0);
    }

    let mut buffer = vec![];
    for field in [
        0o432,
        NAMES.len() as i16,
        BOOLEANS.len() as i16,
        NUMBERS.len() as i16,
        str_count as i16,
        table.len() as i16,
    ] {
        buffer.extend_from_slice(&field.to_le_bytes());
    }
    buffer.extend_from_slice(NAMES);
    buffer.extend_from_slice(BOOLEANS);
    if buffer.len() % 2 == 1 {
        buffer.push(0);
    }
    for number in NUMBERS {
        buffer.extend_from_slice(&number.to_le_bytes());
    }
    for offset in offsets {
        buffer.extend_from_slice(&offset.to_le_bytes());
    }
    buffer.extend_from_slice(&table);
    buffer
}
