// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Special key and control function capabilities

use crate::parse::{Error, SectionOffsets};

pub const KEY_COUNT: usize = 22;
pub const FUNCTION_COUNT: usize = 12;

/// String capability numbers for each [`Key`], in enumeration order (from ncurses term.h)
pub const KEY_SLOTS: [u16; KEY_COUNT] = [
    66, 68 /* 67 is kf10 */, 69, 70, 71, 72, 73, 74, 75, 67, 216, 217, 77, 59, 76, 164, 82, 81,
    87, 61, 79, 83,
];

/// String capability numbers for each [`Function`], in enumeration order
pub const FUNCTION_SLOTS: [u16; FUNCTION_COUNT] = [28, 40, 16, 13, 5, 39, 36, 27, 26, 34, 89, 88];

const KEY_NAMES: [&str; KEY_COUNT] = [
    "kf1", "kf2", "kf3", "kf4", "kf5", "kf6", "kf7", "kf8", "kf9", "kf10", "kf11", "kf12",
    "kich1", "kdch1", "khome", "kend", "kpp", "knp", "kcuu1", "kcud1", "kcub1", "kcuf1",
];

const FUNCTION_NAMES: [&str; FUNCTION_COUNT] = [
    "smcup", "rmcup", "cnorm", "civis", "clear", "sgr0", "smul", "bold", "blink", "rev", "smkx",
    "rmkx",
];

/// Special keys sending a terminal specific sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    pub const ALL: [Self; KEY_COUNT] = [
        Self::F1,
        Self::F2,
        Self::F3,
        Self::F4,
        Self::F5,
        Self::F6,
        Self::F7,
        Self::F8,
        Self::F9,
        Self::F10,
        Self::F11,
        Self::F12,
        Self::Insert,
        Self::Delete,
        Self::Home,
        Self::End,
        Self::PageUp,
        Self::PageDown,
        Self::ArrowUp,
        Self::ArrowDown,
        Self::ArrowLeft,
        Self::ArrowRight,
    ];

    #[must_use]
    pub const fn slot(self) -> u16 {
        KEY_SLOTS[self as usize]
    }

    /// Terminfo short name, e.g. `kf1`
    #[must_use]
    pub const fn cap_name(self) -> &'static str {
        KEY_NAMES[self as usize]
    }
}

/// Control functions without parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Function {
    EnterCa,
    ExitCa,
    ShowCursor,
    HideCursor,
    ClearScreen,
    Sgr0,
    Underline,
    Bold,
    Blink,
    Reverse,
    EnterKeypad,
    ExitKeypad,
}

impl Function {
    pub const ALL: [Self; FUNCTION_COUNT] = [
        Self::EnterCa,
        Self::ExitCa,
        Self::ShowCursor,
        Self::HideCursor,
        Self::ClearScreen,
        Self::Sgr0,
        Self::Underline,
        Self::Bold,
        Self::Blink,
        Self::Reverse,
        Self::EnterKeypad,
        Self::ExitKeypad,
    ];

    #[must_use]
    pub const fn slot(self) -> u16 {
        FUNCTION_SLOTS[self as usize]
    }

    #[must_use]
    pub const fn cap_name(self) -> &'static str {
        FUNCTION_NAMES[self as usize]
    }
}

/// Look up string capability `slot` through the offset table and the string table
///
/// Slots past the end of the offset table and absent or canceled entries
/// yield an empty string.
pub fn read_capability<'a>(
    buffer: &'a [u8],
    offsets: &SectionOffsets,
    slot: u16,
) -> Result<&'a [u8], Error> {
    let index = usize::from(slot);
    if index >= offsets.str_count {
        return Ok(&[]);
    }

    let entry = offsets.strings_offset + 2 * index;
    let Some(&[low, high]) = buffer.get(entry..entry + 2) else {
        return Err(Error::MissingCapability(slot));
    };
    // -1 is absent, -2 is canceled
    let Ok(relative) = usize::try_from(i16::from_le_bytes([low, high])) else {
        return Ok(&[]);
    };

    let table_end = (offsets.table_offset + offsets.table_len).min(buffer.len());
    let Some(string_slice) = buffer.get(offsets.table_offset + relative..table_end) else {
        return Err(Error::TruncatedString(slot));
    };
    match string_slice.iter().position(|c| *c == b'\0') {
        Some(string_length) => Ok(&string_slice[..string_length]),
        None => Err(Error::TruncatedString(slot)),
    }
}

/// Key and function sequences of one terminal
///
/// Both sequences are indexed by the enumeration order of [`Key`] and
/// [`Function`]. Capabilities the terminal lacks are empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    keys: [Vec<u8>; KEY_COUNT],
    functions: [Vec<u8>; FUNCTION_COUNT],
}

impl Capabilities {
    /// Extract the capabilities from a compiled terminfo file
    ///
    /// Fails as a whole if any capability cannot be read.
    pub fn parse(buffer: &[u8]) -> Result<Self, Error> {
        let offsets = SectionOffsets::parse(buffer)?;
        let mut capabilities = Self::default();
        for (value, slot) in capabilities.keys.iter_mut().zip(KEY_SLOTS) {
            *value = read_capability(buffer, &offsets, slot)?.to_vec();
        }
        for (value, slot) in capabilities.functions.iter_mut().zip(FUNCTION_SLOTS) {
            *value = read_capability(buffer, &offsets, slot)?.to_vec();
        }
        Ok(capabilities)
    }

    #[must_use]
    pub fn key(&self, key: Key) -> &[u8] {
        &self.keys[key as usize]
    }

    #[must_use]
    pub fn function(&self, function: Function) -> &[u8] {
        &self.functions[function as usize]
    }

    /// Key sequences in [`Key`] order
    #[must_use]
    pub const fn keys(&self) -> &[Vec<u8>; KEY_COUNT] {
        &self.keys
    }

    /// Function sequences in [`Function`] order
    #[must_use]
    pub const fn functions(&self) -> &[Vec<u8>; FUNCTION_COUNT] {
        &self.functions
    }
}
