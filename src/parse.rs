// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Header and section layout of compiled terminfo files

use std::io::{Cursor, Read};

/// Size of the fixed header in bytes
pub const HEADER_LEN: usize = 12;

#[repr(i16)]
enum TerminfoMagic {
    /// Original format, 16-bit numbers
    Magic1 = 0o432,
    /// 32-bit numbers
    Magic2 = 0o1036,
}

/// Errors reported when parsing a terminfo database
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Fewer than 12 bytes available for the header
    #[error("Header truncated to {0} bytes")]
    CorruptHeader(usize),
    /// The magic number is invalid or unsupported
    #[error("Unknown magic number {0:#o}")]
    BadMagic(i16),
    /// A section length in the header is negative
    #[error("Invalid {section} length {value}")]
    InvalidSectionLength { section: &'static str, value: i16 },
    /// The string offset table entry for the slot is past the end of the file
    #[error("Missing offset for capability {0}")]
    MissingCapability(u16),
    /// The string for the slot is not terminated by the NUL byte
    #[error("String without final NUL for capability {0}")]
    TruncatedString(u16),
}

fn read_le16(reader: &mut impl Read) -> Result<i16, std::io::Error> {
    let mut buffer = [0u8; 2];
    reader.read_exact(&mut buffer)?;
    Ok(i16::from_le_bytes(buffer))
}

/// Fixed header of a compiled terminfo file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: i16,
    /// Size of the terminal names section in bytes
    pub names_len: i16,
    /// Size of the boolean section in bytes
    pub bool_len: i16,
    /// Number of numeric capabilities
    pub num_count: i16,
    /// Number of entries in the string offset table
    pub str_count: i16,
    /// Size of the string table in bytes
    pub str_table_len: i16,
}

impl Header {
    /// Decode the header from the start of `buffer`
    pub fn parse(buffer: &[u8]) -> Result<Self, Error> {
        let mut reader = Cursor::new(buffer);
        let mut field = || read_le16(&mut reader).map_err(|_| Error::CorruptHeader(buffer.len()));
        Ok(Self {
            magic: field()?,
            names_len: field()?,
            bool_len: field()?,
            num_count: field()?,
            str_count: field()?,
            str_table_len: field()?,
        })
    }

    /// Size of one numeric capability, determined by the magic number
    pub const fn number_size(&self) -> Result<usize, Error> {
        match self.magic {
            val if val == TerminfoMagic::Magic1 as i16 => Ok(2),
            val if val == TerminfoMagic::Magic2 as i16 => Ok(4),
            val => Err(Error::BadMagic(val)),
        }
    }
}

fn section_len(section: &'static str, value: i16) -> Result<usize, Error> {
    usize::try_from(value).map_err(|_| Error::InvalidSectionLength { section, value })
}

/// Positions of the string sections within the file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionOffsets {
    /// Start of the string offset table
    pub strings_offset: usize,
    /// Start of the string table
    pub table_offset: usize,
    /// Number of entries in the string offset table
    pub str_count: usize,
    /// Size of the string table in bytes
    pub table_len: usize,
}

impl SectionOffsets {
    pub fn new(header: &Header) -> Result<Self, Error> {
        let number_size = header.number_size()?;
        let names_len = section_len("names", header.names_len)?;
        let mut bool_len = section_len("boolean", header.bool_len)?;
        let num_count = section_len("numbers", header.num_count)?;
        let str_count = section_len("strings", header.str_count)?;
        let table_len = section_len("string table", header.str_table_len)?;

        if (names_len + bool_len) % 2 != 0 {
            // old quirk to align everything on word boundaries
            bool_len += 1;
        }

        let strings_offset = HEADER_LEN + names_len + bool_len + number_size * num_count;
        let table_offset = strings_offset + 2 * str_count;

        Ok(Self {
            strings_offset,
            table_offset,
            str_count,
            table_len,
        })
    }

    /// Decode the header from `buffer` and compute the offsets
    pub fn parse(buffer: &[u8]) -> Result<Self, Error> {
        Self::new(&Header::parse(buffer)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn header(names_len: i16, bool_len: i16, num_count: i16, str_count: i16) -> Header {
        Header {
            magic: 0o432,
            names_len,
            bool_len,
            num_count,
            str_count,
            str_table_len: 50,
        }
    }

    #[test]
    fn empty_buffer() {
        assert_eq!(Header::parse(b""), Err(Error::CorruptHeader(0)));
    }

    #[test]
    fn short_header() {
        let buffer = [0x1a, 0x01, 10, 0, 37, 0, 2, 0, 3, 0, 50];
        assert_eq!(Header::parse(&buffer), Err(Error::CorruptHeader(11)));
    }

    #[test]
    fn little_endian_fields() {
        let buffer = [
            0x1a, 0x01, 0x0a, 0x00, 0x25, 0x00, 0x02, 0x00, 0x03, 0x00, 0x32, 0x00, 0xff,
        ];
        assert_eq!(Header::parse(&buffer), Ok(header(10, 37, 2, 3)));
    }

    #[test]
    fn even_names_and_booleans() {
        let offsets = SectionOffsets::new(&header(10, 36, 2, 3)).unwrap();
        assert_eq!(offsets.strings_offset, 12 + 10 + 36 + 4);
        assert_eq!(offsets.table_offset, 12 + 10 + 36 + 4 + 6);
    }

    #[test]
    fn odd_names_and_booleans() {
        let offsets = SectionOffsets::new(&header(10, 37, 2, 3)).unwrap();
        assert_eq!(offsets.strings_offset, 64);
        assert_eq!(offsets.table_offset, 70);

        let offsets = SectionOffsets::new(&header(11, 0, 0, 1)).unwrap();
        assert_eq!(offsets.strings_offset, 24);
        assert_eq!(offsets.table_offset, 26);
    }

    #[test]
    fn alignment_grid() {
        for names_len in 0..6 {
            for bool_len in 0..6 {
                let offsets = SectionOffsets::new(&header(names_len, bool_len, 1, 1)).unwrap();
                let padding = usize::from((names_len + bool_len) % 2 == 1);
                let unpadded = 12 + names_len as usize + bool_len as usize + 2;
                assert_eq!(offsets.strings_offset, unpadded + padding);
                assert_eq!(offsets.strings_offset % 2, 0);
            }
        }
    }

    #[test]
    fn wide_numbers() {
        let mut header = header(10, 36, 2, 3);
        header.magic = 0o1036;
        let offsets = SectionOffsets::new(&header).unwrap();
        assert_eq!(offsets.strings_offset, 12 + 10 + 36 + 8);
    }

    #[test]
    fn bad_magic() {
        let mut header = header(10, 36, 2, 3);
        header.magic = 0x031a;
        assert_eq!(SectionOffsets::new(&header), Err(Error::BadMagic(0x031a)));
    }

    #[test]
    fn negative_length() {
        assert_eq!(
            SectionOffsets::new(&header(10, 36, -1, 3)),
            Err(Error::InvalidSectionLength {
                section: "numbers",
                value: -1
            })
        );
    }
}
