// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Type inference and typed access for raw property values.
//!
//! A property exported by the kernel carries no type information: it is
//! only a byte buffer. [`infer_type`] guesses how the buffer should be
//! decoded, and [`get_string`] and [`get_word`] extract single elements
//! after re-checking that guess.

use core::ffi::CStr;
use core::fmt;

use zerocopy::{FromBytes, big_endian};

use crate::error::Error;

const WORD_SIZE: usize = size_of::<u32>();

/// The inferred encoding of a property value, with its element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    /// An empty value, e.g. a boolean flag such as `interrupt-controller`.
    Simple,
    /// A list of NUL-terminated printable strings.
    Strings(usize),
    /// A list of big-endian 32-bit cells.
    Words(usize),
    /// An opaque byte array.
    Bytes(usize),
}

impl PropertyType {
    /// Returns the tag of this type without its count.
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyType::Simple => PropertyKind::Simple,
            PropertyType::Strings(_) => PropertyKind::Strings,
            PropertyType::Words(_) => PropertyKind::Words,
            PropertyType::Bytes(_) => PropertyKind::Bytes,
        }
    }

    /// Returns the number of elements, or `None` for [`PropertyType::Simple`].
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        match *self {
            PropertyType::Simple => None,
            PropertyType::Strings(count) | PropertyType::Words(count) | PropertyType::Bytes(count) => {
                Some(count)
            }
        }
    }
}

/// The tag of a [`PropertyType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// See [`PropertyType::Simple`].
    Simple,
    /// See [`PropertyType::Strings`].
    Strings,
    /// See [`PropertyType::Words`].
    Words,
    /// See [`PropertyType::Bytes`].
    Bytes,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Simple => write!(f, "simple"),
            PropertyKind::Strings => write!(f, "strings"),
            PropertyKind::Words => write!(f, "words"),
            PropertyKind::Bytes => write!(f, "bytes"),
        }
    }
}

/// Printable in the C locale, i.e. `isprint`.
fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

/// Returns whether `value` is made only of non-empty printable runs, each
/// terminated by a NUL byte, with nothing left over.
fn is_string_table(value: &[u8]) -> bool {
    value.last() == Some(&0)
        && value.split_inclusive(|&byte| byte == 0).all(|run| {
            matches!(run.split_last(), Some((&0, text)) if !text.is_empty()
                && text.iter().copied().all(is_printable))
        })
}

/// Infers the encoding of a raw property value.
///
/// The first matching rule wins:
///
/// 1. an empty value is [`PropertyType::Simple`];
/// 2. a valid string table is [`PropertyType::Strings`];
/// 3. a length that is a multiple of 4 is [`PropertyType::Words`];
/// 4. anything else is [`PropertyType::Bytes`].
///
/// Rule 3 only looks at the length, so a 4-byte-aligned binary blob is
/// reported as words.
///
/// # Examples
///
/// ```
/// # use dtfs::property::{PropertyType, infer_type};
/// assert_eq!(infer_type(b""), PropertyType::Simple);
/// assert_eq!(infer_type(b"arm,pl011\0arm,primecell\0"), PropertyType::Strings(2));
/// assert_eq!(infer_type(&[0, 0, 0, 1, 0, 0, 0, 2]), PropertyType::Words(2));
/// assert_eq!(infer_type(&[1, 2, 3]), PropertyType::Bytes(3));
/// ```
#[must_use]
pub fn infer_type(value: &[u8]) -> PropertyType {
    if value.is_empty() {
        PropertyType::Simple
    } else if is_string_table(value) {
        PropertyType::Strings(value.iter().filter(|&&byte| byte == 0).count())
    } else if value.len().is_multiple_of(WORD_SIZE) {
        PropertyType::Words(value.len() / WORD_SIZE)
    } else {
        PropertyType::Bytes(value.len())
    }
}

/// Returns the `n`th big-endian 32-bit cell of a [`PropertyType::Words`]
/// value, in host byte order.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if `value` is not inferred as words, and
/// [`Error::IndexOutOfRange`] if `n` is not less than the word count.
///
/// # Examples
///
/// ```
/// # use dtfs::property::get_word;
/// let reg = [0x12, 0x34, 0x56, 0x78, 0x00, 0x00, 0x10, 0x00];
/// assert_eq!(get_word(&reg, 0).unwrap(), 0x1234_5678);
/// assert_eq!(get_word(&reg, 1).unwrap(), 0x1000);
/// assert!(get_word(&reg, 2).is_err());
/// ```
pub fn get_word(value: &[u8], n: usize) -> crate::Result<u32> {
    let count = match infer_type(value) {
        PropertyType::Words(count) => count,
        other => {
            return Err(Error::TypeMismatch {
                expected: PropertyKind::Words,
                found: other.kind(),
            });
        }
    };
    n.checked_mul(WORD_SIZE)
        .and_then(|offset| value.get(offset..))
        .and_then(|rest| big_endian::U32::ref_from_prefix(rest).ok())
        .map(|(word, _)| word.get())
        .ok_or(Error::IndexOutOfRange { index: n, count })
}

/// Returns the `n`th string of a [`PropertyType::Strings`] value, without
/// its terminator.
///
/// The returned slice borrows from `value`.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if `value` is not inferred as strings,
/// and [`Error::IndexOutOfRange`] if `n` is not less than the string count.
///
/// # Examples
///
/// ```
/// # use dtfs::property::get_string;
/// let compatible = b"arm,pl011\0arm,primecell\0";
/// assert_eq!(get_string(compatible, 1).unwrap(), "arm,primecell");
/// assert!(get_string(compatible, 2).is_err());
/// ```
pub fn get_string(value: &[u8], n: usize) -> crate::Result<&str> {
    match infer_type(value) {
        PropertyType::Strings(count) => StringListIter { value }
            .nth(n)
            .ok_or(Error::IndexOutOfRange { index: n, count }),
        other => Err(Error::TypeMismatch {
            expected: PropertyKind::Strings,
            found: other.kind(),
        }),
    }
}

/// A typed view over a raw property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property<'a> {
    value: &'a [u8],
}

impl<'a> Property<'a> {
    /// Creates a view over `value`.
    #[must_use]
    pub fn new(value: &'a [u8]) -> Self {
        Self { value }
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(&self) -> &'a [u8] {
        self.value
    }

    /// Returns the inferred type of the value.
    #[must_use]
    pub fn property_type(&self) -> PropertyType {
        infer_type(self.value)
    }

    /// Returns the `n`th string. See [`get_string`].
    ///
    /// # Errors
    ///
    /// Same as [`get_string`].
    pub fn string(&self, n: usize) -> crate::Result<&'a str> {
        get_string(self.value, n)
    }

    /// Returns the `n`th word. See [`get_word`].
    ///
    /// # Errors
    ///
    /// Same as [`get_word`].
    pub fn word(&self, n: usize) -> crate::Result<u32> {
        get_word(self.value, n)
    }

    /// Returns an iterator over the strings of the value, or an empty
    /// iterator if it is not inferred as strings.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dtfs::property::Property;
    /// let prop = Property::new(b"okay\0");
    /// assert_eq!(prop.strings().collect::<Vec<_>>(), ["okay"]);
    /// assert_eq!(Property::new(&[0; 4]).strings().count(), 0);
    /// ```
    pub fn strings(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let value: &'a [u8] = match self.property_type() {
            PropertyType::Strings(_) => self.value,
            _ => &[],
        };
        StringListIter { value }
    }

    /// Returns an iterator over the words of the value, or an empty iterator
    /// if it is not inferred as words.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dtfs::property::Property;
    /// let prop = Property::new(&[0, 0, 0, 1, 0, 0, 0, 2]);
    /// assert_eq!(prop.words().collect::<Vec<_>>(), [1, 2]);
    /// ```
    pub fn words(&self) -> impl Iterator<Item = u32> + use<'a> {
        let value: &'a [u8] = match self.property_type() {
            PropertyType::Words(_) => self.value,
            _ => &[],
        };
        value.chunks_exact(WORD_SIZE).filter_map(|chunk| {
            big_endian::U32::read_from_bytes(chunk)
                .ok()
                .map(|word| word.get())
        })
    }
}

/// Renders the value the way `dtfs_tree` prints it: quoted strings separated
/// by commas, `<...>` words, or `[...]` bytes. Simple values render empty.
///
/// # Examples
///
/// ```
/// # use dtfs::property::Property;
/// assert_eq!(Property::new(b"a\0b\0").to_string(), r#""a", "b""#);
/// assert_eq!(Property::new(&[0, 0, 0, 1]).to_string(), "<0x00000001>");
/// assert_eq!(Property::new(&[0xde, 0xad, 0x01]).to_string(), "[dead01]");
/// ```
impl fmt::Display for Property<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.property_type() {
            PropertyType::Simple => Ok(()),
            PropertyType::Strings(_) => {
                for (i, s) in self.strings().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{s}\"")?;
                }
                Ok(())
            }
            PropertyType::Words(_) => {
                write!(f, "<")?;
                for (i, word) in self.words().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "0x{word:08X}")?;
                }
                write!(f, ">")
            }
            PropertyType::Bytes(_) => {
                write!(f, "[")?;
                for byte in self.value {
                    write!(f, "{byte:02x}")?;
                }
                write!(f, "]")
            }
        }
    }
}

struct StringListIter<'a> {
    value: &'a [u8],
}

impl<'a> Iterator for StringListIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.value.is_empty() {
            return None;
        }
        let cstr = CStr::from_bytes_until_nul(self.value).ok()?;
        let s = cstr.to_str().ok()?;
        self.value = &self.value[s.len() + 1..];
        Some(s)
    }
}
