//! Primitive wire codec: typed, bounds-checked field tables.
//!
//! Account layouts are described as tables of named `Field`/`TextField`
//! constants instead of offset arithmetic scattered through constructors,
//! so a record's byte layout is reviewable as data. Every read and write is
//! bounds-checked; an out-of-range access is a [`DecodeError`], never a
//! silent zero.

use std::marker::PhantomData;

use solana_sdk::pubkey::Pubkey;

use crate::core::error::DecodeError;

/// A value with a fixed wire width and little-endian encoding.
pub trait FieldCodec: Sized {
    const WIDTH: usize;

    /// Decode from exactly `WIDTH` bytes.
    fn decode(bytes: &[u8]) -> Self;

    /// Encode into exactly `WIDTH` bytes.
    fn encode(&self, out: &mut [u8]);
}

macro_rules! impl_le_codec {
    ($($ty:ty),*) => {
        $(impl FieldCodec for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();

            fn decode(bytes: &[u8]) -> Self {
                <$ty>::from_le_bytes(bytes.try_into().expect("width checked by Field"))
            }

            fn encode(&self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_le_bytes());
            }
        })*
    };
}

impl_le_codec!(u8, i8, u32, u64, i64, f64);

impl FieldCodec for Pubkey {
    const WIDTH: usize = 32;

    fn decode(bytes: &[u8]) -> Self {
        Pubkey::new_from_array(bytes.try_into().expect("width checked by Field"))
    }

    fn encode(&self, out: &mut [u8]) {
        out.copy_from_slice(self.as_ref());
    }
}

/// One named fixed-offset field in a record layout.
#[derive(Clone, Copy, Debug)]
pub struct Field<T> {
    pub name: &'static str,
    pub offset: usize,
    marker: PhantomData<T>,
}

impl<T: FieldCodec> Field<T> {
    pub const fn new(name: &'static str, offset: usize) -> Self {
        Self {
            name,
            offset,
            marker: PhantomData,
        }
    }

    fn range(&self, len: usize) -> Result<std::ops::Range<usize>, DecodeError> {
        let end = self
            .offset
            .checked_add(T::WIDTH)
            .filter(|end| *end <= len)
            .ok_or(DecodeError::OutOfBounds {
                field: self.name,
                offset: self.offset,
                need: T::WIDTH,
                len,
            })?;
        Ok(self.offset..end)
    }

    pub fn read(&self, buf: &[u8]) -> Result<T, DecodeError> {
        let range = self.range(buf.len())?;
        Ok(T::decode(&buf[range]))
    }

    pub fn write(&self, buf: &mut [u8], value: &T) -> Result<(), DecodeError> {
        let range = self.range(buf.len())?;
        value.encode(&mut buf[range]);
        Ok(())
    }
}

/// A fixed-width text field, right-padded with zero bytes.
///
/// Bytes are single-byte characters; reading stops at the first zero byte
/// or the declared width. Writing left-aligns the text, zero-fills the
/// remainder, and truncates text longer than the field.
#[derive(Clone, Copy, Debug)]
pub struct TextField {
    pub name: &'static str,
    pub offset: usize,
    pub max_len: usize,
}

impl TextField {
    pub const fn new(name: &'static str, offset: usize, max_len: usize) -> Self {
        Self {
            name,
            offset,
            max_len,
        }
    }

    fn range(&self, len: usize) -> Result<std::ops::Range<usize>, DecodeError> {
        let end = self
            .offset
            .checked_add(self.max_len)
            .filter(|end| *end <= len)
            .ok_or(DecodeError::OutOfBounds {
                field: self.name,
                offset: self.offset,
                need: self.max_len,
                len,
            })?;
        Ok(self.offset..end)
    }

    pub fn read(&self, buf: &[u8]) -> Result<String, DecodeError> {
        let range = self.range(buf.len())?;
        Ok(read_zero_terminated(&buf[range]))
    }

    pub fn write(&self, buf: &mut [u8], text: &str) -> Result<(), DecodeError> {
        let range = self.range(buf.len())?;
        let slice = &mut buf[range];
        slice.fill(0);
        for (dst, src) in slice.iter_mut().zip(text.bytes()) {
            *dst = src;
        }
        Ok(())
    }
}

/// Read single-byte characters up to the first zero byte or the end of the
/// slice, whichever comes first.
pub fn read_zero_terminated(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}
