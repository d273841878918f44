use crate::storage::window_len;
use crate::{ByteBuffer, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Element type of a homogeneous numeric array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float16,
    Float32,
    Float64,
    /// 64-bit integers. Their values do not mix with the float domain.
    BigInt64,
    BigUint64,
}

impl ElementKind {
    pub const fn byte_size(self) -> usize {
        match self {
            ElementKind::Int8 | ElementKind::Uint8 => 1,
            ElementKind::Int16 | ElementKind::Uint16 | ElementKind::Float16 => 2,
            ElementKind::Int32 | ElementKind::Uint32 | ElementKind::Float32 => 4,
            ElementKind::Float64 | ElementKind::BigInt64 | ElementKind::BigUint64 => 8,
        }
    }

    pub const fn is_wide_integer(self) -> bool {
        matches!(self, ElementKind::BigInt64 | ElementKind::BigUint64)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Int8 => "Int8",
            ElementKind::Uint8 => "Uint8",
            ElementKind::Int16 => "Int16",
            ElementKind::Uint16 => "Uint16",
            ElementKind::Int32 => "Int32",
            ElementKind::Uint32 => "Uint32",
            ElementKind::Float16 => "Float16",
            ElementKind::Float32 => "Float32",
            ElementKind::Float64 => "Float64",
            ElementKind::BigInt64 => "BigInt64",
            ElementKind::BigUint64 => "BigUint64",
        };
        f.write_str(name)
    }
}

/// A primitive that can back a typed numeric array.
pub trait Element: Copy {
    const KIND: ElementKind;

    fn to_f64(self) -> f64;

    /// Read from exactly `KIND.byte_size()` native-order bytes.
    fn read_ne(bytes: &[u8]) -> Self;

    /// Write into exactly `KIND.byte_size()` native-order bytes.
    fn write_ne(self, out: &mut [u8]);
}

macro_rules! impl_element {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const KIND: ElementKind = ElementKind::$kind;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn read_ne(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(raw)
                }

                #[inline]
                fn write_ne(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_element! {
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    f32 => Float32,
    f64 => Float64,
    i64 => BigInt64,
    u64 => BigUint64,
}

/// Anything a half-precision array can be built from or copied out of.
pub trait ArraySource {
    fn element_kind(&self) -> ElementKind;

    /// Number of elements the source currently exposes.
    fn source_len(&self) -> usize;

    /// Every element as an `f64`, failing if the backing memory is detached.
    fn read_values(&self) -> Result<Vec<f64>, StorageError>;

    /// Raw binary16 words, for sources that already hold them.
    fn read_words(&self) -> Option<Result<Vec<u16>, StorageError>> {
        None
    }
}

impl<T: Element> ArraySource for [T] {
    fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    fn source_len(&self) -> usize {
        self.len()
    }

    fn read_values(&self) -> Result<Vec<f64>, StorageError> {
        Ok(self.iter().map(|&v| v.to_f64()).collect())
    }
}

impl<T: Element, const N: usize> ArraySource for [T; N] {
    fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    fn source_len(&self) -> usize {
        N
    }

    fn read_values(&self) -> Result<Vec<f64>, StorageError> {
        self.as_slice().read_values()
    }
}

impl<T: Element> ArraySource for Vec<T> {
    fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    fn source_len(&self) -> usize {
        self.len()
    }

    fn read_values(&self) -> Result<Vec<f64>, StorageError> {
        self.as_slice().read_values()
    }
}

/// A typed numeric window over a [`ByteBuffer`], e.g. `TypedView<i16>`.
#[derive(Debug, Clone)]
pub struct TypedView<T: Element> {
    buffer: ByteBuffer,
    byte_offset: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T: Element> TypedView<T> {
    /// Alias `buffer` at `byte_offset`; the offset must be a multiple of the element size.
    pub fn new(
        buffer: ByteBuffer,
        byte_offset: usize,
        length: Option<usize>,
    ) -> Result<Self, StorageError> {
        if buffer.is_detached() {
            return Err(StorageError::Detached);
        }
        let len = window_len(buffer.byte_len(), byte_offset, T::KIND.byte_size(), length)?;
        Ok(Self {
            buffer,
            byte_offset,
            len,
            _marker: PhantomData,
        })
    }

    /// A view over a fresh buffer holding `values`.
    pub fn from_slice(values: &[T]) -> Self {
        let size = T::KIND.byte_size();
        let mut bytes = vec![0u8; values.len() * size];
        for (chunk, &value) in bytes.chunks_exact_mut(size).zip(values) {
            value.write_ne(chunk);
        }
        Self {
            buffer: ByteBuffer::from_bytes(bytes),
            byte_offset: 0,
            len: values.len(),
            _marker: PhantomData,
        }
    }

    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// Number of elements; 0 once detached.
    pub fn len(&self) -> usize {
        if self.buffer.is_detached() {
            0
        } else {
            self.len
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Result<Option<T>, StorageError> {
        let len = self.len;
        self.buffer.with_bytes(|bytes| {
            (index < len).then(|| {
                let at = self.element_at(index);
                T::read_ne(&bytes[at..at + T::KIND.byte_size()])
            })
        })
    }

    pub fn set(&self, index: usize, value: T) -> Result<bool, StorageError> {
        let len = self.len;
        self.buffer.with_bytes_mut(|bytes| {
            if index >= len {
                return false;
            }
            let at = self.element_at(index);
            value.write_ne(&mut bytes[at..at + T::KIND.byte_size()]);
            true
        })
    }

    /// Byte position of an in-range element.
    fn element_at(&self, index: usize) -> usize {
        self.byte_offset + index * T::KIND.byte_size()
    }
}

impl<T: Element> ArraySource for TypedView<T> {
    fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    fn source_len(&self) -> usize {
        self.len()
    }

    fn read_values(&self) -> Result<Vec<f64>, StorageError> {
        let size = T::KIND.byte_size();
        let start = self.byte_offset;
        let end = start + self.len * size;
        self.buffer.with_bytes(|bytes| {
            bytes[start..end]
                .chunks_exact(size)
                .map(|chunk| T::read_ne(chunk).to_f64())
                .collect()
        })
    }
}
