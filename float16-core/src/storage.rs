use crate::{ByteBuffer, StorageError};
use float16_codec::BYTES_PER_ELEMENT;

/// A window of binary16 words over a [`ByteBuffer`].
///
/// Words are stored in native byte order. Every access checks detachment
/// first; nothing about the region's validity is cached between calls.
///
/// Cloning yields another handle onto the same words.
#[derive(Debug, Clone, Default)]
pub struct Float16Storage {
    buffer: ByteBuffer,
    byte_offset: usize,
    len: usize,
}

impl Float16Storage {
    /// Zero-initialized private storage of `len` words.
    ///
    /// Fails with [`StorageError::OutOfBounds`] when `len` words cannot be
    /// allocated.
    pub fn new(len: usize) -> Result<Self, StorageError> {
        let byte_len = len.checked_mul(BYTES_PER_ELEMENT).ok_or_else(|| {
            StorageError::OutOfBounds(format!("{} elements exceed the address space", len))
        })?;
        Ok(Self {
            buffer: ByteBuffer::try_new(byte_len)?,
            byte_offset: 0,
            len,
        })
    }

    /// Private storage holding `words` as-is.
    pub fn from_words(words: &[u16]) -> Self {
        let mut bytes = Vec::with_capacity(words.len() * BYTES_PER_ELEMENT);
        for word in words {
            bytes.extend_from_slice(&word.to_ne_bytes());
        }
        Self {
            buffer: ByteBuffer::from_bytes(bytes),
            byte_offset: 0,
            len: words.len(),
        }
    }

    /// Alias `buffer` starting at `byte_offset`.
    ///
    /// With `length == None` the view spans the rest of the region, which must
    /// then be a whole number of words.
    pub fn alias(
        buffer: ByteBuffer,
        byte_offset: usize,
        length: Option<usize>,
    ) -> Result<Self, StorageError> {
        if buffer.is_detached() {
            return Err(StorageError::Detached);
        }
        let byte_len = buffer.byte_len();
        let len = window_len(byte_len, byte_offset, BYTES_PER_ELEMENT, length)?;

        tracing::debug!(byte_offset, len, byte_len, "aliasing binary16 storage");
        Ok(Self {
            buffer,
            byte_offset,
            len,
        })
    }

    /// Number of words; 0 once the region is detached.
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

    pub fn is_detached(&self) -> bool {
        self.buffer.is_detached()
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    pub fn byte_len(&self) -> usize {
        self.len() * BYTES_PER_ELEMENT
    }

    /// Handle to the backing region.
    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// Word at `index`, or `None` past the end.
    pub fn read(&self, index: usize) -> Result<Option<u16>, StorageError> {
        let len = self.len;
        let offset = self.byte_offset;
        self.buffer.with_bytes(|bytes| {
            (index < len).then(|| word_at(bytes, offset, index))
        })
    }

    /// Store `word` at `index`. Returns `false` (and stores nothing) past the end.
    pub fn write(&self, index: usize, word: u16) -> Result<bool, StorageError> {
        let len = self.len;
        let offset = self.byte_offset;
        self.buffer.with_bytes_mut(|bytes| {
            if index >= len {
                return false;
            }
            put_word(bytes, offset, index, word);
            true
        })
    }

    /// Decoded value at `index`.
    pub fn get_value(&self, index: usize) -> Result<Option<f64>, StorageError> {
        Ok(self.read(index)?.map(float16_codec::decode))
    }

    /// Encode and store `value` at `index`; past the end is a no-op.
    pub fn set_value(&self, index: usize, value: f64) -> Result<bool, StorageError> {
        self.write(index, float16_codec::encode(value))
    }

    pub fn read_all(&self) -> Result<Vec<u16>, StorageError> {
        self.read_range(0, self.len)
    }

    /// Words in `start..end`, clamped to the view.
    pub fn read_range(&self, start: usize, end: usize) -> Result<Vec<u16>, StorageError> {
        let end = end.min(self.len);
        let start = start.min(end);
        let offset = self.byte_offset;
        self.buffer.with_bytes(|bytes| {
            (start..end).map(|i| word_at(bytes, offset, i)).collect()
        })
    }

    /// Overwrite words starting at `start` with `words`.
    ///
    /// Fails without writing anything if the run would pass the end.
    pub fn write_from(&self, start: usize, words: &[u16]) -> Result<(), StorageError> {
        match start.checked_add(words.len()) {
            Some(end) if end <= self.len => {}
            _ => {
                return Err(StorageError::OutOfBounds(format!(
                    "{} words at offset {} exceed length {}",
                    words.len(),
                    start,
                    self.len
                )))
            }
        }
        let offset = self.byte_offset;
        tracing::trace!(start, count = words.len(), "bulk word copy");
        self.buffer.with_bytes_mut(|bytes| {
            for (i, &word) in words.iter().enumerate() {
                put_word(bytes, offset, start + i, word);
            }
        })
    }

    /// Store `word` in every slot of `start..end`, clamped to the view.
    pub fn fill(&self, start: usize, end: usize, word: u16) -> Result<(), StorageError> {
        let end = end.min(self.len);
        let offset = self.byte_offset;
        self.buffer.with_bytes_mut(|bytes| {
            for i in start.min(end)..end {
                put_word(bytes, offset, i, word);
            }
        })
    }
}

/// Element count of a window of `elem_size`-byte elements starting at
/// `byte_offset` in a region of `byte_len` bytes.
pub(crate) fn window_len(
    byte_len: usize,
    byte_offset: usize,
    elem_size: usize,
    length: Option<usize>,
) -> Result<usize, StorageError> {
    if byte_offset % elem_size != 0 {
        return Err(StorageError::OutOfBounds(format!(
            "byte offset {} is not a multiple of {}",
            byte_offset, elem_size
        )));
    }

    match length {
        Some(len) => {
            let end = len
                .checked_mul(elem_size)
                .and_then(|bytes| bytes.checked_add(byte_offset));
            match end {
                Some(end) if end <= byte_len => Ok(len),
                _ => Err(StorageError::OutOfBounds(format!(
                    "{} elements at byte offset {} exceed buffer of {} bytes",
                    len, byte_offset, byte_len
                ))),
            }
        }
        None => {
            if byte_offset > byte_len {
                return Err(StorageError::OutOfBounds(format!(
                    "byte offset {} exceeds buffer of {} bytes",
                    byte_offset, byte_len
                )));
            }
            let rest = byte_len - byte_offset;
            if rest % elem_size != 0 {
                return Err(StorageError::OutOfBounds(format!(
                    "buffer of {} bytes leaves a partial element after byte offset {}",
                    byte_len, byte_offset
                )));
            }
            Ok(rest / elem_size)
        }
    }
}

fn word_at(bytes: &[u8], byte_offset: usize, index: usize) -> u16 {
    let at = byte_offset + index * BYTES_PER_ELEMENT;
    u16::from_ne_bytes([bytes[at], bytes[at + 1]])
}

fn put_word(bytes: &mut [u8], byte_offset: usize, index: usize, word: u16) {
    let at = byte_offset + index * BYTES_PER_ELEMENT;
    bytes[at..at + BYTES_PER_ELEMENT].copy_from_slice(&word.to_ne_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_storage() {
        let storage = Float16Storage::new(3).unwrap();
        assert_eq!(storage.len(), 3);
        assert_eq!(storage.read_all().unwrap(), vec![0, 0, 0]);

        assert!(storage.write(1, 0x3c00).unwrap());
        assert!(!storage.write(3, 0x3c00).unwrap());
        assert_eq!(storage.read(1).unwrap(), Some(0x3c00));
        assert_eq!(storage.read(3).unwrap(), None);
        assert_eq!(storage.get_value(1).unwrap(), Some(1.0));
    }

    #[test]
    fn test_alias_bounds() {
        let buffer = ByteBuffer::new(8);

        let whole = Float16Storage::alias(buffer.clone(), 0, None).unwrap();
        assert_eq!(whole.len(), 4);

        let tail = Float16Storage::alias(buffer.clone(), 4, None).unwrap();
        assert_eq!(tail.len(), 2);

        let exact = Float16Storage::alias(buffer.clone(), 2, Some(3)).unwrap();
        assert_eq!(exact.len(), 3);

        assert!(matches!(
            Float16Storage::alias(buffer.clone(), 1, None),
            Err(StorageError::OutOfBounds(_))
        ));
        assert!(matches!(
            Float16Storage::alias(buffer.clone(), 4, Some(3)),
            Err(StorageError::OutOfBounds(_))
        ));
        assert!(matches!(
            Float16Storage::alias(buffer.clone(), 10, None),
            Err(StorageError::OutOfBounds(_))
        ));
        assert!(matches!(
            Float16Storage::alias(buffer, 0, Some(usize::MAX)),
            Err(StorageError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_odd_offset_over_four_bytes() {
        let buffer = ByteBuffer::new(4);
        assert!(matches!(
            Float16Storage::alias(buffer, 3, None),
            Err(StorageError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_odd_remaining_bytes() {
        let buffer = ByteBuffer::new(5);
        assert!(matches!(
            Float16Storage::alias(buffer.clone(), 0, None),
            Err(StorageError::OutOfBounds(_))
        ));
        assert_eq!(Float16Storage::alias(buffer, 0, Some(2)).unwrap().len(), 2);
    }

    #[test]
    fn test_aliases_share_words() {
        let storage = Float16Storage::from_words(&[1, 2, 3, 4]);
        let view = Float16Storage::alias(storage.buffer().clone(), 2, Some(2)).unwrap();
        assert_eq!(view.read_all().unwrap(), vec![2, 3]);
        assert_eq!(view.byte_offset(), 2);

        view.write(0, 9).unwrap();
        assert_eq!(storage.read_all().unwrap(), vec![1, 9, 3, 4]);
    }

    #[test]
    fn test_oversized_storage_fails() {
        assert!(matches!(
            Float16Storage::new(usize::MAX),
            Err(StorageError::OutOfBounds(_))
        ));
        assert!(matches!(
            Float16Storage::new(usize::MAX / 2),
            Err(StorageError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_detached_access_fails() {
        let storage = Float16Storage::from_words(&[1, 2]);
        let view = Float16Storage::alias(storage.buffer().clone(), 0, None).unwrap();
        storage.buffer().detach();

        assert!(view.is_detached());
        assert_eq!(view.len(), 0);
        assert_eq!(view.read(0), Err(StorageError::Detached));
        assert_eq!(view.write(0, 1), Err(StorageError::Detached));
        assert_eq!(view.read_all(), Err(StorageError::Detached));
        assert_eq!(view.fill(0, 2, 0), Err(StorageError::Detached));
        assert_eq!(
            Float16Storage::alias(storage.buffer().clone(), 0, None).err(),
            Some(StorageError::Detached)
        );
    }

    #[test]
    fn test_write_from_checks_bounds_first() {
        let storage = Float16Storage::from_words(&[0, 0, 0, 0]);
        assert!(storage.write_from(2, &[7, 7, 7]).is_err());
        assert_eq!(storage.read_all().unwrap(), vec![0, 0, 0, 0]);

        storage.write_from(1, &[5, 6, 7]).unwrap();
        assert_eq!(storage.read_all().unwrap(), vec![0, 5, 6, 7]);
    }

    #[test]
    fn test_fill_clamps() {
        let storage = Float16Storage::new(4).unwrap();
        storage.fill(2, 10, 0x3c00).unwrap();
        assert_eq!(storage.read_all().unwrap(), vec![0, 0, 0x3c00, 0x3c00]);
        storage.fill(3, 1, 0xffff).unwrap();
        assert_eq!(storage.read_all().unwrap(), vec![0, 0, 0x3c00, 0x3c00]);
    }
}
