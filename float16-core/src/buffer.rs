use crate::StorageError;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A shared, detachable byte region.
///
/// Clones are handles to the same region. Once [`detach`](Self::detach) is
/// called, every handle and every view built on it observes a detached,
/// zero-length region and all accesses fail with [`StorageError::Detached`].
///
/// Single-threaded: interior mutability goes through `RefCell`.
#[derive(Clone)]
pub struct ByteBuffer {
    inner: Rc<RefCell<Option<Vec<u8>>>>,
}

impl ByteBuffer {
    /// Zero-filled region of `byte_len` bytes.
    pub fn new(byte_len: usize) -> Self {
        Self::from_bytes(vec![0; byte_len])
    }

    /// Zero-filled region of `byte_len` bytes, failing instead of aborting
    /// when the allocation cannot be made.
    pub fn try_new(byte_len: usize) -> Result<Self, StorageError> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(byte_len).map_err(|_| {
            StorageError::OutOfBounds(format!("cannot allocate {} bytes", byte_len))
        })?;
        bytes.resize(byte_len, 0);
        Ok(Self::from_bytes(bytes))
    }

    /// Take ownership of existing bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Some(bytes))),
        }
    }

    /// Size in bytes; 0 once detached.
    pub fn byte_len(&self) -> usize {
        self.inner.borrow().as_ref().map_or(0, Vec::len)
    }

    pub fn is_detached(&self) -> bool {
        self.inner.borrow().is_none()
    }

    /// Invalidate the region for every handle and hand the bytes back.
    ///
    /// Returns `None` if it was already detached.
    pub fn detach(&self) -> Option<Vec<u8>> {
        let bytes = self.inner.borrow_mut().take();
        if let Some(bytes) = &bytes {
            tracing::debug!(byte_len = bytes.len(), "byte buffer detached");
        }
        bytes
    }

    /// Copy of the current contents.
    pub fn to_vec(&self) -> Result<Vec<u8>, StorageError> {
        self.with_bytes(<[u8]>::to_vec)
    }

    /// Whether both handles refer to the same region.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Run `f` over the live bytes, failing if the region is detached.
    ///
    /// `f` must not re-enter this buffer mutably.
    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> Result<R, StorageError> {
        let guard = self.inner.borrow();
        let bytes = guard.as_deref().ok_or(StorageError::Detached)?;
        Ok(f(bytes))
    }

    /// Mutable counterpart of [`with_bytes`](Self::with_bytes).
    pub fn with_bytes_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> Result<R, StorageError> {
        let mut guard = self.inner.borrow_mut();
        let bytes = guard.as_deref_mut().ok_or(StorageError::Detached)?;
        Ok(f(bytes))
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("byte_len", &self.byte_len())
            .field("detached", &self.is_detached())
            .finish()
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::from_bytes(Vec::new())
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}
