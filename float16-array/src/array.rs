use crate::species::{Construct, DefaultSpecies, Species};
use crate::ArrayError;
use float16_codec::{decode, encode, BYTES_PER_ELEMENT};
use float16_core::{ArraySource, ByteBuffer, Element, ElementKind, Float16Storage, StorageError};
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// A fixed-length array of half-precision values.
///
/// Values go in and come out as `f64`; storage holds only binary16 words.
/// Mutating methods take `&self`: the words live in a shared
/// [`ByteBuffer`], so views created by [`subarray`](Self::subarray) or
/// [`from_buffer`](Self::from_buffer) observe each other's writes, and
/// callbacks may write to the array they are iterating.
///
/// Not thread-safe; one writer at a time.
pub struct Float16Array {
    pub(crate) storage: Float16Storage,
    species: Option<Rc<dyn Species>>,
}

impl Float16Array {
    pub const BYTES_PER_ELEMENT: usize = BYTES_PER_ELEMENT;

    /// Empty array.
    pub fn new() -> Self {
        Self::from_storage(Float16Storage::default())
    }

    /// Zero-filled array of `len` elements.
    ///
    /// Fails with an out-of-bounds error when `len` elements cannot be
    /// allocated.
    pub fn with_length(len: usize) -> Result<Self, ArrayError> {
        Ok(Self::from_storage(Float16Storage::new(len)?))
    }

    /// Deep copy of another array's words.
    pub fn from_array(other: &Float16Array) -> Result<Self, ArrayError> {
        let words = other.storage.read_all()?;
        Ok(Self::from_storage(Float16Storage::from_words(&words)))
    }

    /// Copy of a typed numeric slice, any width or signedness.
    ///
    /// 64-bit integer slices fail with [`ArrayError::InvalidElementKind`].
    pub fn from_typed<T: Element>(values: &[T]) -> Result<Self, ArrayError> {
        Self::from_source(values)
    }

    /// Encode every value of an iterable.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let words: Vec<u16> = values.into_iter().map(encode).collect();
        Self::from_storage(Float16Storage::from_words(&words))
    }

    /// Encode every value of an iterable after passing it through
    /// `map_fn(value, index)`.
    pub fn from_values_with<I, F>(values: I, mut map_fn: F) -> Self
    where
        I: IntoIterator<Item = f64>,
        F: FnMut(f64, usize) -> f64,
    {
        Self::from_values(values.into_iter().enumerate().map(|(i, v)| map_fn(v, i)))
    }

    /// Array built directly from `values`.
    pub fn of(values: &[f64]) -> Self {
        Self::from_values(values.iter().copied())
    }

    /// Array holding raw binary16 words, bypassing the codec.
    pub fn from_words(words: &[u16]) -> Self {
        Self::from_storage(Float16Storage::from_words(words))
    }

    /// View over a caller's byte region.
    ///
    /// `byte_offset` must be even and the window must fit the region; with no
    /// `length` the rest of the region is used and must hold whole elements.
    pub fn from_buffer(
        buffer: ByteBuffer,
        byte_offset: usize,
        length: Option<usize>,
    ) -> Result<Self, ArrayError> {
        let storage = Float16Storage::alias(buffer, byte_offset, length)?;
        Ok(Self::from_storage(storage))
    }

    /// Build from any [`ArraySource`]. Sources already holding binary16 words
    /// are copied word for word.
    pub fn from_source<S>(source: &S) -> Result<Self, ArrayError>
    where
        S: ArraySource + ?Sized,
    {
        check_element_kind(source.element_kind())?;
        if let Some(words) = source.read_words() {
            return Ok(Self::from_words(&words?));
        }
        Ok(Self::from_values(source.read_values()?))
    }

    /// Build from any [`ArraySource`], passing each element through
    /// `map_fn(value, index)` before it is encoded.
    pub fn from_source_with<S, F>(source: &S, map_fn: F) -> Result<Self, ArrayError>
    where
        S: ArraySource + ?Sized,
        F: FnMut(f64, usize) -> f64,
    {
        check_element_kind(source.element_kind())?;
        Ok(Self::from_values_with(source.read_values()?, map_fn))
    }

    /// Fulfil a construction request the way the default delegate does.
    pub fn construct(request: Construct) -> Result<Self, ArrayError> {
        match request {
            Construct::Length(len) => Self::with_length(len),
            Construct::Values(values) => Ok(Self::from_values(values)),
            Construct::View {
                buffer,
                byte_offset,
                length,
            } => Self::from_buffer(buffer, byte_offset, Some(length)),
        }
    }

    /// Attach a construction delegate used for derived arrays.
    pub fn with_species(mut self, species: Rc<dyn Species>) -> Self {
        self.species = Some(species);
        self
    }

    /// The custom construction delegate, if any.
    pub fn species(&self) -> Option<&Rc<dyn Species>> {
        self.species.as_ref()
    }

    /// Number of elements; 0 once the backing memory is detached.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_detached(&self) -> bool {
        self.storage.is_detached()
    }

    /// Handle to the backing byte region.
    pub fn buffer(&self) -> ByteBuffer {
        self.storage.buffer().clone()
    }

    pub fn byte_offset(&self) -> usize {
        self.storage.byte_offset()
    }

    pub fn byte_length(&self) -> usize {
        self.storage.byte_len()
    }

    /// Copy of the raw binary16 words.
    pub fn to_words(&self) -> Result<Vec<u16>, ArrayError> {
        Ok(self.storage.read_all()?)
    }

    /// Overwrite the leading words with `words`, bypassing the codec.
    pub fn replace_words(&self, words: &[u16]) -> Result<(), ArrayError> {
        Ok(self.storage.write_from(0, words)?)
    }

    /// Every element, decoded.
    pub fn to_vec(&self) -> Result<Vec<f64>, ArrayError> {
        Ok(self.storage.read_all()?.into_iter().map(decode).collect())
    }

    fn from_storage(storage: Float16Storage) -> Self {
        Self {
            storage,
            species: None,
        }
    }

    pub(crate) fn ensure_attached(&self) -> Result<(), ArrayError> {
        if self.storage.is_detached() {
            return Err(StorageError::Detached.into());
        }
        Ok(())
    }

    /// Decoded value at an index known to be in range at call time.
    pub(crate) fn value_at(&self, index: usize) -> Result<f64, ArrayError> {
        Ok(self.storage.get_value(index)?.unwrap_or(f64::NAN))
    }

    /// Resolve the construction delegate for one derived operation.
    pub(crate) fn resolve_species(&self) -> Result<Rc<dyn Species>, ArrayError> {
        let species: Rc<dyn Species> = match &self.species {
            Some(species) => {
                tracing::debug!(?species, "using custom construction delegate");
                Rc::clone(species)
            }
            None => Rc::new(DefaultSpecies),
        };

        let kind = species.element_kind();
        if kind.is_wide_integer() {
            return Err(ArrayError::InvalidElementKind(kind));
        }
        Ok(species)
    }

    /// Build a derived array through `species`, checking it can hold `required`
    /// elements and that a view request came back as a view of that region.
    pub(crate) fn construct_derived(
        species: Rc<dyn Species>,
        request: Construct,
        required: Option<usize>,
    ) -> Result<Float16Array, ArrayError> {
        let expected_view = match &request {
            Construct::View {
                buffer,
                byte_offset,
                ..
            } => Some((buffer.clone(), *byte_offset)),
            _ => None,
        };

        let derived = species.construct(request)?;
        derived.ensure_attached()?;
        if let Some((buffer, byte_offset)) = expected_view {
            if !derived.storage.buffer().ptr_eq(&buffer) {
                return Err(ArrayError::IncompatibleDelegate(
                    "view request answered with an array over another region".to_string(),
                ));
            }
            if derived.byte_offset() != byte_offset {
                return Err(ArrayError::IncompatibleDelegate(format!(
                    "view requested at byte offset {}, got {}",
                    byte_offset,
                    derived.byte_offset()
                )));
            }
        }
        if let Some(required) = required {
            let actual = derived.len();
            if actual < required {
                return Err(ArrayError::DerivedTooSmall { required, actual });
            }
        }
        Ok(derived)
    }
}

/// Whether `value` is a [`Float16Array`].
pub fn is_float16_array(value: &dyn Any) -> bool {
    value.is::<Float16Array>()
}

fn check_element_kind(kind: ElementKind) -> Result<(), ArrayError> {
    if kind.is_wide_integer() {
        return Err(ArrayError::InvalidElementKind(kind));
    }
    Ok(())
}

/// Resolve a relative index (negative counts from the end) into `0..=len`.
pub(crate) fn clamp_relative(index: i64, len: usize) -> usize {
    let len = len as i64;
    let resolved = if index < 0 { len + index } else { index };
    resolved.clamp(0, len) as usize
}

impl Default for Float16Array {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<f64> for Float16Array {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl ArraySource for Float16Array {
    fn element_kind(&self) -> ElementKind {
        ElementKind::Float16
    }

    fn source_len(&self) -> usize {
        self.len()
    }

    fn read_values(&self) -> Result<Vec<f64>, StorageError> {
        Ok(self.storage.read_all()?.into_iter().map(decode).collect())
    }

    fn read_words(&self) -> Option<Result<Vec<u16>, StorageError>> {
        Some(self.storage.read_all())
    }
}

impl fmt::Debug for Float16Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Float16Array");
        match self.to_vec() {
            Ok(values) => s.field("values", &values),
            Err(_) => s.field("detached", &true),
        };
        s.field("byte_offset", &self.byte_offset())
            .field("species", &self.species)
            .finish()
    }
}
