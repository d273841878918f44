//! Copies, aliasing views and stringification.

use crate::array::clamp_relative;
use crate::format::{format_locale, format_number};
use crate::species::Construct;
use crate::{ArrayError, Float16Array};
use float16_codec::BYTES_PER_ELEMENT;
use std::fmt;

impl Float16Array {
    /// Independent copy of `start..end` (relative, clamped), built by the species.
    pub fn slice(&self, start: i64, end: Option<i64>) -> Result<Float16Array, ArrayError> {
        self.ensure_attached()?;
        let len = self.len();
        let from = clamp_relative(start, len);
        let to = end.map_or(len, |end| clamp_relative(end, len));
        let count = to.saturating_sub(from);

        let species = self.resolve_species()?;
        let sliced = Self::construct_derived(species, Construct::Length(count), Some(count))?;
        if count > 0 {
            let words = self.storage.read_range(from, from + count)?;
            sliced.storage.write_from(0, &words)?;
        }
        Ok(sliced)
    }

    /// View of `start..end` (relative, clamped) sharing this array's memory,
    /// built by the species.
    pub fn subarray(&self, start: i64, end: Option<i64>) -> Result<Float16Array, ArrayError> {
        self.ensure_attached()?;
        let len = self.len();
        let from = clamp_relative(start, len);
        let to = end.map_or(len, |end| clamp_relative(end, len));

        let request = Construct::View {
            buffer: self.buffer(),
            byte_offset: self.byte_offset() + from * BYTES_PER_ELEMENT,
            length: to.saturating_sub(from),
        };
        let species = self.resolve_species()?;
        Self::construct_derived(species, request, None)
    }

    /// Values rendered with [`format_number`] and joined by `separator` (`,` by default).
    pub fn join(&self, separator: Option<&str>) -> Result<String, ArrayError> {
        let rendered: Vec<String> = self.to_vec()?.into_iter().map(format_number).collect();
        Ok(rendered.join(separator.unwrap_or(",")))
    }

    /// Values rendered with [`format_locale`] and joined by `,`.
    pub fn to_locale_string(&self) -> Result<String, ArrayError> {
        self.to_locale_string_with(format_locale)
    }

    /// Values rendered by a caller formatter and joined by `,`.
    pub fn to_locale_string_with<F>(&self, format: F) -> Result<String, ArrayError>
    where
        F: FnMut(f64) -> String,
    {
        let rendered: Vec<String> = self.to_vec()?.into_iter().map(format).collect();
        Ok(rendered.join(","))
    }
}

/// Same text as `join(None)`; a detached array renders as nothing.
impl fmt::Display for Float16Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.join(None) {
            Ok(joined) => f.write_str(&joined),
            Err(_) => Ok(()),
        }
    }
}
