//! Font size statistics for a whole document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::SpanRecord;

/// Dominant and maximum font size of a document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeProfile {
    /// Most common font size (body text)
    pub body_size: f32,
    /// Largest font size (title)
    pub max_size: f32,
}

impl SizeProfile {
    /// Compute the profile of a span list.
    ///
    /// The body size is the mode of all sizes. Equally frequent sizes are
    /// resolved in favor of the one seen first in the stream. Non-finite
    /// sizes are ignored; a list with no finite size is empty.
    pub fn from_spans(spans: &[SpanRecord]) -> Result<Self> {
        // bit pattern -> (first index, count); sizes compare exactly
        let mut histogram: HashMap<u32, (usize, usize)> = HashMap::new();
        let mut max_size = f32::NEG_INFINITY;

        for (i, span) in spans.iter().enumerate() {
            if !span.font_size.is_finite() {
                continue;
            }
            let entry = histogram.entry(size_key(span.font_size)).or_insert((i, 0));
            entry.1 += 1;
            if span.font_size > max_size {
                max_size = span.font_size;
            }
        }

        let (first_index, _) = histogram
            .values()
            .copied()
            .max_by(|(ia, ca), (ib, cb)| ca.cmp(cb).then(ib.cmp(ia)))
            .ok_or(Error::EmptyDocument)?;
        let body_size = spans[first_index].font_size;

        log::debug!(
            "Size profile over {} spans: body={} max={} ({} distinct sizes)",
            spans.len(),
            body_size,
            max_size,
            histogram.len()
        );

        Ok(Self {
            body_size,
            max_size,
        })
    }

    /// Whether a size is the document maximum.
    pub fn is_max(&self, font_size: f32) -> bool {
        font_size == self.max_size
    }
}

/// Hash key for a size; folds -0.0 into 0.0 so equal sizes share a bucket.
fn size_key(size: f32) -> u32 {
    if size == 0.0 {
        0.0f32.to_bits()
    } else {
        size.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(sizes: &[f32]) -> Vec<SpanRecord> {
        sizes
            .iter()
            .map(|&s| SpanRecord::sized("text", s))
            .collect()
    }

    #[test]
    fn test_empty_is_error() {
        let result = SizeProfile::from_spans(&[]);
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_mode_and_max() {
        let profile = SizeProfile::from_spans(&spans(&[24.0, 10.0, 10.0, 14.0, 10.0])).unwrap();
        assert_eq!(profile.body_size, 10.0);
        assert_eq!(profile.max_size, 24.0);
        assert!(profile.is_max(24.0));
        assert!(!profile.is_max(14.0));
    }

    #[test]
    fn test_tie_prefers_first_seen() {
        let profile = SizeProfile::from_spans(&spans(&[12.0, 9.0, 9.0, 12.0])).unwrap();
        assert_eq!(profile.body_size, 12.0);

        let profile = SizeProfile::from_spans(&spans(&[9.0, 12.0, 12.0, 9.0])).unwrap();
        assert_eq!(profile.body_size, 9.0);
    }

    #[test]
    fn test_max_never_below_body() {
        let cases: [&[f32]; 5] = [
            &[10.0],
            &[10.0, 10.0, 8.0],
            &[8.0, 10.0, 10.0],
            &[1.5, 99.0, 1.5, 42.0],
            &[7.0, 7.0, 7.0, 7.0],
        ];
        for sizes in cases {
            let profile = SizeProfile::from_spans(&spans(sizes)).unwrap();
            assert!(profile.max_size >= profile.body_size, "sizes {:?}", sizes);
        }
    }

    #[test]
    fn test_non_finite_sizes_are_ignored() {
        let profile =
            SizeProfile::from_spans(&spans(&[f32::NAN, 10.0, f32::INFINITY, 10.0, 14.0])).unwrap();
        assert_eq!(profile.body_size, 10.0);
        assert_eq!(profile.max_size, 14.0);

        let result = SizeProfile::from_spans(&spans(&[f32::NAN]));
        assert!(matches!(result, Err(Error::EmptyDocument)));
        let result = SizeProfile::from_spans(&spans(&[f32::NEG_INFINITY, f32::NAN]));
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }
}
