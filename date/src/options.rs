// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Options controlling how formal date strings are parsed.

use crate::simple::UtcOffset;

/// Parser configuration.
///
/// A time of day written without an offset is taken to be at
/// [`assumed_offset`](Self::assumed_offset). The default is UTC, which keeps
/// parsing independent of the host it runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Offset applied to times written without one.
    pub assumed_offset: UtcOffset,
}

impl ParseOptions {
    /// Options assuming `offset` for times written without one.
    #[must_use]
    pub const fn with_offset(offset: UtcOffset) -> Self {
        Self {
            assumed_offset: offset,
        }
    }

    /// Options assuming the current offset of the host's system time zone.
    ///
    /// Offsets finer than a minute are truncated.
    #[cfg(feature = "jiff")]
    #[must_use]
    pub fn local() -> Self {
        let seconds = jiff::Zoned::now().offset().seconds();
        let minutes = i16::try_from(seconds / 60).unwrap_or_default();
        let offset = UtcOffset::from_minutes(minutes).unwrap_or_else(|| {
            tracing::warn!(seconds, "host offset out of range, assuming UTC");
            UtcOffset::UTC
        });
        tracing::debug!(%offset, "assuming host offset");
        Self::with_offset(offset)
    }
}
