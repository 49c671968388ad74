// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Helpers for measuring `str`s in UTF-16 code units, the unit every range
//! offset is expressed in.

pub(crate) fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// The UTF-16 offset of byte index `byte_index` in `s`.
pub(crate) fn utf16_offset(s: &str, byte_index: usize) -> usize {
    utf16_len(&s[..byte_index])
}
