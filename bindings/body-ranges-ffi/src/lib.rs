// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

uniffi::setup_scaffolding!();

mod ffi_body_ranges;
mod ffi_display_segment;
mod ffi_error;
mod ffi_raw_body_range;

pub use crate::ffi_body_ranges::{
    body_as_plain_text, display_segments, snippet_segments,
};
pub use crate::ffi_display_segment::{
    FfiDisplaySegment, FfiMentionSpan, FfiSegmentFormatting, FfiSegmentRun,
    FfiSnippet,
};
pub use crate::ffi_error::BodyRangeError;
pub use crate::ffi_raw_body_range::{FfiParticipant, FfiRawBodyRange};
