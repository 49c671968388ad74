// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Composition of message body ranges.
//!
//! A message body arrives with a set of possibly-overlapping ranges: mentions,
//! inline formatting and spoilers. This crate turns them into something a UI
//! can paint:
//!
//! 1. [`filter_body_ranges`] validates and caps untrusted wire ranges,
//! 2. [`hydrate_ranges`] resolves mentioned participants,
//! 3. [`RangeTree`] nests overlapping ranges, splitting where needed,
//! 4. [`collapse_tree`] flattens the tree into [`DisplaySegment`]s,
//! 5. [`group_spoilers`] merges runs of the same spoiler.
//!
//! [`display_segments`] chains steps 3 to 5. [`snippet_ranges`] moves ranges
//! onto a search result snippet and [`body_as_plain_text`] degrades a body to
//! a plain string.
//!
//! All offsets are UTF-16 code units. Every function is pure: inputs are not
//! mutated and nothing is shared between calls.

mod collapse;
mod config;
mod display;
mod filter;
mod hydrate;
mod links;
mod plain_text;
mod range;
mod snippet;
mod spoiler;
mod tree;
mod utf16;

pub use crate::collapse::{collapse_tree, DisplaySegment, SegmentFormatting};
pub use crate::config::{
    EngineConfig, SnippetMarkers, ELLIPSIS, MAX_RANGES_PER_CATEGORY,
    SNIPPET_HIGHLIGHT_END, SNIPPET_HIGHLIGHT_START, SNIPPET_TRUNCATION,
    SPOILER_PLACEHOLDER,
};
pub use crate::display::{display_segments, render_message_body};
pub use crate::filter::{filter_body_ranges, filter_body_ranges_with_config};
pub use crate::hydrate::{hydrate_ranges, MentionResolver, ResolvedParticipant};
pub use crate::links::detect_links;
pub use crate::plain_text::{
    body_as_plain_text, body_as_plain_text_with_options, PlainTextOptions,
};
pub use crate::range::{
    BodyRange, HydratedMention, Mention, MentionSpan, RangeKind, RawBodyRange,
    Style,
};
pub use crate::snippet::{
    snippet_ranges, snippet_ranges_with_config, SnippetRanges,
};
pub use crate::spoiler::{group_spoilers, number_spoilers};
pub use crate::tree::{insert_range, RangeTree, RangeTreeError, RangeTreeNode};
