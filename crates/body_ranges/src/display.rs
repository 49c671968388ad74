// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The full display pipeline: ranges in, render-ready segments out.

use crate::collapse::{collapse_tree, DisplaySegment};
use crate::config::EngineConfig;
use crate::filter::filter_body_ranges_with_config;
use crate::hydrate::{hydrate_ranges, MentionResolver};
use crate::links::detect_links;
use crate::range::{BodyRange, HydratedMention, RawBodyRange};
use crate::spoiler::{group_spoilers, number_spoilers};
use crate::tree::{RangeTree, RangeTreeError};
use crate::utf16::utf16_len;

/// Nest, flatten and spoiler-group `ranges` over `text`.
///
/// Ranges running past the end of the text are clipped; ranges starting past
/// it are dropped. Spoilers without a group id are numbered first. Mentions are
/// inserted after every other range.
pub fn display_segments<M: Clone>(
    text: &str,
    ranges: Vec<BodyRange<M>>,
) -> Result<Vec<DisplaySegment<M>>, RangeTreeError> {
    let ranges = number_spoilers(clip_to_text(ranges, utf16_len(text)));
    // Mentions go in last so they end up as leaves under any formatting,
    // whatever order the ranges arrived in.
    let (mentions, others): (Vec<_>, Vec<_>) =
        ranges.into_iter().partition(|r| r.is_mention());
    let tree = RangeTree::build(others.into_iter().chain(mentions))?;
    Ok(group_spoilers(collapse_tree(text, &tree)))
}

/// Everything a renderer needs from a decoded message: filters the wire
/// ranges, resolves mentions, adds detected links and builds the segments.
pub fn render_message_body<R>(
    text: &str,
    raw_ranges: &[RawBodyRange],
    resolver: &R,
    config: &EngineConfig,
) -> Result<Vec<DisplaySegment<HydratedMention>>, RangeTreeError>
where
    R: MentionResolver + ?Sized,
{
    let filtered = filter_body_ranges_with_config(raw_ranges, config);
    let mut ranges = hydrate_ranges(filtered, resolver);
    ranges.extend(detect_links(text));
    display_segments(text, ranges)
}

fn clip_to_text<M>(ranges: Vec<BodyRange<M>>, text_len: usize) -> Vec<BodyRange<M>> {
    ranges
        .into_iter()
        .filter_map(|mut range| {
            if range.start > text_len {
                tracing::warn!(
                    target: "body_ranges::display",
                    start = range.start,
                    text_len,
                    "dropping range that starts past the end of the text"
                );
                return None;
            }
            if range.end() > text_len {
                tracing::warn!(
                    target: "body_ranges::display",
                    start = range.start,
                    length = range.length,
                    text_len,
                    "clipping range that runs past the end of the text"
                );
                range.length = text_len - range.start;
            }
            Some(range)
        })
        .collect()
}
