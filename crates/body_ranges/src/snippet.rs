// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Mapping of body ranges onto search result snippets.
//!
//! The search index returns a substring of the message body with the matched
//! keywords wrapped in highlight markers and a truncation marker at either end
//! where text was elided. This module works out where that substring sits in
//! the body, moves the body's ranges into snippet coordinates and adds a
//! [`RangeKind::Highlight`](crate::RangeKind::Highlight) range for every
//! matched keyword.
//!
//! The rendered snippet shows an ellipsis in place of each truncation marker.
//! A leading ellipsis pushes every translated range right by its length; a
//! trailing one needs no adjustment because ranges are clipped to the end of
//! the located substring. The two adjustments are independent.

use regex::Regex;

use crate::config::EngineConfig;
use crate::range::BodyRange;
use crate::utf16::{utf16_len, utf16_offset};

/// A snippet ready for display together with every range that applies to it,
/// in display coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnippetRanges<M> {
    pub snippet: String,
    /// Translated body ranges followed by synthesized highlights. Order is
    /// not meaningful; build a tree from them.
    pub ranges: Vec<BodyRange<M>>,
}

pub fn snippet_ranges<M: Clone>(
    snippet: &str,
    body: &str,
    ranges: &[BodyRange<M>],
) -> SnippetRanges<M> {
    snippet_ranges_with_config(snippet, body, ranges, &EngineConfig::default())
}

pub fn snippet_ranges_with_config<M: Clone>(
    snippet: &str,
    body: &str,
    ranges: &[BodyRange<M>],
    config: &EngineConfig,
) -> SnippetRanges<M> {
    let markers = &config.snippet_markers;

    let without_highlights = snippet
        .replace(&markers.highlight_start, "")
        .replace(&markers.highlight_end, "");
    let (left_truncated, rest) =
        match without_highlights.strip_prefix(markers.truncation.as_str()) {
            Some(rest) => (true, rest),
            None => (false, without_highlights.as_str()),
        };
    let literal = rest.replace(&markers.truncation, "");

    let located = locate(&literal, body);
    debug_assert!(
        located.is_some(),
        "snippet {literal:?} not found in body {body:?}"
    );
    let snippet_start = located.unwrap_or_else(|| {
        tracing::error!(
            target: "body_ranges::snippet",
            snippet = literal.as_str(),
            "search snippet not found in message body"
        );
        0
    });
    let snippet_end = snippet_start + utf16_len(&literal);
    let lead = if left_truncated {
        utf16_len(&config.ellipsis)
    } else {
        0
    };

    let mut mapped: Vec<BodyRange<M>> = ranges
        .iter()
        .filter(|r| r.start < snippet_end && r.end() > snippet_start)
        .map(|r| {
            let start = r.start.max(snippet_start) - snippet_start + lead;
            let end = r.end().min(snippet_end) - snippet_start + lead;
            r.with_bounds(start, end)
        })
        .collect();

    let with_ellipses = snippet.replace(&markers.truncation, &config.ellipsis);
    mapped.extend(highlights(&with_ellipses, config));

    let snippet = with_ellipses
        .replace(&markers.highlight_start, "")
        .replace(&markers.highlight_end, "");

    SnippetRanges {
        snippet,
        ranges: mapped,
    }
}

/// UTF-16 offset of the first exact occurrence of `literal` in `body`.
fn locate(literal: &str, body: &str) -> Option<usize> {
    let pattern = Regex::new(&regex::escape(literal)).ok()?;
    pattern.find(body).map(|m| utf16_offset(body, m.start()))
}

/// Highlight ranges for every marked keyword in `marked`, in the coordinates
/// of `marked` once its highlight markers are removed.
fn highlights<M>(marked: &str, config: &EngineConfig) -> Vec<BodyRange<M>> {
    let markers = &config.snippet_markers;
    let pattern = format!(
        "(?s){}(.*?){}",
        regex::escape(&markers.highlight_start),
        regex::escape(&markers.highlight_end)
    );
    let Ok(pattern) = Regex::new(&pattern) else {
        return Vec::new();
    };
    let marker_len =
        utf16_len(&markers.highlight_start) + utf16_len(&markers.highlight_end);

    let mut consumed = 0;
    let mut found = Vec::new();
    for captures in pattern.captures_iter(marked) {
        let (Some(whole), Some(keyword)) = (captures.get(0), captures.get(1))
        else {
            continue;
        };
        let start = utf16_offset(marked, whole.start()) - consumed;
        found.push(BodyRange::highlight(start, utf16_len(keyword.as_str())));
        consumed += marker_len;
    }
    found
}
