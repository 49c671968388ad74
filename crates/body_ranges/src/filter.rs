// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Validation of untrusted wire ranges.
//!
//! Every [`RawBodyRange`] is checked in input order. Malformed or unknown
//! entries are dropped with a warning; the rest are classified into a
//! category (mentions, or one category per [`Style`]) and each category keeps
//! only its first `max_ranges_per_category` members.

use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::range::{BodyRange, Mention, RangeKind, RawBodyRange, Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Category {
    Mention,
    Formatting(Style),
}

/// Filter raw ranges with the default cap.
pub fn filter_body_ranges(raw: &[RawBodyRange]) -> Vec<BodyRange<Mention>> {
    filter_body_ranges_with_config(raw, &EngineConfig::default())
}

pub fn filter_body_ranges_with_config(
    raw: &[RawBodyRange],
    config: &EngineConfig,
) -> Vec<BodyRange<Mention>> {
    let mut counts: HashMap<Category, usize> = HashMap::new();
    let mut dropped: HashMap<Category, usize> = HashMap::new();
    let mut filtered = Vec::with_capacity(raw.len());

    for (index, candidate) in raw.iter().enumerate() {
        let Some((start, length)) = validated_bounds(index, candidate) else {
            continue;
        };
        let Some((category, kind)) = classify(index, candidate) else {
            continue;
        };

        let count = counts.entry(category).or_default();
        *count += 1;
        if *count > config.max_ranges_per_category {
            *dropped.entry(category).or_default() += 1;
            continue;
        }

        filtered.push(BodyRange::new(start, length, kind));
    }

    if !dropped.is_empty() {
        tracing::debug!(
            target: "body_ranges::filter",
            cap = config.max_ranges_per_category,
            dropped = ?dropped,
            "dropped ranges over the per-category cap"
        );
    }

    filtered
}

fn validated_bounds(
    index: usize,
    candidate: &RawBodyRange,
) -> Option<(usize, usize)> {
    let start = candidate.start.and_then(|s| usize::try_from(s).ok());
    let length = candidate.length.and_then(|l| usize::try_from(l).ok());
    match (start, length) {
        (Some(start), Some(length)) => Some((start, length)),
        _ => {
            tracing::warn!(
                target: "body_ranges::filter",
                index,
                start = ?candidate.start,
                length = ?candidate.length,
                "dropping range with invalid start or length"
            );
            None
        }
    }
}

fn classify(
    index: usize,
    candidate: &RawBodyRange,
) -> Option<(Category, RangeKind<Mention>)> {
    if let Some(id) = candidate.mention_id.as_deref().filter(|id| !id.is_empty())
    {
        return Some((Category::Mention, RangeKind::Mention(Mention::new(id))));
    }

    let Some(raw_style) = candidate.style else {
        tracing::warn!(
            target: "body_ranges::filter",
            index,
            "dropping range that is neither a mention nor formatting"
        );
        return None;
    };
    let Some(style) = Style::from_repr(raw_style) else {
        tracing::warn!(
            target: "body_ranges::filter",
            index,
            style = raw_style,
            "dropping range with unknown style"
        );
        return None;
    };

    // Group ids only mean something on spoilers.
    let spoiler_group_id = match style {
        Style::Spoiler => candidate.spoiler_group_id,
        _ => None,
    };
    Some((
        Category::Formatting(style),
        RangeKind::Formatting {
            style,
            spoiler_group_id,
        },
    ))
}
