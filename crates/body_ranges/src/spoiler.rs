// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::BTreeSet;

use crate::collapse::DisplaySegment;
use crate::range::{BodyRange, RangeKind, Style};

/// Merge runs of consecutive segments sharing a spoiler group id into single
/// container segments.
///
/// A container keeps the attributes of the first member, spans the whole run
/// and lists every member (including the first) in `spoiler_children`.
///
/// The container's own `mentions` are the first member's only, relative to
/// that member. Renderers should read mentions from `spoiler_children`, where
/// each member carries its own relative to its own `start`.
pub fn group_spoilers<M: Clone>(
    segments: Vec<DisplaySegment<M>>,
) -> Vec<DisplaySegment<M>> {
    let mut grouped: Vec<DisplaySegment<M>> = Vec::with_capacity(segments.len());
    let mut open_group: Option<u32> = None;

    for segment in segments {
        let group = segment.formatting.spoiler_group_id;
        match (group, open_group) {
            (Some(id), Some(open)) if id == open => {
                if let Some(container) = grouped.last_mut() {
                    container.text.push_str(&segment.text);
                    container.length += segment.length;
                    container
                        .spoiler_children
                        .get_or_insert_with(Vec::new)
                        .push(segment);
                }
            }
            (Some(id), _) => {
                let mut container = segment.clone();
                container.spoiler_children = Some(vec![segment]);
                grouped.push(container);
                open_group = Some(id);
            }
            (None, _) => {
                grouped.push(segment);
                open_group = None;
            }
        }
    }

    grouped
}

/// Give every spoiler without a group id a fresh one, so the pieces of a
/// spoiler split by the tree builder still group back together.
///
/// Fresh ids start one past the largest id already present and never collide
/// with an id in use. Past `u32::MAX` they wrap around to the smallest free id.
pub fn number_spoilers<M>(ranges: Vec<BodyRange<M>>) -> Vec<BodyRange<M>> {
    let mut used: BTreeSet<u32> = ranges
        .iter()
        .filter_map(|r| match r.kind {
            RangeKind::Formatting {
                spoiler_group_id, ..
            } => spoiler_group_id,
            _ => None,
        })
        .collect();
    let mut candidate = used
        .last()
        .and_then(|max| max.checked_add(1))
        .unwrap_or(0);

    ranges
        .into_iter()
        .map(|mut range| {
            if let RangeKind::Formatting {
                style: Style::Spoiler,
                spoiler_group_id: id @ None,
            } = &mut range.kind
            {
                // Ranges are capped per category, so a free id always exists.
                while used.contains(&candidate) {
                    candidate = candidate.wrapping_add(1);
                }
                *id = Some(candidate);
                used.insert(candidate);
            }
            range
        })
        .collect()
}
