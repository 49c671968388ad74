// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Degrading an annotated body to a plain string, for surfaces that cannot
//! render ranges (notification previews and the like).

use widestring::U16String;

use crate::config::EngineConfig;
use crate::range::{BodyRange, HydratedMention, RangeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlainTextOptions {
    /// Replace each mention with `@` and the participant's display name.
    pub replace_mentions: bool,
    /// Mask each spoiler with the configured placeholder.
    pub replace_spoilers: bool,
}

impl Default for PlainTextOptions {
    fn default() -> Self {
        Self {
            replace_mentions: true,
            replace_spoilers: true,
        }
    }
}

pub fn body_as_plain_text(
    text: &str,
    ranges: &[BodyRange<HydratedMention>],
) -> String {
    body_as_plain_text_with_options(
        text,
        ranges,
        PlainTextOptions::default(),
        &EngineConfig::default(),
    )
}

/// Spoilers are replaced first, last to first, so that earlier offsets stay
/// valid. Mentions swallowed by a spoiler disappear with it; mentions after a
/// spoiler are shifted by the difference in width. Remaining mentions are then
/// replaced, again last to first.
pub fn body_as_plain_text_with_options(
    text: &str,
    ranges: &[BodyRange<HydratedMention>],
    options: PlainTextOptions,
    config: &EngineConfig,
) -> String {
    let mut units: Vec<u16> = text.encode_utf16().collect();
    let mut mentions: Vec<(usize, usize, &HydratedMention)> = ranges
        .iter()
        .filter_map(|r| match &r.kind {
            RangeKind::Mention(mention) => Some((r.start, r.length, mention)),
            _ => None,
        })
        .collect();

    if options.replace_spoilers {
        let placeholder: Vec<u16> =
            config.spoiler_placeholder.encode_utf16().collect();

        for (start, end) in spoiler_spans(ranges).into_iter().rev() {
            let end = end.min(units.len());
            if start >= end {
                continue;
            }
            units.splice(start..end, placeholder.iter().copied());

            mentions.retain(|(m_start, ..)| !(start..end).contains(m_start));
            for (m_start, ..) in mentions.iter_mut() {
                if *m_start >= end {
                    *m_start = *m_start - (end - start) + placeholder.len();
                }
            }
        }
    }

    if options.replace_mentions {
        mentions.sort_by(|a, b| b.0.cmp(&a.0));
        for (start, length, mention) in mentions {
            if start > units.len() {
                continue;
            }
            let end = (start + length).min(units.len());
            let replacement = format!("@{}", mention.display_name);
            units.splice(start..end, replacement.encode_utf16());
        }
    }

    U16String::from_vec(units).to_string_lossy()
}

/// Spoiler extents sorted by start, with overlapping ones merged.
fn spoiler_spans<M>(ranges: &[BodyRange<M>]) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = ranges
        .iter()
        .filter(|r| r.is_spoiler())
        .map(|r| (r.start, r.end()))
        .collect();
    spans.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start < last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Style;

    fn mention(start: usize, name: &str) -> BodyRange<HydratedMention> {
        BodyRange::mention(
            start,
            1,
            HydratedMention {
                participant_id: format!("aci-{name}"),
                display_name: name.to_owned(),
                conversation_id: format!("conversation-{name}"),
            },
        )
    }

    fn spoiler(start: usize, length: usize) -> BodyRange<HydratedMention> {
        BodyRange::style(start, length, Style::Spoiler)
    }

    #[test]
    fn mention_is_replaced_with_its_display_name() {
        assert_eq!(
            body_as_plain_text("a \u{FFFC} d", &[mention(2, "Bob")]),
            "a @Bob d"
        );
    }

    #[test]
    fn several_mentions_are_all_replaced() {
        assert_eq!(
            body_as_plain_text(
                "\u{FFFC} and \u{FFFC}!",
                &[mention(0, "Ann"), mention(6, "Cy")]
            ),
            "@Ann and @Cy!"
        );
    }

    #[test]
    fn spoiler_is_masked() {
        assert_eq!(
            body_as_plain_text("secret: hidden text", &[spoiler(8, 6)]),
            "secret: \u{25A0}\u{25A0}\u{25A0}\u{25A0} text"
        );
    }

    #[test]
    fn mention_inside_a_spoiler_is_dropped() {
        assert_eq!(
            body_as_plain_text(
                "hi \u{FFFC} there",
                &[spoiler(3, 7), mention(3, "Eve")]
            ),
            "hi \u{25A0}\u{25A0}\u{25A0}\u{25A0}"
        );
    }

    #[test]
    fn mention_after_a_spoiler_is_shifted() {
        // The spoiler shrinks from 10 code units to 4.
        assert_eq!(
            body_as_plain_text(
                "0123456789 \u{FFFC}",
                &[spoiler(0, 10), mention(11, "Max")]
            ),
            "\u{25A0}\u{25A0}\u{25A0}\u{25A0} @Max"
        );
        // ...and grows from 1 to 4.
        assert_eq!(
            body_as_plain_text("x \u{FFFC}", &[spoiler(0, 1), mention(2, "Max")]),
            "\u{25A0}\u{25A0}\u{25A0}\u{25A0} @Max"
        );
    }

    #[test]
    fn overlapping_spoilers_are_masked_once() {
        assert_eq!(
            body_as_plain_text("abcdefgh!", &[spoiler(0, 5), spoiler(3, 5)]),
            "\u{25A0}\u{25A0}\u{25A0}\u{25A0}!"
        );
    }

    #[test]
    fn options_can_leave_either_kind_alone() {
        let ranges = [spoiler(0, 2), mention(3, "Zed")];
        let text = "ab \u{FFFC}";

        let only_mentions = PlainTextOptions {
            replace_spoilers: false,
            ..Default::default()
        };
        assert_eq!(
            body_as_plain_text_with_options(
                text,
                &ranges,
                only_mentions,
                &EngineConfig::default()
            ),
            "ab @Zed"
        );

        let only_spoilers = PlainTextOptions {
            replace_mentions: false,
            ..Default::default()
        };
        assert_eq!(
            body_as_plain_text_with_options(
                text,
                &ranges,
                only_spoilers,
                &EngineConfig::default()
            ),
            "\u{25A0}\u{25A0}\u{25A0}\u{25A0} \u{FFFC}"
        );
    }

    #[test]
    fn non_spoiler_formatting_is_ignored() {
        let ranges = [BodyRange::style(0, 4, Style::Bold)];
        assert_eq!(body_as_plain_text("bold", &ranges), "bold");
    }
}
