// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Flattening of a range forest into display segments.
//!
//! The output covers every code unit of the text exactly once, in order, with
//! the formatting of all enclosing ranges merged into each segment. Mentions
//! never get a segment of their own; they ride on the next segment emitted at
//! their level, or on the first segment produced by ranges nested under them.

use widestring::{U16Str, U16String};

use crate::range::{MentionSpan, RangeKind, Style};
use crate::tree::{RangeTree, RangeTreeNode};

/// Formatting accumulated from every range enclosing a segment.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SegmentFormatting {
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
    pub spoiler: bool,
    pub strikethrough: bool,
    pub spoiler_group_id: Option<u32>,
    pub url: Option<String>,
    pub highlighted: bool,
}

impl SegmentFormatting {
    /// This formatting with one more range's contribution on top.
    fn merged_with<M>(&self, kind: &RangeKind<M>) -> Self {
        let mut merged = self.clone();
        match kind {
            RangeKind::Formatting {
                style,
                spoiler_group_id,
            } => match style {
                Style::None => {}
                Style::Bold => merged.bold = true,
                Style::Italic => merged.italic = true,
                Style::Monospace => merged.monospace = true,
                Style::Strikethrough => merged.strikethrough = true,
                Style::Spoiler => {
                    merged.spoiler = true;
                    merged.spoiler_group_id = *spoiler_group_id;
                }
            },
            RangeKind::Link { url } => merged.url = Some(url.clone()),
            RangeKind::Highlight => merged.highlighted = true,
            // Mentions are attached to segments, they never format them.
            RangeKind::Mention(_) => {}
        }
        merged
    }
}

/// A flat, fully formatted run of text ready to be painted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplaySegment<M> {
    pub text: String,
    /// Offset in the original text, in UTF-16 code units.
    pub start: usize,
    /// Length in UTF-16 code units.
    pub length: usize,
    pub formatting: SegmentFormatting,
    /// Mentions inside this segment, relative to `start`.
    pub mentions: Vec<MentionSpan<M>>,
    /// Set on spoiler containers built by [`crate::group_spoilers`].
    pub spoiler_children: Option<Vec<DisplaySegment<M>>>,
}

impl<M> DisplaySegment<M> {
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Flatten `tree` laid over `text` into display segments.
pub fn collapse_tree<M: Clone>(
    text: &str,
    tree: &RangeTree<M>,
) -> Vec<DisplaySegment<M>> {
    let text = U16String::from_str(text);
    let mut segments = Vec::new();
    collapse(
        &text,
        tree.nodes(),
        &SegmentFormatting::default(),
        0,
        &mut segments,
    );
    segments
}

/// Append the segments for `text` and its `forest` to `out`. `origin` is the
/// offset of `text` within the original body.
pub(crate) fn collapse<M: Clone>(
    text: &U16Str,
    forest: &[RangeTreeNode<M>],
    inherited: &SegmentFormatting,
    origin: usize,
    out: &mut Vec<DisplaySegment<M>>,
) {
    let len = text.len();
    let mut cursor = 0;
    let mut pending: Vec<MentionSpan<M>> = Vec::new();

    for node in forest {
        let node_start = node.start().min(len);
        let node_end = node.end().min(len);

        if node_start > cursor {
            out.push(segment(
                text,
                cursor,
                node_start,
                inherited.clone(),
                origin,
                std::mem::take(&mut pending),
            ));
            cursor = node_start;
        }

        if let RangeKind::Mention(mention) = &node.range.kind {
            pending.push(MentionSpan {
                start: node.start() - cursor,
                length: node.range.length,
                mention: mention.clone(),
            });
            if node.children.is_empty() || node_start == node_end {
                continue;
            }

            // Formatting nested under a mention still covers its code units.
            // The mention rides on the first segment the children produce.
            let first = out.len();
            collapse(
                slice(text, node_start, node_end),
                &node.children,
                inherited,
                origin + node_start,
                out,
            );
            if let Some(segment) = out.get_mut(first) {
                let mut mentions = std::mem::take(&mut pending);
                mentions.append(&mut segment.mentions);
                segment.mentions = mentions;
            }
            cursor = node_end;
            continue;
        }

        let formatting = inherited.merged_with(&node.range.kind);
        collapse(
            slice(text, node_start, node_end),
            &node.children,
            &formatting,
            origin + node_start,
            out,
        );
        cursor = cursor.max(node_end);
    }

    if cursor < len {
        out.push(segment(
            text,
            cursor,
            len,
            inherited.clone(),
            origin,
            pending,
        ));
    }
}

fn slice(text: &U16Str, start: usize, end: usize) -> &U16Str {
    U16Str::from_slice(&text.as_slice()[start..end])
}

fn segment<M>(
    text: &U16Str,
    start: usize,
    end: usize,
    formatting: SegmentFormatting,
    origin: usize,
    mentions: Vec<MentionSpan<M>>,
) -> DisplaySegment<M> {
    DisplaySegment {
        text: slice(text, start, end).to_string_lossy(),
        start: origin + start,
        length: end - start,
        formatting,
        mentions,
        spoiler_children: None,
    }
}

#[cfg(test)]
mod tests {
    use speculoos::prelude::*;

    use super::*;
    use crate::range::BodyRange;

    fn segments(
        text: &str,
        ranges: Vec<BodyRange<&'static str>>,
    ) -> Vec<DisplaySegment<&'static str>> {
        collapse_tree(text, &RangeTree::build(ranges).unwrap())
    }

    fn texts<M>(segments: &[DisplaySegment<M>]) -> Vec<&str> {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn bold() -> SegmentFormatting {
        SegmentFormatting {
            bold: true,
            ..Default::default()
        }
    }

    #[test]
    fn unformatted_text_is_a_single_segment() {
        let result = segments("hello", vec![]);
        assert_eq!(texts(&result), vec!["hello"]);
        assert_eq!(result[0].formatting, SegmentFormatting::default());
    }

    #[test]
    fn empty_text_has_no_segments() {
        assert_that!(segments("", vec![])).is_empty();
    }

    #[test]
    fn overlapping_bold_and_italic() {
        let result = segments(
            "hello world",
            vec![
                BodyRange::style(0, 5, Style::Bold),
                BodyRange::style(3, 5, Style::Italic),
            ],
        );

        assert_eq!(texts(&result), vec!["hel", "lo", " wo", "rld"]);
        let flags: Vec<(bool, bool)> = result
            .iter()
            .map(|s| (s.formatting.bold, s.formatting.italic))
            .collect();
        assert_eq!(
            flags,
            vec![(true, false), (true, true), (false, true), (false, false)]
        );
    }

    #[test]
    fn segments_are_adjacent_and_cover_the_text() {
        let text = "the quick brown fox jumps";
        let result = segments(
            text,
            vec![
                BodyRange::style(2, 10, Style::Monospace),
                BodyRange::style(4, 3, Style::Strikethrough),
                BodyRange::spoiler(0, 20, 1),
                BodyRange::style(18, 7, Style::Bold),
                BodyRange::link(10, 5, "https://example.org"),
            ],
        );

        assert_eq!(texts(&result).concat(), text);
        assert_eq!(result.first().map(|s| s.start), Some(0));
        for pair in result.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start);
        }
        assert_eq!(result.last().map(|s| s.end()), Some(text.len()));
    }

    #[test]
    fn mention_rides_on_the_following_plain_segment() {
        let result = segments(
            "hi \u{FFFC} there",
            vec![
                BodyRange::mention(3, 1, "alice"),
                BodyRange::style(5, 5, Style::Bold),
            ],
        );

        assert_eq!(texts(&result), vec!["hi ", "\u{FFFC} ", "there"]);
        assert_that!(result[0].mentions).is_empty();
        assert_eq!(
            result[1].mentions,
            vec![MentionSpan {
                start: 0,
                length: 1,
                mention: "alice",
            }]
        );
        assert_eq!(result[1].start, 3);
        assert_eq!(result[2].formatting, bold());
    }

    #[test]
    fn zero_length_ranges_do_not_disturb_pending_mentions() {
        let result = segments(
            "\u{FFFC}hey you",
            vec![
                BodyRange::style(0, 0, Style::Bold),
                BodyRange::mention(0, 1, "dan"),
                BodyRange::style(5, 3, Style::Italic),
            ],
        );

        assert_eq!(texts(&result), vec!["\u{FFFC}hey ", "you"]);
        assert_eq!(result[0].mentions[0].start, 0);
        assert_eq!(result[0].mentions[0].mention, "dan");
    }

    #[test]
    fn trailing_segment_picks_up_leftover_mentions() {
        let result = segments(
            "ab \u{FFFC}",
            vec![
                BodyRange::style(0, 2, Style::Bold),
                BodyRange::mention(3, 1, "bob"),
            ],
        );

        assert_eq!(texts(&result), vec!["ab", " ", "\u{FFFC}"]);
        assert_that!(result[1].mentions).is_empty();
        assert_eq!(result[2].start, 3);
        assert_eq!(result[2].mentions[0].start, 0);
    }

    #[test]
    fn mention_inside_formatting_inherits_it() {
        let result = segments(
            "xx yy\u{FFFC}zz",
            vec![
                BodyRange::style(3, 5, Style::Italic),
                BodyRange::mention(5, 1, "carol"),
            ],
        );

        assert_eq!(texts(&result), vec!["xx ", "yy", "\u{FFFC}zz"]);
        assert!(result[2].formatting.italic);
        assert_eq!(result[2].start, 5);
        assert_eq!(result[2].mentions[0].mention, "carol");
    }

    #[test]
    fn formatting_nested_under_a_mention_is_kept() {
        // Bold arrives after the mention, so it nests under the mention node.
        let result = segments(
            "\u{FFFC}abcd",
            vec![
                BodyRange::mention(0, 1, "erin"),
                BodyRange::style(0, 1, Style::Bold),
            ],
        );

        assert_eq!(texts(&result), vec!["\u{FFFC}", "abcd"]);
        assert_eq!(result[0].formatting, bold());
        assert_eq!(result[0].mentions[0].mention, "erin");
        assert_eq!(result[0].mentions[0].start, 0);
        assert_eq!(result[1].formatting, SegmentFormatting::default());
        assert_that!(result[1].mentions).is_empty();
    }

    #[test]
    fn formatting_overlapping_a_mention_covers_its_code_unit() {
        let result = segments(
            "\u{FFFC}abcd",
            vec![
                BodyRange::mention(0, 1, "erin"),
                BodyRange::style(0, 5, Style::Bold),
            ],
        );

        assert_eq!(texts(&result), vec!["\u{FFFC}", "abcd"]);
        assert!(result.iter().all(|s| s.formatting.bold));
        assert_eq!(result[0].mentions.len(), 1);
    }

    #[test]
    fn link_highlight_and_spoiler_contribute_their_attributes() {
        let result = segments(
            "abcdef",
            vec![
                BodyRange::link(0, 2, "https://matrix.org"),
                BodyRange::highlight(2, 2),
                BodyRange::spoiler(4, 2, 7),
            ],
        );

        assert_eq!(
            result[0].formatting.url.as_deref(),
            Some("https://matrix.org")
        );
        assert!(result[1].formatting.highlighted);
        assert!(result[2].formatting.spoiler);
        assert_eq!(result[2].formatting.spoiler_group_id, Some(7));
    }

    #[test]
    fn none_style_adds_no_flags() {
        let result = segments("abc", vec![BodyRange::style(0, 3, Style::None)]);
        assert_eq!(result[0].formatting, SegmentFormatting::default());
    }

    #[test]
    fn offsets_count_utf16_code_units() {
        // The emoji is two code units.
        let result = segments(
            "a\u{1F600}bc",
            vec![BodyRange::style(1, 2, Style::Bold)],
        );
        assert_eq!(texts(&result), vec!["a", "\u{1F600}", "bc"]);
        assert_eq!(result[2].start, 3);
        assert_eq!(result[1].length, 2);
    }
}
