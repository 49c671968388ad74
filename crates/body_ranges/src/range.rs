// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Body range data model.
//!
//! A [`BodyRange`] is a half-open interval `[start, start + length)` over the
//! UTF-16 code units of a message body, tagged with a [`RangeKind`]. The
//! mention payload is a type parameter so the same machinery can carry
//! unresolved [`Mention`]s straight off the wire or [`HydratedMention`]s once
//! display names are known.

use strum_macros::{AsRefStr, Display, EnumIter, FromRepr};

/// Inline formatting styles, numbered as they are on the wire.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, FromRepr,
)]
#[repr(i32)]
#[strum(serialize_all = "lowercase")]
pub enum Style {
    /// An explicit no-op style. Still counted and capped like the others.
    None = 0,
    Bold = 1,
    Italic = 2,
    Strikethrough = 3,
    Monospace = 4,
    Spoiler = 5,
}

/// A mention as decoded from the wire: only the participant id is known.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mention {
    pub participant_id: String,
}

impl Mention {
    pub fn new(participant_id: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
        }
    }
}

/// A mention whose participant has been resolved. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HydratedMention {
    pub participant_id: String,
    pub display_name: String,
    pub conversation_id: String,
}

/// What a range means.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RangeKind<M = Mention> {
    Mention(M),
    Formatting {
        style: Style,
        spoiler_group_id: Option<u32>,
    },
    /// Render-only. Never produced from wire input.
    Link { url: String },
    /// Synthesized for search snippets only.
    Highlight,
}

/// A half-open interval over UTF-16 code units with a semantic kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodyRange<M = Mention> {
    pub start: usize,
    pub length: usize,
    pub kind: RangeKind<M>,
}

impl<M> BodyRange<M> {
    pub fn new(start: usize, length: usize, kind: RangeKind<M>) -> Self {
        Self {
            start,
            length,
            kind,
        }
    }

    pub fn mention(start: usize, length: usize, mention: M) -> Self {
        Self::new(start, length, RangeKind::Mention(mention))
    }

    pub fn style(start: usize, length: usize, style: Style) -> Self {
        Self::new(
            start,
            length,
            RangeKind::Formatting {
                style,
                spoiler_group_id: None,
            },
        )
    }

    pub fn spoiler(start: usize, length: usize, group_id: u32) -> Self {
        Self::new(
            start,
            length,
            RangeKind::Formatting {
                style: Style::Spoiler,
                spoiler_group_id: Some(group_id),
            },
        )
    }

    pub fn link(start: usize, length: usize, url: impl Into<String>) -> Self {
        Self::new(start, length, RangeKind::Link { url: url.into() })
    }

    pub fn highlight(start: usize, length: usize) -> Self {
        Self::new(start, length, RangeKind::Highlight)
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_mention(&self) -> bool {
        matches!(self.kind, RangeKind::Mention(_))
    }

    pub fn is_spoiler(&self) -> bool {
        matches!(
            self.kind,
            RangeKind::Formatting {
                style: Style::Spoiler,
                ..
            }
        )
    }

    /// Convert the mention payload, leaving every other kind untouched.
    /// Returning `None` from `f` drops the range.
    pub fn try_map_mention<N>(
        self,
        f: impl FnOnce(M) -> Option<N>,
    ) -> Option<BodyRange<N>> {
        let kind = match self.kind {
            RangeKind::Mention(m) => RangeKind::Mention(f(m)?),
            RangeKind::Formatting {
                style,
                spoiler_group_id,
            } => RangeKind::Formatting {
                style,
                spoiler_group_id,
            },
            RangeKind::Link { url } => RangeKind::Link { url },
            RangeKind::Highlight => RangeKind::Highlight,
        };
        Some(BodyRange::new(self.start, self.length, kind))
    }
}

impl<M: Clone> BodyRange<M> {
    /// A copy of this range covering `[start, end)` instead.
    pub(crate) fn with_bounds(&self, start: usize, end: usize) -> Self {
        Self::new(start, end - start, self.kind.clone())
    }
}

/// A mention positioned relative to the display segment that carries it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentionSpan<M> {
    pub start: usize,
    pub length: usize,
    pub mention: M,
}

/// A range exactly as the message decoder hands it over. Every field may be
/// missing or out of range; see [`crate::filter_body_ranges`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawBodyRange {
    pub start: Option<i32>,
    pub length: Option<i32>,
    pub mention_id: Option<String>,
    pub style: Option<i32>,
    pub spoiler_group_id: Option<u32>,
}
