// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use body_ranges::{
    DisplaySegment, HydratedMention, MentionSpan, SegmentFormatting,
};

#[derive(uniffi::Record, Clone, Debug)]
pub struct FfiSegmentFormatting {
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
    pub spoiler: bool,
    pub strikethrough: bool,
    pub spoiler_group_id: Option<u32>,
    pub url: Option<String>,
    pub highlighted: bool,
}

#[derive(uniffi::Record, Clone, Debug)]
pub struct FfiMentionSpan {
    /// Relative to the start of the enclosing run.
    pub start_utf16: u32,
    pub length_utf16: u32,
    pub participant_id: String,
    pub display_name: String,
    pub conversation_id: String,
}

/// One flat run of text. Also used for the members of a spoiler group.
#[derive(uniffi::Record, Clone, Debug)]
pub struct FfiSegmentRun {
    pub text: String,
    pub start_utf16: u32,
    pub length_utf16: u32,
    pub formatting: FfiSegmentFormatting,
    pub mentions: Vec<FfiMentionSpan>,
}

#[derive(uniffi::Record, Clone, Debug)]
pub struct FfiDisplaySegment {
    /// For a spoiler group, spans every member.
    pub run: FfiSegmentRun,
    pub spoiler_children: Option<Vec<FfiSegmentRun>>,
}

#[derive(uniffi::Record, Clone, Debug)]
pub struct FfiSnippet {
    pub snippet: String,
    pub segments: Vec<FfiDisplaySegment>,
}

// ─── Conversions ─────────────────────────────────────────────────────────────

/// Offsets past `u32::MAX` saturate rather than wrap.
fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl From<&SegmentFormatting> for FfiSegmentFormatting {
    fn from(f: &SegmentFormatting) -> Self {
        Self {
            bold: f.bold,
            italic: f.italic,
            monospace: f.monospace,
            spoiler: f.spoiler,
            strikethrough: f.strikethrough,
            spoiler_group_id: f.spoiler_group_id,
            url: f.url.clone(),
            highlighted: f.highlighted,
        }
    }
}

impl From<&MentionSpan<HydratedMention>> for FfiMentionSpan {
    fn from(m: &MentionSpan<HydratedMention>) -> Self {
        Self {
            start_utf16: to_u32(m.start),
            length_utf16: to_u32(m.length),
            participant_id: m.mention.participant_id.clone(),
            display_name: m.mention.display_name.clone(),
            conversation_id: m.mention.conversation_id.clone(),
        }
    }
}

impl From<&DisplaySegment<HydratedMention>> for FfiSegmentRun {
    fn from(s: &DisplaySegment<HydratedMention>) -> Self {
        Self {
            text: s.text.clone(),
            start_utf16: to_u32(s.start),
            length_utf16: to_u32(s.length),
            formatting: (&s.formatting).into(),
            mentions: s.mentions.iter().map(FfiMentionSpan::from).collect(),
        }
    }
}

impl From<&DisplaySegment<HydratedMention>> for FfiDisplaySegment {
    fn from(s: &DisplaySegment<HydratedMention>) -> Self {
        Self {
            run: s.into(),
            spoiler_children: s
                .spoiler_children
                .as_ref()
                .map(|children| children.iter().map(FfiSegmentRun::from).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_that_fit_are_kept() {
        assert_eq!(to_u32(0), 0);
        assert_eq!(to_u32(u32::MAX as usize), u32::MAX);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_offsets_saturate() {
        assert_eq!(to_u32(u32::MAX as usize + 1), u32::MAX);
        assert_eq!(to_u32(usize::MAX), u32::MAX);
    }
}
