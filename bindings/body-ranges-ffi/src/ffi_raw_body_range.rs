use std::collections::HashMap;

use body_ranges::{RawBodyRange, ResolvedParticipant};

/// A body range as decoded from the wire. Any field may be missing.
#[derive(uniffi::Record, Clone, Debug)]
pub struct FfiRawBodyRange {
    pub start: Option<i32>,
    pub length: Option<i32>,
    pub mention_id: Option<String>,
    /// NONE=0, BOLD=1, ITALIC=2, STRIKETHROUGH=3, MONOSPACE=4, SPOILER=5
    pub style: Option<i32>,
    pub spoiler_group_id: Option<u32>,
}

#[derive(uniffi::Record, Clone, Debug)]
pub struct FfiParticipant {
    pub id: String,
    pub display_title: String,
    pub conversation_id: String,
}

impl From<FfiRawBodyRange> for RawBodyRange {
    fn from(r: FfiRawBodyRange) -> Self {
        Self {
            start: r.start,
            length: r.length,
            mention_id: r.mention_id,
            style: r.style,
            spoiler_group_id: r.spoiler_group_id,
        }
    }
}

/// Index the participants known to the caller by id.
pub(crate) fn directory(
    participants: Vec<FfiParticipant>,
) -> HashMap<String, ResolvedParticipant> {
    participants
        .into_iter()
        .map(|p| {
            (
                p.id.clone(),
                ResolvedParticipant {
                    id: p.id,
                    display_title: p.display_title,
                    conversation_id: p.conversation_id,
                },
            )
        })
        .collect()
}

pub(crate) fn to_core_ranges(raw: Vec<FfiRawBodyRange>) -> Vec<RawBodyRange> {
    raw.into_iter().map(RawBodyRange::from).collect()
}
