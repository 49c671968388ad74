// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use body_ranges::{EngineConfig, PlainTextOptions};

use crate::ffi_display_segment::{FfiDisplaySegment, FfiSnippet};
use crate::ffi_error::BodyRangeError;
use crate::ffi_raw_body_range::{
    directory, to_core_ranges, FfiParticipant, FfiRawBodyRange,
};

/// Render-ready segments for a message body.
#[uniffi::export]
pub fn display_segments(
    text: String,
    ranges: Vec<FfiRawBodyRange>,
    participants: Vec<FfiParticipant>,
) -> Result<Vec<FfiDisplaySegment>, BodyRangeError> {
    let segments = body_ranges::render_message_body(
        &text,
        &to_core_ranges(ranges),
        &directory(participants),
        &EngineConfig::default(),
    )?;
    Ok(segments.iter().map(FfiDisplaySegment::from).collect())
}

/// Render-ready segments for a search result snippet of `body`.
#[uniffi::export]
pub fn snippet_segments(
    snippet: String,
    body: String,
    ranges: Vec<FfiRawBodyRange>,
    participants: Vec<FfiParticipant>,
) -> Result<FfiSnippet, BodyRangeError> {
    let filtered = body_ranges::filter_body_ranges(&to_core_ranges(ranges));
    let hydrated =
        body_ranges::hydrate_ranges(filtered, &directory(participants));
    let mapped = body_ranges::snippet_ranges(&snippet, &body, &hydrated);
    let segments =
        body_ranges::display_segments(&mapped.snippet, mapped.ranges)?;
    Ok(FfiSnippet {
        snippet: mapped.snippet,
        segments: segments.iter().map(FfiDisplaySegment::from).collect(),
    })
}

/// The body as a plain string, for notification previews.
#[uniffi::export]
pub fn body_as_plain_text(
    text: String,
    ranges: Vec<FfiRawBodyRange>,
    participants: Vec<FfiParticipant>,
    replace_mentions: bool,
    replace_spoilers: bool,
) -> String {
    let filtered = body_ranges::filter_body_ranges(&to_core_ranges(ranges));
    let hydrated =
        body_ranges::hydrate_ranges(filtered, &directory(participants));
    body_ranges::body_as_plain_text_with_options(
        &text,
        &hydrated,
        PlainTextOptions {
            replace_mentions,
            replace_spoilers,
        },
        &EngineConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> Vec<FfiParticipant> {
        vec![FfiParticipant {
            id: "aci-bob".to_owned(),
            display_title: "Bob".to_owned(),
            conversation_id: "c-bob".to_owned(),
        }]
    }

    fn mention_at(start: i32) -> FfiRawBodyRange {
        FfiRawBodyRange {
            start: Some(start),
            length: Some(1),
            mention_id: Some("aci-bob".to_owned()),
            style: None,
            spoiler_group_id: None,
        }
    }

    #[test]
    fn segments_carry_hydrated_mentions() {
        let segments =
            display_segments("hey \u{FFFC}".to_owned(), vec![mention_at(4)], bob())
                .unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].run.mentions[0].display_name, "Bob");
        assert_eq!(segments[1].run.start_utf16, 4);
    }

    #[test]
    fn plain_text_respects_the_flags() {
        let text = "hey \u{FFFC}".to_owned();
        assert_eq!(
            body_as_plain_text(text.clone(), vec![mention_at(4)], bob(), true, true),
            "hey @Bob"
        );
        assert_eq!(
            body_as_plain_text(text.clone(), vec![mention_at(4)], bob(), false, true),
            text
        );
    }

    #[test]
    fn snippet_segments_include_highlights() {
        let snippet = snippet_segments(
            "say <<left>>hey<<right>>".to_owned(),
            "say hey".to_owned(),
            vec![],
            vec![],
        )
        .unwrap();
        assert_eq!(snippet.snippet, "say hey");
        assert!(snippet.segments[1].run.formatting.highlighted);
    }
}
