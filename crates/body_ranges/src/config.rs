// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

/// Upper bound on accepted ranges per category (per style, and mentions).
pub const MAX_RANGES_PER_CATEGORY: usize = 250;

/// Opens a matched keyword inside a search snippet.
pub const SNIPPET_HIGHLIGHT_START: &str = "<<left>>";
/// Closes a matched keyword inside a search snippet.
pub const SNIPPET_HIGHLIGHT_END: &str = "<<right>>";
/// Marks elided text at either end of a search snippet.
pub const SNIPPET_TRUNCATION: &str = "<<truncation>>";

pub const ELLIPSIS: &str = "...";

/// Four U+25A0 BLACK SQUARE.
pub const SPOILER_PLACEHOLDER: &str = "\u{25A0}\u{25A0}\u{25A0}\u{25A0}";

/// Tunables shared by every entry point. The short-form functions use
/// [`EngineConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub max_ranges_per_category: usize,
    pub snippet_markers: SnippetMarkers,
    /// Rendered in place of a truncation marker.
    pub ellipsis: String,
    /// Replaces each spoiler when degrading to plain text.
    pub spoiler_placeholder: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_ranges_per_category: MAX_RANGES_PER_CATEGORY,
            snippet_markers: SnippetMarkers::default(),
            ellipsis: ELLIPSIS.to_owned(),
            spoiler_placeholder: SPOILER_PLACEHOLDER.to_owned(),
        }
    }
}

/// Sentinels injected by the full-text search index. Callers guarantee
/// they never occur in ordinary message text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnippetMarkers {
    pub highlight_start: String,
    pub highlight_end: String,
    pub truncation: String,
}

impl Default for SnippetMarkers {
    fn default() -> Self {
        Self {
            highlight_start: SNIPPET_HIGHLIGHT_START.to_owned(),
            highlight_end: SNIPPET_HIGHLIGHT_END.to_owned(),
            truncation: SNIPPET_TRUNCATION.to_owned(),
        }
    }
}
