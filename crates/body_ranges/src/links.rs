// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::range::BodyRange;
use crate::utf16::{utf16_len, utf16_offset};

static URL_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bhttps?://[^\s<>]+").unwrap());

/// Characters that end a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] =
    &['.', ',', ';', ':', '!', '?', ')', ']', '\'', '"'];

/// Render-only link ranges for every `http(s)` URL in `text`.
pub fn detect_links<M>(text: &str) -> Vec<BodyRange<M>> {
    URL_CANDIDATE
        .find_iter(text)
        .filter_map(|candidate| {
            let raw = candidate.as_str().trim_end_matches(TRAILING_PUNCTUATION);
            let url = Url::parse(raw).ok()?;
            url.host_str()?;
            Some(BodyRange::link(
                utf16_offset(text, candidate.start()),
                utf16_len(raw),
                raw,
            ))
        })
        .collect()
}
