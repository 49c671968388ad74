// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::HashMap;

use crate::range::{BodyRange, HydratedMention, Mention};

/// What a participant lookup returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedParticipant {
    pub id: String,
    pub display_title: String,
    pub conversation_id: String,
}

/// Looks participants up by id. Implemented by the host application.
pub trait MentionResolver {
    fn resolve(&self, participant_id: &str) -> Option<ResolvedParticipant>;
}

impl MentionResolver for HashMap<String, ResolvedParticipant> {
    fn resolve(&self, participant_id: &str) -> Option<ResolvedParticipant> {
        self.get(participant_id).cloned()
    }
}

/// Attach display names to every mention. Mentions that do not resolve are
/// omitted; all other ranges pass through untouched.
pub fn hydrate_ranges<R>(
    ranges: Vec<BodyRange<Mention>>,
    resolver: &R,
) -> Vec<BodyRange<HydratedMention>>
where
    R: MentionResolver + ?Sized,
{
    ranges
        .into_iter()
        .filter_map(|range| {
            range.try_map_mention(|mention| {
                let Some(participant) = resolver.resolve(&mention.participant_id)
                else {
                    tracing::debug!(
                        target: "body_ranges::hydrate",
                        participant_id = mention.participant_id.as_str(),
                        "omitting mention of unknown participant"
                    );
                    return None;
                };
                Some(HydratedMention {
                    participant_id: mention.participant_id,
                    display_name: participant.display_title,
                    conversation_id: participant.conversation_id,
                })
            })
        })
        .collect()
}
