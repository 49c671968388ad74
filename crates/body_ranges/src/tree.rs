// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Nesting of possibly-overlapping ranges into a forest.
//!
//! Ranges are inserted one at a time. Whenever a new range partially overlaps
//! an existing node it is split at the node's boundaries, so the forest always
//! satisfies:
//!
//! 1. siblings are sorted ascending by start and never overlap,
//! 2. every child lies within `[0, parent.length)`,
//! 3. child offsets are relative to the parent's start.
//!
//! Touching boundaries never count as overlap.

use thiserror::Error;

use crate::range::BodyRange;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeTreeNode<M> {
    pub range: BodyRange<M>,
    pub children: Vec<RangeTreeNode<M>>,
}

impl<M> RangeTreeNode<M> {
    pub fn leaf(range: BodyRange<M>) -> Self {
        Self {
            range,
            children: Vec::new(),
        }
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end()
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RangeTreeError {
    #[error(
        "range [{start}, {end}) has no placement against node [{node_start}, {node_end})"
    )]
    Unplaceable {
        start: usize,
        end: usize,
        node_start: usize,
        node_end: usize,
    },
}

/// How an incoming range sits relative to a sibling node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placement {
    /// Ends at or before the node starts.
    Before,
    /// Starts at or after the node ends.
    After,
    /// Starts before and ends after the node.
    Surrounds,
    /// Inside the node, bounds inclusive.
    Within,
    /// Starts before the node and ends inside it.
    OverlapsStart,
    /// Starts inside the node and ends after it.
    OverlapsEnd,
}

fn placement(
    start: usize,
    end: usize,
    node_start: usize,
    node_end: usize,
) -> Option<Placement> {
    if end <= node_start {
        Some(Placement::Before)
    } else if start >= node_end {
        Some(Placement::After)
    } else if start < node_start && end > node_end {
        Some(Placement::Surrounds)
    } else if start >= node_start && end <= node_end {
        Some(Placement::Within)
    } else if start < node_start && end > node_start && end <= node_end {
        Some(Placement::OverlapsStart)
    } else if start >= node_start && start < node_end && end > node_end {
        Some(Placement::OverlapsEnd)
    } else {
        None
    }
}

/// Insert `range` into `forest`, returning the new forest.
///
/// The range may end up split into several nodes at different depths but its
/// whole extent stays covered.
pub fn insert_range<M: Clone>(
    range: BodyRange<M>,
    mut forest: Vec<RangeTreeNode<M>>,
) -> Result<Vec<RangeTreeNode<M>>, RangeTreeError> {
    insert_from(&mut forest, 0, range)?;
    Ok(forest)
}

fn insert_from<M: Clone>(
    forest: &mut Vec<RangeTreeNode<M>>,
    mut index: usize,
    mut range: BodyRange<M>,
) -> Result<(), RangeTreeError> {
    loop {
        let Some(current) = forest.get(index) else {
            forest.push(RangeTreeNode::leaf(range));
            return Ok(());
        };

        let (start, end) = (range.start, range.end());
        let (node_start, node_end) = (current.start(), current.end());
        let Some(placement) = placement(start, end, node_start, node_end) else {
            return Err(RangeTreeError::Unplaceable {
                start,
                end,
                node_start,
                node_end,
            });
        };
        tracing::trace!(
            target: "body_ranges::tree",
            start,
            end,
            node_start,
            node_end,
            ?placement,
            "placing range"
        );

        match placement {
            Placement::Before => {
                forest.insert(index, RangeTreeNode::leaf(range));
                return Ok(());
            }
            Placement::After => {
                index += 1;
            }
            Placement::Surrounds => {
                let prefix = range.with_bounds(start, node_start);
                let middle = range.with_bounds(0, node_end - node_start);
                let suffix = range.with_bounds(node_end, end);

                insert_from(&mut forest[index].children, 0, middle)?;
                forest.insert(index, RangeTreeNode::leaf(prefix));
                // Skip the prefix and the node itself.
                index += 2;
                range = suffix;
            }
            Placement::Within => {
                let rebased =
                    range.with_bounds(start - node_start, end - node_start);
                return insert_from(&mut forest[index].children, 0, rebased);
            }
            Placement::OverlapsStart => {
                let prefix = range.with_bounds(start, node_start);
                let suffix = range.with_bounds(0, end - node_start);

                insert_from(&mut forest[index].children, 0, suffix)?;
                forest.insert(index, RangeTreeNode::leaf(prefix));
                return Ok(());
            }
            Placement::OverlapsEnd => {
                let prefix = range
                    .with_bounds(start - node_start, node_end - node_start);
                let suffix = range.with_bounds(node_end, end);

                insert_from(&mut forest[index].children, 0, prefix)?;
                index += 1;
                range = suffix;
            }
        }
    }
}

/// A forest of [`RangeTreeNode`]s built from a set of ranges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeTree<M> {
    nodes: Vec<RangeTreeNode<M>>,
}

impl<M> Default for RangeTree<M> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<M: Clone> RangeTree<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert every range in order.
    pub fn build(
        ranges: impl IntoIterator<Item = BodyRange<M>>,
    ) -> Result<Self, RangeTreeError> {
        ranges
            .into_iter()
            .try_fold(Self::new(), |tree, range| tree.insert(range))
    }

    pub fn insert(self, range: BodyRange<M>) -> Result<Self, RangeTreeError> {
        let nodes = insert_range(range, self.nodes)?;
        let tree = Self { nodes };
        #[cfg(feature = "assert-invariants")]
        tree.assert_invariants();
        Ok(tree)
    }

    pub fn nodes(&self) -> &[RangeTreeNode<M>] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<RangeTreeNode<M>> {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Panics if the forest is not sorted, overlaps, or has a child outside
    /// its parent.
    pub fn assert_invariants(&self) {
        assert_level(&self.nodes, None);
    }
}

fn assert_level<M>(nodes: &[RangeTreeNode<M>], parent_length: Option<usize>) {
    for pair in nodes.windows(2) {
        assert!(
            pair[0].end() <= pair[1].start(),
            "siblings [{}, {}) and [{}, {}) overlap or are out of order",
            pair[0].start(),
            pair[0].end(),
            pair[1].start(),
            pair[1].end(),
        );
    }
    for node in nodes {
        if let Some(parent_length) = parent_length {
            assert!(
                node.end() <= parent_length,
                "child [{}, {}) escapes parent of length {parent_length}",
                node.start(),
                node.end(),
            );
        }
        assert_level(&node.children, Some(node.range.length));
    }
}
