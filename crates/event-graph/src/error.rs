// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for event parsing and graph construction.

use crate::NodeId;

/// Errors that can occur when reading events or building the event graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The trace file could not be read.
    #[error("failed to read trace: {0}")]
    TraceReadError(#[from] std::io::Error),

    /// A line of the trace could not be parsed into an event.
    #[error("malformed event on line {line}: {detail}")]
    MalformedEvent { line: usize, detail: String },

    /// Events are not sorted by second.
    #[error("events out of order at position {position}: second {second} follows second {previous}")]
    UnsortedEvents {
        position: usize,
        previous: u32,
        second: u32,
    },

    /// The event stream contains no events.
    #[error("event stream is empty")]
    EmptyStream,

    /// More events than node ids can address.
    #[error("event stream has {count} events; at most {max} are supported")]
    TooManyEvents { count: usize, max: NodeId },

    /// A node id does not exist in the arena.
    #[error("unknown node id {0}")]
    UnknownNode(NodeId),

    /// The successors of a node group are not a contiguous id range.
    #[error("successors of nodes {from}..{to} are not contiguous")]
    ScatteredSuccessors { from: NodeId, to: NodeId },
}
