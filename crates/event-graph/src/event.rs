// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Events and the trend counters accumulated on them.
//!
//! An [`Event`] is one line of an input trace: an integer second followed
//! by an opaque payload. The planner only ever looks at the second; the
//! payload is carried verbatim for reporting.

use crate::{GraphError, NodeId};
use std::fmt;

/// One timestamped input record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Event {
    /// Clock value in whole seconds.
    pub second: u32,
    /// Everything after the first comma, kept verbatim.
    pub payload: String,
}

impl Event {
    /// Creates an event.
    pub fn new(second: u32, payload: impl Into<String>) -> Self {
        Self {
            second,
            payload: payload.into(),
        }
    }

    /// Parses an event from a trace line of the form `second[,payload]`.
    ///
    /// `line_no` is the 1-based line number, used only for error messages.
    pub fn parse(line: &str, line_no: usize) -> Result<Self, GraphError> {
        let line = line.trim();
        let (sec_str, payload) = match line.split_once(',') {
            Some((sec, rest)) => (sec.trim(), rest.trim()),
            None => (line, ""),
        };

        let second = sec_str.parse::<u32>().map_err(|e| GraphError::MalformedEvent {
            line: line_no,
            detail: format!("invalid second '{sec_str}': {e}"),
        })?;

        Ok(Self::new(second, payload))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.payload.is_empty() {
            write!(f, "{}", self.second)
        } else {
            write!(f, "{},{}", self.second, self.payload)
        }
    }
}

/// A trend detected by the downstream trend engine, ending at some node.
///
/// Only its size is relevant to planning.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct EventTrend {
    events: Vec<NodeId>,
}

impl EventTrend {
    /// Creates a trend over the given nodes, in trend order.
    pub fn new(events: Vec<NodeId>) -> Self {
        Self { events }
    }

    /// Number of events in the trend.
    pub fn count(&self) -> usize {
        self.events.len()
    }

    /// Nodes in the trend.
    pub fn events(&self) -> &[NodeId] {
        &self.events
    }
}
