// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Event streams: the complete, time-ordered input of the planner.
//!
//! # Type-State Pattern
//!
//! ```text
//! EventStream<Loaded>     — events read, order not yet checked.
//!       │  .validate()
//!       ▼
//! EventStream<Validated>  — non-empty, sorted by second, addressable by NodeId.
//! ```
//!
//! Only a validated stream can be turned into a [`crate::NodeArena`], so an
//! unsorted trace can never reach the cost model.

use crate::{Event, GraphError, NodeId};
use std::fmt;
use std::io::BufRead;
use std::path::Path;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: events have been read but not checked.
#[derive(Debug, Clone)]
pub struct Loaded;

/// Marker: events are non-empty and sorted by second.
#[derive(Debug, Clone)]
pub struct Validated;

/// Sealed trait for stream states.
pub trait StreamState: fmt::Debug + Clone {}
impl StreamState for Loaded {}
impl StreamState for Validated {}

// ── EventStream ────────────────────────────────────────────────────

/// An ordered sequence of events.
#[derive(Debug, Clone)]
pub struct EventStream<S: StreamState = Loaded> {
    /// Human-readable source name (file name or `"<memory>"`).
    pub name: String,
    events: Vec<Event>,
    _state: std::marker::PhantomData<S>,
}

// ── Loaded state ───────────────────────────────────────────────────

impl EventStream<Loaded> {
    /// Wraps already-parsed events.
    pub fn new(name: String, events: Vec<Event>) -> Self {
        Self {
            name,
            events,
            _state: std::marker::PhantomData,
        }
    }

    /// Convenience constructor from bare seconds, with empty payloads.
    pub fn from_seconds(name: &str, seconds: &[u32]) -> Self {
        let events = seconds.iter().map(|&s| Event::new(s, "")).collect();
        Self::new(name.to_string(), events)
    }

    /// Reads events line by line. Blank lines and `#` comments are skipped.
    pub fn from_reader<R: BufRead>(name: String, reader: R) -> Result<Self, GraphError> {
        let mut events = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            events.push(Event::parse(trimmed, i + 1)?);
        }
        Ok(Self::new(name, events))
    }

    /// Reads and validates a trace file.
    pub fn load(path: &Path) -> Result<EventStream<Validated>, GraphError> {
        let file = std::fs::File::open(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let stream = Self::from_reader(name, std::io::BufReader::new(file))?;
        tracing::debug!("read {} events from '{}'", stream.events.len(), path.display());
        stream.validate()
    }

    /// Checks the stream and transitions to the `Validated` state.
    ///
    /// # Checks
    /// - The stream is non-empty.
    /// - Seconds are non-decreasing.
    pub fn validate(self) -> Result<EventStream<Validated>, GraphError> {
        if self.events.is_empty() {
            return Err(GraphError::EmptyStream);
        }
        check_capacity(self.events.len())?;

        for (i, pair) in self.events.windows(2).enumerate() {
            if pair[1].second < pair[0].second {
                return Err(GraphError::UnsortedEvents {
                    position: i + 1,
                    previous: pair[0].second,
                    second: pair[1].second,
                });
            }
        }

        Ok(EventStream {
            name: self.name,
            events: self.events,
            _state: std::marker::PhantomData,
        })
    }
}

// ── Validated state ────────────────────────────────────────────────

impl EventStream<Validated> {
    /// Returns the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always `false` for a validated stream; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the second of the earliest event.
    pub fn first_second(&self) -> u32 {
        self.events[0].second
    }

    /// Returns the second of the latest event.
    pub fn last_second(&self) -> u32 {
        self.events[self.events.len() - 1].second
    }

    /// Returns the events in time order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Groups events sharing a second, in time order.
    pub fn batches(&self) -> impl Iterator<Item = (u32, &[Event])> {
        self.events
            .chunk_by(|a, b| a.second == b.second)
            .map(|batch| (batch[0].second, batch))
    }

    /// Returns the number of distinct seconds.
    pub fn distinct_seconds(&self) -> usize {
        self.batches().count()
    }

    /// Returns the size of the largest batch.
    pub fn max_batch_size(&self) -> usize {
        self.batches().map(|(_, b)| b.len()).max().unwrap_or(0)
    }

    /// Returns a summary string describing the stream.
    pub fn summary(&self) -> String {
        format!(
            "Stream '{}': {} events over {} distinct seconds [{}, {}], largest batch {}",
            self.name,
            self.len(),
            self.distinct_seconds(),
            self.first_second(),
            self.last_second(),
            self.max_batch_size(),
        )
    }
}

impl<S: StreamState> fmt::Display for EventStream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EventStream '{}' ({} events):", self.name, self.events.len())?;
        for event in &self.events {
            writeln!(f, "  {event}")?;
        }
        Ok(())
    }
}

/// Node ids are `NodeId`-sized, so a stream of `len` events needs ids up
/// to and including `len` (the end of the last span).
fn check_capacity(len: usize) -> Result<(), GraphError> {
    if NodeId::try_from(len).is_err() {
        return Err(GraphError::TooManyEvents {
            count: len,
            max: NodeId::MAX,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_capacity_limit() {
        assert!(check_capacity(0).is_ok());
        assert!(check_capacity(NodeId::MAX as usize).is_ok());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_capacity_overflow() {
        let result = check_capacity(NodeId::MAX as usize + 1);
        assert!(matches!(
            result,
            Err(GraphError::TooManyEvents { max: NodeId::MAX, .. })
        ));
    }

    #[test]
    fn test_validate_ok() {
        let s = EventStream::from_seconds("t", &[1, 1, 2, 3]).validate().unwrap();
        assert_eq!(s.len(), 4);
        assert_eq!(s.first_second(), 1);
        assert_eq!(s.last_second(), 3);
        assert_eq!(s.distinct_seconds(), 3);
        assert_eq!(s.max_batch_size(), 2);
    }

    #[test]
    fn test_validate_empty() {
        let err = EventStream::from_seconds("t", &[]).validate().unwrap_err();
        assert!(matches!(err, GraphError::EmptyStream));
    }

    #[test]
    fn test_validate_unsorted() {
        let err = EventStream::from_seconds("t", &[1, 3, 2]).validate().unwrap_err();
        assert!(matches!(
            err,
            GraphError::UnsortedEvents {
                position: 2,
                previous: 3,
                second: 2
            }
        ));
    }

    #[test]
    fn test_batches() {
        let s = EventStream::from_seconds("t", &[0, 0, 0, 4, 9, 9])
            .validate()
            .unwrap();
        let sizes: Vec<(u32, usize)> = s.batches().map(|(sec, b)| (sec, b.len())).collect();
        assert_eq!(sizes, vec![(0, 3), (4, 1), (9, 2)]);
    }

    #[test]
    fn test_from_reader_skips_comments() {
        let input = "# header\n1,a\n\n2,b\n2,c\n";
        let s = EventStream::from_reader("mem".into(), input.as_bytes())
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.events()[2].payload, "c");
    }

    #[test]
    fn test_from_reader_reports_line() {
        let input = "1,a\nx,b\n";
        let err = EventStream::from_reader("mem".into(), input.as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedEvent { line: 2, .. }));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0,start").unwrap();
        writeln!(file, "0,x").unwrap();
        writeln!(file, "5,y").unwrap();
        let s = EventStream::load(file.path()).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.distinct_seconds(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = EventStream::load(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, GraphError::TraceReadError(_)));
    }

    #[test]
    fn test_summary() {
        let s = EventStream::from_seconds("trace", &[1, 2])
            .validate()
            .unwrap();
        let text = s.summary();
        assert!(text.contains("trace"));
        assert!(text.contains("2 events"));
    }
}
