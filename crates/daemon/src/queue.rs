// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending delivery events, at most one per record.

use std::collections::VecDeque;
use wsp_core::RequestEvent;

#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    events: VecDeque<RequestEvent>,
}

impl EventQueue {
    /// Queue `event`, replacing any pending event for the same record in
    /// place so the record keeps its position.
    pub fn push(&mut self, event: RequestEvent) {
        match self.events.iter_mut().find(|e| e.name() == event.name()) {
            Some(pending) => *pending = event,
            None => self.events.push_back(event),
        }
    }

    pub fn pop(&mut self) -> Option<RequestEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
