// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bookkeeping for transitions whose completion has not been delivered yet.

use smallvec::SmallVec;

/// Identifier of a started transition.
///
/// Ids are handed out in increasing order by a [`TransitionQueue`] and are never
/// reused by the same queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(u64);

impl TransitionId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A transition that has started but not completed.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingTransition<T> {
    /// Identifier returned by [`TransitionQueue::begin`].
    pub id: TransitionId,
    /// Data needed to finish the transition.
    pub payload: T,
}

/// In-flight transitions, in start order.
///
/// Usually holds zero or one entry; a second appears when a new transition is
/// started before the previous completion fired.
#[derive(Clone, Debug)]
pub struct TransitionQueue<T> {
    next_id: u64,
    pending: SmallVec<[PendingTransition<T>; 2]>,
}

impl<T> Default for TransitionQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TransitionQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: SmallVec::new(),
        }
    }

    /// Records a new in-flight transition and returns its id.
    pub fn begin(&mut self, payload: T) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTransition { id, payload });
        id
    }

    /// Removes the transition with the given id and returns its payload.
    ///
    /// Returns `None` for ids that already completed or were never issued by
    /// this queue.
    pub fn complete(&mut self, id: TransitionId) -> Option<T> {
        let pos = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.remove(pos).payload)
    }

    /// Returns `true` while at least one transition awaits completion.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of transitions awaiting completion.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no transition is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The most recently started transition that is still in flight.
    #[must_use]
    pub fn latest(&self) -> Option<&PendingTransition<T>> {
        self.pending.last()
    }

    /// Iterates in-flight transitions in start order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingTransition<T>> {
        self.pending.iter()
    }

    /// Drops every in-flight transition without completing it.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
