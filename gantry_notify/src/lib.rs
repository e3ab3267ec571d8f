// Copyright 2026 the Gantry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gantry_notify --heading-base-level=0

//! Gantry Notify: deferred camera change notifications.
//!
//! The camera raises a [`CameraEvent`] for every committed mutation: a pan
//! diff, a zoom delta, or a rotation delta, each carrying a
//! [`CameraSnapshot`] of the state after the change. Events are **queued**,
//! not dispatched inline: nothing reaches a subscriber until
//! [`CameraNotifier::flush`] runs, so a burst of mutations inside one logical
//! operation (say, an anchored zoom that also repositions) is observed only
//! as its consistent final state.
//!
//! Subscribers register against an [`EventFilter`]: one concrete event kind,
//! or [`EventFilter::All`] for the consolidated stream. Delivery order is
//! raise order. A callback returns [`ControlFlow`]; returning
//! `ControlFlow::Break(())` cancels its own subscription from inside
//! dispatch.
//!
//! ## Example
//!
//! ```rust
//! use core::ops::ControlFlow;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use gantry_notify::{CameraEvent, CameraNotifier, CameraSnapshot, EventFilter};
//! use kurbo::{Point, Vec2};
//!
//! let mut notifier = CameraNotifier::new();
//!
//! let seen = Rc::new(Cell::new(0));
//! let sink = seen.clone();
//! notifier.subscribe(
//!     EventFilter::Pan,
//!     Box::new(move |_event| {
//!         sink.set(sink.get() + 1);
//!         ControlFlow::Continue(())
//!     }),
//! );
//!
//! let snapshot = CameraSnapshot {
//!     position: Point::new(4.0, 2.0),
//!     rotation: 0.0,
//!     zoom_level: 1.0,
//! };
//! notifier.raise(CameraEvent::Pan {
//!     diff: Vec2::new(4.0, 2.0),
//!     snapshot,
//! });
//!
//! // Nothing is delivered until the flush boundary.
//! assert_eq!(seen.get(), 0);
//! notifier.flush();
//! assert_eq!(seen.get(), 1);
//! ```
//!
//! The notifier is single-threaded by design; callbacks receive only
//! `&CameraEvent`, so a subscriber cannot re-enter the notifier (or the
//! camera that owns it) while dispatch is running.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::ops::ControlFlow;

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Camera state captured immediately after a committed mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSnapshot {
    /// World-space position of the viewport center.
    pub position: Point,
    /// Rotation in radians, normalized to `[0, 2π)`.
    pub rotation: f64,
    /// Uniform zoom factor.
    pub zoom_level: f64,
}

/// A committed camera state change.
///
/// Each variant carries the delta that was applied plus a snapshot of the
/// state after the change. The enum itself is the consolidated stream;
/// [`EventFilter::All`] subscribers receive every variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraEvent {
    /// The camera position moved.
    Pan {
        /// World-space displacement that was applied.
        diff: Vec2,
        /// State after the move.
        snapshot: CameraSnapshot,
    },
    /// The zoom level changed.
    Zoom {
        /// Signed zoom level change.
        delta_zoom_amount: f64,
        /// State after the change.
        snapshot: CameraSnapshot,
    },
    /// The rotation changed.
    Rotate {
        /// Signed shortest rotation change, in radians.
        delta_rotation: f64,
        /// State after the change.
        snapshot: CameraSnapshot,
    },
}

impl CameraEvent {
    /// Returns the post-change state snapshot carried by this event.
    #[must_use]
    pub fn snapshot(&self) -> CameraSnapshot {
        match self {
            Self::Pan { snapshot, .. }
            | Self::Zoom { snapshot, .. }
            | Self::Rotate { snapshot, .. } => *snapshot,
        }
    }
}

/// Which events a subscription receives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventFilter {
    /// Only [`CameraEvent::Pan`] events.
    Pan,
    /// Only [`CameraEvent::Zoom`] events.
    Zoom,
    /// Only [`CameraEvent::Rotate`] events.
    Rotate,
    /// Every event, as the consolidated stream.
    #[default]
    All,
}

impl EventFilter {
    /// Returns `true` when `event` passes this filter.
    #[must_use]
    pub fn matches(self, event: &CameraEvent) -> bool {
        match self {
            Self::All => true,
            Self::Pan => matches!(event, CameraEvent::Pan { .. }),
            Self::Zoom => matches!(event, CameraEvent::Zoom { .. }),
            Self::Rotate => matches!(event, CameraEvent::Rotate { .. }),
        }
    }
}

/// Handle identifying a subscription for [`CameraNotifier::unsubscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Subscriber callback.
///
/// Return `ControlFlow::Continue(())` to stay subscribed or
/// `ControlFlow::Break(())` to cancel the subscription from inside dispatch.
pub type EventCallback = Box<dyn FnMut(&CameraEvent) -> ControlFlow<()>>;

struct Subscriber {
    id: u64,
    filter: EventFilter,
    callback: EventCallback,
}

/// Deferred pub/sub hub for camera change events.
///
/// [`Self::raise`] queues; [`Self::flush`] delivers the queued batch in raise
/// order. One notifier belongs to one camera; there is no cross-instance
/// state.
#[derive(Default)]
pub struct CameraNotifier {
    pending: SmallVec<[CameraEvent; 4]>,
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl CameraNotifier {
    /// Creates a notifier with no subscribers and nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for events passing `filter`.
    ///
    /// Subscribers registered before a `raise` are guaranteed to see that
    /// event at the next flush. Registering between a `raise` and its flush
    /// leaves delivery of the already-pending events unspecified.
    pub fn subscribe(&mut self, filter: EventFilter, callback: EventCallback) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            filter,
            callback,
        });
        SubscriptionId(id)
    }

    /// Removes the subscription with the given id.
    ///
    /// Returns `false` when the id is unknown (already removed, or cancelled
    /// from inside a callback).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|sub| sub.id != id.0);
        self.subscribers.len() != before
    }

    /// Queues an event for the next [`Self::flush`].
    pub fn raise(&mut self, event: CameraEvent) {
        self.pending.push(event);
    }

    /// Delivers every pending event, in raise order, to each matching
    /// subscriber, and returns the number of events delivered.
    ///
    /// A subscriber whose callback returns `ControlFlow::Break(())` is
    /// removed immediately and sees none of the remaining batch.
    pub fn flush(&mut self) -> usize {
        let batch = core::mem::take(&mut self.pending);
        for event in &batch {
            self.subscribers.retain_mut(|sub| {
                if !sub.filter.matches(event) {
                    return true;
                }
                (sub.callback)(event) == ControlFlow::Continue(())
            });
        }
        batch.len()
    }

    /// Returns the number of events waiting for the next flush.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl fmt::Debug for CameraNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraNotifier")
            .field("subscribers", &self.subscribers.len())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}
