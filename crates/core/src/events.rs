//! Notification bus - synchronous publish/subscribe for state changes
//!
//! Collaborators (renderer, scoreboard, leaderboard) subscribe to an
//! [`EventKind`] and receive every matching [`GameEvent`] in registration order
//! before `publish` returns. Handlers only see the event payload; they have no
//! path back into engine state.

use std::collections::HashMap;
use std::fmt;

/// Event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RowsFilled,
    PiecePlaced,
    GameOver,
    ScoreChanged,
    RenderRequested,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::RowsFilled,
        EventKind::PiecePlaced,
        EventKind::GameOver,
        EventKind::ScoreChanged,
        EventKind::RenderRequested,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::RowsFilled => "rows-filled",
            EventKind::PiecePlaced => "piece-placed",
            EventKind::GameOver => "game-over",
            EventKind::ScoreChanged => "score-changed",
            EventKind::RenderRequested => "render-requested",
        }
    }
}

/// A state change published by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// `count` rows were removed from a field `width` cells wide
    RowsFilled { count: usize, width: usize },
    /// The active piece locked and the next one took its place
    PiecePlaced,
    /// The session ended; carries the final tally
    GameOver { score: u64, level: u32 },
    /// Score (and possibly level) changed
    ScoreChanged { score: u64, level: u32 },
    /// One frame elapsed
    RenderRequested,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::RowsFilled { .. } => EventKind::RowsFilled,
            GameEvent::PiecePlaced => EventKind::PiecePlaced,
            GameEvent::GameOver { .. } => EventKind::GameOver,
            GameEvent::ScoreChanged { .. } => EventKind::ScoreChanged,
            GameEvent::RenderRequested => EventKind::RenderRequested,
        }
    }
}

/// Handle returned by [`NotificationBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&GameEvent)>;

/// Event name → ordered subscriber list.
#[derive(Default)]
pub struct NotificationBus {
    subscribers: HashMap<EventKind, Vec<(SubscriptionId, Handler)>>,
    next_id: u64,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every event of `kind`.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Remove a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.values_mut().any(|list| {
            let before = list.len();
            list.retain(|(sid, _)| *sid != id);
            list.len() != before
        })
    }

    /// Deliver `event` to its subscribers in registration order.
    ///
    /// A panicking handler unwinds through `publish`; later handlers for the
    /// same event are not called. Returns the number of handlers invoked.
    pub fn publish(&mut self, event: &GameEvent) -> usize {
        let Some(list) = self.subscribers.get_mut(&event.kind()) else {
            return 0;
        };
        for (_, handler) in list.iter_mut() {
            handler(event);
        }
        list.len()
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }
}

impl fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in EventKind::ALL {
            let n = self.subscriber_count(kind);
            if n > 0 {
                map.entry(&kind.as_str(), &n);
            }
        }
        map.finish()
    }
}
