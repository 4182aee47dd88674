use crate::{CardId, DeckAction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    DeckCreated {
        deck: String,
        kind: String,
    },
    DeckRemoved {
        deck: String,
    },
    CardDrawn {
        deck: String,
        card: Option<CardId>,
        shuffle_pending: bool,
    },
    DeckShuffled {
        deck: String,
        draw_pile: usize,
    },
    ModifiersChanged {
        deck: String,
        action: DeckAction,
        blessings: u8,
        curses: u8,
    },
    DeckReset {
        deck: String,
    },
    AllDecksReset {
        decks: usize,
    },
    ActionRejected {
        deck: String,
        action: DeckAction,
        reason: String,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
