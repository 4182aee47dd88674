use crate::{
    CardId, Deck, DeckAction, DeckError, DeckKind, DeckState, Event, EventBus, RngState,
};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("deck not found: {0}")]
    NotFound(String),
    #[error("deck already exists: {0}")]
    AlreadyExists(String),
    #[error("{action:?} on {id} failed: {source}")]
    Deck {
        id: String,
        action: DeckAction,
        #[source]
        source: DeckError,
    },
}

impl RegistryError {
    pub fn deck_error(&self) -> Option<&DeckError> {
        match self {
            Self::Deck { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Decks keyed by identifier, listed in creation order. Each deck gets its
/// own random stream forked from the registry seed.
#[derive(Debug)]
pub struct DeckRegistry {
    decks: HashMap<String, Deck>,
    order: Vec<String>,
    rng: RngState,
}

impl DeckRegistry {
    pub fn new(rng: RngState) -> Self {
        Self {
            decks: HashMap::new(),
            order: Vec::new(),
            rng,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.decks.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    pub fn create(
        &mut self,
        id: &str,
        kind: DeckKind,
        explicit_cards: Option<Vec<CardId>>,
        card_back: CardId,
    ) -> Result<&Deck, RegistryError> {
        if self.decks.contains_key(id) {
            return Err(RegistryError::AlreadyExists(id.to_string()));
        }
        let deck = Deck::new(kind, explicit_cards, card_back, self.rng.fork());
        info!(deck = id, kind = %deck.kind(), "deck added");
        self.order.push(id.to_string());
        Ok(self.decks.entry(id.to_string()).or_insert(deck))
    }

    pub fn get(&self, id: &str) -> Result<&Deck, RegistryError> {
        self.decks
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Deck, RegistryError> {
        self.decks
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn delete(&mut self, id: &str) -> Result<(), RegistryError> {
        if self.decks.remove(id).is_none() {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        self.order.retain(|item| item != id);
        info!(deck = id, "deck removed");
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(String, DeckState)> {
        self.order
            .iter()
            .filter_map(|id| self.decks.get(id).map(|deck| (id.clone(), deck.state())))
            .collect()
    }

    /// Run one action against a deck and record what happened.
    pub fn apply(
        &mut self,
        id: &str,
        action: DeckAction,
        events: &mut EventBus,
    ) -> Result<DeckState, RegistryError> {
        let deck = self.get_mut(id)?;
        match deck.apply(action) {
            Ok(state) => {
                events.push(action_event(id, action, &state));
                Ok(state)
            }
            Err(source) => {
                warn!(deck = id, action = action.keyword(), error = %source, "action rejected");
                events.push(Event::ActionRejected {
                    deck: id.to_string(),
                    action,
                    reason: source.to_string(),
                });
                Err(RegistryError::Deck {
                    id: id.to_string(),
                    action,
                    source,
                })
            }
        }
    }

    /// Strip every Bless/Curse from every deck and reshuffle the remaining
    /// cards. Per-deck `reset` instead restores the base composition.
    pub fn reset_all(&mut self, events: &mut EventBus) -> usize {
        for id in &self.order {
            if let Some(deck) = self.decks.get_mut(id) {
                deck.strip_modifiers();
            }
        }
        info!(decks = self.order.len(), "all decks reset");
        events.push(Event::AllDecksReset {
            decks: self.order.len(),
        });
        self.order.len()
    }
}

fn action_event(id: &str, action: DeckAction, state: &DeckState) -> Event {
    let deck = id.to_string();
    match action {
        DeckAction::Draw => Event::CardDrawn {
            deck,
            card: state.last_drawn.clone(),
            shuffle_pending: state.shuffle_pending,
        },
        DeckAction::Shuffle => Event::DeckShuffled {
            deck,
            draw_pile: state.draw_pile,
        },
        DeckAction::AddBless
        | DeckAction::AddCurse
        | DeckAction::RemoveBless
        | DeckAction::RemoveCurse => Event::ModifiersChanged {
            deck,
            action,
            blessings: state.active_blessings,
            curses: state.active_curses,
        },
        DeckAction::Reset => Event::DeckReset { deck },
    }
}
