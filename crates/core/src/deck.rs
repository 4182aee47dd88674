use crate::{BaseSet, CardId, Modifier, RngState};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Most copies of one modifier card a deck can hold at once.
pub const MAX_MODIFIER_COPIES: u8 = 10;

const ABILITY_KIND_PREFIX: &str = "monster-ability-";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeckKind {
    Player,
    Monster,
    /// Monster ability deck, named after the monster type.
    Ability(String),
}

impl DeckKind {
    /// Default composition for decks built without explicit cards. Every
    /// non-player kind uses the monster set.
    pub fn base_set(&self) -> BaseSet {
        match self {
            Self::Player => BaseSet::player(),
            Self::Monster | Self::Ability(_) => BaseSet::monster(),
        }
    }
}

impl fmt::Display for DeckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => f.write_str("player"),
            Self::Monster => f.write_str("monster"),
            Self::Ability(name) => write!(f, "{ABILITY_KIND_PREFIX}{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("deck is completely empty")]
    Empty,
    #[error("{kind} deck does not take {modifier} cards")]
    Unsupported { kind: String, modifier: Modifier },
    #[error("cannot add more {0} cards (max {max})", max = MAX_MODIFIER_COPIES)]
    LimitReached(Modifier),
    #[error("no active {0} cards to remove")]
    NothingToRemove(Modifier),
}

impl DeckError {
    /// True for failures that leave the deck untouched and only mean the
    /// request did not apply.
    pub fn is_no_op(&self) -> bool {
        !matches!(self, Self::Empty)
    }
}

/// Read-only projection of a deck. Pile contents and order stay private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    pub kind: String,
    pub draw_pile: usize,
    pub discard_pile: usize,
    pub active_blessings: u8,
    pub active_curses: u8,
    pub last_drawn: Option<CardId>,
    pub card_back: CardId,
    pub bless_card: Option<CardId>,
    pub curse_card: Option<CardId>,
    pub shuffle_pending: bool,
}

impl DeckState {
    pub fn supports_modifiers(&self) -> bool {
        self.bless_card.is_some() && self.curse_card.is_some()
    }

    pub fn total_cards(&self) -> usize {
        self.draw_pile + self.discard_pile
    }
}

/// Where copies of a card currently sit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PileCounts {
    pub draw: usize,
    pub discard: usize,
}

#[derive(Debug, Clone)]
pub struct Deck {
    kind: DeckKind,
    card_back: CardId,
    base: Vec<CardId>,
    draw: Vec<CardId>,
    discard: Vec<CardId>,
    bless: Option<CardId>,
    curse: Option<CardId>,
    active_bless: u8,
    active_curse: u8,
    last_drawn: Option<CardId>,
    shuffle_pending: bool,
    shuffle_triggers: Vec<CardId>,
    rng: RngState,
}

impl Deck {
    /// Build a deck and shuffle it. Explicit cards make a modifier-less
    /// deck; otherwise the kind's default set is used.
    pub fn new(
        kind: DeckKind,
        explicit_cards: Option<Vec<CardId>>,
        card_back: CardId,
        rng: RngState,
    ) -> Self {
        let (base, bless, curse, shuffle_triggers) = match explicit_cards {
            Some(cards) => (cards, None, None, Vec::new()),
            None => {
                let set = kind.base_set();
                let triggers = set.shuffle_triggers();
                (set.cards, Some(set.bless), Some(set.curse), triggers)
            }
        };
        let mut deck = Self {
            kind,
            card_back,
            draw: base.clone(),
            base,
            discard: Vec::new(),
            bless,
            curse,
            active_bless: 0,
            active_curse: 0,
            last_drawn: None,
            shuffle_pending: false,
            shuffle_triggers,
            rng,
        };
        deck.rng.shuffle(&mut deck.draw);
        debug!(kind = %deck.kind, cards = deck.draw.len(), "deck created");
        deck
    }

    pub fn player(card_back: CardId, rng: RngState) -> Self {
        Self::new(DeckKind::Player, None, card_back, rng)
    }

    pub fn monster(card_back: CardId, rng: RngState) -> Self {
        Self::new(DeckKind::Monster, None, card_back, rng)
    }

    pub fn ability(name: &str, cards: Vec<CardId>, card_back: CardId, rng: RngState) -> Self {
        Self::new(DeckKind::Ability(name.to_string()), Some(cards), card_back, rng)
    }

    pub fn kind(&self) -> &DeckKind {
        &self.kind
    }

    pub fn base_cards(&self) -> &[CardId] {
        &self.base
    }

    pub fn shuffle_triggers(&self) -> &[CardId] {
        &self.shuffle_triggers
    }

    pub fn modifier_card(&self, modifier: Modifier) -> Option<&CardId> {
        match modifier {
            Modifier::Bless => self.bless.as_ref(),
            Modifier::Curse => self.curse.as_ref(),
        }
    }

    pub fn active(&self, modifier: Modifier) -> u8 {
        match modifier {
            Modifier::Bless => self.active_bless,
            Modifier::Curse => self.active_curse,
        }
    }

    pub fn copies(&self, card: &CardId) -> PileCounts {
        PileCounts {
            draw: self.draw.iter().filter(|item| *item == card).count(),
            discard: self.discard.iter().filter(|item| *item == card).count(),
        }
    }

    pub fn state(&self) -> DeckState {
        DeckState {
            kind: self.kind.to_string(),
            draw_pile: self.draw.len(),
            discard_pile: self.discard.len(),
            active_blessings: self.active_bless,
            active_curses: self.active_curse,
            last_drawn: self.last_drawn.clone(),
            card_back: self.card_back.clone(),
            bless_card: self.bless.clone(),
            curse_card: self.curse.clone(),
            shuffle_pending: self.shuffle_pending,
        }
    }

    /// Return the discard pile to the draw pile and shuffle everything.
    pub fn shuffle(&mut self) -> DeckState {
        debug!(
            kind = %self.kind,
            draw = self.draw.len(),
            discard = self.discard.len(),
            bless = self.active_bless,
            curse = self.active_curse,
            "shuffling"
        );
        self.draw.append(&mut self.discard);
        self.rng.shuffle(&mut self.draw);
        self.last_drawn = None;
        self.state()
    }

    pub fn draw(&mut self) -> Result<DeckState, DeckError> {
        if self.shuffle_pending {
            debug!(kind = %self.kind, "pending shuffle before draw");
            self.shuffle();
            self.shuffle_pending = false;
        }
        if self.draw.is_empty() {
            self.shuffle();
        }
        let Some(card) = self.draw.pop() else {
            info!(kind = %self.kind, "no cards left to draw");
            return Err(DeckError::Empty);
        };
        self.last_drawn = Some(card.clone());

        if self.bless.as_ref() == Some(&card) {
            self.active_bless = self.active_bless.saturating_sub(1);
            info!(kind = %self.kind, remaining = self.active_bless, "drew bless, removed from play");
        } else if self.curse.as_ref() == Some(&card) {
            self.active_curse = self.active_curse.saturating_sub(1);
            info!(kind = %self.kind, remaining = self.active_curse, "drew curse, removed from play");
        } else {
            debug!(kind = %self.kind, card = %card, draw = self.draw.len(), "drew card");
            self.discard.push(card.clone());
        }

        if self.shuffle_triggers.contains(&card) {
            info!(kind = %self.kind, card = %card, "shuffle queued for next draw");
            self.shuffle_pending = true;
        }
        Ok(self.state())
    }

    pub fn add_modifier(&mut self, modifier: Modifier) -> Result<DeckState, DeckError> {
        let card = self.supported(modifier)?;
        let count = self.counter_mut(modifier);
        if *count >= MAX_MODIFIER_COPIES {
            debug!(%modifier, "modifier limit reached");
            return Err(DeckError::LimitReached(modifier));
        }
        *count += 1;
        let count = *count;
        self.draw.push(card);
        self.rng.shuffle(&mut self.draw);
        info!(kind = %self.kind, %modifier, count, draw = self.draw.len(), "modifier added");
        Ok(self.state())
    }

    /// Take one copy out of play: draw pile first, then discard. The counter
    /// drops even when no copy is left in either pile.
    pub fn remove_modifier(&mut self, modifier: Modifier) -> Result<DeckState, DeckError> {
        let card = self.supported(modifier)?;
        let count = self.counter_mut(modifier);
        if *count == 0 {
            return Err(DeckError::NothingToRemove(modifier));
        }
        *count -= 1;
        let count = *count;
        if let Some(idx) = self.draw.iter().position(|item| *item == card) {
            self.draw.remove(idx);
            debug!(%modifier, "removed copy from draw pile");
        } else if let Some(idx) = self.discard.iter().position(|item| *item == card) {
            self.discard.remove(idx);
            debug!(%modifier, "removed copy from discard pile");
        }
        info!(kind = %self.kind, %modifier, count, "modifier removed");
        Ok(self.state())
    }

    pub fn add_bless(&mut self) -> Result<DeckState, DeckError> {
        self.add_modifier(Modifier::Bless)
    }

    pub fn add_curse(&mut self) -> Result<DeckState, DeckError> {
        self.add_modifier(Modifier::Curse)
    }

    pub fn remove_bless(&mut self) -> Result<DeckState, DeckError> {
        self.remove_modifier(Modifier::Bless)
    }

    pub fn remove_curse(&mut self) -> Result<DeckState, DeckError> {
        self.remove_modifier(Modifier::Curse)
    }

    /// Back to the pristine base composition; all modifiers are dropped.
    pub fn reset(&mut self) -> DeckState {
        self.draw = self.base.clone();
        self.discard.clear();
        self.active_bless = 0;
        self.active_curse = 0;
        self.last_drawn = None;
        self.shuffle_pending = false;
        self.rng.shuffle(&mut self.draw);
        info!(kind = %self.kind, "deck reset");
        self.state()
    }

    /// Filter modifier copies out of both piles and reshuffle what remains.
    /// Unlike `reset`, the current composition is kept.
    pub fn strip_modifiers(&mut self) -> DeckState {
        let bless = self.bless.clone();
        let curse = self.curse.clone();
        let is_modifier =
            |card: &CardId| bless.as_ref() == Some(card) || curse.as_ref() == Some(card);
        self.draw.retain(|card| !is_modifier(card));
        self.discard.retain(|card| !is_modifier(card));
        self.active_bless = 0;
        self.active_curse = 0;
        self.shuffle_pending = false;
        self.shuffle()
    }

    fn supported(&self, modifier: Modifier) -> Result<CardId, DeckError> {
        self.modifier_card(modifier)
            .cloned()
            .ok_or_else(|| DeckError::Unsupported {
                kind: self.kind.to_string(),
                modifier,
            })
    }

    fn counter_mut(&mut self, modifier: Modifier) -> &mut u8 {
        match modifier {
            Modifier::Bless => &mut self.active_bless,
            Modifier::Curse => &mut self.active_curse,
        }
    }
}
