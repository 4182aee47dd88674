use crate::{
    AbilityCatalog, CardId, DeckAction, DeckKind, DeckRegistry, DeckState, Event, EventBus,
    RegistryError, RngState, TableConfig,
};
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

pub const ENEMY_DECK_ID: &str = "enemies";
const PLAYER_PREFIX: &str = "player";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("maximum number of players ({0}) reached")]
    PlayerCapReached(usize),
    #[error("cannot remove non-player deck: {0}")]
    NotAPlayerDeck(String),
    #[error("unknown monster type: {0}")]
    UnknownAbilitySet(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One play session: the deck registry plus the rules for naming and adding
/// decks. Starts with the monster modifier deck under `enemies`.
#[derive(Debug)]
pub struct Table {
    registry: DeckRegistry,
    catalog: AbilityCatalog,
    card_back: CardId,
    max_players: usize,
    ability_counts: HashMap<String, usize>,
}

impl Table {
    pub fn new(config: &TableConfig, catalog: AbilityCatalog) -> Result<Self, TableError> {
        let rng = match config.seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        };
        info!(seed = rng.seed(), "table opened");
        let mut registry = DeckRegistry::new(rng);
        let card_back = CardId::new(config.card_back.clone());
        registry.create(ENEMY_DECK_ID, DeckKind::Monster, None, card_back.clone())?;
        Ok(Self {
            registry,
            catalog,
            card_back,
            max_players: config.max_players,
            ability_counts: HashMap::new(),
        })
    }

    pub fn seed(&self) -> u64 {
        self.registry.seed()
    }

    pub fn decks(&self) -> Vec<(String, DeckState)> {
        self.registry.list_all()
    }

    pub fn monster_types(&self) -> Vec<String> {
        self.catalog.names()
    }

    pub fn player_count(&self) -> usize {
        self.registry
            .ids()
            .filter(|id| is_player_id(id))
            .count()
    }

    pub fn apply(
        &mut self,
        id: &str,
        action: DeckAction,
        events: &mut EventBus,
    ) -> Result<DeckState, TableError> {
        Ok(self.registry.apply(id, action, events)?)
    }

    /// Adds `player{N}` using the lowest free N up to the player cap.
    pub fn add_player(&mut self, events: &mut EventBus) -> Result<String, TableError> {
        let id = (1..=self.max_players)
            .map(|n| format!("{PLAYER_PREFIX}{n}"))
            .find(|id| !self.registry.contains(id))
            .ok_or(TableError::PlayerCapReached(self.max_players))?;
        self.registry
            .create(&id, DeckKind::Player, None, self.card_back.clone())?;
        info!(deck = %id, players = self.player_count(), "player joined");
        events.push(Event::DeckCreated {
            deck: id.clone(),
            kind: DeckKind::Player.to_string(),
        });
        Ok(id)
    }

    pub fn remove_player(&mut self, id: &str, events: &mut EventBus) -> Result<(), TableError> {
        self.registry.get(id)?;
        if !is_player_id(id) {
            return Err(TableError::NotAPlayerDeck(id.to_string()));
        }
        self.remove_deck(id, events)
    }

    /// Adds `monster-ability-{slug}-{count}` built from the catalogue entry.
    pub fn add_ability_deck(
        &mut self,
        monster_type: &str,
        events: &mut EventBus,
    ) -> Result<String, TableError> {
        let set = self
            .catalog
            .get(monster_type)
            .ok_or_else(|| TableError::UnknownAbilitySet(monster_type.to_string()))?;
        let count = self.ability_counts.get(monster_type).copied().unwrap_or(0) + 1;
        let id = format!("monster-ability-{}-{}", slug(monster_type), count);
        let kind = DeckKind::Ability(monster_type.to_string());
        let kind_label = kind.to_string();
        self.registry
            .create(&id, kind, Some(set.cards.clone()), set.card_back.clone())?;
        self.ability_counts.insert(monster_type.to_string(), count);
        events.push(Event::DeckCreated {
            deck: id.clone(),
            kind: kind_label,
        });
        Ok(id)
    }

    pub fn remove_deck(&mut self, id: &str, events: &mut EventBus) -> Result<(), TableError> {
        self.registry.delete(id)?;
        events.push(Event::DeckRemoved {
            deck: id.to_string(),
        });
        Ok(())
    }

    pub fn reset_all(&mut self, events: &mut EventBus) -> usize {
        self.registry.reset_all(events)
    }
}

fn is_player_id(id: &str) -> bool {
    id.starts_with(PLAYER_PREFIX)
}

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
