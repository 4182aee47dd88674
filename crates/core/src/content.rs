use crate::CardId;
use serde::{Deserialize, Serialize};

pub const CARD_BACK: &str = "/imgs/card-back.png";

const PLAYER_CARD_PREFIX: &str = "/imgs/player/gh-am-p1-";
const MONSTER_CARD_PREFIX: &str = "/imgs/monster/gh-am-m-";
const PLAYER_BLESS: &str = "/imgs/player-mod/Blessing/gh-am-pm-11.png";
const PLAYER_CURSE: &str = "/imgs/player-mod/Curse/gh-am-pm-01.png";
const MONSTER_BLESS: &str = "/imgs/monster-mod/Blessing/gh-am-pm-01.png";
const MONSTER_CURSE: &str = "/imgs/monster-mod/Curse/gh-am-mm-01.png";

pub const BASE_SET_SIZE: usize = 20;

/// Default attack-modifier composition for player and monster decks.
///
/// The last two cards of the set are the "Null" and "x2" cards; drawing either
/// one queues a reshuffle before the following draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseSet {
    pub cards: Vec<CardId>,
    pub bless: CardId,
    pub curse: CardId,
}

impl BaseSet {
    pub fn player() -> Self {
        Self {
            cards: numbered_cards(PLAYER_CARD_PREFIX),
            bless: CardId::from(PLAYER_BLESS),
            curse: CardId::from(PLAYER_CURSE),
        }
    }

    pub fn monster() -> Self {
        Self {
            cards: numbered_cards(MONSTER_CARD_PREFIX),
            bless: CardId::from(MONSTER_BLESS),
            curse: CardId::from(MONSTER_CURSE),
        }
    }

    /// Base-set positions 19 and 20.
    pub fn shuffle_triggers(&self) -> Vec<CardId> {
        let start = self.cards.len().saturating_sub(2);
        self.cards[start..].to_vec()
    }
}

fn numbered_cards(prefix: &str) -> Vec<CardId> {
    (1..=BASE_SET_SIZE)
        .map(|n| CardId::new(format!("{prefix}{n:02}.png")))
        .collect()
}

/// Card list and back for one monster-ability deck type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySet {
    pub name: String,
    pub card_back: CardId,
    pub cards: Vec<CardId>,
}

#[derive(Debug, Clone, Default)]
pub struct AbilityCatalog {
    sets: Vec<AbilitySet>,
}

impl AbilityCatalog {
    pub fn new(mut sets: Vec<AbilitySet>) -> Self {
        sets.sort_by(|a, b| a.name.cmp(&b.name));
        Self { sets }
    }

    pub fn get(&self, name: &str) -> Option<&AbilitySet> {
        self.sets.iter().find(|set| set.name == name)
    }

    /// Names in sorted order, as offered to the user.
    pub fn names(&self) -> Vec<String> {
        self.sets.iter().map(|set| set.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Later sets replace earlier ones with the same name.
    pub fn merge(&mut self, other: AbilityCatalog) {
        for set in other.sets {
            if let Some(existing) = self.sets.iter_mut().find(|item| item.name == set.name) {
                *existing = set;
            } else {
                self.sets.push(set);
            }
        }
        self.sets.sort_by(|a, b| a.name.cmp(&b.name));
    }
}
