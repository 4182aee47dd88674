use crate::{Deck, DeckError, DeckState, Modifier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeckAction {
    Draw,
    Shuffle,
    AddBless,
    AddCurse,
    RemoveBless,
    RemoveCurse,
    Reset,
}

impl DeckAction {
    pub const ALL: [DeckAction; 7] = [
        DeckAction::Draw,
        DeckAction::Shuffle,
        DeckAction::AddBless,
        DeckAction::AddCurse,
        DeckAction::RemoveBless,
        DeckAction::RemoveCurse,
        DeckAction::Reset,
    ];

    /// Accepts the host route names as well as snake_case names.
    pub fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "draw" => Some(Self::Draw),
            "shuffle" => Some(Self::Shuffle),
            "bless" | "add_bless" | "addBless" => Some(Self::AddBless),
            "curse" | "add_curse" | "addCurse" => Some(Self::AddCurse),
            "remove_bless" | "removeBless" | "unbless" => Some(Self::RemoveBless),
            "remove_curse" | "removeCurse" | "uncurse" => Some(Self::RemoveCurse),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Shuffle => "shuffle",
            Self::AddBless => "add_bless",
            Self::AddCurse => "add_curse",
            Self::RemoveBless => "remove_bless",
            Self::RemoveCurse => "remove_curse",
            Self::Reset => "reset",
        }
    }

    pub fn modifier(self) -> Option<Modifier> {
        match self {
            Self::AddBless | Self::RemoveBless => Some(Modifier::Bless),
            Self::AddCurse | Self::RemoveCurse => Some(Modifier::Curse),
            Self::Draw | Self::Shuffle | Self::Reset => None,
        }
    }
}

impl Deck {
    pub fn apply(&mut self, action: DeckAction) -> Result<DeckState, DeckError> {
        match action {
            DeckAction::Draw => self.draw(),
            DeckAction::Shuffle => Ok(self.shuffle()),
            DeckAction::AddBless => self.add_modifier(Modifier::Bless),
            DeckAction::AddCurse => self.add_modifier(Modifier::Curse),
            DeckAction::RemoveBless => self.remove_modifier(Modifier::Bless),
            DeckAction::RemoveCurse => self.remove_modifier(Modifier::Curse),
            DeckAction::Reset => Ok(self.reset()),
        }
    }
}
