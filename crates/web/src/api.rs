use gloomdeck_core::{
    DeckAction, DeckError, DeckState, Event, EventBus, RegistryError, Table, TableError,
};
use serde::{Deserialize, Serialize};
use tiny_http::Method;

pub struct AppState {
    pub table: Table,
    pub events: EventBus,
}

impl AppState {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            events: EventBus::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub decks: Vec<UiDeck>,
    pub events: Vec<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_deck_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monster_types: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct UiDeck {
    pub id: String,
    #[serde(flatten)]
    pub state: DeckState,
}

#[derive(Debug)]
pub struct ApiReply {
    pub status: u16,
    pub body: ApiResponse,
}

#[derive(Deserialize)]
struct AbilityDeckRequest {
    #[serde(alias = "monsterType")]
    monster_type: Option<String>,
}

/// Outcome of one routed call before it is turned into a response.
enum Outcome {
    Done,
    Created(String),
    Types(Vec<String>),
    Failed(u16, String),
    NotFound,
}

pub fn route(state: &mut AppState, method: &Method, url: &str, body: &str) -> ApiReply {
    let path = url.split('?').next().unwrap_or_default();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let outcome = match (method, segments.as_slice()) {
        (Method::Get, ["state"]) => Outcome::Done,
        (Method::Get, ["monster-types"]) => Outcome::Types(state.table.monster_types()),
        (Method::Post, ["resetDecks"]) => {
            state.table.reset_all(&mut state.events);
            Outcome::Done
        }
        (Method::Post, ["addPlayer"]) => match state.table.add_player(&mut state.events) {
            Ok(id) => Outcome::Created(id),
            Err(err) => table_failure(err),
        },
        (Method::Post, ["removePlayer", id]) => {
            done_or_failure(state.table.remove_player(id, &mut state.events))
        }
        (Method::Post, ["deleteDeck", id]) => {
            done_or_failure(state.table.remove_deck(id, &mut state.events))
        }
        (Method::Post, ["addMonsterAbilityDeck"]) => add_ability_deck(state, body),
        (Method::Post, [keyword, id]) => match DeckAction::from_keyword(keyword) {
            Some(action) => {
                done_or_failure(state.table.apply(id, action, &mut state.events).map(|_| ()))
            }
            None => Outcome::NotFound,
        },
        _ => Outcome::NotFound,
    };
    reply(state, outcome)
}

fn add_ability_deck(state: &mut AppState, body: &str) -> Outcome {
    let request: AbilityDeckRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(err) => return Outcome::Failed(400, format!("invalid body: {err}")),
    };
    let Some(monster_type) = request.monster_type.filter(|value| !value.is_empty()) else {
        return Outcome::Failed(400, "monster_type is required".to_string());
    };
    match state.table.add_ability_deck(&monster_type, &mut state.events) {
        Ok(id) => Outcome::Created(id),
        Err(err) => table_failure(err),
    }
}

fn done_or_failure(result: Result<(), TableError>) -> Outcome {
    match result {
        Ok(()) => Outcome::Done,
        Err(err) => table_failure(err),
    }
}

fn table_failure(err: TableError) -> Outcome {
    Outcome::Failed(status_for(&err), err.to_string())
}

/// Non-fatal deck no-ops still answer 200 with `ok: false`.
pub fn status_for(err: &TableError) -> u16 {
    match err {
        TableError::Registry(RegistryError::NotFound(_)) => 404,
        TableError::Registry(err) => match err.deck_error() {
            Some(DeckError::Empty) => 409,
            Some(_) => 200,
            None => 400,
        },
        TableError::PlayerCapReached(_)
        | TableError::NotAPlayerDeck(_)
        | TableError::UnknownAbilitySet(_) => 400,
    }
}

fn reply(state: &mut AppState, outcome: Outcome) -> ApiReply {
    let (status, error, new_deck_id, monster_types) = match outcome {
        Outcome::Done => (200, None, None, None),
        Outcome::Created(id) => (200, None, Some(id), None),
        Outcome::Types(types) => (200, None, None, Some(types)),
        Outcome::Failed(status, message) => (status, Some(message), None, None),
        Outcome::NotFound => (404, Some("not found".to_string()), None, None),
    };
    ApiReply {
        status,
        body: build_response(state, error, new_deck_id, monster_types),
    }
}

pub fn build_response(
    state: &mut AppState,
    error: Option<String>,
    new_deck_id: Option<String>,
    monster_types: Option<Vec<String>>,
) -> ApiResponse {
    let events: Vec<_> = state.events.drain().collect();
    ApiResponse {
        ok: error.is_none(),
        error,
        decks: state
            .table
            .decks()
            .into_iter()
            .map(|(id, state)| UiDeck { id, state })
            .collect(),
        events,
        new_deck_id,
        monster_types,
    }
}
