use gloomdeck_core::{DeckAction, DeckState, Event, EventBus, Table};

pub const HELP: &str = "\
commands:
  state [--json]           show every deck
  types                    list monster ability types
  draw|shuffle|reset <id>  deck actions
  bless|curse <id>         shuffle a modifier card in
  unbless|uncurse <id>     take a modifier card out of play
  reset-all                strip all modifiers and reshuffle every deck
  add-player               add the next player deck (max 4)
  remove-player <id>       remove a player deck
  add-ability <type>       add a monster ability deck
  delete <id>              remove any deck
  help                     this text
  quit                     leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    State { json: bool },
    Types,
    Action(DeckAction, String),
    ResetAll,
    AddPlayer,
    RemovePlayer(String),
    AddAbility(String),
    Delete(String),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let target = || {
            if rest.is_empty() {
                Err(format!("{head} needs a deck id"))
            } else {
                Ok(rest.to_string())
            }
        };
        match head {
            "state" | "ls" => Ok(Self::State {
                json: rest == "--json",
            }),
            "types" => Ok(Self::Types),
            "reset-all" => Ok(Self::ResetAll),
            "add-player" => Ok(Self::AddPlayer),
            "remove-player" => Ok(Self::RemovePlayer(target()?)),
            "add-ability" => {
                if rest.is_empty() {
                    Err("add-ability needs a monster type".to_string())
                } else {
                    Ok(Self::AddAbility(rest.to_string()))
                }
            }
            "delete" => Ok(Self::Delete(target()?)),
            "help" | "?" | "h" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => match DeckAction::from_keyword(other) {
                Some(action) => Ok(Self::Action(action, target()?)),
                None => Err(format!("unknown command: {other} (try help)")),
            },
        }
    }
}

/// Run one command and return the text to print.
pub fn execute(table: &mut Table, events: &mut EventBus, command: Command) -> String {
    let result = match command {
        Command::State { json } => return render_state(table, json),
        Command::Types => return table.monster_types().join("\n"),
        Command::Help => return HELP.to_string(),
        Command::Quit => return String::new(),
        Command::Action(action, id) => table
            .apply(&id, action, events)
            .map(|state| render_deck(&id, &state)),
        Command::ResetAll => {
            let count = table.reset_all(events);
            Ok(format!("reset {count} decks"))
        }
        Command::AddPlayer => table.add_player(events).map(|id| format!("added {id}")),
        Command::RemovePlayer(id) => table
            .remove_player(&id, events)
            .map(|_| format!("removed {id}")),
        Command::AddAbility(monster_type) => table
            .add_ability_deck(&monster_type, events)
            .map(|id| format!("added {id}")),
        Command::Delete(id) => table.remove_deck(&id, events).map(|_| format!("removed {id}")),
    };
    let mut out = match result {
        Ok(text) => text,
        Err(err) => format!("error: {err}"),
    };
    for event in events.drain() {
        if let Some(note) = event_note(&event) {
            out.push('\n');
            out.push_str(&note);
        }
    }
    out
}

fn render_state(table: &Table, json: bool) -> String {
    let decks = table.decks();
    if json {
        let map: serde_json::Map<String, serde_json::Value> = decks
            .into_iter()
            .filter_map(|(id, state)| serde_json::to_value(state).ok().map(|value| (id, value)))
            .collect();
        return serde_json::to_string_pretty(&map).unwrap_or_default();
    }
    decks
        .iter()
        .map(|(id, state)| render_deck(id, state))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_deck(id: &str, state: &DeckState) -> String {
    let mut line = format!(
        "{id:<32} draw {:>2}  discard {:>2}",
        state.draw_pile, state.discard_pile
    );
    if state.supports_modifiers() {
        line.push_str(&format!(
            "  bless {}  curse {}",
            state.active_blessings, state.active_curses
        ));
    }
    if let Some(card) = &state.last_drawn {
        line.push_str(&format!("  last {card}"));
    }
    if state.shuffle_pending {
        line.push_str("  [shuffle next]");
    }
    line
}

fn event_note(event: &Event) -> Option<String> {
    match event {
        Event::CardDrawn {
            shuffle_pending: true,
            deck,
            ..
        } => Some(format!("{deck} will shuffle before the next draw")),
        Event::DeckShuffled { deck, draw_pile } => {
            Some(format!("{deck} shuffled ({draw_pile} cards)"))
        }
        _ => None,
    }
}
