use gloomdeck_core::DeckState;

const SCRIPT: &str = r#"
async function post(path, body) {
  const res = await fetch(path, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: body ? JSON.stringify(body) : undefined,
  });
  const data = await res.json();
  if (!data.ok && data.error) alert(data.error);
  location.reload();
}
function act(action, id) { post(`/${action}/${id}`); }
function addAbility() {
  const monsterType = document.getElementById('monster-select').value;
  post('/addMonsterAbilityDeck', { monster_type: monsterType });
}
"#;

/// Server-rendered page: one panel per deck plus the add/reset controls.
pub fn render_index(decks: &[(String, DeckState)], monster_types: &[String]) -> String {
    let mut html = String::from(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>Modifier Decks</title></head><body>\n",
    );
    html.push_str("<h1>Modifier Decks</h1>\n<div id=\"controls\">\n");
    html.push_str("<button onclick=\"post('/addPlayer')\">Add Player</button>\n");
    html.push_str("<select id=\"monster-select\">");
    for name in monster_types {
        let name = escape(name);
        html.push_str(&format!("<option value=\"{name}\">{name}</option>"));
    }
    html.push_str("</select>\n<button onclick=\"addAbility()\">Add Monster Ability Deck</button>\n");
    html.push_str("<button onclick=\"post('/resetDecks')\">Reset Decks</button>\n</div>\n");
    html.push_str("<div id=\"decks-container\">\n");
    for (id, state) in decks {
        html.push_str(&render_deck(id, state));
    }
    html.push_str("</div>\n<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body></html>\n");
    html
}

fn render_deck(id: &str, state: &DeckState) -> String {
    let id = escape(id);
    let face = state.last_drawn.as_ref().unwrap_or(&state.card_back);
    let class = if state.shuffle_pending {
        "deck needs-shuffle"
    } else {
        "deck"
    };
    let mut html = format!(
        "<section class=\"{class}\" id=\"deck-{id}\">\n<h2>{}</h2>\n<img src=\"{}\" alt=\"card\" width=\"160\">\n",
        title(&id),
        escape(face.as_str())
    );
    html.push_str(&format!(
        "<p>Draw: {} &middot; Discard: {}</p>\n",
        state.draw_pile, state.discard_pile
    ));
    html.push_str(&format!(
        "<button onclick=\"act('draw','{id}')\">Draw</button>\n<button onclick=\"act('shuffle','{id}')\">Shuffle</button>\n"
    ));
    if state.supports_modifiers() {
        html.push_str(&format!(
            "<p>Bless: {} <button onclick=\"act('bless','{id}')\">+</button><button onclick=\"act('removeBless','{id}')\">-</button></p>\n",
            state.active_blessings
        ));
        html.push_str(&format!(
            "<p>Curse: {} <button onclick=\"act('curse','{id}')\">+</button><button onclick=\"act('removeCurse','{id}')\">-</button></p>\n",
            state.active_curses
        ));
    }
    if id != "enemies" {
        html.push_str(&format!(
            "<button onclick=\"post('/deleteDeck/{id}')\">Remove</button>\n"
        ));
    }
    html.push_str("</section>\n");
    html
}

/// "monster-ability-imp-1" -> "Monster ability imp 1"
fn title(id: &str) -> String {
    let spaced = id.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
