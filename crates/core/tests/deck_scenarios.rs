use gloomdeck_core::{
    BaseSet, CardId, Deck, DeckAction, DeckError, DeckKind, DeckRegistry, EventBus, Modifier,
    RngState, CARD_BACK, MAX_MODIFIER_COPIES,
};

macro_rules! keyword_case {
    ($name:ident, $keyword:expr, $expected:expr) => {
        #[test]
        fn $name() {
            assert_eq!(DeckAction::from_keyword($keyword), Some($expected));
        }
    };
}

keyword_case!(keyword_draw, "draw", DeckAction::Draw);
keyword_case!(keyword_shuffle, "shuffle", DeckAction::Shuffle);
keyword_case!(keyword_bless, "bless", DeckAction::AddBless);
keyword_case!(keyword_add_bless, "addBless", DeckAction::AddBless);
keyword_case!(keyword_curse, "curse", DeckAction::AddCurse);
keyword_case!(keyword_remove_bless, "removeBless", DeckAction::RemoveBless);
keyword_case!(keyword_remove_curse, "remove_curse", DeckAction::RemoveCurse);
keyword_case!(keyword_uncurse, "uncurse", DeckAction::RemoveCurse);
keyword_case!(keyword_reset, "reset", DeckAction::Reset);

#[test]
fn unknown_keyword_is_rejected() {
    assert_eq!(DeckAction::from_keyword("explode"), None);
}

#[test]
fn action_keywords_parse_back() {
    for action in DeckAction::ALL {
        assert_eq!(DeckAction::from_keyword(action.keyword()), Some(action));
    }
}

fn player(seed: u64) -> Deck {
    Deck::player(CardId::from(CARD_BACK), RngState::from_seed(seed))
}

fn monster(seed: u64) -> Deck {
    Deck::monster(CardId::from(CARD_BACK), RngState::from_seed(seed))
}

#[test]
fn twenty_first_draw_always_succeeds() {
    for seed in 0..20 {
        let mut deck = player(seed);
        for _ in 0..20 {
            deck.draw().expect("draw");
        }
        let state = deck.draw().expect("21st draw");
        assert!(state.last_drawn.is_some());
        assert_eq!(state.total_cards(), 20);
    }
}

#[test]
fn twenty_draws_without_triggers_fill_discard() {
    let cards: Vec<CardId> = BaseSet::player().cards;
    let mut deck = Deck::new(
        DeckKind::Player,
        Some(cards),
        CardId::from(CARD_BACK),
        RngState::from_seed(4),
    );
    for _ in 0..20 {
        deck.draw().expect("draw");
    }
    let state = deck.state();
    assert_eq!(state.discard_pile, 20);
    assert_eq!(state.draw_pile, 0);
    let state = deck.draw().expect("21st draw");
    assert_eq!(state.draw_pile, 19);
    assert_eq!(state.discard_pile, 1);
    assert!(state.last_drawn.is_some());
}

#[test]
fn trigger_card_queues_shuffle_for_next_draw() {
    let mut deck = monster(21);
    let triggers = deck.shuffle_triggers().to_vec();
    assert_eq!(triggers.len(), 2);
    let mut state = deck.draw().expect("draw");
    while !state.shuffle_pending {
        state = deck.draw().expect("draw");
    }
    let drawn = state.last_drawn.clone().expect("drawn card");
    assert!(triggers.contains(&drawn));

    let state = deck.draw().expect("draw after trigger");
    assert_eq!(state.discard_pile, 1);
    assert_eq!(state.draw_pile, 19);
    let drawn = state.last_drawn.clone().expect("drawn card");
    assert_eq!(state.shuffle_pending, triggers.contains(&drawn));
}

#[test]
fn player_triggers_are_null_and_double() {
    let deck = player(1);
    let names: Vec<&str> = deck.shuffle_triggers().iter().map(CardId::as_str).collect();
    assert_eq!(
        names,
        vec!["/imgs/player/gh-am-p1-19.png", "/imgs/player/gh-am-p1-20.png"]
    );
}

#[test]
fn empty_deck_always_fails() {
    let mut deck = Deck::ability("void", Vec::new(), CardId::from("back"), RngState::from_seed(1));
    for _ in 0..3 {
        assert_eq!(deck.draw(), Err(DeckError::Empty));
    }
    assert_eq!(deck.state().last_drawn, None);
}

#[test]
fn bless_limit_is_ten() {
    let mut deck = player(2);
    for n in 1..=15u8 {
        let result = deck.add_bless();
        if n <= MAX_MODIFIER_COPIES {
            assert_eq!(result.expect("added").active_blessings, n);
        } else {
            assert_eq!(result, Err(DeckError::LimitReached(Modifier::Bless)));
        }
    }
    let state = deck.state();
    assert_eq!(state.active_blessings, 10);
    assert_eq!(state.draw_pile, 30);
}

#[test]
fn ability_deck_ignores_bless() {
    let mut deck = Deck::ability(
        "imp",
        (1..=8).map(|n| CardId::new(format!("imp-{n}"))).collect(),
        CardId::from("imp-back"),
        RngState::from_seed(8),
    );
    let before = deck.state().draw_pile;
    assert!(matches!(deck.add_bless(), Err(DeckError::Unsupported { .. })));
    assert_eq!(deck.state().draw_pile, before);
    assert_eq!(deck.state().active_blessings, 0);
}

#[test]
fn drawn_bless_leaves_play_once() {
    let mut deck = player(30);
    deck.add_bless().expect("bless");
    let bless = deck
        .modifier_card(Modifier::Bless)
        .cloned()
        .expect("bless card");
    let mut draws = 0;
    loop {
        let state = deck.draw().expect("draw");
        draws += 1;
        if state.last_drawn.as_ref() == Some(&bless) {
            assert_eq!(state.active_blessings, 0);
            break;
        }
        assert_eq!(state.active_blessings, 1);
        assert!(draws < 1_000, "bless never drawn");
    }
    for _ in 0..40 {
        let state = deck.draw().expect("draw");
        assert_ne!(state.last_drawn.as_ref(), Some(&bless));
        assert_eq!(state.active_blessings, 0);
    }
    assert_eq!(deck.copies(&bless).draw, 0);
    assert_eq!(deck.copies(&bless).discard, 0);
}

#[test]
fn remove_after_drawn_never_goes_negative() {
    let mut deck = player(31);
    deck.add_bless().expect("bless");
    deck.add_bless().expect("bless");
    let bless = deck
        .modifier_card(Modifier::Bless)
        .cloned()
        .expect("bless card");
    while deck.copies(&bless).draw == 2 {
        deck.draw().expect("draw");
    }
    assert_eq!(deck.active(Modifier::Bless), 1);
    let state = deck.remove_bless().expect("remove");
    assert_eq!(state.active_blessings, 0);
    assert_eq!(deck.copies(&bless).draw, 0);
    assert_eq!(
        deck.remove_bless(),
        Err(DeckError::NothingToRemove(Modifier::Bless))
    );
    assert_eq!(deck.active(Modifier::Bless), 0);
}

#[test]
fn reset_restores_base_composition() {
    let mut deck = player(40);
    deck.add_bless().expect("bless");
    deck.add_curse().expect("curse");
    for _ in 0..7 {
        deck.draw().expect("draw");
    }
    let state = deck.reset();
    assert_eq!(state.draw_pile, 20);
    assert_eq!(state.discard_pile, 0);
    assert_eq!(state.active_blessings, 0);
    assert_eq!(state.active_curses, 0);
    assert_eq!(state.last_drawn, None);
    assert!(!state.shuffle_pending);
}

#[test]
fn registry_reset_all_strips_modifiers_everywhere() {
    let mut reg = DeckRegistry::new(RngState::from_seed(50));
    let mut events = EventBus::default();
    reg.create("enemies", DeckKind::Monster, None, CardId::from(CARD_BACK))
        .expect("create");
    reg.create("player1", DeckKind::Player, None, CardId::from(CARD_BACK))
        .expect("create");
    for id in ["enemies", "player1"] {
        reg.apply(id, DeckAction::AddCurse, &mut events).expect("curse");
        reg.apply(id, DeckAction::AddBless, &mut events).expect("bless");
        reg.apply(id, DeckAction::Draw, &mut events).expect("draw");
    }
    assert_eq!(reg.reset_all(&mut events), 2);
    for (_, state) in reg.list_all() {
        assert_eq!(state.active_blessings, 0);
        assert_eq!(state.active_curses, 0);
        assert_eq!(state.total_cards(), 20);
        assert_eq!(state.discard_pile, 0);
        assert!(!state.shuffle_pending);
    }
}

#[test]
fn state_serializes_with_optional_cards() {
    let deck = Deck::ability("imp", vec![CardId::from("a")], CardId::from("b"), RngState::from_seed(1));
    let value = serde_json::to_value(deck.state()).expect("json");
    assert_eq!(value["kind"], "monster-ability-imp");
    assert!(value["bless_card"].is_null());
    assert_eq!(value["draw_pile"], 1);
}
