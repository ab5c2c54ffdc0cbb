//! Shared fixtures for integration tests.
//!
//! Scenarios are built by editing a `GameSnapshot` and restoring it, which
//! goes through the same public surface any driver has.

#![allow(dead_code)]

use std::sync::Arc;

use locm_engine::{
    Action, CardCatalog, CardId, CardInstance, CardKind, CardTemplate, GameConfig, GameSnapshot,
    GameState, InstanceId, Lane, PlayerOrder,
};

/// Install a test logger once; `RUST_LOG=trace` shows engine decisions.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A 40-card catalog: 28 creatures with a spread of costs, stats and
/// keywords, then green, red and blue items.
pub fn catalog() -> Arc<CardCatalog> {
    const KEYWORDS: [&str; 7] = ["", "G", "W", "C", "L", "BD", "GW"];

    let mut cards: Vec<CardTemplate> = (1..=28)
        .map(|i| {
            let n = i as i32;
            CardTemplate::creature(CardId::new(i), format!("Creature {i}"), n % 7, n % 5 + 1, n % 4 + 1)
                .with_keywords(KEYWORDS[i as usize % KEYWORDS.len()].parse().unwrap())
        })
        .collect();

    for i in 29..=32 {
        cards.push(CardTemplate::new(CardId::new(i), "Blessing", CardKind::GreenItem, 1, 1, 1));
    }
    for i in 33..=36 {
        cards.push(
            CardTemplate::new(CardId::new(i), "Curse", CardKind::RedItem, 2, -1, -2)
                .with_keywords("G".parse().unwrap()),
        );
    }
    for i in 37..=40 {
        cards.push(
            CardTemplate::new(CardId::new(i), "Bolt", CardKind::BlueItem, 2, 0, -2)
                .with_effects(0, 0, 1),
        );
    }

    Arc::new(CardCatalog::from_templates(cards))
}

/// Play the draft always taking slot 0.
pub fn finish_draft(state: &mut GameState) {
    while state.is_draft() {
        state.act(&Action::pick(0)).unwrap();
    }
}

/// A game at the first battle turn.
pub fn battle(seed: u64) -> GameState {
    battle_with(GameConfig::default(), seed)
}

pub fn battle_with(config: GameConfig, seed: u64) -> GameState {
    let mut state = GameState::new(catalog(), config, seed);
    finish_draft(&mut state);
    state
}

/// Editable scenario built from a battle-phase snapshot.
pub struct Scenario {
    pub snapshot: GameSnapshot,
}

impl Scenario {
    /// First player to act, empty hands and boards, 10 mana each.
    pub fn new() -> Self {
        let mut snapshot = battle(1).snapshot();

        for (_, player) in snapshot.players.iter_mut() {
            let mut ids: Vec<InstanceId> = player.hand.drain(..).collect();
            ids.extend(player.board.iter().map(|(_, id)| id));
            player.board.clear();
            for id in ids {
                snapshot.cards.remove(&id);
            }
            player.health = 30;
            player.next_rune = 25;
            player.bonus_draw = 0;
            player.base_mana = 10;
            player.bonus_mana = 0;
            player.mana = 10;
        }

        Self { snapshot }
    }

    fn add(&mut self, template: &CardTemplate) -> InstanceId {
        let id = self.snapshot.instances.next_id();
        self.snapshot.cards.insert(id, CardInstance::from_template(template, id));
        id
    }

    pub fn hand(&mut self, who: PlayerOrder, template: &CardTemplate) -> InstanceId {
        let id = self.add(template);
        self.snapshot.players[who].hand.push(id);
        id
    }

    /// Put a creature on the board, ready to attack.
    pub fn board(&mut self, who: PlayerOrder, lane: Lane, template: &CardTemplate) -> InstanceId {
        let id = self.add(template);
        self.snapshot.players[who].board.lane_mut(lane).push(id);
        if let Some(combat) = self.snapshot.cards.get_mut(&id).and_then(CardInstance::combat_mut) {
            combat.can_attack = true;
        }
        id
    }

    pub fn build(&self) -> GameState {
        GameState::restore(self.snapshot.clone(), catalog())
    }
}

pub fn creature(attack: i32, defense: i32, keywords: &str) -> CardTemplate {
    CardTemplate::creature(CardId::new(1), "Test creature", 1, attack, defense)
        .with_keywords(keywords.parse().unwrap())
}

pub fn item(kind: CardKind, cost: i32, attack: i32, defense: i32) -> CardTemplate {
    CardTemplate::new(CardId::new(29), "Test item", kind, cost, attack, defense)
}
