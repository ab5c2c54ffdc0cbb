//! Game state: the single container both phases share.
//!
//! ## GameState
//!
//! Owns both players, the card arena, the draft schedule, phase/turn
//! bookkeeping and the seeded RNG. It is mutated exclusively through
//! [`GameState::act`].
//!
//! ## Card arena
//!
//! Card data lives in one map keyed by `InstanceId`. Hands, decks, lanes and
//! the action log hold ids only, so removing a card from one container never
//! leaves a stale copy in another.
//!
//! ## Derived legal actions
//!
//! The legal-action list and the legality mask are derived values. They are
//! computed on first query and tagged with the state version; `act` bumps the
//! version, so the next query recomputes.

use std::cell::RefCell;
use std::sync::Arc;

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::config::{GameConfig, DRAFT_CHOICES};
use super::entity::{InstanceCounter, InstanceId};
use super::error::{GameError, SnapshotError};
use super::player::{Player, PlayerOrder, PlayerPair};
use super::rng::{GameRng, GameRngState};
use crate::cards::{CardCatalog, CardId, CardInstance, CardKind};
use crate::rules::{battle, draft, legal, mask, turn};
use crate::zones::{Lane, Location};

/// Game phase. Transitions are linear: Draft, then Battle, then Ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Draft,
    Battle,
    Ended,
}

/// One draft turn's reveal, shown to both players.
pub type DraftChoices = [CardId; DRAFT_CHOICES];

#[derive(Clone, Debug, Default)]
struct ActionCache {
    version: u64,
    actions: Option<Vec<Action>>,
    mask: Option<Vec<bool>>,
}

/// Full game state.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use locm_engine::cards::{CardCatalog, CardId, CardTemplate};
/// use locm_engine::core::{Action, GameConfig, GameState, Phase};
///
/// let catalog = Arc::new(CardCatalog::from_templates(
///     (1..=10).map(|i| CardTemplate::creature(CardId::new(i), "Grunt", 1, 1, 1)).collect(),
/// ));
/// let config = GameConfig::default().with_draft_turns(5);
/// let mut state = GameState::new(catalog, config, 7);
///
/// while state.phase() == Phase::Draft {
///     state.act(&Action::pick(0)).unwrap();
/// }
///
/// assert_eq!(state.phase(), Phase::Battle);
/// assert_eq!(state.action_mask().len(), 145);
/// ```
#[derive(Clone, Debug)]
pub struct GameState {
    catalog: Arc<CardCatalog>,
    config: GameConfig,

    pub(crate) phase: Phase,

    /// Shared turn counter, starting at 1. Resets to 1 when battle begins.
    pub(crate) turn: u32,

    pub(crate) current: PlayerOrder,
    pub(crate) players: PlayerPair<Player>,

    /// Card instances by id.
    pub(crate) cards: OrdMap<InstanceId, CardInstance>,

    /// Draft reveal schedule, one entry per draft turn.
    pub(crate) draft: Vec<DraftChoices>,

    pub(crate) winner: Option<PlayerOrder>,
    pub(crate) instances: InstanceCounter,

    /// Deterministic RNG.
    pub(crate) rng: GameRng,

    last_error: Option<GameError>,
    version: u64,
    cache: RefCell<ActionCache>,
}

impl GameState {
    /// Create a new game and reveal the first draft choices.
    ///
    /// Panics if the catalog offers fewer than three eligible cards; use
    /// [`GameState::try_new`] for catalogs that come from outside.
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>, config: GameConfig, seed: u64) -> Self {
        match Self::try_new(catalog, config, seed) {
            Ok(state) => state,
            Err(err) => panic!("cannot start game: {err}"),
        }
    }

    /// Create a new game, failing with `DraftPoolTooSmall` when the catalog
    /// cannot fill a reveal.
    pub fn try_new(catalog: Arc<CardCatalog>, config: GameConfig, seed: u64) -> Result<Self, GameError> {
        let mut rng = GameRng::new(seed);
        let draft = draft::new_draft(&catalog, &config, &mut rng)?;

        log::debug!(
            "new game: seed={} items={} draft_turns={}",
            seed,
            config.items,
            config.draft_turns
        );

        Ok(Self {
            catalog,
            config,
            phase: Phase::Draft,
            turn: 1,
            current: PlayerOrder::First,
            players: PlayerPair::new(Player::new),
            cards: OrdMap::new(),
            draft,
            winner: None,
            instances: InstanceCounter::default(),
            rng,
            last_error: None,
            version: 0,
            cache: RefCell::new(ActionCache::default()),
        })
    }

    /// Create a game with the default configuration.
    #[must_use]
    pub fn with_seed(catalog: Arc<CardCatalog>, seed: u64) -> Self {
        Self::new(catalog, GameConfig::default(), seed)
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.phase == Phase::Draft
    }

    #[must_use]
    pub fn is_battle(&self) -> bool {
        self.phase == Phase::Battle
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerOrder {
        self.current
    }

    /// The winner, once the game has ended.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerOrder> {
        self.winner
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<CardCatalog> {
        &self.catalog
    }

    #[must_use]
    pub fn player(&self, order: PlayerOrder) -> &Player {
        &self.players[order]
    }

    #[must_use]
    pub fn current_player_state(&self) -> &Player {
        &self.players[self.current]
    }

    #[must_use]
    pub fn opposing_player_state(&self) -> &Player {
        &self.players[self.current.opposing()]
    }

    /// Look up a card instance.
    #[must_use]
    pub fn card(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    /// Number of live card instances (hands, decks and boards).
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// This turn's draft reveal, during the draft.
    #[must_use]
    pub fn current_draft_choices(&self) -> Option<&DraftChoices> {
        if self.phase != Phase::Draft {
            return None;
        }
        self.draft.get(self.turn as usize - 1)
    }

    /// The full draft reveal schedule.
    #[must_use]
    pub fn draft_schedule(&self) -> &[DraftChoices] {
        &self.draft
    }

    #[must_use]
    pub fn was_last_action_invalid(&self) -> bool {
        self.last_error.is_some()
    }

    /// Why the last action was rejected, if it was.
    #[must_use]
    pub fn last_action_error(&self) -> Option<&GameError> {
        self.last_error.as_ref()
    }

    /// Mutation counter; bumped by every `act`.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Locate a card relative to the current player.
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<Location> {
        let me = &self.players[self.current];
        let them = &self.players[self.current.opposing()];

        if me.hand.contains(&id) {
            return Some(Location::PlayerHand);
        }
        if them.hand.contains(&id) {
            return Some(Location::EnemyHand);
        }
        for lane in Lane::ALL {
            if me.board.lane(lane).contains(&id) {
                return Some(Location::PlayerLane(lane));
            }
        }
        for lane in Lane::ALL {
            if them.board.lane(lane).contains(&id) {
                return Some(Location::EnemyLane(lane));
            }
        }
        None
    }

    /// Whether the current player could play this hand card at all:
    /// affordable, and a lane or target of the right kind exists.
    #[must_use]
    pub fn can_play(&self, id: InstanceId) -> bool {
        let Some(card) = self.cards.get(&id) else {
            return false;
        };
        let me = &self.players[self.current];
        let them = &self.players[self.current.opposing()];

        if card.cost > me.mana {
            return false;
        }

        match card.card_kind() {
            CardKind::Creature => Lane::ALL.into_iter().any(|lane| !me.board.is_full(lane)),
            CardKind::GreenItem => !me.board.is_empty(),
            CardKind::RedItem => !them.board.is_empty(),
            CardKind::BlueItem => true,
        }
    }

    // === Legal actions ===

    /// Legal actions for the current player.
    ///
    /// Draft: the three picks. Battle: summons, attacks, then item uses, or
    /// just `Pass` when nothing else is possible. Ended: none.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut cache = self.synced_cache();
        cache
            .actions
            .get_or_insert_with(|| legal::legal_actions(self))
            .clone()
    }

    /// Fixed-width legality mask over the canonical action-id space.
    #[must_use]
    pub fn action_mask(&self) -> Vec<bool> {
        let mut cache = self.synced_cache();
        cache
            .mask
            .get_or_insert_with(|| mask::action_mask(self))
            .clone()
    }

    fn synced_cache(&self) -> std::cell::RefMut<'_, ActionCache> {
        let mut cache = self.cache.borrow_mut();
        if cache.version != self.version {
            *cache = ActionCache {
                version: self.version,
                ..ActionCache::default()
            };
        }
        cache
    }

    // === Mutation ===

    /// Apply an action for the current player.
    ///
    /// Rule violations (insufficient mana, malformed target, full lane, unknown
    /// card) do not error: the state is left unchanged apart from the
    /// invalid-action flag. The only error is acting on an ended game.
    pub fn act(&mut self, action: &Action) -> Result<(), GameError> {
        self.last_error = None;

        match self.phase {
            Phase::Ended => return Err(GameError::GameAlreadyEnded),
            Phase::Draft => self.act_on_draft(action),
            Phase::Battle => self.act_on_battle(action),
        }

        self.version += 1;
        Ok(())
    }

    /// Decode a legality-mask index and apply it.
    pub fn act_id(&mut self, index: usize) -> Result<(), GameError> {
        if self.phase == Phase::Ended {
            return Err(GameError::GameAlreadyEnded);
        }
        let action = mask::decode_action(self, index)?;
        self.act(&action)
    }

    /// Map a legality-mask index to a concrete action in this state.
    pub fn decode_action(&self, index: usize) -> Result<Action, GameError> {
        mask::decode_action(self, index)
    }

    /// Map an action to its legality-mask index in this state, if it has one.
    #[must_use]
    pub fn encode_action(&self, action: &Action) -> Option<usize> {
        mask::encode_action(self, action)
    }

    fn act_on_draft(&mut self, action: &Action) {
        if let Err(err) = draft::pick(self, action) {
            self.reject(action, err);
            return;
        }

        turn::next_turn(self);

        if self.phase == Phase::Battle {
            turn::prepare_for_battle(self);
            turn::new_battle_turn(self);
            turn::check_health(self);
        }
    }

    fn act_on_battle(&mut self, action: &Action) {
        let resolved = battle::resolve(self, action);

        if let Err(err) = resolved {
            self.reject(action, err);
        } else {
            log::trace!("{} turn {}: {}", self.current, self.turn, action);
        }

        turn::sweep_dead(self);
        turn::check_health(self);

        if self.phase == Phase::Battle && self.last_error.is_none() && *action == Action::Pass {
            turn::next_turn(self);
            turn::new_battle_turn(self);
            turn::check_health(self);
        }
    }

    fn reject(&mut self, action: &Action, err: GameError) {
        log::debug!("{} rejected {}: {}", self.current, action, err);
        self.last_error = Some(err);
    }

    pub(crate) fn next_instance_id(&mut self) -> InstanceId {
        self.instances.next_id()
    }

    // === Cloning & snapshots ===

    /// Independent deep copy, RNG position included.
    ///
    /// Card data sits in a persistent map, so the copy is cheap and shares no
    /// mutable state with the source.
    #[must_use]
    pub fn clone_state(&self) -> Self {
        self.clone()
    }

    /// Capture everything except the shared catalog, the derived cache and
    /// the last action's error. A restored game starts with no invalid flag.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config.clone(),
            phase: self.phase,
            turn: self.turn,
            current: self.current,
            players: self.players.clone(),
            cards: self.cards.clone(),
            draft: self.draft.clone(),
            winner: self.winner,
            instances: self.instances,
            rng: self.rng.state(),
        }
    }

    /// Rebuild a state from a snapshot and the catalog it was played with.
    #[must_use]
    pub fn restore(snapshot: GameSnapshot, catalog: Arc<CardCatalog>) -> Self {
        Self {
            catalog,
            config: snapshot.config,
            phase: snapshot.phase,
            turn: snapshot.turn,
            current: snapshot.current,
            players: snapshot.players,
            cards: snapshot.cards,
            draft: snapshot.draft,
            winner: snapshot.winner,
            instances: snapshot.instances,
            rng: GameRng::from_state(&snapshot.rng),
            last_error: None,
            version: 0,
            cache: RefCell::new(ActionCache::default()),
        }
    }
}

/// Serializable capture of a `GameState`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GameConfig,
    pub phase: Phase,
    pub turn: u32,
    pub current: PlayerOrder,
    pub players: PlayerPair<Player>,
    pub cards: OrdMap<InstanceId, CardInstance>,
    pub draft: Vec<DraftChoices>,
    pub winner: Option<PlayerOrder>,
    pub instances: InstanceCounter,
    pub rng: GameRngState,
}

impl GameSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardTemplate;

    fn catalog() -> Arc<CardCatalog> {
        Arc::new(CardCatalog::from_templates(
            (1..=12)
                .map(|i| CardTemplate::creature(CardId::new(i), format!("C{i}"), 1, 1, 2))
                .collect(),
        ))
    }

    fn small_config() -> GameConfig {
        GameConfig::default().with_draft_turns(6).with_draft_pool_size(10)
    }

    fn finish_draft(state: &mut GameState) {
        while state.is_draft() {
            state.act(&Action::pick(0)).unwrap();
        }
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(catalog(), small_config(), 42);

        assert_eq!(state.phase(), Phase::Draft);
        assert_eq!(state.turn(), 1);
        assert_eq!(state.current_player(), PlayerOrder::First);
        assert_eq!(state.winner(), None);
        assert_eq!(state.draft_schedule().len(), 6);
        assert!(state.current_draft_choices().is_some());
        assert!(!state.was_last_action_invalid());
    }

    #[test]
    fn test_draft_alternates_players() {
        let mut state = GameState::new(catalog(), small_config(), 42);

        state.act(&Action::pick(1)).unwrap();
        assert_eq!(state.current_player(), PlayerOrder::Second);
        assert_eq!(state.turn(), 1);

        state.act(&Action::pick(2)).unwrap();
        assert_eq!(state.current_player(), PlayerOrder::First);
        assert_eq!(state.turn(), 2);
    }

    #[test]
    fn test_battle_begins_after_draft() {
        let mut state = GameState::new(catalog(), small_config(), 42);
        finish_draft(&mut state);

        assert_eq!(state.phase(), Phase::Battle);
        assert_eq!(state.turn(), 1);
        assert_eq!(state.current_player(), PlayerOrder::First);
        assert!(state.current_draft_choices().is_none());
        assert_eq!(state.card_count(), 12);
    }

    #[test]
    fn test_cache_tracks_version() {
        let mut state = GameState::new(catalog(), small_config(), 42);
        let before = state.version();

        assert_eq!(state.legal_actions().len(), 3);
        assert_eq!(state.action_mask(), vec![true; 3]);

        finish_draft(&mut state);

        assert!(state.version() > before);
        assert_eq!(state.action_mask().len(), 145);
    }

    #[test]
    fn test_acting_on_ended_game_errors() {
        let mut state = GameState::new(catalog(), small_config(), 42);
        state.phase = Phase::Ended;
        state.winner = Some(PlayerOrder::First);

        assert_eq!(state.act(&Action::Pass), Err(GameError::GameAlreadyEnded));
        assert_eq!(state.act_id(0), Err(GameError::GameAlreadyEnded));
        assert!(state.legal_actions().is_empty());
        assert!(state.action_mask().is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = GameState::new(catalog(), small_config(), 42);
        finish_draft(&mut state);

        let bytes = state.snapshot().to_bytes().unwrap();
        let restored = GameState::restore(GameSnapshot::from_bytes(&bytes).unwrap(), catalog());

        assert_eq!(restored.snapshot(), state.snapshot());
        assert_eq!(restored.to_string(), state.to_string());
    }

    #[test]
    fn test_locate() {
        let mut state = GameState::new(catalog(), small_config(), 42);
        finish_draft(&mut state);

        let mine = state.current_player_state().hand[0];
        let theirs = state.opposing_player_state().hand[0];

        assert_eq!(state.locate(mine), Some(Location::PlayerHand));
        assert_eq!(state.locate(theirs), Some(Location::EnemyHand));
        assert_eq!(state.locate(InstanceId(999)), None);
    }
}
