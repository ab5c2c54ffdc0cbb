//! Players: turn order, per-player storage and the mutable player economy.
//!
//! ## PlayerOrder
//!
//! The game is strictly two-player: `First` and `Second`.
//!
//! ## PlayerPair
//!
//! Fixed two-slot storage indexed by `PlayerOrder`.
//!
//! ## Player
//!
//! Health, mana, rune threshold, hand, deck, board and the action log.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use super::action::ActionRecord;
use super::config::{FIRST_RUNE, MAX_HAND_SIZE, RUNE_STEP, STARTING_HEALTH};
use super::entity::InstanceId;
use super::error::GameError;
use crate::cards::CardId;
use crate::zones::Board;

/// Turn order of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerOrder {
    First,
    Second,
}

impl PlayerOrder {
    /// Both players, first to act first.
    pub const ALL: [PlayerOrder; 2] = [PlayerOrder::First, PlayerOrder::Second];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerOrder::First => 0,
            PlayerOrder::Second => 1,
        }
    }

    #[must_use]
    pub const fn opposing(self) -> Self {
        match self {
            PlayerOrder::First => PlayerOrder::Second,
            PlayerOrder::Second => PlayerOrder::First,
        }
    }
}

impl std::fmt::Display for PlayerOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index())
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use locm_engine::core::{PlayerOrder, PlayerPair};
///
/// let mut life: PlayerPair<i32> = PlayerPair::with_value(30);
/// life[PlayerOrder::Second] -= 4;
///
/// assert_eq!(life[PlayerOrder::First], 30);
/// assert_eq!(life[PlayerOrder::Second], 26);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create with values from a factory function.
    pub fn new(factory: impl Fn(PlayerOrder) -> T) -> Self {
        Self {
            data: [factory(PlayerOrder::First), factory(PlayerOrder::Second)],
        }
    }

    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Iterate over (PlayerOrder, &T) pairs, first player first.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerOrder, &T)> {
        PlayerOrder::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerOrder, &mut T) pairs, first player first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerOrder, &mut T)> {
        PlayerOrder::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Mutable access to both entries at once, ordered (`who`, opponent).
    pub fn split_mut(&mut self, who: PlayerOrder) -> (&mut T, &mut T) {
        let [first, second] = &mut self.data;
        match who {
            PlayerOrder::First => (first, second),
            PlayerOrder::Second => (second, first),
        }
    }
}

impl<T> Index<PlayerOrder> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: PlayerOrder) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerOrder> for PlayerPair<T> {
    fn index_mut(&mut self, player: PlayerOrder) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Cards in hand, in draw order.
pub type Hand = SmallVec<[InstanceId; MAX_HAND_SIZE]>;

/// Mutable per-player state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub order: PlayerOrder,

    /// May go to zero or below; the game ends when it does.
    pub health: i32,

    pub base_mana: i32,

    /// One-shot mana on top of `base_mana`.
    pub bonus_mana: i32,

    /// Currently spendable mana.
    pub mana: i32,

    /// Health checkpoint; crossing it queues a bonus draw.
    pub next_rune: i32,

    /// Extra cards to draw at the start of the next turn.
    pub bonus_draw: i32,

    /// Cards actually drawn at the start of this player's last turn.
    pub last_drawn: usize,

    /// Draft picks, template-level until battle setup.
    pub draft_picks: Vec<CardId>,

    /// Battle deck; the top card is the end of the vec.
    pub deck: Vec<InstanceId>,

    pub hand: Hand,
    pub board: Board,

    /// Every successfully applied battle action, oldest first.
    pub actions: Vec<ActionRecord>,
}

impl Player {
    #[must_use]
    pub fn new(order: PlayerOrder) -> Self {
        Self {
            order,
            health: STARTING_HEALTH,
            base_mana: 0,
            bonus_mana: 0,
            mana: 0,
            next_rune: FIRST_RUNE,
            bonus_draw: 0,
            last_drawn: 0,
            draft_picks: Vec::new(),
            deck: Vec::new(),
            hand: Hand::new(),
            board: Board::default(),
            actions: Vec::new(),
        }
    }

    /// Draw `amount` cards from the top of the deck.
    ///
    /// Stops at the first failure: `EmptyDeck` if the deck runs out,
    /// `FullHand` if the hand is at capacity. Cards drawn before the failure
    /// stay in hand.
    pub fn draw(&mut self, amount: usize) -> Result<(), GameError> {
        for _ in 0..amount {
            if self.deck.is_empty() {
                return Err(GameError::EmptyDeck);
            }

            if self.hand.len() >= MAX_HAND_SIZE {
                return Err(GameError::FullHand);
            }

            if let Some(card) = self.deck.pop() {
                self.hand.push(card);
            }
        }
        Ok(())
    }

    /// Lose health, then walk the rune threshold down past the new health.
    ///
    /// Each threshold crossed queues one bonus draw. The walk stops once the
    /// threshold reaches zero.
    pub fn damage(&mut self, amount: i32) -> i32 {
        self.health -= amount;

        while self.health <= self.next_rune && self.next_rune > 0 {
            self.next_rune -= RUNE_STEP;
            self.bonus_draw += 1;
        }

        amount
    }

    /// Gain health. Never touches the rune threshold.
    pub fn heal(&mut self, amount: i32) {
        self.health += amount;
    }

    /// Apply an on-play health delta: negative is damage, positive is healing.
    pub fn apply_health_delta(&mut self, delta: i32) {
        if delta < 0 {
            self.damage(-delta);
        } else {
            self.heal(delta);
        }
    }

    /// Spendable mana recomputed from base and bonus.
    pub fn refill_mana(&mut self) {
        self.mana = self.base_mana + self.bonus_mana;
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Position of a card in hand.
    #[must_use]
    pub fn hand_position(&self, id: InstanceId) -> Option<usize> {
        self.hand.iter().position(|&c| c == id)
    }
}
