//! Game state bindings for Python.

use std::sync::Arc;

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::cards::CardCatalog;
use crate::core::{GameConfig, GameState, Phase};

use super::py_core::{game_err, PyAction};

/// Python wrapper for GameState.
///
/// Driven through `legal_actions` / `action_mask` and `act` / `act_id`.
#[pyclass(name = "LocmState")]
pub struct PyLocmState {
    state: GameState,
}

#[pymethods]
impl PyLocmState {
    /// Start a new game from a catalog file.
    ///
    /// # Arguments
    /// - catalog_path: Card list with exactly 160 records
    /// - seed: RNG seed for deterministic games
    /// - items: Whether item cards take part in the draft
    #[new]
    #[pyo3(signature = (catalog_path, seed = 0, items = true))]
    fn new(catalog_path: &str, seed: u64, items: bool) -> PyResult<Self> {
        let catalog =
            CardCatalog::load(catalog_path).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Self::start(catalog, seed, items)
    }

    /// Start a new game from catalog text (any number of records).
    ///
    /// Raises ValueError when fewer than three cards are draftable.
    #[staticmethod]
    #[pyo3(signature = (text, seed = 0, items = true))]
    fn from_catalog_text(text: &str, seed: u64, items: bool) -> PyResult<Self> {
        let catalog = CardCatalog::parse(text).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Self::start(catalog, seed, items)
    }

    /// Legal actions for the player to act.
    fn legal_actions(&self) -> Vec<PyAction> {
        self.state.legal_actions().into_iter().map(PyAction).collect()
    }

    /// Legality mask as a numpy bool array (3, 41 or 145 entries; empty once
    /// the game has ended).
    fn action_mask<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        PyArray1::from_slice_bound(py, &self.state.action_mask())
    }

    /// Apply an action.
    fn act(&mut self, action: &PyAction) -> PyResult<()> {
        self.state.act(&action.0).map_err(game_err)
    }

    /// Apply the action at a mask index.
    fn act_id(&mut self, index: usize) -> PyResult<()> {
        self.state.act_id(index).map_err(game_err)
    }

    /// Independent copy for lookahead.
    fn copy(&self) -> Self {
        Self {
            state: self.state.clone_state(),
        }
    }

    /// `"draft"`, `"battle"` or `"ended"`.
    #[getter]
    fn phase(&self) -> &'static str {
        match self.state.phase() {
            Phase::Draft => "draft",
            Phase::Battle => "battle",
            Phase::Ended => "ended",
        }
    }

    #[getter]
    fn turn(&self) -> u32 {
        self.state.turn()
    }

    /// Index (0 or 1) of the player to act.
    #[getter]
    fn current_player(&self) -> usize {
        self.state.current_player().index()
    }

    #[getter]
    fn winner(&self) -> Option<usize> {
        self.state.winner().map(|p| p.index())
    }

    #[getter]
    fn was_last_action_invalid(&self) -> bool {
        self.state.was_last_action_invalid()
    }

    /// Native protocol text for the player to act.
    fn __str__(&self) -> String {
        self.state.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "LocmState(phase={}, turn={}, current=P{})",
            self.phase(),
            self.state.turn(),
            self.state.current_player().index()
        )
    }
}

impl PyLocmState {
    fn start(catalog: CardCatalog, seed: u64, items: bool) -> PyResult<Self> {
        let config = GameConfig::default().with_items(items);
        let state = GameState::try_new(Arc::new(catalog), config, seed).map_err(game_err)?;
        Ok(Self { state })
    }
}
