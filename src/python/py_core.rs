//! Core type bindings for Python.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::core::{Action, GameError};

/// Map an engine error onto a Python exception.
pub(crate) fn game_err(err: GameError) -> PyErr {
    match err {
        GameError::GameAlreadyEnded => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Python wrapper for Action.
#[pyclass(name = "Action")]
#[derive(Clone, Debug)]
pub struct PyAction(pub Action);

#[pymethods]
impl PyAction {
    /// Parse a protocol command such as `"ATTACK 5 -1"`.
    #[new]
    fn new(text: &str) -> PyResult<Self> {
        text.parse().map(Self).map_err(game_err)
    }

    /// `PASS`, `PICK`, `SUMMON`, `ATTACK` or `USE`.
    #[getter]
    fn kind(&self) -> &'static str {
        self.0.action_type().name()
    }

    /// Acting instance id, if any.
    #[getter]
    fn origin(&self) -> Option<u32> {
        self.0.origin().map(|id| id.raw())
    }

    /// Lane index, instance id, or -1 for the opposing player.
    #[getter]
    fn target(&self) -> i64 {
        self.0.protocol_target()
    }

    fn __str__(&self) -> String {
        self.0.to_string()
    }

    fn __repr__(&self) -> String {
        format!("Action({:?})", self.0.to_string())
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}
