//! Python bindings for the LOCM rules engine.
//!
//! This is the surface environment wrappers drive: actions in, legality
//! masks and protocol text out.
//!
//! # Quick Start
//!
//! ```python
//! import locm_engine as locm
//!
//! state = locm.LocmState("cardlist.txt", seed=42)
//!
//! while state.winner is None:
//!     mask = state.action_mask()
//!     state.act_id(int(mask.nonzero()[0][-1]))
//!
//! print(state)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_state;

pub use py_core::*;
pub use py_state::*;

/// locm_engine: Legends of Code and Magic rules engine.
#[pymodule]
fn locm_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAction>()?;
    m.add_class::<PyLocmState>()?;

    Ok(())
}
