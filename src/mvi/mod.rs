//! Model-View-Intent primitives for the gallery state machines.
//!
//! Both the collection loader and the submission pipeline keep their
//! state behind a reducer: the async drivers perform I/O, then feed the
//! result back in as an intent.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ snapshot (display layer)
//!    ↑                               │
//!    └──── driver (fetch / upload) ──┘
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
