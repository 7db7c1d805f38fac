//! TUI screen implementations.

pub mod callsign;
pub mod search;

pub use callsign::{CallsignLookupState, draw_callsign};
pub use search::{SearchFormState, draw_search};
