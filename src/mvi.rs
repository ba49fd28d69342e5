//! Unidirectional state flow for screens driven by user input and async work.
//!
//! An intent goes into a reducer together with the current state; the new
//! state comes out and is published to whoever renders it. Side effects live
//! outside the reducer and are derived by comparing successive states.

/// Something that happened: a user edit, a scroll, a finished request.
pub trait Intent: Send + 'static {}

/// A complete, comparable snapshot of what a screen shows.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// The only place state transitions are decided.
///
/// `reduce` must be pure: same state and intent, same result.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
