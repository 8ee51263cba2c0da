//! Движок раздачи: действия, торговля, раздача карт, банки, шоудаун,
//! жизненный цикл стола.

pub mod actions;
pub mod betting;
pub mod dealing;
pub mod errors;
pub mod events;
pub mod lifecycle;
pub mod pots;
pub mod showdown;

pub use actions::{apply_action, settle_round, ActionKind, ActionOutcome};
pub use errors::EngineError;
pub use events::{HandEvent, HandEventKind, HandJournal};
pub use lifecycle::{
    buy_in, call_clock, leave, set_disconnected, sit, sit_in, sit_out, start_hand,
};
pub use pots::{calculate_pots, Pot};
