//! Оценка силы рук.

pub mod evaluator;
pub mod hand_value;

pub use evaluator::{best_of_seven, evaluate_five};
pub use hand_value::HandValue;
