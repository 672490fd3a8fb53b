mod greedy;

pub use greedy::GreedyPolicy;
pub use pusoy_core::game::player::{ComboPolicy, TurnContext};
