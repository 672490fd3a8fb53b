pub mod bot;
pub mod policy;

pub use bot::{FollowPlanner, HandPartition, LeadPlanner};
pub use policy::{ComboPolicy, GreedyPolicy, TurnContext};
