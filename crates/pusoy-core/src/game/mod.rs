pub mod player;
pub mod rules;
pub mod serialization;
pub mod state;
pub mod table;
