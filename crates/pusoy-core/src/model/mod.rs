pub mod card;
pub mod combo;
pub mod deck;
pub mod hand;
pub mod rank;
pub mod score;
pub mod suit;
