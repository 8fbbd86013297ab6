pub mod audit;
pub mod member;
pub mod party;
pub mod settlement;
