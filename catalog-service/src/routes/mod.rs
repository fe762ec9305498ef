pub mod book;
pub mod catalog;
pub mod health;
pub mod search;
pub mod views;
