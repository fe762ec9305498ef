pub mod book;
pub mod navigation;
pub mod responses;
