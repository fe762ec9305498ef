pub mod cookies;
pub mod slug;
