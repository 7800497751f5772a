pub mod edit;
pub mod encode;
pub mod export;
pub mod list;
pub mod show;
