pub mod admin;
pub mod health;
pub mod pages;
pub mod preferences;
pub mod upload;
