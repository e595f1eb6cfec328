pub mod action;
pub mod auth;
