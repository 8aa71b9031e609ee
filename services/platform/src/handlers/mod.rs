pub mod account;
pub mod admin;
pub mod album;
pub mod extract;
pub mod playlist;
pub mod principal;
pub mod session;
pub mod track;
