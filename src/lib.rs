pub mod auth;
pub mod config;
pub mod content;
pub mod countup;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod icons;
pub mod inquiry;
pub mod pages;
pub mod templates_structs;
pub mod uploads;
