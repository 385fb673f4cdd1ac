pub mod category;
pub mod composer;
pub mod config;
pub mod constants;
pub mod controller;
pub mod health;
pub mod markup;
pub mod message;
pub mod notification;
