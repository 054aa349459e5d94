// src/models/mod.rs

pub mod chat;
pub mod question;
pub mod quiz;
