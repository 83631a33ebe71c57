//! Desktop client for the room chat server: friend search, group chats and a
//! live chat timeline fed by a request/response API plus a websocket channel.

pub mod chat;
pub mod common;
pub mod config;
pub mod error;
pub mod friends;
pub mod network;
pub mod ui;
