pub mod api;
pub mod channel;
pub mod client;

pub use api::ApiClient;
pub use channel::LiveChannel;
pub use client::ChatClient;
