pub mod chat_area;
pub mod group_chat;
pub mod input_bar;
pub mod sidebar;
pub mod status_panel;
