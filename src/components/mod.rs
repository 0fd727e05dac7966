pub mod app;
pub mod ask_card;
pub mod fx_layer;
pub mod settings_modal;
pub mod yes_panel;
