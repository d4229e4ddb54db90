pub mod api_utils;
pub mod backend;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod error;
pub mod format;
pub mod hooks;
pub mod icons;
pub mod list_utils;
pub mod preferences;
pub mod state;
pub mod storage;
pub mod text_utils;
pub mod theme;
pub mod validation;
