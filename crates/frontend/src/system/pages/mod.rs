pub mod login;
pub mod settings;

pub use login::LoginPage;
pub use settings::SettingsPage;
