pub mod app;
pub mod dialogs;
