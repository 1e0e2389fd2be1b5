// Editor UI

pub mod app;

pub use app::EditorApp;
