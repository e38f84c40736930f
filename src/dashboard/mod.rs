pub mod app;
pub mod controller;
pub mod event_handler;
pub mod log_layer;
pub mod state;
pub mod ui;
pub mod view;
pub mod widgets;

pub use app::DashboardApp;
pub use controller::DashboardController;
pub use event_handler::handle_events;
pub use log_layer::LogPanelLayer;
