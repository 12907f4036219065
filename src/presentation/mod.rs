pub mod app;
pub mod components;
pub mod marker;
pub mod tabs;
pub mod theme;

pub use app::BeaconLocatorApp;
