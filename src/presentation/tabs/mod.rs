pub mod beacons;
pub mod radar;
pub mod settings;
