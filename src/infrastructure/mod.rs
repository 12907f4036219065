pub mod logging;
pub mod ranging;
