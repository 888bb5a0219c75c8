mod calculation_controller;

pub use calculation_controller::{calculate_invoice, configure_calculation_routes};
