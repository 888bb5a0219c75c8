mod reference_controller;

pub use reference_controller::{configure_reference_routes, SharedProvider};
