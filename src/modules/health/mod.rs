// Health module
//
// Liveness and readiness probes.

pub mod controllers;

pub use controllers::configure;
