//! Job board controller runtime: wires the core state machine to the engine,
//! the address bar and the favorites store.
pub mod config;
mod controller;
mod effects;
pub mod logging;
pub mod persistence;

pub use config::ControllerConfig;
pub use controller::Controller;
pub use effects::EffectRunner;
