pub mod config;
pub mod containment;
pub mod frame_engine;
pub mod offscreen;
pub mod overlay;
pub mod phrase;
pub mod session_state;
pub mod zone;
