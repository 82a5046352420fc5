//! Inputs to the window manager state: configuration and client hints
pub mod config;
pub mod hints;

#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use hints::{HintFlags, InitialState, WmHints};
