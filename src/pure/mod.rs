//! Side effect free management of internal window manager state
pub mod category;
pub mod change;
pub mod client_data;
pub mod desktop;
pub mod geometry;
pub mod layer;

#[doc(inline)]
pub use category::CategoryMapping;
#[doc(inline)]
pub use change::Change;
#[doc(inline)]
pub use client_data::{ClientData, MoveResize};
#[doc(inline)]
pub use desktop::Desktop;
#[doc(inline)]
pub use layer::Layer;
