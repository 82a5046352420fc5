//! # smallwm: client bookkeeping for a small stacking window manager
//!
//! This crate holds the side effect free state of the window manager: which
//! desktop every client lives on, which stacking layer it is in, which client
//! has the input focus and where each client sits on screen. Every mutation
//! is recorded as a [Change] so that a rendering layer can replay it against
//! the X server (or anything else that can map, raise and configure windows).
//!
//! The state itself lives in [ClientData], built on top of the generic
//! [CategoryMapping] which is used once for desktops and once for layers.
//!
//! ```
//! use smallwm::{pure::geometry::Rect, Change, ClientData, Config, Desktop, WmHints, Xid};
//!
//! let mut cd: ClientData<Xid> = ClientData::try_new(Config::default()).unwrap();
//! let win = Xid::from(42);
//!
//! cd.add_client(win, WmHints::default(), Rect::new(0, 0, 100, 100)).unwrap();
//! cd.flush_changes();
//!
//! cd.iconify(&win).unwrap();
//!
//! assert_eq!(
//!     cd.flush_changes(),
//!     vec![
//!         Change::Focus { old: Some(win), new: None },
//!         Change::ClientDesktop { client: win, desktop: Desktop::Icons },
//!     ]
//! );
//! ```
#![warn(
    clippy::complexity,
    clippy::correctness,
    clippy::style,
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rustdoc::all
)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Deref;

pub mod core;
pub mod pure;
pub mod x;

#[doc(inline)]
pub use crate::core::{
    config::Config,
    hints::{HintFlags, InitialState, WmHints},
};
#[doc(inline)]
pub use pure::{
    category::CategoryMapping,
    change::Change,
    client_data::{ClientData, MoveResize},
    desktop::Desktop,
    layer::Layer,
};

/// Error variants from the core smallwm library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested client (or mapping element) is not being tracked
    #[error("{client} is not a known client")]
    UnknownClient {
        /// Debug representation of the client that was requested
        client: String,
    },

    /// The requested category (desktop or layer) does not exist
    #[error("{category} is not a known category")]
    UnknownCategory {
        /// Debug representation of the category that was requested
        category: String,
    },

    /// The operation was rejected because the current state does not allow it
    #[error(transparent)]
    Precondition(#[from] Violation),

    /// A [WindowOps][crate::x::WindowOps] implementation failed to apply a change
    #[error("backend error: {0}")]
    Backend(String),
}

impl Error {
    pub(crate) fn unknown_client<C: std::fmt::Debug>(client: &C) -> Self {
        Self::UnknownClient {
            client: format!("{client:?}"),
        }
    }

    pub(crate) fn unknown_category<K: std::fmt::Debug>(category: &K) -> Self {
        Self::UnknownCategory {
            category: format!("{category:?}"),
        }
    }

    /// True if this error was caused by referencing a client or category that
    /// does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownClient { .. } | Self::UnknownCategory { .. })
    }

    /// True if this error was caused by an operation that is not legal from the
    /// current state.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}

/// The individual guards that can reject an operation on [ClientData].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// A client or element was registered twice
    #[error("{element} is already being tracked")]
    AlreadyTracked {
        /// Debug representation of the duplicate element
        element: String,
    },

    /// There must be at least one user desktop
    #[error("at least one desktop is required")]
    NoDesktops,

    /// Clients must always have a non-zero width and height
    #[error("invalid size {w}x{h}: width and height must both be positive")]
    InvalidSize {
        /// The requested width
        w: u32,
        /// The requested height
        h: u32,
    },

    /// Raw WM_HINTS data could not be parsed
    #[error("invalid window manager hints: {0}")]
    InvalidHints(String),

    /// Layers are bounded to the range [Layer::MIN, Layer::MAX]
    #[error("{0} is not a valid layer")]
    InvalidLayer(u8),

    /// Only clients on the current desktop can hold focus
    #[error("cannot focus a client that is not on the current desktop")]
    NotOnCurrentDesktop,

    /// Clients on ALL, ICONS, MOVING or RESIZING can not be cycled between desktops
    #[error("cannot change desktop from the virtual desktop {0}")]
    OnVirtualDesktop(Desktop),

    /// The operation needs a client that is currently visible
    #[error("the client is not visible (on {0})")]
    Invisible(Desktop),

    /// The client is already iconified
    #[error("the client is already iconified")]
    AlreadyIconified,

    /// The client is not iconified
    #[error("the client is not iconified")]
    NotIconified,

    /// The client is already being moved
    #[error("the client is already being moved")]
    AlreadyMoving,

    /// The client is already being resized
    #[error("the client is already being resized")]
    AlreadyResizing,

    /// The client is not being moved
    #[error("the client is not being moved")]
    NotMoving,

    /// The client is not being resized
    #[error("the client is not being resized")]
    NotResizing,

    /// Only one client may be moved or resized at a time and some other
    /// operations are blocked until that client is released
    #[error("another client is currently being moved or resized")]
    MoveResizeInProgress,
}

/// A Result where the error type is a smallwm [Error]
pub type Result<T> = std::result::Result<T, Error>;

/// An X11 ID for a given resource
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Xid(pub(crate) u32);

impl std::fmt::Display for Xid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for Xid {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<u32> for Xid {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Window manager state keyed by X11 window ids
pub type ClientSet = ClientData<Xid>;
