//! Notifications of state changes for the rendering layer to apply
use crate::pure::{desktop::Desktop, layer::Layer};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::EnumDiscriminants;

/// A single state transition recorded by [ClientData][crate::ClientData].
///
/// Changes are queued in the order they happen and drained with
/// [ClientData::flush_changes][crate::ClientData::flush_changes]. Applying
/// them in order never requires showing an intermediate invalid state: focus
/// is always removed before a client leaves the current desktop and only
/// restored once it is back on a visible desktop.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumDiscriminants)]
#[strum_discriminants(name(ChangeKind), derive(Hash))]
pub enum Change<C> {
    /// A client was moved to a new stacking layer
    Layer {
        /// The client
        client: C,
        /// The new layer
        layer: Layer,
    },
    /// The focused client changed
    Focus {
        /// The previously focused client (if there was one)
        old: Option<C>,
        /// The newly focused client (if there is one)
        new: Option<C>,
    },
    /// A client was moved to a new desktop
    ClientDesktop {
        /// The client
        client: C,
        /// The desktop it now lives on
        desktop: Desktop,
    },
    /// The user desktop being displayed changed
    CurrentDesktop {
        /// The user desktop now being displayed
        desktop: u32,
    },
    /// A client was repositioned
    Location {
        /// The client
        client: C,
        /// New x position
        x: i32,
        /// New y position
        y: i32,
    },
    /// A client was resized
    Size {
        /// The client
        client: C,
        /// New width
        w: u32,
        /// New height
        h: u32,
    },
}

impl<C: Copy> Change<C> {
    /// The client this change refers to, if it refers to a single one.
    ///
    /// [Change::Focus] returns the newly focused client if there is one and
    /// the old one otherwise.
    pub fn client(&self) -> Option<C> {
        match *self {
            Change::Layer { client, .. }
            | Change::ClientDesktop { client, .. }
            | Change::Location { client, .. }
            | Change::Size { client, .. } => Some(client),
            Change::Focus { old, new } => new.or(old),
            Change::CurrentDesktop { .. } => None,
        }
    }

    /// The kind of change this is without its payload.
    pub fn kind(&self) -> ChangeKind {
        ChangeKind::from(self)
    }
}
