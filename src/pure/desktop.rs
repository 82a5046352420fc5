//! User facing and virtual desktops
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// A desktop that a client can be placed on.
///
/// Only [Desktop::User] desktops can be displayed. The remaining variants are
/// virtual desktops used to track clients in special states:
///   - [Desktop::All]: "sticky" clients that are shown on every user desktop
///   - [Desktop::Icons]: iconified clients
///   - [Desktop::Moving]: the client currently being moved
///   - [Desktop::Resizing]: the client currently being resized
///
/// At most one client may be on either [Desktop::Moving] or [Desktop::Resizing]
/// at any given time.
///
/// Deserializing rejects `User(0)`. The upper bound on user desktops depends
/// on the [Config][crate::Config] in use, so a desktop beyond it is only
/// rejected (as an unknown category) when it is passed to a
/// [ClientData][crate::ClientData].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDesktop"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Desktop {
    /// A user desktop, numbered from 1
    User(u32),
    /// Clients that are visible on every user desktop
    All,
    /// Clients that have been iconified
    Icons,
    /// The client being interactively moved
    Moving,
    /// The client being interactively resized
    Resizing,
}

impl Desktop {
    /// The virtual desktops that exist alongside the user desktops.
    pub fn virtual_desktops() -> impl Iterator<Item = Desktop> {
        Desktop::iter().filter(Desktop::is_virtual)
    }

    /// Every desktop for a window manager running with `n` user desktops.
    pub fn all_for(n: u32) -> impl Iterator<Item = Desktop> {
        Self::virtual_desktops().chain((1..=n).map(Desktop::User))
    }

    /// True for everything other than [Desktop::User].
    pub fn is_virtual(&self) -> bool {
        !matches!(self, Desktop::User(_))
    }

    /// Clients on [Desktop::Icons], [Desktop::Moving] and [Desktop::Resizing]
    /// are never shown on a user desktop.
    pub fn is_invisible(&self) -> bool {
        matches!(self, Desktop::Icons | Desktop::Moving | Desktop::Resizing)
    }

    /// True for the two desktops used during interactive move / resize.
    pub fn is_move_resize(&self) -> bool {
        matches!(self, Desktop::Moving | Desktop::Resizing)
    }

    /// The user desktop number if this is a user desktop.
    pub fn user(&self) -> Option<u32> {
        match self {
            Desktop::User(n) => Some(*n),
            _ => None,
        }
    }
}

// Unvalidated wire form of a Desktop
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(rename = "Desktop")]
enum RawDesktop {
    User(u32),
    All,
    Icons,
    Moving,
    Resizing,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDesktop> for Desktop {
    type Error = crate::Error;

    fn try_from(raw: RawDesktop) -> crate::Result<Self> {
        match raw {
            RawDesktop::User(0) => Err(crate::Error::unknown_category(&Desktop::User(0))),
            RawDesktop::User(n) => Ok(Desktop::User(n)),
            RawDesktop::All => Ok(Desktop::All),
            RawDesktop::Icons => Ok(Desktop::Icons),
            RawDesktop::Moving => Ok(Desktop::Moving),
            RawDesktop::Resizing => Ok(Desktop::Resizing),
        }
    }
}

impl fmt::Display for Desktop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Desktop::User(n) => write!(f, "{n}"),
            Desktop::All => write!(f, "ALL"),
            Desktop::Icons => write!(f, "ICONS"),
            Desktop::Moving => write!(f, "MOVING"),
            Desktop::Resizing => write!(f, "RESIZING"),
        }
    }
}
