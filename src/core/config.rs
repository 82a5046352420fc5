//! User facing configuration of the client bookkeeping state.
use crate::{pure::Layer, Result, Violation};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of user desktops available when nothing else is configured.
pub const DEFAULT_DESKTOPS: u32 = 5;

/// Configuration for a [ClientData][crate::ClientData] instance.
///
/// The layer range is fixed at [Layer::MIN] to [Layer::MAX] and new clients
/// always start on [Layer::DEFAULT]: only the desktop count and the starting
/// desktop can be changed.
///
/// # Example
/// ```
/// use smallwm::Config;
///
/// let config = Config::default().with_desktops(9).with_initial_desktop(3);
///
/// assert_eq!(config.desktops, 9);
/// assert!(config.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The number of user desktops: these are numbered 1 through `desktops`
    pub desktops: u32,
    /// The desktop that is displayed on startup
    pub initial_desktop: u32,
    /// The layer assigned to newly added clients: always [Layer::DEFAULT]
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) default_layer: Layer,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            desktops: DEFAULT_DESKTOPS,
            initial_desktop: 1,
            default_layer: Layer::DEFAULT,
        }
    }
}

impl Config {
    /// Set the number of user desktops.
    pub fn with_desktops(mut self, desktops: u32) -> Self {
        self.desktops = desktops;
        self
    }

    /// Set the desktop that is displayed on startup.
    pub fn with_initial_desktop(mut self, desktop: u32) -> Self {
        self.initial_desktop = desktop;
        self
    }

    /// Check that this config describes a usable set of desktops.
    ///
    /// # Errors
    /// Fails if there are no desktops or the initial desktop is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.desktops == 0 {
            return Err(Violation::NoDesktops.into());
        }

        if !(1..=self.desktops).contains(&self.initial_desktop) {
            return Err(crate::Error::unknown_category(&crate::Desktop::User(
                self.initial_desktop,
            )));
        }

        Ok(())
    }
}
