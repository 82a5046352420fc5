//! Client requested hints that affect where a new client is placed
use crate::{Result, Violation};
use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Possible flags that can be set in a WM_HINTS client property
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HintFlags: u32 {
        /// Input hint is set
        const INPUT         = 0b0000000001;
        /// State hint is set
        const STATE         = 0b0000000010;
        /// Icon pixmap hint is set
        const ICON_PIXMAP   = 0b0000000100;
        /// Icon window hint is set
        const ICON_WINDOW   = 0b0000001000;
        /// Icon position hint is set
        const ICON_POSITION = 0b0000010000;
        /// Icon mask hint is set
        const ICON_MASK     = 0b0000100000;
        /// Window group hint is set
        const WINDOW_GROUP  = 0b0001000000;
        // unused             0b0010000000;
        /// Urgency hint is set
        const URGENCY       = 0b0100000000;
    }
}

/// The state a client asks to be in when it is first mapped.
///
/// See the [ICCCM docs][1] for more information.
///
/// [1]: https://tronche.com/gui/x/icccm/sec-4.html#s-4.1.2.4
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum InitialState {
    /// Window is not visible
    Withdrawn,
    /// Window is visible
    #[default]
    Normal,
    /// Window starts out iconified
    Iconic,
}

/// The subset of the WM_HINTS property that the window manager cares about
/// when registering a client.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct WmHints {
    /// Which of the optional fields were provided by the client
    pub flags: HintFlags,
    /// The requested initial state (only meaningful if [HintFlags::STATE] is set)
    pub initial_state: InitialState,
}

impl WmHints {
    /// Hints requesting that a client is started in the given state.
    pub fn with_initial_state(initial_state: InitialState) -> Self {
        Self {
            flags: HintFlags::STATE,
            initial_state,
        }
    }

    /// Whether or not the client explicitly asked to start iconified.
    pub fn starts_iconic(&self) -> bool {
        self.flags.contains(HintFlags::STATE) && self.initial_state == InitialState::Iconic
    }

    /// Try to construct a [WmHints] instance from the raw property data.
    ///
    /// This method expects a slice of 9 u32s corresponding to the C struct layout shown below.
    ///
    /// ```C
    /// typedef struct {
    ///     long flags;          /* marks which fields in this structure are defined */
    ///     Bool input;          /* does this application rely on the window manager to
    ///                             get keyboard input? */
    ///     int initial_state;   /* see below */
    ///     Pixmap icon_pixmap;  /* pixmap to be used as icon */
    ///     Window icon_window;  /* window to be used as icon */
    ///     int icon_x, icon_y;  /* initial position of icon */
    ///     Pixmap icon_mask;    /* pixmap to be used as mask for icon_pixmap */
    ///     XID window_group;    /* id of related window group */
    ///     /* this structure may be extended in the future */
    /// } XWMHints;
    /// ```
    ///
    /// Only the flags and initial state are retained.
    pub fn try_from_raw(raw: &[u32]) -> Result<Self> {
        if raw.len() != 9 {
            return Err(Violation::InvalidHints(format!(
                "raw data should be [u32; 9] for WM_HINTS, got [u32; {}]",
                raw.len()
            ))
            .into());
        }

        let flags = HintFlags::from_bits_truncate(raw[0]);
        let initial_state = match (flags.contains(HintFlags::STATE), raw[2]) {
            (true, 0) => InitialState::Withdrawn,
            (true, 1) | (false, _) => InitialState::Normal,
            (true, 3) => InitialState::Iconic,
            (true, s) => {
                return Err(Violation::InvalidHints(format!(
                    "initial state should be 0, 1 or 3: got {s}"
                ))
                .into())
            }
        };

        Ok(Self {
            flags,
            initial_state,
        })
    }
}
