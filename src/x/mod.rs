//! Applying queued [Change]s to whatever is actually drawing the windows
//!
//! [ClientData] only records what should happen. Something that can talk to
//! the display server implements [WindowOps] and [WindowOpsExt::apply_changes]
//! then drains the change queue, mapping and unmapping clients as their
//! visibility changes, moving and resizing them, updating the input focus
//! and finally restacking everything.
use crate::{
    pure::{
        geometry::{Point, Size},
        Change, ClientData,
    },
    Result,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, hash::Hash};
use tracing::trace;

/// On screen configuration options for clients
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClientConfig<C> {
    /// Absolute position of the top left corner on the screen
    Position(Point),
    /// Width and height of the window
    Size(Size),
    /// Mark this window as stacking on top of the given client
    StackAbove(C),
}

/// The primitive operations a display backend needs to provide in order to
/// show the state tracked by [ClientData].
pub trait WindowOps<C> {
    /// Show a client window
    fn map(&self, client: C) -> Result<()>;
    /// Hide a client window
    fn unmap(&self, client: C) -> Result<()>;
    /// Give the input focus to a client, or to nothing (the root window)
    fn set_focus(&self, client: Option<C>) -> Result<()>;
    /// Apply the given configuration to a client window
    fn set_client_config(&self, client: C, data: &[ClientConfig<C>]) -> Result<()>;
}

/// Extended functionality for [WindowOps] impls in order to run the window manager.
pub trait WindowOpsExt<C>: WindowOps<C>
where
    C: Copy + Eq + Hash + Debug,
{
    /// Drain all pending changes from `cd` and apply them in the order they
    /// were recorded. If anything changed, the visible clients are restacked
    /// once all changes have been applied.
    ///
    /// Changes referring to clients that have since been removed are skipped.
    ///
    /// # Errors
    /// Stops at the first error returned by the backend. The change that
    /// failed is dropped and every change after it is put back at the front
    /// of the queue of `cd` so that the next call picks up where this one
    /// stopped.
    fn apply_changes(&self, cd: &mut ClientData<C>) -> Result<()> {
        let changes = cd.flush_changes();
        if changes.is_empty() {
            return Ok(());
        }

        let mut changes = changes.into_iter();
        while let Some(change) = changes.next() {
            trace!(kind = ?change.kind(), client = ?change.client(), "applying change");
            if let Err(e) = self.apply_change(cd, change) {
                cd.requeue_changes(changes.collect());
                return Err(e);
            }
        }

        self.restack(cd.stacking_order())
    }

    /// Apply a single change to the backend.
    fn apply_change(&self, cd: &ClientData<C>, change: Change<C>) -> Result<()> {
        match change {
            Change::ClientDesktop { client, .. } => self.sync_visibility(cd, client),

            Change::CurrentDesktop { .. } => {
                for &client in cd.clients() {
                    self.sync_visibility(cd, client)?;
                }

                Ok(())
            }

            Change::Location { client, x, y } if cd.is_client(&client) => {
                let p = Point::new(x, y);
                self.set_client_config(client, &[ClientConfig::Position(p)])
            }

            Change::Size { client, w, h } if cd.is_client(&client) => {
                let s = Size::new(w, h);
                self.set_client_config(client, &[ClientConfig::Size(s)])
            }

            // focus moving to a window that has since gone away is dropped
            Change::Focus { new: Some(c), .. } if !cd.is_client(&c) => Ok(()),

            Change::Focus { new, .. } => self.set_focus(new),

            // handled by the restack in apply_changes
            Change::Layer { .. } | Change::Location { .. } | Change::Size { .. } => Ok(()),
        }
    }

    /// Map `client` if it should be visible and unmap it otherwise.
    fn sync_visibility(&self, cd: &ClientData<C>, client: C) -> Result<()> {
        match cd.is_visible(&client) {
            Ok(true) => self.map(client),
            Ok(false) => self.unmap(client),
            // the client was removed after this change was recorded
            Err(_) => Ok(()),
        }
    }

    /// Restack the given windows, each one above the last.
    fn restack<I>(&self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = C>,
    {
        let mut ids = ids.into_iter();
        let mut previous = match ids.next() {
            Some(id) => id,
            None => return Ok(()), // nothing to stack
        };

        for id in ids {
            self.set_client_config(id, &[ClientConfig::StackAbove(previous)])?;
            previous = id;
        }

        Ok(())
    }
}

impl<C, T> WindowOpsExt<C> for T
where
    C: Copy + Eq + Hash + Debug,
    T: WindowOps<C>,
{
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;

    /// A single call made against a [RecordingOps]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Call {
        Map(u32),
        Unmap(u32),
        Focus(Option<u32>),
        Config(u32, Vec<ClientConfig<u32>>),
    }

    /// A [WindowOps] impl that records every call made against it.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingOps {
        pub(crate) calls: RefCell<Vec<Call>>,
    }

    impl RecordingOps {
        pub(crate) fn take(&self) -> Vec<Call> {
            self.calls.take()
        }
    }

    impl WindowOps<u32> for RecordingOps {
        fn map(&self, client: u32) -> Result<()> {
            self.calls.borrow_mut().push(Call::Map(client));
            Ok(())
        }

        fn unmap(&self, client: u32) -> Result<()> {
            self.calls.borrow_mut().push(Call::Unmap(client));
            Ok(())
        }

        fn set_focus(&self, client: Option<u32>) -> Result<()> {
            self.calls.borrow_mut().push(Call::Focus(client));
            Ok(())
        }

        fn set_client_config(&self, client: u32, data: &[ClientConfig<u32>]) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(Call::Config(client, data.to_vec()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        mock::{Call, RecordingOps},
        *,
    };
    use crate::{pure::geometry::Rect, Config, Error, WmHints};

    fn client_data() -> ClientData<u32> {
        ClientData::try_new(Config::default()).unwrap()
    }

    fn add(cd: &mut ClientData<u32>, client: u32) {
        cd.add_client(client, WmHints::default(), Rect::new(0, 0, 10, 10))
            .unwrap();
    }

    #[test]
    fn nothing_to_apply_makes_no_calls() {
        let ops = RecordingOps::default();
        let mut cd = client_data();

        ops.apply_changes(&mut cd).unwrap();

        assert!(ops.take().is_empty());
    }

    #[test]
    fn new_client_is_mapped_and_focused() {
        let ops = RecordingOps::default();
        let mut cd = client_data();
        add(&mut cd, 1);

        ops.apply_changes(&mut cd).unwrap();

        assert_eq!(ops.take(), vec![Call::Map(1), Call::Focus(Some(1))]);
        assert!(cd.pending_changes().is_empty());
    }

    #[test]
    fn changing_desktop_hides_clients_that_are_not_sticky() {
        let ops = RecordingOps::default();
        let mut cd = client_data();
        add(&mut cd, 1);
        add(&mut cd, 2);
        cd.toggle_stick(&2).unwrap();
        cd.focus(&1).unwrap();
        cd.flush_changes();

        cd.next_desktop().unwrap();
        ops.apply_changes(&mut cd).unwrap();
        let calls = ops.take();

        assert_eq!(calls[0], Call::Focus(None));
        assert!(calls.contains(&Call::Unmap(1)));
        assert!(calls.contains(&Call::Map(2)));
        assert_eq!(calls.len(), 3);
    }

    #[test]
    fn finishing_a_move_repositions_and_restacks() {
        let ops = RecordingOps::default();
        let mut cd = client_data();
        add(&mut cd, 1);
        add(&mut cd, 2);
        cd.set_layer(&2, 1).unwrap();
        cd.start_moving(&1).unwrap();
        ops.apply_changes(&mut cd).unwrap();
        ops.take();

        cd.stop_moving(&1, Rect::new(42, 42, 10, 10)).unwrap();
        ops.apply_changes(&mut cd).unwrap();

        assert_eq!(
            ops.take(),
            vec![
                Call::Map(1),
                Call::Config(1, vec![ClientConfig::Position(Point::new(42, 42))]),
                Call::Focus(Some(1)),
                Call::Config(1, vec![ClientConfig::StackAbove(2)]),
            ]
        );
    }

    #[test]
    fn changes_for_removed_clients_are_skipped() {
        let ops = RecordingOps::default();
        let mut cd = client_data();
        add(&mut cd, 1);
        cd.remove_client(&1).unwrap();

        ops.apply_changes(&mut cd).unwrap();

        assert_eq!(ops.take(), vec![Call::Focus(None)]);
    }

    #[test]
    fn focus_is_not_sent_to_a_removed_client() {
        let ops = RecordingOps::default();
        let mut cd = client_data();
        add(&mut cd, 1);
        ops.apply_changes(&mut cd).unwrap();
        ops.take();

        add(&mut cd, 2);
        cd.remove_client(&2).unwrap();
        ops.apply_changes(&mut cd).unwrap();

        assert!(!ops.take().contains(&Call::Focus(Some(2))));
        assert!(cd.pending_changes().is_empty());
    }

    struct FailingOps;

    impl WindowOps<u32> for FailingOps {
        fn map(&self, _: u32) -> Result<()> {
            Err(Error::Backend("connection closed".to_owned()))
        }

        fn unmap(&self, _: u32) -> Result<()> {
            Ok(())
        }

        fn set_focus(&self, _: Option<u32>) -> Result<()> {
            Ok(())
        }

        fn set_client_config(&self, _: u32, _: &[ClientConfig<u32>]) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn backend_errors_are_propagated() {
        let mut cd = client_data();
        add(&mut cd, 1);

        let res = FailingOps.apply_changes(&mut cd);

        assert!(matches!(res, Err(Error::Backend(_))));
    }

    #[test]
    fn changes_after_a_backend_error_are_requeued() {
        let mut cd = client_data();
        add(&mut cd, 1);

        assert!(FailingOps.apply_changes(&mut cd).is_err());
        assert_eq!(
            cd.pending_changes(),
            &[
                Change::Layer { client: 1, layer: crate::Layer::DEFAULT },
                Change::Focus { old: None, new: Some(1) },
            ]
        );

        let ops = RecordingOps::default();
        ops.apply_changes(&mut cd).unwrap();

        assert_eq!(ops.take(), vec![Call::Focus(Some(1))]);
        assert!(cd.pending_changes().is_empty());
    }
}
