//! The window manager's view of every client it is managing
use crate::{
    core::{config::Config, hints::WmHints},
    pure::{
        category::CategoryMapping,
        change::Change,
        desktop::Desktop,
        geometry::{Point, Rect, Size},
        layer::Layer,
    },
    Error, Result, Violation,
};
use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
    hash::Hash,
    mem::take,
};
use tracing::{debug, trace};

/// Which interactive operation a client is currently undergoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveResize {
    /// The client is being moved
    Move,
    /// The client is being resized
    Resize,
}

impl MoveResize {
    fn desktop(&self) -> Desktop {
        match self {
            MoveResize::Move => Desktop::Moving,
            MoveResize::Resize => Desktop::Resizing,
        }
    }
}

/// The side-effect free record of every managed client.
///
/// Each client is on exactly one [Desktop] and exactly one [Layer]. At most
/// one client holds focus and it is always on the current desktop. At most
/// one client is being moved or resized at any given time.
///
/// Every method that changes state validates all of its preconditions
/// before mutating anything: on error the state is exactly what it was
/// before the call. Successful mutations push [Change]s onto an internal
/// queue which should be drained with [ClientData::flush_changes] after each
/// batch of operations.
#[derive(Debug, Clone)]
pub struct ClientData<C>
where
    C: Copy + Eq + Hash + Debug,
{
    n_desktops: u32,
    current_desktop: u32,
    default_layer: Layer,
    desktops: CategoryMapping<Desktop, C>,
    layers: CategoryMapping<Layer, C>,
    focused: Option<C>,
    move_resize: Option<(C, MoveResize)>,
    location: HashMap<C, Point>,
    size: HashMap<C, Size>,
    changes: Vec<Change<C>>,
}

impl<C> ClientData<C>
where
    C: Copy + Eq + Hash + Debug,
{
    /// Create a new, empty [ClientData] using the given [Config].
    ///
    /// # Errors
    /// Fails if the config is invalid: see [Config::validate].
    pub fn try_new(config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            n_desktops: config.desktops,
            current_desktop: config.initial_desktop,
            default_layer: config.default_layer,
            desktops: CategoryMapping::new(Desktop::all_for(config.desktops)),
            layers: CategoryMapping::new(Layer::all()),
            focused: None,
            move_resize: None,
            location: HashMap::new(),
            size: HashMap::new(),
            changes: Vec::new(),
        })
    }

    // ----------------------------------------------------------------------
    // Change queue
    // ----------------------------------------------------------------------

    /// Take all changes queued since the last call, leaving the queue empty.
    pub fn flush_changes(&mut self) -> Vec<Change<C>> {
        take(&mut self.changes)
    }

    /// The changes that have been queued but not yet flushed.
    pub fn pending_changes(&self) -> &[Change<C>] {
        &self.changes
    }

    fn push_change(&mut self, change: Change<C>) {
        trace!(?change, "queuing change");
        self.changes.push(change);
    }

    /// Put changes that were flushed but never applied back at the front of
    /// the queue, ahead of anything recorded since.
    pub(crate) fn requeue_changes(&mut self, mut unapplied: Vec<Change<C>>) {
        trace!(n = unapplied.len(), "requeuing unapplied changes");
        unapplied.append(&mut self.changes);
        self.changes = unapplied;
    }

    // ----------------------------------------------------------------------
    // Queries
    // ----------------------------------------------------------------------

    /// The number of user desktops.
    pub fn n_desktops(&self) -> u32 {
        self.n_desktops
    }

    /// The user desktop currently being displayed.
    pub fn current_desktop(&self) -> u32 {
        self.current_desktop
    }

    /// The currently focused client, if there is one.
    pub fn focused(&self) -> Option<C> {
        self.focused
    }

    /// The client currently being moved or resized, if there is one.
    pub fn move_resize_client(&self) -> Option<(C, MoveResize)> {
        self.move_resize
    }

    /// Whether or not `client` is being managed.
    pub fn is_client(&self, client: &C) -> bool {
        self.desktops.contains(client)
    }

    /// Iterate over every managed client in an arbitrary order.
    pub fn clients(&self) -> impl Iterator<Item = &C> {
        self.desktops.iter().map(|(c, _)| c)
    }

    /// The desktop that `client` is on.
    pub fn find_desktop(&self, client: &C) -> Result<Desktop> {
        self.desktops.category_of(client).copied()
    }

    /// The layer that `client` is on.
    pub fn find_layer(&self, client: &C) -> Result<Layer> {
        self.layers.category_of(client).copied()
    }

    /// The last known position of `client`.
    pub fn location(&self, client: &C) -> Result<Point> {
        self.location
            .get(client)
            .copied()
            .ok_or_else(|| Error::unknown_client(client))
    }

    /// The last known size of `client`.
    pub fn size(&self, client: &C) -> Result<Size> {
        self.size
            .get(client)
            .copied()
            .ok_or_else(|| Error::unknown_client(client))
    }

    /// The last known position and size of `client`.
    pub fn geometry(&self, client: &C) -> Result<Rect> {
        Ok(Rect::from_parts(self.location(client)?, self.size(client)?))
    }

    /// Whether or not `client` should currently be shown: it is either on the
    /// current desktop or it is sticky.
    pub fn is_visible(&self, client: &C) -> Result<bool> {
        let d = self.find_desktop(client)?;

        Ok(d == Desktop::User(self.current_desktop) || d == Desktop::All)
    }

    /// All clients on the given desktop.
    pub fn clients_of(&self, desktop: Desktop) -> Result<HashSet<C>> {
        self.desktops.elements_of([&desktop])
    }

    /// All clients that should currently be shown.
    pub fn visible_clients(&self) -> HashSet<C> {
        self.members(&[Desktop::User(self.current_desktop), Desktop::All])
    }

    fn members(&self, desktops: &[Desktop]) -> HashSet<C> {
        desktops
            .iter()
            .flat_map(|d| self.desktops.members_of(d).into_iter().flatten())
            .copied()
            .collect()
    }

    /// Iterate over the visible clients from the bottom of the stacking order
    /// to the top.
    ///
    /// Clients are ordered by layer. Within a layer the order is arbitrary
    /// other than the focused client always being on top. The set of visible
    /// clients is computed when this method is called.
    pub fn iter_by_layer(&self) -> impl Iterator<Item = C> + '_ {
        let visible = self.visible_clients();
        let focused = self.focused;

        Layer::all().flat_map(move |layer| {
            let mut on_layer: Vec<C> = self
                .layers
                .members_of(&layer)
                .into_iter()
                .flatten()
                .filter(|c| visible.contains(*c) && Some(**c) != focused)
                .copied()
                .collect();

            if let Some(f) = focused.filter(|f| self.layers.category_of(f).ok() == Some(&layer)) {
                on_layer.push(f);
            }

            on_layer
        })
    }

    /// The complete bottom to top stacking order for everything the window
    /// manager is responsible for showing: the visible clients by layer, then
    /// any iconified clients and finally the client being moved or resized.
    pub fn stacking_order(&self) -> Vec<C> {
        let mut order: Vec<C> = self.iter_by_layer().collect();
        order.extend(self.members(&[Desktop::Icons]));
        order.extend(self.move_resize.map(|(c, _)| c));

        order
    }

    // ----------------------------------------------------------------------
    // Client lifecycle
    // ----------------------------------------------------------------------

    /// Start managing a new client.
    ///
    /// The client is placed on the current desktop (or iconified if its hints
    /// ask for that) on the default layer and is focused if it is visible.
    ///
    /// # Errors
    /// Fails if the client is already known or the geometry has a zero width
    /// or height.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn add_client(&mut self, client: C, hints: WmHints, geometry: Rect) -> Result<()> {
        if self.is_client(&client) {
            return self.reject(Violation::AlreadyTracked {
                element: format!("{client:?}"),
            });
        }
        if !geometry.size().is_positive() {
            return self.reject(Violation::InvalidSize {
                w: geometry.w,
                h: geometry.h,
            });
        }

        let desktop = if hints.starts_iconic() {
            Desktop::Icons
        } else {
            Desktop::User(self.current_desktop)
        };

        self.desktops.add(desktop, client)?;
        self.push_change(Change::ClientDesktop { client, desktop });

        self.layers.add(self.default_layer, client)?;
        self.push_change(Change::Layer {
            client,
            layer: self.default_layer,
        });

        self.location.insert(client, geometry.point());
        self.size.insert(client, geometry.size());

        if desktop == Desktop::User(self.current_desktop) {
            self.set_focus(client);
        }

        Ok(())
    }

    /// Stop managing a client.
    ///
    /// The only change recorded is the loss of focus if the client was
    /// focused: the window itself is already gone.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn remove_client(&mut self, client: &C) -> Result<()> {
        self.unfocus_if_focused(client)?;

        self.desktops.remove(client)?;
        self.layers.remove(client)?;
        self.location.remove(client);
        self.size.remove(client);

        if matches!(self.move_resize, Some((c, _)) if &c == client) {
            self.move_resize = None;
        }

        Ok(())
    }

    // ----------------------------------------------------------------------
    // Focus
    // ----------------------------------------------------------------------

    /// Give focus to `client`.
    ///
    /// Focusing the client that is already focused does nothing.
    ///
    /// # Errors
    /// Fails if the client is unknown or not on the current desktop.
    pub fn focus(&mut self, client: &C) -> Result<()> {
        let desktop = self.find_desktop(client)?;
        if desktop != Desktop::User(self.current_desktop) {
            return self.reject(Violation::NotOnCurrentDesktop);
        }

        self.set_focus(*client);

        Ok(())
    }

    fn set_focus(&mut self, client: C) {
        if self.focused == Some(client) {
            return;
        }

        let old = self.focused.replace(client);
        trace!(?old, new = ?client, "updating focus");
        self.push_change(Change::Focus {
            old,
            new: Some(client),
        });
    }

    /// Remove focus from whichever client currently has it (if any).
    pub fn unfocus(&mut self) {
        if let Some(old) = self.focused.take() {
            trace!(?old, "clearing focus");
            self.push_change(Change::Focus {
                old: Some(old),
                new: None,
            });
        }
    }

    /// Remove focus from `client` if it is the focused client.
    ///
    /// # Errors
    /// Fails if the client is unknown.
    pub fn unfocus_if_focused(&mut self, client: &C) -> Result<()> {
        if !self.is_client(client) {
            return Err(Error::unknown_client(client));
        }

        if self.focused.as_ref() == Some(client) {
            self.unfocus();
        }

        Ok(())
    }

    // ----------------------------------------------------------------------
    // Layers
    // ----------------------------------------------------------------------

    /// Move `client` up one layer. Does nothing if it is already on the top layer.
    pub fn up_layer(&mut self, client: &C) -> Result<()> {
        match self.find_layer(client)?.above() {
            Some(layer) => self.move_to_layer(client, layer),
            None => Ok(()),
        }
    }

    /// Move `client` down one layer. Does nothing if it is already on the bottom layer.
    pub fn down_layer(&mut self, client: &C) -> Result<()> {
        match self.find_layer(client)?.below() {
            Some(layer) => self.move_to_layer(client, layer),
            None => Ok(()),
        }
    }

    /// Move `client` to the given layer.
    ///
    /// # Errors
    /// Fails if the client is unknown or the layer is out of range.
    pub fn set_layer(&mut self, client: &C, layer: u8) -> Result<()> {
        let layer = match Layer::try_new(layer) {
            Ok(layer) => layer,
            Err(e) => {
                debug!(%e, ?client, "rejecting set_layer");
                return Err(e);
            }
        };

        if self.find_layer(client)? == layer {
            return Ok(());
        }

        self.move_to_layer(client, layer)
    }

    fn move_to_layer(&mut self, client: &C, layer: Layer) -> Result<()> {
        self.layers.move_to(client, layer)?;
        self.push_change(Change::Layer {
            client: *client,
            layer,
        });

        Ok(())
    }

    // ----------------------------------------------------------------------
    // Desktops
    // ----------------------------------------------------------------------

    /// Toggle whether or not `client` is shown on every desktop.
    ///
    /// Sticking a client moves it to [Desktop::All] and removes its focus.
    /// Unsticking a client moves it to the current desktop.
    ///
    /// # Errors
    /// Fails if the client is unknown or is iconified, moving or resizing.
    pub fn toggle_stick(&mut self, client: &C) -> Result<()> {
        let desktop = self.find_desktop(client)?;

        let target = match desktop {
            d if d.is_invisible() => return self.reject(Violation::Invisible(d)),
            Desktop::All => Desktop::User(self.current_desktop),
            _ => Desktop::All,
        };

        // focus is only ever held on the current user desktop
        self.move_to_desktop(client, desktop, target, target == Desktop::All)
    }

    /// Move `client` to the user desktop after the one it is on, wrapping
    /// back to the first desktop after the last.
    ///
    /// # Errors
    /// Fails if the client is unknown or is on a virtual desktop.
    pub fn client_next_desktop(&mut self, client: &C) -> Result<()> {
        let desktop = self.find_desktop(client)?;
        let n = match desktop.user() {
            Some(n) => n,
            None => return self.reject(Violation::OnVirtualDesktop(desktop)),
        };

        let next = if n >= self.n_desktops { 1 } else { n + 1 };

        self.move_to_desktop(client, desktop, Desktop::User(next), true)
    }

    /// Move `client` to the user desktop before the one it is on, wrapping
    /// round to the last desktop before the first.
    ///
    /// # Errors
    /// Fails if the client is unknown or is on a virtual desktop.
    pub fn client_prev_desktop(&mut self, client: &C) -> Result<()> {
        let desktop = self.find_desktop(client)?;
        let n = match desktop.user() {
            Some(n) => n,
            None => return self.reject(Violation::OnVirtualDesktop(desktop)),
        };

        let prev = if n <= 1 { self.n_desktops } else { n - 1 };

        self.move_to_desktop(client, desktop, Desktop::User(prev), true)
    }

    /// Display the next user desktop, wrapping back to the first after the last.
    ///
    /// The focused client (if any) loses focus.
    ///
    /// # Errors
    /// Fails while a client is being moved or resized.
    pub fn next_desktop(&mut self) -> Result<()> {
        self.check_no_move_resize()?;
        let next = if self.current_desktop >= self.n_desktops {
            1
        } else {
            self.current_desktop + 1
        };

        self.set_current_desktop(next);

        Ok(())
    }

    /// Display the previous user desktop, wrapping round to the last before the first.
    ///
    /// The focused client (if any) loses focus.
    ///
    /// # Errors
    /// Fails while a client is being moved or resized.
    pub fn prev_desktop(&mut self) -> Result<()> {
        self.check_no_move_resize()?;
        let prev = if self.current_desktop <= 1 {
            self.n_desktops
        } else {
            self.current_desktop - 1
        };

        self.set_current_desktop(prev);

        Ok(())
    }

    fn set_current_desktop(&mut self, desktop: u32) {
        self.unfocus();
        trace!(from = self.current_desktop, to = desktop, "changing current desktop");
        self.current_desktop = desktop;
        self.push_change(Change::CurrentDesktop { desktop });
    }

    // ----------------------------------------------------------------------
    // Icons
    // ----------------------------------------------------------------------

    /// Hide `client` as an icon.
    ///
    /// # Errors
    /// Fails if the client is unknown, already iconified or being moved or resized.
    pub fn iconify(&mut self, client: &C) -> Result<()> {
        let desktop = self.find_desktop(client)?;

        match desktop {
            Desktop::Icons => return self.reject(Violation::AlreadyIconified),
            d if d.is_invisible() => return self.reject(Violation::Invisible(d)),
            _ => (),
        }

        self.move_to_desktop(client, desktop, Desktop::Icons, true)
    }

    /// Restore an iconified `client` to the current desktop and focus it.
    ///
    /// # Errors
    /// Fails if the client is unknown or not iconified.
    pub fn deiconify(&mut self, client: &C) -> Result<()> {
        let desktop = self.find_desktop(client)?;
        if desktop != Desktop::Icons {
            return self.reject(Violation::NotIconified);
        }

        let current = Desktop::User(self.current_desktop);
        self.move_to_desktop(client, desktop, current, true)?;
        self.set_focus(*client);

        Ok(())
    }

    // ----------------------------------------------------------------------
    // Interactive move / resize
    // ----------------------------------------------------------------------

    /// Begin interactively moving `client`.
    ///
    /// # Errors
    /// Fails if the client is unknown, already moving, iconified or if any
    /// client is currently being moved or resized.
    pub fn start_moving(&mut self, client: &C) -> Result<()> {
        self.start_move_resize(client, MoveResize::Move)
    }

    /// Finish moving `client`, placing it on the current desktop at the
    /// position of `geometry` and focusing it.
    ///
    /// Only the position of `geometry` is used.
    ///
    /// # Errors
    /// Fails if the client is unknown or not being moved.
    pub fn stop_moving(&mut self, client: &C, geometry: Rect) -> Result<()> {
        if self.find_desktop(client)? != Desktop::Moving {
            return self.reject(Violation::NotMoving);
        }

        self.finish_move_resize(client)?;

        let p = geometry.point();
        self.location.insert(*client, p);
        self.push_change(Change::Location {
            client: *client,
            x: p.x,
            y: p.y,
        });

        self.set_focus(*client);

        Ok(())
    }

    /// Begin interactively resizing `client`.
    ///
    /// # Errors
    /// Fails if the client is unknown, already resizing, iconified or if any
    /// client is currently being moved or resized.
    pub fn start_resizing(&mut self, client: &C) -> Result<()> {
        self.start_move_resize(client, MoveResize::Resize)
    }

    /// Finish resizing `client`, placing it on the current desktop with the
    /// size of `geometry` and focusing it.
    ///
    /// Only the size of `geometry` is used.
    ///
    /// # Errors
    /// Fails if the client is unknown, not being resized or `geometry` has a
    /// zero width or height.
    pub fn stop_resizing(&mut self, client: &C, geometry: Rect) -> Result<()> {
        if self.find_desktop(client)? != Desktop::Resizing {
            return self.reject(Violation::NotResizing);
        }

        let s = geometry.size();
        if !s.is_positive() {
            return self.reject(Violation::InvalidSize { w: s.w, h: s.h });
        }

        self.finish_move_resize(client)?;

        self.size.insert(*client, s);
        self.push_change(Change::Size {
            client: *client,
            w: s.w,
            h: s.h,
        });

        self.set_focus(*client);

        Ok(())
    }

    fn start_move_resize(&mut self, client: &C, kind: MoveResize) -> Result<()> {
        let desktop = self.find_desktop(client)?;

        match (desktop, kind) {
            (Desktop::Moving, MoveResize::Move) => return self.reject(Violation::AlreadyMoving),
            (Desktop::Resizing, MoveResize::Resize) => {
                return self.reject(Violation::AlreadyResizing)
            }
            _ => (),
        }

        self.check_no_move_resize()?;

        if desktop.is_invisible() {
            return self.reject(Violation::Invisible(desktop));
        }

        self.move_to_desktop(client, desktop, kind.desktop(), true)?;
        self.move_resize = Some((*client, kind));

        Ok(())
    }

    fn finish_move_resize(&mut self, client: &C) -> Result<()> {
        let desktop = self.find_desktop(client)?;
        let current = Desktop::User(self.current_desktop);

        self.move_to_desktop(client, desktop, current, true)?;
        self.move_resize = None;

        Ok(())
    }

    fn check_no_move_resize(&self) -> Result<()> {
        let mut in_progress = 0;
        for d in Desktop::virtual_desktops().filter(Desktop::is_move_resize) {
            in_progress += self.desktops.count_of(&d)?;
        }

        if in_progress > 0 {
            return self.reject(Violation::MoveResizeInProgress);
        }

        Ok(())
    }

    // ----------------------------------------------------------------------
    // Helpers
    // ----------------------------------------------------------------------

    fn move_to_desktop(&mut self, client: &C, from: Desktop, to: Desktop, unfocus: bool) -> Result<()> {
        if from == to {
            return Ok(());
        }

        if unfocus {
            self.unfocus_if_focused(client)?;
        }

        trace!(?client, %from, %to, "moving client between desktops");
        self.desktops.move_to(client, to)?;
        self.push_change(Change::ClientDesktop {
            client: *client,
            desktop: to,
        });

        Ok(())
    }

    fn reject<T>(&self, v: Violation) -> Result<T> {
        debug!(%v, "rejecting operation");
        Err(v.into())
    }
}
