//! A short scripted session against a backend that just logs what it is asked to do.
//!
//! Run with `RUST_LOG=smallwm=trace,session=info cargo run --example session`
//! to see the state transitions alongside the backend calls.
use smallwm::{
    pure::geometry::Rect,
    x::{ClientConfig, WindowOps, WindowOpsExt},
    ClientSet, Config, InitialState, Result, WmHints, Xid,
};
use tracing::info;
use tracing_subscriber::{self, prelude::*, EnvFilter};

struct LoggingOps;

impl WindowOps<Xid> for LoggingOps {
    fn map(&self, client: Xid) -> Result<()> {
        info!(%client, "map");
        Ok(())
    }

    fn unmap(&self, client: Xid) -> Result<()> {
        info!(%client, "unmap");
        Ok(())
    }

    fn set_focus(&self, client: Option<Xid>) -> Result<()> {
        info!(?client, "focus");
        Ok(())
    }

    fn set_client_config(&self, client: Xid, data: &[ClientConfig<Xid>]) -> Result<()> {
        info!(%client, ?data, "configure");
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let ops = LoggingOps;
    let mut cs = ClientSet::try_new(Config::default().with_desktops(3))?;
    let (term, browser, tray) = (Xid::from(1), Xid::from(2), Xid::from(3));
    let geometry = Rect::new(0, 0, 800, 600);

    cs.add_client(term, WmHints::default(), geometry)?;
    cs.add_client(browser, WmHints::default(), geometry)?;
    cs.add_client(tray, WmHints::with_initial_state(InitialState::Iconic), geometry)?;
    ops.apply_changes(&mut cs)?;

    info!("sticking the terminal and sending the browser to desktop 2");
    cs.toggle_stick(&term)?;
    cs.client_next_desktop(&browser)?;
    cs.set_layer(&term, 8)?;
    ops.apply_changes(&mut cs)?;

    info!("switching desktop and dragging the browser");
    cs.next_desktop()?;
    cs.focus(&browser)?;
    cs.start_moving(&browser)?;
    ops.apply_changes(&mut cs)?;
    cs.stop_moving(&browser, Rect::new(120, 80, 800, 600))?;
    ops.apply_changes(&mut cs)?;

    info!("restoring the tray icon");
    cs.deiconify(&tray)?;
    ops.apply_changes(&mut cs)?;

    info!(order = ?cs.stacking_order(), "final stacking order");

    Ok(())
}
