use smallwm::Xid;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a test writer subscriber so that RUST_LOG=trace shows the state
/// transitions of a failing test.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

pub fn xid(id: u32) -> Xid {
    Xid::from(id)
}
