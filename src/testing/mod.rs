#![cfg(test)]
crate::reexport!(fake_rule);
crate::reexport!(segments);
crate::reexport!(generated);
pub use rstest::*;

pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // RUST_LOG picks the level, output goes through the test harness
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
