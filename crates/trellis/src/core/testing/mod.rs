/// Harness for driving host passes in tests.
pub mod harness;
/// Instrumented leaf controls.
pub mod probe;

pub use harness::Harness;
pub use probe::{MeasureLog, Probe, Wrap};
