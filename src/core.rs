pub mod battery;
pub mod diagnostics;
pub mod estimator;
pub mod phase;
pub mod result;
pub mod runtime;
pub mod units;
