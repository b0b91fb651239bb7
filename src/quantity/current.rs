use crate::quantity::{charge::MilliampHours, time::Hours};

quantity!(Milliamps, via: f64, suffix: "mA", precision: 3);

implement_mul!(Milliamps, Hours, MilliampHours);
