use crate::quantity::{current::Milliamps, time::Hours};

quantity!(
    /// Electric charge, also used as the daily charge budget (mAh per day).
    MilliampHours, via: f64, suffix: "mAh", precision: 3
);

implement_div!(MilliampHours, Hours, Milliamps);
implement_div!(MilliampHours, Milliamps, Hours);
