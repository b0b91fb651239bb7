quantity!(Seconds, via: f64, suffix: "s", precision: 1);
quantity!(Hours, via: f64, suffix: "h", precision: 2);
quantity!(Days, via: f64, suffix: "d", precision: 1);

impl Seconds {
    pub const ONE_DAY: Self = Self(86_400.0);
}

impl Hours {
    pub const ONE_DAY: Self = Self(24.0);
}

impl From<Seconds> for Hours {
    fn from(seconds: Seconds) -> Self {
        Self(seconds.0 / 3600.0)
    }
}

impl Days {
    /// Average Gregorian month.
    pub const DAYS_PER_MONTH: f64 = 30.44;

    pub const DAYS_PER_WEEK: f64 = 7.0;

    pub const MONTHS_PER_YEAR: f64 = 12.0;

    pub const fn to_weeks(self) -> f64 {
        self.0 / Self::DAYS_PER_WEEK
    }

    pub const fn to_months(self) -> f64 {
        self.0 / Self::DAYS_PER_MONTH
    }

    pub const fn to_years(self) -> f64 {
        self.to_months() / Self::MONTHS_PER_YEAR
    }
}
