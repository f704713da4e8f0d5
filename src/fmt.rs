use std::fmt::{Debug, Display, Formatter};

/// Dollar amount to print, stored in whole cents.
#[derive(Copy, Clone)]
pub struct FormattedDollars {
    pub cents: u64,
    pub precision: Precision,
}

impl Debug for FormattedDollars {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedDollars {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.precision {
            Precision::Dollars => write!(f, "${}", self.cents / 100),
            Precision::Cents => write!(f, "${}.{:02}", self.cents / 100, self.cents % 100),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Precision {
    /// Whole dollars.
    #[default]
    Dollars,

    /// Dollars and cents.
    Cents,
}
