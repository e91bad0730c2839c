//! TSPLIB tour writer.

use std::fmt;
use std::path::Path;

use crate::error::TspResult;

/// A solved tour in TSPLIB `TOUR` format.
///
/// Cities are written one-based, as TSPLIB numbers nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourFile<'a, T> {
    name: &'a str,
    tour: &'a [usize],
    cost: T,
}

impl<'a, T: fmt::Display> TourFile<'a, T> {
    /// Describe `tour` (zero-based cities) of problem `name`.
    #[must_use]
    pub const fn new(name: &'a str, tour: &'a [usize], cost: T) -> Self {
        Self { name, tour, cost }
    }

    /// Tour section on a single line, e.g. `1 4 2 3 -1`.
    #[must_use]
    pub fn inline(&self) -> String {
        let mut line = String::new();
        for city in self.tour {
            line.push_str(&(city + 1).to_string());
            line.push(' ');
        }
        line.push_str("-1");
        line
    }

    /// Header lines shared by both renderings.
    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NAME : {}.{}.tour", self.name, self.tour.len())?;
        writeln!(
            f,
            "COMMENT : Length = {}. Found by Little's branch and bound",
            self.cost
        )?;
        writeln!(f, "TYPE : TOUR")?;
        writeln!(f, "DIMENSION : {}", self.tour.len())?;
        writeln!(f, "TOUR_SECTION")
    }

    /// Header followed by the single-line tour section, for terminals.
    #[must_use]
    pub fn compact(&self) -> String {
        struct Compact<'b, 'a, T>(&'b TourFile<'a, T>);

        impl<T: fmt::Display> fmt::Display for Compact<'_, '_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.write_header(f)?;
                writeln!(f, "{}", self.0.inline())
            }
        }

        Compact(self).to_string()
    }

    /// Write the tour file to `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> TspResult<()> {
        std::fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for TourFile<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        for city in self.tour {
            writeln!(f, "{}", city + 1)?;
        }
        writeln!(f, "-1")?;
        writeln!(f, "EOF")
    }
}
