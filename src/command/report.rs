//! Human-readable report output

use std::io::{self, Write};

use crate::inventory::{Bike, InventoryError};
use crate::transaction::{Charge, TransactionKind};

use super::parser::{Listing, ParseError};

/// Line-oriented report writer
pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// One line per record, then the listing's banner. Returns the number of
    /// records written.
    pub fn listing<'a, I>(&mut self, listing: Listing, bikes: I) -> io::Result<usize>
    where
        I: IntoIterator<Item = &'a Bike>,
    {
        let mut written = 0;
        for bike in bikes {
            writeln!(self.out, "Id {}, man: {}", bike.id, bike.manufacturer)?;
            written += 1;
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", listing.banner())?;
        writeln!(self.out)?;
        Ok(written)
    }

    pub fn charge(&mut self, charge: &Charge) -> io::Result<()> {
        match charge.kind {
            TransactionKind::Rent => writeln!(
                self.out,
                "The price of this rental will be: ${:.2}",
                charge.amount
            )?,
            TransactionKind::Return => writeln!(
                self.out,
                "The price for renting this bike was: ${:.2}",
                charge.amount
            )?,
        }
        writeln!(self.out, "Thank you for your business!")?;
        writeln!(self.out)
    }

    pub fn deleted(&mut self, bike: &Bike) -> io::Result<()> {
        writeln!(self.out, "Deleted bike {} ({})", bike.id, bike.manufacturer)?;
        writeln!(self.out)
    }

    pub fn rejected(&mut self, err: &InventoryError) -> io::Result<()> {
        writeln!(self.out, "{}", err)?;
        writeln!(self.out)
    }

    pub fn malformed(&mut self, err: &ParseError) -> io::Result<()> {
        writeln!(self.out, "Malformed command: {}", err)?;
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
