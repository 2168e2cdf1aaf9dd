//! Human-readable overview of a database file.
//!
//! Walks the header and every table count without unpacking any record, so it
//! works on files whose names would not resolve.

use std::fmt;

use crate::error::DecodeError;
use crate::file::Table;
use crate::header::Header;
use crate::meta::TypeRegistry;
use crate::wire::ByteReader;

/// Record count and packed size of one entity table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableSummary {
    pub table: Table,
    pub count: usize,
    pub packed_bytes: usize,
}

/// Shape of a database file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub version: u32,
    /// Number of names in the name table.
    pub names: usize,
    /// Total bytes of name text.
    pub name_bytes: usize,
    /// Entity tables, in file order.
    pub tables: Vec<TableSummary>,
    /// Bytes after the last table.
    pub trailing_bytes: usize,
}

impl Summary {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let registry = TypeRegistry::new();
        let mut input = ByteReader::new(bytes);

        let header = Header::read(&mut input)?;
        header.validate()?;

        let names = input.count()?;
        let mut name_bytes = 0;
        for _ in 0..names {
            input.u32()?;
            let len = input.i32()?;
            let len = usize::try_from(len).map_err(|_| DecodeError::InvalidLength(len))?;
            input.take(len)?;
            name_bytes += len;
        }

        let mut tables = Vec::with_capacity(Table::ALL.len());
        for table in Table::ALL {
            let count = input.count()?;
            let packed_bytes = table
                .descriptor(&registry)
                .packed_len(count)
                .ok_or(DecodeError::InvalidCount(count as i32))?;
            input.take(packed_bytes)?;
            tables.push(TableSummary {
                table,
                count,
                packed_bytes,
            });
        }

        Ok(Self {
            version: header.version,
            names,
            name_bytes,
            tables,
            trailing_bytes: input.remaining(),
        })
    }

    /// Total number of records across all tables.
    pub fn records(&self) -> usize {
        self.tables.iter().map(|t| t.count).sum()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "crdb v{}", self.version)?;
        writeln!(f, "names: {} ({} bytes)", self.names, self.name_bytes)?;
        for t in &self.tables {
            writeln!(f, "{}: {} records ({} bytes)", t.table, t.count, t.packed_bytes)?;
        }
        if self.trailing_bytes > 0 {
            writeln!(f, "trailing: {} bytes", self.trailing_bytes)?;
        }
        Ok(())
    }
}
