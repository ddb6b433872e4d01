//! File input and output around the profiling engine.
//!
//! - Loading delimited text tables (`.csv`, `.tsv`, `.txt`) and workbooks
//!   (`.xls`, `.xlsx`, `.xlsm`, `.xlsb`, `.ods`)
//! - Writing profile reports as one side-by-side CSV sheet

mod loader;
mod writer;

pub use loader::{InputFormat, load_table, read_delimited, read_spreadsheet};
pub use writer::{SheetGrid, SummaryWriter, output_path};
