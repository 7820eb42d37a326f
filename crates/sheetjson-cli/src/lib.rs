//! `sheetjson` command line: converts every workbook in a directory into a
//! JSON document, one output file per workbook.

pub mod cli;
pub mod discover;
mod logger;
pub mod output;
