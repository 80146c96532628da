pub mod sink;
pub mod workbook;
