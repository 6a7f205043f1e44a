pub mod export;
pub mod formatter;

pub use export::{format_csv, write_export, ExportRow, CSV_HEADER};
pub use formatter::{
    format_breakdown, format_percent, format_reading_line, format_score_table, should_use_colors,
};
