pub mod csv_export;
pub mod quote;
pub mod text;

pub use csv_export::export_csv;
pub use quote::{escape_html, format_euros, render_quote, QuoteRequest};
pub use text::{format_result, format_results};
