// Service exports
pub mod export;
pub mod survey;

pub use export::{export_pairs, render_listing, write_pairs, ExportError};
pub use survey::{SurveyError, SurveyReader};
