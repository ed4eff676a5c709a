//! Utility actions; these read the store but never mutate it

mod calculate;
mod summarize_data;

pub use calculate::CalculateAction;
pub use summarize_data::SummarizeDataAction;
