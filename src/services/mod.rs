pub mod filtered_responses;
pub mod populate;

pub use filtered_responses::{assemble, FilterParams, FilteredResponsesQuery};
pub use populate::{fetch_seed_data, populate_tables, IngestionPlan, PopulateSummary};
