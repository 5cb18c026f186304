pub mod calculator;
pub mod comparator;
pub mod optimizer;
pub mod ranking;
pub mod simulator;

pub use calculator::{calculate, calculate_assessment, ceiling, resolve_flat_allowance};
pub use comparator::ComparatorService;
pub use optimizer::optimize_split;
pub use ranking::{compare_across_insurers, find_best, list_plans};
pub use simulator::simulate_split;
