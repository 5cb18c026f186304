pub mod amount;
pub mod insurer;
pub mod result;

pub use insurer::{DataSource, Insurer, Plan, PodiatryAllowance};
pub use result::{
    AssessmentResult, BestSolution, CalculationDetail, InvoiceCalculationResult, OptimalSplit,
    OptimizationResult, SimulationResult, TwoInvoiceScenario,
};
