pub mod loader;
pub mod repository;

pub use loader::load_repository;
pub use repository::PlanRepository;
