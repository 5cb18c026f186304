use crate::error::Result;
use crate::models::Insurer;
use crate::store::PlanRepository;
use std::fs;
use std::path::Path;

/// 加载参考数据文件 (mutuelles.json), 进程生命周期内只读
pub fn load_repository(path: impl AsRef<Path>) -> Result<PlanRepository> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let insurers: Vec<Insurer> = serde_json::from_str(&raw)?;

    let plan_count: usize = insurers.iter().map(|m| m.plans.len()).sum();
    tracing::info!(
        "Loaded {} insurers / {} plans from {}",
        insurers.len(),
        plan_count,
        path.display()
    );

    Ok(PlanRepository::from_insurers(insurers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComparatorError;

    #[test]
    fn loads_bundled_data_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/mutuelles.json");
        let repo = load_repository(&path).unwrap();
        assert!(!repo.is_empty());
        assert!(repo.find_insurer("MGEN").is_ok());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_repository("/nonexistent/mutuelles.json").unwrap_err();
        assert!(matches!(err, ComparatorError::Io(_)));
    }
}
