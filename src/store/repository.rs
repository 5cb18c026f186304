use crate::error::{ComparatorError, Result};
use crate::models::Insurer;
use std::path::Path;

/// 只读参考数据仓库: 启动时构建一次, 之后通过 `Arc` 共享
#[derive(Debug, Clone, Default)]
pub struct PlanRepository {
    insurers: Vec<Insurer>,
}

impl PlanRepository {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        super::load_repository(path)
    }

    pub fn from_insurers(insurers: Vec<Insurer>) -> Self {
        Self { insurers }
    }

    /// 所有保险公司, 保持数据文件顺序
    pub fn insurers(&self) -> &[Insurer] {
        &self.insurers
    }

    /// 按显示名称精确查找 (区分大小写)
    pub fn find_insurer(&self, name: &str) -> Result<&Insurer> {
        self.insurers
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| ComparatorError::InsurerNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.insurers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insurers.is_empty()
    }
}
