use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::amount;

/// 数据来源等级
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Official,
    Scraped,
    #[default]
    Estimated,
}

/// 足病诊疗 (bilan podologique) 报销额度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodiatryAllowance {
    /// 单次上限
    #[serde(rename = "montantParSeance", default, with = "amount::option")]
    pub per_session_cap: Option<BigDecimal>,
    /// 年度上限
    #[serde(rename = "montantAnnuel", default, with = "amount::option")]
    pub annual_cap: Option<BigDecimal>,
    #[serde(rename = "nbSeancesMax", default)]
    pub max_sessions: Option<u32>,
    /// 与其他类别共享的额度 (如 "médecines douces"), 计算中不扣减
    #[serde(rename = "enveloppePartagee", default)]
    pub shared_envelope: Option<String>,
}

/// 保险方案 (formule)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// 报销比例, 以 BRSS 百分比表示 (含社保部分)
    #[serde(rename = "pourcentageBR", with = "amount")]
    pub reimbursement_rate: BigDecimal,
    /// 方案级年度固定补贴, 优先于保险公司级
    #[serde(rename = "forfaitAnnuel", default, with = "amount::option")]
    pub flat_allowance: Option<BigDecimal>,
    #[serde(rename = "forfaitPodologie", default)]
    pub podiatry: Option<PodiatryAllowance>,
}

impl Plan {
    pub fn new(reimbursement_rate: BigDecimal) -> Self {
        Self {
            reimbursement_rate,
            flat_allowance: None,
            podiatry: None,
        }
    }

    pub fn with_flat_allowance(mut self, allowance: BigDecimal) -> Self {
        self.flat_allowance = Some(allowance);
        self
    }

    pub fn with_podiatry(mut self, podiatry: PodiatryAllowance) -> Self {
        self.podiatry = Some(podiatry);
        self
    }

    pub fn has_podiatry_allowance(&self) -> bool {
        self.podiatry.is_some()
    }
}

/// 互助保险公司 (mutuelle) 参考数据, 启动时加载后只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insurer {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "siren", default)]
    pub legal_id: String,
    #[serde(rename = "codesAMC", default)]
    pub amc_codes: Vec<String>,
    #[serde(rename = "formules")]
    pub plans: IndexMap<String, Plan>,
    #[serde(rename = "forfaitAnnuel", default, with = "amount::option")]
    pub flat_allowance: Option<BigDecimal>,
    #[serde(rename = "frequence", default)]
    pub frequency: String,
    #[serde(rename = "conditions", default)]
    pub conditions: String,
    #[serde(rename = "dataSource", default)]
    pub data_source: DataSource,
    #[serde(rename = "confidenceScore", default)]
    pub confidence_score: f64,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<NaiveDate>,
}

impl Insurer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            legal_id: String::new(),
            amc_codes: Vec::new(),
            plans: IndexMap::new(),
            flat_allowance: None,
            frequency: String::new(),
            conditions: String::new(),
            data_source: DataSource::default(),
            confidence_score: 0.0,
            last_updated: None,
        }
    }

    pub fn with_plan(mut self, name: impl Into<String>, plan: Plan) -> Self {
        self.plans.insert(name.into(), plan);
        self
    }

    pub fn with_flat_allowance(mut self, allowance: BigDecimal) -> Self {
        self.flat_allowance = Some(allowance);
        self
    }

    pub fn plan(&self, name: &str) -> Option<&Plan> {
        self.plans.get(name)
    }
}
