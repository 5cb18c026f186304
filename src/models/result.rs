use bigdecimal::BigDecimal;
use serde::Serialize;

use super::amount;

/// 单张发票 (semelles) 的报销计算结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceCalculationResult {
    #[serde(rename = "nom")]
    pub insurer_name: String,
    #[serde(rename = "formule")]
    pub plan_name: String,
    #[serde(rename = "pourcentageBR", with = "amount")]
    pub reimbursement_rate: BigDecimal,
    #[serde(rename = "prixSemelles", with = "amount")]
    pub invoice_amount: BigDecimal,
    #[serde(rename = "remboursementSecu", with = "amount")]
    pub social_security_reimbursement: BigDecimal,
    #[serde(rename = "remboursementMutuelle", with = "amount")]
    pub insurer_reimbursement: BigDecimal,
    #[serde(rename = "resteACharge", with = "amount")]
    pub out_of_pocket: BigDecimal,
    #[serde(rename = "frequence")]
    pub frequency: String,
    pub conditions: String,
}

/// 足病诊疗发票 (bilan) 的报销结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    #[serde(rename = "prixBilan", with = "amount")]
    pub assessment_amount: BigDecimal,
    #[serde(rename = "remboursementPodologie", with = "amount")]
    pub reimbursement: BigDecimal,
    #[serde(rename = "resteACharge", with = "amount")]
    pub out_of_pocket: BigDecimal,
    #[serde(rename = "forfaitDisponible")]
    pub allowance_available: bool,
}

/// 拆分为两张发票时的明细
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwoInvoiceScenario {
    #[serde(rename = "semelles")]
    pub insoles: InvoiceCalculationResult,
    #[serde(rename = "bilan")]
    pub assessment: AssessmentResult,
    #[serde(rename = "resteACharge", with = "amount")]
    pub out_of_pocket: BigDecimal,
}

/// 一张发票 vs 两张发票的对比
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    #[serde(rename = "prixTotal", with = "amount")]
    pub total_price: BigDecimal,
    #[serde(rename = "factureUnique")]
    pub single_invoice: InvoiceCalculationResult,
    #[serde(rename = "deuxFactures")]
    pub two_invoices: TwoInvoiceScenario,
    /// 正数表示拆分对患者更有利
    #[serde(with = "amount")]
    pub gain: BigDecimal,
    #[serde(rename = "forfaitPodologieDisponible")]
    pub podiatry_allowance_available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BestSolution {
    #[serde(rename = "unique")]
    SingleInvoice,
    #[serde(rename = "deuxFactures")]
    TwoInvoices,
}

/// 最优拆分方案
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalSplit {
    #[serde(rename = "prixSemelles", with = "amount")]
    pub insoles_price: BigDecimal,
    #[serde(rename = "prixBilan", with = "amount")]
    pub assessment_price: BigDecimal,
    #[serde(rename = "semelles")]
    pub insoles: InvoiceCalculationResult,
    #[serde(rename = "bilan")]
    pub assessment: AssessmentResult,
    #[serde(rename = "resteACharge", with = "amount")]
    pub out_of_pocket: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    #[serde(rename = "prixTotal", with = "amount")]
    pub total_price: BigDecimal,
    #[serde(rename = "optimisationPossible")]
    pub optimization_possible: bool,
    #[serde(rename = "factureUnique")]
    pub single_invoice: InvoiceCalculationResult,
    #[serde(rename = "meilleureSolution")]
    pub best_solution: BestSolution,
    #[serde(rename = "repartitionOptimale")]
    pub optimal_split: Option<OptimalSplit>,
    #[serde(with = "amount")]
    pub gain: BigDecimal,
}

/// 计算接口返回: 计算结果 + 补贴 + 上限 + 数据来源
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationDetail {
    #[serde(flatten)]
    pub calculation: InvoiceCalculationResult,
    #[serde(rename = "forfait", with = "amount")]
    pub flat_allowance: BigDecimal,
    #[serde(rename = "plafond", with = "amount")]
    pub ceiling: BigDecimal,
    #[serde(rename = "dataSource")]
    pub data_source: super::DataSource,
    #[serde(rename = "confidenceScore")]
    pub confidence_score: f64,
}
