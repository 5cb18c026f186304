use bigdecimal::{BigDecimal, Zero};
use std::sync::Arc;

use crate::error::{ComparatorError, Result};
use crate::models::{
    CalculationDetail, InvoiceCalculationResult, Insurer, OptimizationResult, SimulationResult,
};
use crate::report::{render_quote, QuoteRequest};
use crate::service::{calculator, optimizer, ranking, simulator};
use crate::store::PlanRepository;

/// 按名称调用计算引擎的服务层, 供 HTTP / CLI 使用
///
/// 引擎函数本身不校验金额; 这里拒绝非正数价格.
pub struct ComparatorService {
    repository: Arc<PlanRepository>,
}

impl ComparatorService {
    pub fn new(repository: Arc<PlanRepository>) -> Self {
        Self { repository }
    }

    pub fn insurers(&self) -> &[Insurer] {
        self.repository.insurers()
    }

    /// 单张发票计算, 附带补贴与报销上限
    pub fn calculate(
        &self,
        insurer_name: &str,
        plan_name: &str,
        invoice_amount: &BigDecimal,
    ) -> Result<CalculationDetail> {
        let insurer = self.repository.find_insurer(insurer_name)?;
        let plan = calculator::find_plan(insurer, plan_name)?;

        Ok(CalculationDetail {
            calculation: calculator::calculate_for_plan(insurer, plan_name, plan, invoice_amount),
            flat_allowance: calculator::resolve_flat_allowance(insurer, plan),
            ceiling: calculator::ceiling(insurer, plan_name)?,
            data_source: insurer.data_source,
            confidence_score: insurer.confidence_score,
        })
    }

    pub fn simulate(
        &self,
        insurer_name: &str,
        plan_name: &str,
        insoles_price: &BigDecimal,
        assessment_price: &BigDecimal,
    ) -> Result<SimulationResult> {
        ensure_positive("prixSemelles", insoles_price)?;
        ensure_positive("prixBilan", assessment_price)?;
        let insurer = self.repository.find_insurer(insurer_name)?;
        simulator::simulate_split(insurer, plan_name, insoles_price, assessment_price)
    }

    pub fn optimize(
        &self,
        insurer_name: &str,
        plan_name: &str,
        total_price: &BigDecimal,
    ) -> Result<OptimizationResult> {
        ensure_positive("prixTotal", total_price)?;
        ensure_at_most("prixTotal", total_price, MAX_OPTIMIZED_TOTAL)?;
        let insurer = self.repository.find_insurer(insurer_name)?;
        optimizer::optimize_split(insurer, plan_name, total_price)
    }

    pub fn compare(
        &self,
        invoice_amount: &BigDecimal,
        plan_filter: Option<&str>,
    ) -> Result<Vec<InvoiceCalculationResult>> {
        ensure_positive("prix", invoice_amount)?;
        Ok(ranking::compare_across_insurers(
            self.repository.insurers(),
            invoice_amount,
            plan_filter,
        ))
    }

    pub fn best(&self, invoice_amount: &BigDecimal) -> Result<Option<InvoiceCalculationResult>> {
        ensure_positive("prix", invoice_amount)?;
        Ok(ranking::find_best(self.repository.insurers(), invoice_amount))
    }

    /// 生成 HTML 报价单
    pub fn quote(
        &self,
        insurer_name: &str,
        plan_name: &str,
        invoice_amount: &BigDecimal,
        patient: Option<&str>,
        podiatrist: Option<&str>,
        date: String,
    ) -> Result<String> {
        ensure_positive("prix", invoice_amount)?;
        let detail = self.calculate(insurer_name, plan_name, invoice_amount)?;

        Ok(render_quote(&QuoteRequest {
            calculation: &detail.calculation,
            flat_allowance: detail.flat_allowance.clone(),
            patient,
            podiatrist,
            date,
        }))
    }
}

/// 拆分优化按整数逐个扫描, 总价超过该值时拒绝
pub const MAX_OPTIMIZED_TOTAL: u32 = 10_000;

fn ensure_at_most(field: &str, value: &BigDecimal, max: u32) -> Result<()> {
    if *value <= BigDecimal::from(max) {
        Ok(())
    } else {
        Err(ComparatorError::InvalidAmount {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

fn ensure_positive(field: &str, value: &BigDecimal) -> Result<()> {
    if *value > BigDecimal::zero() {
        Ok(())
    } else {
        Err(ComparatorError::InvalidAmount {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Plan, PodiatryAllowance};
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn service() -> ComparatorService {
        let harmonie = Insurer::new("Harmonie Mutuelle")
            .with_plan("Équipement 1★", Plan::new(dec("100")).with_flat_allowance(dec("0")))
            .with_plan("Équipement 3★", Plan::new(dec("100")).with_flat_allowance(dec("200")));
        let mgen = Insurer::new("MGEN").with_plan(
            "Référence",
            Plan::new(dec("230")).with_podiatry(PodiatryAllowance {
                per_session_cap: Some(dec("40")),
                annual_cap: Some(dec("100")),
                max_sessions: None,
                shared_envelope: Some("médecines douces".to_string()),
            }),
        );
        ComparatorService::new(Arc::new(PlanRepository::from_insurers(vec![harmonie, mgen])))
    }

    #[test]
    fn calculation_reports_allowance_and_ceiling() {
        let detail = service().calculate("Harmonie Mutuelle", "Équipement 3★", &dec("250")).unwrap();
        assert_eq!(detail.flat_allowance, dec("200"));
        assert_eq!(detail.ceiling, dec("228.86"));
        assert_eq!(detail.calculation.out_of_pocket, dec("21.14"));
    }

    #[test]
    fn ceiling_available_without_price() {
        let detail = service().calculate("MGEN", "Référence", &BigDecimal::zero()).unwrap();
        assert_eq!(detail.ceiling, dec("66.38"));
    }

    #[test]
    fn unknown_insurer_and_plan() {
        let svc = service();
        assert!(matches!(
            svc.calculate("Inexistante", "X", &dec("150")),
            Err(ComparatorError::InsurerNotFound(_))
        ));
        assert!(matches!(
            svc.calculate("MGEN", "Inexistante", &dec("150")),
            Err(ComparatorError::PlanNotFound { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_prices() {
        let svc = service();
        assert!(matches!(
            svc.simulate("MGEN", "Référence", &dec("-10"), &dec("60")),
            Err(ComparatorError::InvalidAmount { .. })
        ));
        assert!(matches!(
            svc.optimize("MGEN", "Référence", &BigDecimal::zero()),
            Err(ComparatorError::InvalidAmount { .. })
        ));
        assert!(svc.compare(&dec("-1"), None).is_err());
    }

    #[test]
    fn optimization_total_is_bounded() {
        let svc = service();
        assert!(matches!(
            svc.optimize("MGEN", "Référence", &dec("1000000000000")),
            Err(ComparatorError::InvalidAmount { .. })
        ));
        assert!(matches!(
            svc.optimize("MGEN", "Référence", &dec("10000.01")),
            Err(ComparatorError::InvalidAmount { .. })
        ));
        let at_limit = svc.optimize("MGEN", "Référence", &BigDecimal::from(MAX_OPTIMIZED_TOTAL));
        assert!(at_limit.unwrap().optimization_possible);
    }

    #[test]
    fn quote_contains_insurer() {
        let html = service()
            .quote(
                "MGEN",
                "Référence",
                &dec("150"),
                Some("Test"),
                Some("Dr X"),
                "01/01/2026".to_string(),
            )
            .unwrap();
        assert!(html.contains("MGEN"));
        assert!(html.contains("Test"));
        assert!(html.contains("01/01/2026"));
    }

    #[test]
    fn best_across_repository() {
        let best = service().best(&dec("150")).unwrap().unwrap();
        assert_eq!(best.insurer_name, "Harmonie Mutuelle");
        assert_eq!(best.plan_name, "Équipement 3★");
    }
}
