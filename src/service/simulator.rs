use bigdecimal::{BigDecimal, Zero};

use crate::error::Result;
use crate::models::amount::round_money;
use crate::models::{Insurer, SimulationResult, TwoInvoiceScenario};
use crate::service::calculator::{assess_for_plan, calculate_for_plan, find_plan};

/// 对比: 鞋垫+诊疗合开一张发票 vs 分开两张发票
pub fn simulate_split(
    insurer: &Insurer,
    plan_name: &str,
    insoles_price: &BigDecimal,
    assessment_price: &BigDecimal,
) -> Result<SimulationResult> {
    let plan = find_plan(insurer, plan_name)?;
    let total_price = insoles_price + assessment_price;

    let single_invoice = calculate_for_plan(insurer, plan_name, plan, &total_price);

    let insoles = calculate_for_plan(insurer, plan_name, plan, insoles_price);
    let assessment = assess_for_plan(plan, assessment_price);
    let split_out_of_pocket = &insoles.out_of_pocket + &assessment.out_of_pocket;

    let gain = round_money(&(&single_invoice.out_of_pocket - &split_out_of_pocket));
    let podiatry_allowance_available = plan.has_podiatry_allowance();

    // 无足病额度时, 诊疗发票完全自付, 拆分不可能更优
    if !podiatry_allowance_available && gain > BigDecimal::zero() {
        tracing::warn!(
            "{} / {}: split reports gain {} without podiatry allowance",
            insurer.name,
            plan_name,
            gain
        );
    }

    Ok(SimulationResult {
        total_price: round_money(&total_price),
        single_invoice,
        two_invoices: TwoInvoiceScenario {
            insoles,
            assessment,
            out_of_pocket: round_money(&split_out_of_pocket),
        },
        gain,
        podiatry_allowance_available,
    })
}
