use bigdecimal::{BigDecimal, Zero};
use std::cmp::{max, min};

use crate::error::{ComparatorError, Result};
use crate::models::amount::{percent, reference_base, round_money, social_security_rate};
use crate::models::{AssessmentResult, InvoiceCalculationResult, Insurer, Plan};

/// 查找方案, 不存在时返回 PlanNotFound
pub fn find_plan<'a>(insurer: &'a Insurer, plan_name: &str) -> Result<&'a Plan> {
    insurer
        .plan(plan_name)
        .ok_or_else(|| ComparatorError::PlanNotFound {
            insurer: insurer.name.clone(),
            plan: plan_name.to_string(),
        })
}

/// 社保报销部分 = BRSS × 60%, 与方案无关
pub fn social_security_share() -> BigDecimal {
    reference_base() * social_security_rate()
}

/// 年度固定补贴: 方案级优先, 其次保险公司级, 否则为 0
pub fn resolve_flat_allowance(insurer: &Insurer, plan: &Plan) -> BigDecimal {
    plan.flat_allowance
        .as_ref()
        .or(insurer.flat_allowance.as_ref())
        .cloned()
        .unwrap_or_else(BigDecimal::zero)
}

/// 鞋垫发票报销计算
pub fn calculate(
    insurer: &Insurer,
    plan_name: &str,
    invoice_amount: &BigDecimal,
) -> Result<InvoiceCalculationResult> {
    let plan = find_plan(insurer, plan_name)?;
    Ok(calculate_for_plan(insurer, plan_name, plan, invoice_amount))
}

/// 已定位方案后的计算, 不会失败
pub fn calculate_for_plan(
    insurer: &Insurer,
    plan_name: &str,
    plan: &Plan,
    invoice_amount: &BigDecimal,
) -> InvoiceCalculationResult {
    let zero = BigDecimal::zero();
    let social_security = social_security_share();

    // pourcentageBR 含社保部分: 总权益 = BRSS × rate%, 互助部分 = 总权益 - 社保
    let total_entitlement = reference_base() * percent(&plan.reimbursement_rate);
    let insurer_share = max(zero.clone(), &total_entitlement - &social_security);

    // 发票金额小于社保部分时为负数, 表示互助保险最多还能付的额度
    let remainder = invoice_amount - &social_security;
    let insurer_reimbursement = min(insurer_share, remainder.clone());

    let allowance = resolve_flat_allowance(insurer, plan);
    let insurer_total = min(insurer_reimbursement + allowance, remainder);
    let insurer_total = max(insurer_total, zero.clone());

    let out_of_pocket = max(zero, invoice_amount - &social_security - &insurer_total);

    InvoiceCalculationResult {
        insurer_name: insurer.name.clone(),
        plan_name: plan_name.to_string(),
        reimbursement_rate: plan.reimbursement_rate.clone(),
        invoice_amount: round_money(invoice_amount),
        social_security_reimbursement: round_money(&social_security),
        insurer_reimbursement: round_money(&insurer_total),
        out_of_pocket: round_money(&out_of_pocket),
        frequency: insurer.frequency.clone(),
        conditions: insurer.conditions.clone(),
    }
}

/// 报销上限 (plafond) = BRSS × rate% + 年度固定补贴
pub fn ceiling(insurer: &Insurer, plan_name: &str) -> Result<BigDecimal> {
    let plan = find_plan(insurer, plan_name)?;
    let ceiling = reference_base() * percent(&plan.reimbursement_rate)
        + resolve_flat_allowance(insurer, plan);
    Ok(round_money(&ceiling))
}

/// 足病诊疗发票 (bilan) 报销计算
pub fn calculate_assessment(
    insurer: &Insurer,
    plan_name: &str,
    assessment_amount: &BigDecimal,
) -> Result<AssessmentResult> {
    let plan = find_plan(insurer, plan_name)?;
    Ok(assess_for_plan(plan, assessment_amount))
}

pub fn assess_for_plan(plan: &Plan, assessment_amount: &BigDecimal) -> AssessmentResult {
    let zero = BigDecimal::zero();

    let Some(podiatry) = plan.podiatry.as_ref() else {
        return AssessmentResult {
            assessment_amount: round_money(assessment_amount),
            reimbursement: zero,
            out_of_pocket: round_money(assessment_amount),
            allowance_available: false,
        };
    };

    // 依次取 min: 单次上限 -> 年度上限 -> 发票金额
    let mut reimbursable: Option<BigDecimal> = None;
    for cap in [&podiatry.per_session_cap, &podiatry.annual_cap].into_iter().flatten() {
        reimbursable = Some(match reimbursable {
            Some(current) => min(current, cap.clone()),
            None => cap.clone(),
        });
    }
    let reimbursement = match reimbursable {
        Some(capped) => min(capped, assessment_amount.clone()),
        None => assessment_amount.clone(),
    };
    let reimbursement = max(reimbursement, zero.clone());
    let out_of_pocket = max(zero, assessment_amount - &reimbursement);

    AssessmentResult {
        assessment_amount: round_money(assessment_amount),
        reimbursement: round_money(&reimbursement),
        out_of_pocket: round_money(&out_of_pocket),
        allowance_available: true,
    }
}
