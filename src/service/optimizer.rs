use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};

use crate::error::{ComparatorError, Result};
use crate::models::amount::round_money;
use crate::models::{BestSolution, Insurer, OptimalSplit, OptimizationResult};
use crate::service::calculator::{assess_for_plan, calculate_for_plan, find_plan};

/// 在总价内穷举 bilan 的整数金额, 寻找患者自付最少的拆分
///
/// 目标函数在各上限处分段线性, 逐个整数扫描可保证全局最优.
/// 平局保留最先找到 (bilan 最小) 的拆分, 只在严格更优时替换.
pub fn optimize_split(
    insurer: &Insurer,
    plan_name: &str,
    total_price: &BigDecimal,
) -> Result<OptimizationResult> {
    let plan = find_plan(insurer, plan_name)?;
    let single_invoice = calculate_for_plan(insurer, plan_name, plan, total_price);

    if !plan.has_podiatry_allowance() {
        return Ok(OptimizationResult {
            total_price: round_money(total_price),
            optimization_possible: false,
            single_invoice,
            best_solution: BestSolution::SingleInvoice,
            optimal_split: None,
            gain: BigDecimal::zero(),
        });
    }

    let upper = total_price
        .with_scale_round(0, RoundingMode::Floor)
        .to_u64()
        .ok_or_else(|| ComparatorError::InvalidAmount {
            field: "prixTotal".to_string(),
            value: total_price.to_string(),
        })?;

    let mut best: Option<OptimalSplit> = None;
    for step in 1..=upper {
        let assessment_price = BigDecimal::from(step);
        let insoles_price = total_price - &assessment_price;

        let insoles = calculate_for_plan(insurer, plan_name, plan, &insoles_price);
        let assessment = assess_for_plan(plan, &assessment_price);
        let out_of_pocket = &insoles.out_of_pocket + &assessment.out_of_pocket;

        let is_better = match &best {
            None => true,
            Some(current) => out_of_pocket < current.out_of_pocket,
        };

        if is_better {
            best = Some(OptimalSplit {
                insoles_price: round_money(&insoles_price),
                assessment_price,
                insoles,
                assessment,
                out_of_pocket: round_money(&out_of_pocket),
            });
        }
    }

    match best {
        Some(split) if split.out_of_pocket < single_invoice.out_of_pocket => {
            let gain = round_money(&(&single_invoice.out_of_pocket - &split.out_of_pocket));
            tracing::debug!(
                "{} / {}: best split bilan={} semelles={} gain={}",
                insurer.name,
                plan_name,
                split.assessment_price,
                split.insoles_price,
                gain
            );
            Ok(OptimizationResult {
                total_price: round_money(total_price),
                optimization_possible: true,
                single_invoice,
                best_solution: BestSolution::TwoInvoices,
                optimal_split: Some(split),
                gain,
            })
        }
        _ => Ok(OptimizationResult {
            total_price: round_money(total_price),
            optimization_possible: true,
            single_invoice,
            best_solution: BestSolution::SingleInvoice,
            optimal_split: None,
            gain: BigDecimal::zero(),
        }),
    }
}
