use bigdecimal::BigDecimal;
use rayon::prelude::*;

use crate::models::{InvoiceCalculationResult, Insurer};
use crate::service::calculator::calculate_for_plan;

/// 对所有 (保险公司, 方案) 计算报销, 按自付金额升序排列
///
/// 传入 `plan_filter` 时只保留同名方案. 排序稳定, 自付相同时保持输入顺序.
pub fn compare_across_insurers(
    insurers: &[Insurer],
    invoice_amount: &BigDecimal,
    plan_filter: Option<&str>,
) -> Vec<InvoiceCalculationResult> {
    let mut results: Vec<InvoiceCalculationResult> = insurers
        .par_iter()
        .flat_map_iter(|insurer| {
            insurer
                .plans
                .iter()
                .filter(move |(name, _)| plan_filter.map_or(true, |f| f == name.as_str()))
                .map(move |(name, plan)| calculate_for_plan(insurer, name, plan, invoice_amount))
        })
        .collect();

    results.sort_by(|a, b| a.out_of_pocket.cmp(&b.out_of_pocket));
    results
}

/// 方案名称, 按数据文件顺序
pub fn list_plans(insurer: &Insurer) -> Vec<&str> {
    insurer.plans.keys().map(String::as_str).collect()
}

/// 自付最少的方案, 无数据时返回 None
pub fn find_best(insurers: &[Insurer], invoice_amount: &BigDecimal) -> Option<InvoiceCalculationResult> {
    compare_across_insurers(insurers, invoice_amount, None)
        .into_iter()
        .next()
}
