use crate::models::amount::format_money;
use crate::models::InvoiceCalculationResult;

/// 单个方案的文本块
pub fn format_result(result: &InvoiceCalculationResult) -> String {
    [
        format!("--- {} ({}) ---", result.insurer_name, result.plan_name),
        format!("  Prix semelles      : {} €", format_money(&result.invoice_amount)),
        format!("  Rembt Sécu         : {} €", format_money(&result.social_security_reimbursement)),
        format!(
            "  Rembt mutuelle     : {} € ({}% BR)",
            format_money(&result.insurer_reimbursement),
            result.reimbursement_rate
        ),
        format!("  Reste à charge     : {} €", format_money(&result.out_of_pocket)),
        format!("  Fréquence          : {}", result.frequency),
        format!("  Conditions         : {}", result.conditions),
    ]
    .join("\n")
}

/// 比较报告: 表头 + 各方案 + 最优选项; 结果需已排序
pub fn format_results(results: &[InvoiceCalculationResult]) -> String {
    let Some(best) = results.first() else {
        return "Aucune mutuelle à comparer.".to_string();
    };

    let header = format!(
        "=== Comparaison pour des semelles à {} € ===\n",
        format_money(&best.invoice_amount)
    );
    let body = results.iter().map(format_result).collect::<Vec<_>>().join("\n\n");
    let footer = format!(
        "\n\nMeilleure option : {} - {} (reste à charge : {} €)",
        best.insurer_name,
        best.plan_name,
        format_money(&best.out_of_pocket)
    );

    header + &body + &footer
}
