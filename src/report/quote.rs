use bigdecimal::{BigDecimal, Zero};

use crate::models::amount::{format_money, reference_base};
use crate::models::InvoiceCalculationResult;

/// 报价单 (devis) 所需输入
#[derive(Debug, Clone)]
pub struct QuoteRequest<'a> {
    pub calculation: &'a InvoiceCalculationResult,
    pub flat_allowance: BigDecimal,
    pub patient: Option<&'a str>,
    pub podiatrist: Option<&'a str>,
    /// 已格式化的日期 (dd/mm/yyyy)
    pub date: String,
}

pub fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn format_euros(amount: &BigDecimal) -> String {
    format!("{} &euro;", format_money(amount))
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => escape_html(v),
        _ => placeholder.to_string(),
    }
}

const STYLE: &str = r#"    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: Arial, Helvetica, sans-serif; font-size: 14px; color: #333; padding: 40px; max-width: 800px; margin: 0 auto; }
    .header { display: flex; justify-content: space-between; margin-bottom: 30px; border-bottom: 2px solid #2c5282; padding-bottom: 20px; }
    .header-left h1 { font-size: 20px; color: #2c5282; }
    .header-right { text-align: right; color: #666; }
    .info-section { display: flex; justify-content: space-between; margin-bottom: 30px; }
    .info-block { flex: 1; }
    .info-block h3 { font-size: 13px; text-transform: uppercase; color: #666; margin-bottom: 8px; }
    table { width: 100%; border-collapse: collapse; margin-bottom: 30px; }
    th { background: #2c5282; color: white; padding: 10px 12px; text-align: left; font-size: 13px; }
    td { padding: 10px 12px; border-bottom: 1px solid #e2e8f0; }
    .amount { text-align: right; font-variant-numeric: tabular-nums; }
    .total-row { font-weight: bold; background: #ebf4ff; }
    .reste-row { font-weight: bold; background: #fff5f5; color: #c53030; }
    .footer { margin-top: 30px; padding-top: 20px; border-top: 1px solid #e2e8f0; font-size: 11px; color: #888; }
    @media print { body { padding: 20px; } }"#;

/// 生成可打印的 HTML 报价单, 所有用户输入均已转义
pub fn render_quote(request: &QuoteRequest<'_>) -> String {
    let calc = request.calculation;
    let total_reimbursed = &calc.social_security_reimbursement + &calc.insurer_reimbursement;
    let base = reference_base();

    let allowance_note = if request.flat_allowance > BigDecimal::zero() {
        format!(" (dont forfait {})", format_euros(&request.flat_allowance))
    } else {
        String::new()
    };

    let frequency = if calc.frequency.is_empty() {
        "Non precisee".to_string()
    } else {
        escape_html(&calc.frequency)
    };
    let conditions = if calc.conditions.is_empty() {
        "Sur prescription medicale".to_string()
    } else {
        escape_html(&calc.conditions)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Devis semelles orthopédiques</title>
  <style>
{style}
  </style>
</head>
<body>
  <div class="header">
    <div class="header-left"><h1>Devis - Semelles orthopédiques</h1></div>
    <div class="header-right"><p>Date : {date}</p></div>
  </div>

  <div class="info-section">
    <div class="info-block"><h3>Podologue</h3><p>{podiatrist}</p></div>
    <div class="info-block"><h3>Patient</h3><p>{patient}</p></div>
    <div class="info-block">
      <h3>Mutuelle</h3>
      <p>{insurer}</p>
      <p>Formule : {plan}</p>
    </div>
  </div>

  <table>
    <thead>
      <tr><th>Description</th><th class="amount">Montant</th></tr>
    </thead>
    <tbody>
      <tr><td>Prix des semelles orthopédiques</td><td class="amount">{price}</td></tr>
      <tr><td>Remboursement Securite sociale ({rate}% BR, base {base})</td><td class="amount">- {secu}</td></tr>
      <tr><td>Remboursement mutuelle{allowance_note}</td><td class="amount">- {mutuelle}</td></tr>
      <tr class="total-row"><td>Total rembourse</td><td class="amount">{total}</td></tr>
      <tr class="reste-row"><td>Reste a charge patient</td><td class="amount">{rac}</td></tr>
    </tbody>
  </table>

  <div class="footer">
    <p>Ce devis est etabli a titre indicatif. Les montants de remboursement sont bases sur la Base de Remboursement de la Securite Sociale (BRSS) de {base} pour les semelles orthopediques (pointure &gt; 37).</p>
    <p>Le remboursement effectif depend du contrat souscrit aupres de votre mutuelle et de votre situation personnelle.</p>
    <p>Frequence : {frequency}</p>
    <p>Conditions : {conditions}</p>
  </div>
</body>
</html>"#,
        style = STYLE,
        date = escape_html(&request.date),
        podiatrist = or_placeholder(request.podiatrist, "Non renseigne"),
        patient = or_placeholder(request.patient, "Non renseigne"),
        insurer = escape_html(&calc.insurer_name),
        plan = escape_html(&calc.plan_name),
        price = format_euros(&calc.invoice_amount),
        rate = calc.reimbursement_rate,
        base = format_euros(&base),
        secu = format_euros(&calc.social_security_reimbursement),
        allowance_note = allowance_note,
        mutuelle = format_euros(&calc.insurer_reimbursement),
        total = format_euros(&total_reimbursed),
        rac = format_euros(&calc.out_of_pocket),
        frequency = frequency,
        conditions = conditions,
    )
}
