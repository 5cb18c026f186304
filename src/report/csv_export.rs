use crate::models::amount::format_money;
use crate::models::InvoiceCalculationResult;

/// 导出比较结果为 CSV (含表头)
pub fn export_csv(results: &[InvoiceCalculationResult]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "mutuelle",
        "formule",
        "pourcentageBR",
        "prixSemelles",
        "remboursementSecu",
        "remboursementMutuelle",
        "resteACharge",
        "frequence",
        "conditions",
    ])?;

    for r in results {
        writer.write_record([
            r.insurer_name.clone(),
            r.plan_name.clone(),
            r.reimbursement_rate.to_string(),
            format_money(&r.invoice_amount),
            format_money(&r.social_security_reimbursement),
            format_money(&r.insurer_reimbursement),
            format_money(&r.out_of_pocket),
            r.frequency.clone(),
            r.conditions.clone(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    #[test]
    fn header_and_quoted_rows() {
        let row = InvoiceCalculationResult {
            insurer_name: "Crédit Mutuel (ACM)".to_string(),
            plan_name: "Niveau 15".to_string(),
            reimbursement_rate: BigDecimal::from(100),
            invoice_amount: BigDecimal::from(150),
            social_security_reimbursement: BigDecimal::from_str("17.32").unwrap(),
            insurer_reimbursement: BigDecimal::from_str("86.54").unwrap(),
            out_of_pocket: BigDecimal::from_str("46.14").unwrap(),
            frequency: "1 paire par an".to_string(),
            conditions: "Sur prescription médicale, limité aux frais réels".to_string(),
        };

        let out = export_csv(&[row]).unwrap();
        let mut lines = out.lines();
        assert!(lines.next().unwrap().starts_with("mutuelle,formule,pourcentageBR"));
        let line = lines.next().unwrap();
        assert!(line.starts_with("Crédit Mutuel (ACM),Niveau 15,100,150.00,17.32,86.54,46.14"));
        assert!(line.ends_with("\"Sur prescription médicale, limité aux frais réels\""));
    }
}
