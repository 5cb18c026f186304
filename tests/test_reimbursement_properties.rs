//! Property tests for the reimbursement engine.

use bigdecimal::{BigDecimal, Zero};
use mutuelle_semelles::models::{BestSolution, Insurer, Plan, PodiatryAllowance};
use mutuelle_semelles::service::{calculate, calculate_assessment, optimize_split};
use proptest::prelude::*;
use std::str::FromStr;

fn cents(value: u32) -> BigDecimal {
    BigDecimal::new(value.into(), 2)
}

fn insurer_with(rate: u32, allowance: Option<u32>) -> Insurer {
    let mut plan = Plan::new(BigDecimal::from(rate));
    if let Some(a) = allowance {
        plan = plan.with_flat_allowance(BigDecimal::from(a));
    }
    Insurer::new("Prop").with_plan("P", plan)
}

fn social_security_share() -> BigDecimal {
    BigDecimal::from_str("17.316").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_out_of_pocket_never_negative(
        rate in 0u32..=600,
        allowance in proptest::option::of(0u32..=400),
        invoice in 1u32..=100_000,
    ) {
        let result = calculate(&insurer_with(rate, allowance), "P", &cents(invoice)).unwrap();
        prop_assert!(result.out_of_pocket >= BigDecimal::zero());
        prop_assert!(result.insurer_reimbursement >= BigDecimal::zero());
    }

    #[test]
    fn prop_insurer_never_pays_more_than_remainder(
        rate in 0u32..=600,
        allowance in proptest::option::of(0u32..=400),
        invoice in 1732u32..=100_000,
    ) {
        let invoice = cents(invoice);
        let result = calculate(&insurer_with(rate, allowance), "P", &invoice).unwrap();
        let remainder = (&invoice - social_security_share())
            .with_scale_round(2, bigdecimal::RoundingMode::HalfUp);
        prop_assert!(result.insurer_reimbursement <= remainder);
    }

    #[test]
    fn prop_higher_rate_never_worse(
        low in 0u32..=600,
        extra in 0u32..=300,
        allowance in proptest::option::of(0u32..=400),
        invoice in 1u32..=100_000,
    ) {
        let invoice = cents(invoice);
        let lower = calculate(&insurer_with(low, allowance), "P", &invoice).unwrap();
        let higher = calculate(&insurer_with(low + extra, allowance), "P", &invoice).unwrap();
        prop_assert!(higher.insurer_reimbursement >= lower.insurer_reimbursement);
        prop_assert!(higher.out_of_pocket <= lower.out_of_pocket);
    }

    #[test]
    fn prop_calculation_is_deterministic(
        rate in 0u32..=600,
        invoice in 1u32..=100_000,
    ) {
        let insurer = insurer_with(rate, None);
        let first = calculate(&insurer, "P", &cents(invoice)).unwrap();
        let second = calculate(&insurer, "P", &cents(invoice)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_rate_100_pays_fixed_complement(invoice in 2886u32..=100_000) {
        let result = calculate(&insurer_with(100, None), "P", &cents(invoice)).unwrap();
        prop_assert_eq!(result.insurer_reimbursement, BigDecimal::from_str("11.54").unwrap());
    }

    #[test]
    fn prop_assessment_within_caps(
        per_session in proptest::option::of(0u32..=100),
        annual in proptest::option::of(0u32..=300),
        amount in 0u32..=30_000,
    ) {
        let podiatry = PodiatryAllowance {
            per_session_cap: per_session.map(BigDecimal::from),
            annual_cap: annual.map(BigDecimal::from),
            max_sessions: None,
            shared_envelope: None,
        };
        let insurer = Insurer::new("Prop")
            .with_plan("P", Plan::new(BigDecimal::from(100)).with_podiatry(podiatry));
        let amount = cents(amount);
        let result = calculate_assessment(&insurer, "P", &amount).unwrap();

        prop_assert!(result.reimbursement <= amount);
        if let Some(cap) = per_session {
            prop_assert!(result.reimbursement <= BigDecimal::from(cap));
        }
        if let Some(cap) = annual {
            prop_assert!(result.reimbursement <= BigDecimal::from(cap));
        }
        prop_assert_eq!(&result.reimbursement + &result.out_of_pocket, amount);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// The chosen option beats the single invoice and every integer split.
    #[test]
    fn prop_optimizer_is_globally_optimal(
        rate in 60u32..=500,
        allowance in proptest::option::of(0u32..=150),
        per_session in proptest::option::of(10u32..=80),
        annual in proptest::option::of(20u32..=200),
        total in 1u32..=300,
    ) {
        let podiatry = PodiatryAllowance {
            per_session_cap: per_session.map(BigDecimal::from),
            annual_cap: annual.map(BigDecimal::from),
            max_sessions: None,
            shared_envelope: None,
        };
        let mut plan = Plan::new(BigDecimal::from(rate)).with_podiatry(podiatry);
        if let Some(a) = allowance {
            plan = plan.with_flat_allowance(BigDecimal::from(a));
        }
        let insurer = Insurer::new("Prop").with_plan("P", plan);
        let total_price = BigDecimal::from(total);

        let result = optimize_split(&insurer, "P", &total_price).unwrap();
        prop_assert!(result.optimization_possible);

        let chosen = match result.best_solution {
            BestSolution::TwoInvoices => {
                let split = result.optimal_split.as_ref().unwrap();
                prop_assert!(split.out_of_pocket < result.single_invoice.out_of_pocket);
                prop_assert_eq!(&split.insoles_price + &split.assessment_price, total_price.clone());
                split.out_of_pocket.clone()
            }
            BestSolution::SingleInvoice => {
                prop_assert!(result.optimal_split.is_none());
                prop_assert_eq!(&result.gain, &BigDecimal::zero());
                result.single_invoice.out_of_pocket.clone()
            }
        };
        prop_assert!(chosen <= result.single_invoice.out_of_pocket);

        for step in 1..=total {
            let assessment_price = BigDecimal::from(step);
            let insoles_price = &total_price - &assessment_price;
            let insoles = calculate(&insurer, "P", &insoles_price).unwrap();
            let assessment = calculate_assessment(&insurer, "P", &assessment_price).unwrap();
            let candidate = &insoles.out_of_pocket + &assessment.out_of_pocket;
            prop_assert!(chosen <= candidate, "bilan {} beats chosen {}", step, chosen);
        }
    }
}
