//! IRG (income tax on salaries) calculation.
//!
//! ## Schedule
//!
//! The taxable base is first rounded down to the nearest 10 DZD. Then, for
//! taxable employees with a rounded base above 30 000:
//!
//! - up to 35 000: `(base - 30 000) × 8/3`
//! - above 35 000: `4 000 + 30% × (min(base, 120 000) - 30 000) + 35% × (base - 120 000)⁺`
//!
//! An abatement of 40% of that gross tax, clamped to `[1 000, 1 500]`, is
//! subtracted. Strictly between 30 000 and 35 000 the result is then
//! replaced by `(base - 30 000) × 0.5`. The final tax is floored to a whole
//! dinar.
//!
//! The replacement inside the lower band contradicts the `8/3` formula
//! applied to the same range just before. Both are kept as-is.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::IrgSchedule;
use crate::models::AuditStep;

/// Which branch of the schedule produced the tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrgBracket {
    /// Employee is not subject to IRG.
    NotTaxable,
    /// Rounded base at or below the exemption threshold.
    Exempt,
    /// Strictly inside the lower band: transitional override applied.
    Transitional,
    /// Exactly at the lower band ceiling: `8/3` formula with abatement.
    LowerBand,
    /// Above the lower band ceiling: progressive formula with abatement.
    Progressive,
}

/// The result of the IRG calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrgResult {
    /// Taxable base rounded down to the rounding step.
    pub rounded_base: Decimal,
    /// Tax before abatement (zero when not computed).
    pub gross_tax: Decimal,
    /// Abatement applied (zero when not computed).
    pub abatement: Decimal,
    /// Final tax withheld, whole dinars.
    pub irg: Decimal,
    /// Branch taken.
    pub bracket: IrgBracket,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Rounds a taxable base down to a multiple of `step`.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::round_taxable_base;
/// use rust_decimal::Decimal;
///
/// let rounded = round_taxable_base(Decimal::new(4550099, 2), Decimal::from(10));
/// assert_eq!(rounded, Decimal::from(45500));
/// ```
pub fn round_taxable_base(base: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return base.floor();
    }
    (base / step).floor() * step
}

/// Computes the gross tax before abatement for a rounded base above the
/// exemption threshold.
fn gross_tax(base: Decimal, schedule: &IrgSchedule) -> Decimal {
    if base <= schedule.lower_band_ceiling {
        return (base - schedule.exemption_threshold) * schedule.lower_band_numerator
            / schedule.lower_band_denominator;
    }

    let middle = base.min(schedule.upper_threshold) - schedule.exemption_threshold;
    let upper = (base - schedule.upper_threshold).max(Decimal::ZERO);

    schedule.crossing_amount + middle * schedule.middle_rate + upper * schedule.upper_rate
}

/// Computes the IRG withheld on a taxable base.
///
/// # Arguments
///
/// * `taxable_base` - The IRG base before rounding
/// * `is_taxable` - Whether the employee is subject to IRG
/// * `schedule` - The IRG schedule
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::{IrgBracket, calculate_irg};
/// use paie_engine::config::StatutoryRates;
/// use rust_decimal::Decimal;
///
/// let schedule = StatutoryRates::default().irg;
///
/// // 4000 + 30% × 15500 = 8650, abatement capped at 1500
/// let result = calculate_irg(Decimal::from(45500), true, &schedule, 1);
/// assert_eq!(result.irg, Decimal::from(7150));
/// assert_eq!(result.bracket, IrgBracket::Progressive);
///
/// let exempt = calculate_irg(Decimal::from(30009), true, &schedule, 1);
/// assert_eq!(exempt.irg, Decimal::ZERO);
/// ```
pub fn calculate_irg(
    taxable_base: Decimal,
    is_taxable: bool,
    schedule: &IrgSchedule,
    step_number: u32,
) -> IrgResult {
    let rounded_base = round_taxable_base(taxable_base, schedule.rounding_step);

    let (bracket, gross, abatement, irg) = if !is_taxable {
        (IrgBracket::NotTaxable, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    } else if rounded_base <= schedule.exemption_threshold {
        (IrgBracket::Exempt, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    } else {
        let gross = gross_tax(rounded_base, schedule);
        let abatement = (gross * schedule.abatement_rate)
            .max(schedule.abatement_min)
            .min(schedule.abatement_max);
        let after_abatement = (gross - abatement).max(Decimal::ZERO);

        if rounded_base < schedule.lower_band_ceiling {
            let transitional =
                (rounded_base - schedule.exemption_threshold) * schedule.transitional_rate;
            (IrgBracket::Transitional, gross, abatement, transitional.floor())
        } else if rounded_base == schedule.lower_band_ceiling {
            (IrgBracket::LowerBand, gross, abatement, after_abatement.floor())
        } else {
            (IrgBracket::Progressive, gross, abatement, after_abatement.floor())
        }
    };

    let reasoning = match bracket {
        IrgBracket::NotTaxable => "Employee is not subject to IRG".to_string(),
        IrgBracket::Exempt => format!(
            "Rounded base {} is at or below the {} exemption threshold",
            rounded_base.normalize(),
            schedule.exemption_threshold.normalize()
        ),
        IrgBracket::Transitional => format!(
            "Rounded base {} inside ({}, {}): IRG replaced by ({} - {}) × {} = {}",
            rounded_base.normalize(),
            schedule.exemption_threshold.normalize(),
            schedule.lower_band_ceiling.normalize(),
            rounded_base.normalize(),
            schedule.exemption_threshold.normalize(),
            schedule.transitional_rate.normalize(),
            irg.normalize()
        ),
        IrgBracket::LowerBand | IrgBracket::Progressive => format!(
            "Gross IRG {} on rounded base {}, abatement {}: IRG {}",
            gross.round_dp(2).normalize(),
            rounded_base.normalize(),
            abatement.round_dp(2).normalize(),
            irg.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "irg".to_string(),
        rule_name: "IRG Withholding".to_string(),
        input: serde_json::json!({
            "taxable_base": taxable_base.normalize().to_string(),
            "is_taxable": is_taxable
        }),
        output: serde_json::json!({
            "rounded_base": rounded_base.normalize().to_string(),
            "bracket": bracket,
            "gross_tax": gross.normalize().to_string(),
            "abatement": abatement.normalize().to_string(),
            "irg": irg.normalize().to_string()
        }),
        reasoning,
    };

    IrgResult {
        rounded_base,
        gross_tax: gross,
        abatement,
        irg,
        bracket,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatutoryRates;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn schedule() -> IrgSchedule {
        StatutoryRates::default().irg
    }

    fn irg(base: &str) -> IrgResult {
        calculate_irg(dec(base), true, &schedule(), 1)
    }

    #[test]
    fn test_rounding_down_to_ten() {
        assert_eq!(round_taxable_base(dec("45509.99"), dec("10")), dec("45500"));
        assert_eq!(round_taxable_base(dec("45510"), dec("10")), dec("45510"));
        assert_eq!(round_taxable_base(dec("9.99"), dec("10")), Decimal::ZERO);
    }

    #[test]
    fn test_not_taxable_pays_nothing() {
        let result = calculate_irg(dec("200000"), false, &schedule(), 1);
        assert_eq!(result.irg, Decimal::ZERO);
        assert_eq!(result.bracket, IrgBracket::NotTaxable);
    }

    #[test]
    fn test_exemption_threshold_inclusive() {
        let result = irg("30000");
        assert_eq!(result.irg, Decimal::ZERO);
        assert_eq!(result.bracket, IrgBracket::Exempt);
    }

    #[test]
    fn test_rounding_applies_before_exemption_check() {
        // 30009.99 rounds down to 30000: exempt
        let result = irg("30009.99");
        assert_eq!(result.rounded_base, dec("30000"));
        assert_eq!(result.irg, Decimal::ZERO);
    }

    #[test]
    fn test_transitional_override_replaces_lower_band_formula() {
        // (32000 - 30000) × 0.5 = 1000, not (2000 × 8/3 - 1066.67)
        let result = irg("32000");
        assert_eq!(result.bracket, IrgBracket::Transitional);
        assert_eq!(result.irg, dec("1000"));
        assert_eq!(result.gross_tax.round_dp(2), dec("5333.33"));
    }

    #[test]
    fn test_transitional_just_above_threshold() {
        let result = irg("30010");
        assert_eq!(result.irg, dec("5"));
    }

    #[test]
    fn test_transitional_just_below_ceiling() {
        let result = irg("34990");
        assert_eq!(result.irg, dec("2495"));
    }

    #[test]
    fn test_lower_band_ceiling_uses_eight_thirds() {
        // 5000 × 8/3 = 13333.33, abatement capped at 1500 → 11833
        let result = irg("35000");
        assert_eq!(result.bracket, IrgBracket::LowerBand);
        assert_eq!(result.abatement, dec("1500"));
        assert_eq!(result.irg, dec("11833"));
    }

    #[test]
    fn test_progressive_scenario_45500() {
        let result = irg("45500");
        assert_eq!(result.gross_tax, dec("8650"));
        assert_eq!(result.abatement, dec("1500"));
        assert_eq!(result.irg, dec("7150"));
    }

    #[test]
    fn test_progressive_just_above_ceiling() {
        // 4000 + 30% × 5010 = 5503, abatement capped at 1500
        let result = irg("35010");
        assert_eq!(result.bracket, IrgBracket::Progressive);
        assert_eq!(result.gross_tax, dec("5503"));
        assert_eq!(result.irg, dec("4003"));
    }

    #[test]
    fn test_top_band() {
        // 4000 + 30% × 90000 + 35% × 30000 = 41500, abatement 1500
        let result = irg("150000");
        assert_eq!(result.gross_tax, dec("41500"));
        assert_eq!(result.irg, dec("40000"));
    }

    #[test]
    fn test_result_is_floored() {
        let mut schedule = schedule();
        schedule.rounding_step = Decimal::ONE;
        // 4000 + 30% × 5011 = 5503.3, minus 1500 = 4003.3
        let result = calculate_irg(dec("35011"), true, &schedule, 1);
        assert_eq!(result.irg, dec("4003"));
    }

    #[test]
    fn test_abatement_minimum_applies() {
        let mut schedule = schedule();
        schedule.crossing_amount = Decimal::ZERO;
        // gross = 30% × 6000 = 1800, 40% = 720 → clamped up to 1000
        let result = calculate_irg(dec("36000"), true, &schedule, 1);
        assert_eq!(result.gross_tax, dec("1800"));
        assert_eq!(result.abatement, dec("1000"));
        assert_eq!(result.irg, dec("800"));
    }

    #[test]
    fn test_tax_never_negative() {
        let mut schedule = schedule();
        schedule.crossing_amount = Decimal::ZERO;
        schedule.middle_rate = dec("0.01");
        let result = calculate_irg(dec("40000"), true, &schedule, 1);
        assert_eq!(result.irg, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_records_bracket() {
        let result = irg("45500");
        assert_eq!(result.audit_step.rule_id, "irg");
        assert_eq!(result.audit_step.output["bracket"], "progressive");
        assert_eq!(result.audit_step.output["irg"], "7150");
    }
}
