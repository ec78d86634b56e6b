//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and the structures that
//! capture every intermediate amount of a payslip computation, together with
//! an audit trace explaining each step.
//!
//! Payslips are legal documents, so a result holds no timestamp, random
//! identifier or timing data: two computations over the same inputs compare
//! equal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One monetized overtime rubrique.
///
/// # Example
///
/// ```
/// use paie_engine::models::OvertimeLine;
/// use rust_decimal::Decimal;
///
/// let line = OvertimeLine {
///     rubrique_id: "HS50".to_string(),
///     hours: Decimal::new(10, 0),
///     multiplier: Decimal::new(15, 1),
///     amount: Decimal::new(346161, 2),
/// };
/// assert_eq!(line.rubrique_id, "HS50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeLine {
    /// The overtime rubrique (HS50, HS75, HS100).
    pub rubrique_id: String,
    /// Hours worked at this multiplier.
    pub hours: Decimal,
    /// Multiplier applied to the hourly rate.
    pub multiplier: Decimal,
    /// hours × hourly rate × multiplier.
    pub amount: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning raised while resolving inputs.
///
/// Warnings never stop a computation; they explain why a result may be
/// degraded (for instance an unparseable period that made the engine
/// ignore all attendance records).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The complete audit trace for a computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated while resolving inputs.
    pub warnings: Vec<AuditWarning>,
}

/// The result of computing one employee's payslip for one month.
///
/// Field names follow the payslip vocabulary: `salaire_poste` is the
/// cotisable gross, `base_imposable` the IRG base before rounding, and
/// `gains_totaux` the gross including the absence deduction added back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The employee the payslip is for (empty for the zero employee).
    pub employee_id: String,
    /// "First Last" as printed on the payslip.
    #[serde(default)]
    pub employee_name: String,
    /// The period string the computation was requested for.
    pub period: String,

    /// Daily rate used for absence deductions.
    pub taux_journalier: Decimal,
    /// Number of absent days in the month.
    pub jours_absents: u32,
    /// Absent days × daily rate.
    pub montant_retenue_absence: Decimal,
    /// Base salary after the absence deduction, never negative.
    pub salaire_base_reel: Decimal,
    /// Whether any absence or late arrival was recorded.
    pub has_penalty: bool,
    /// Presence bonus actually paid.
    pub real_bonus: Decimal,

    /// Hourly rate used for overtime.
    pub taux_horaire: Decimal,
    /// Monetized overtime lines.
    pub overtime_lines: Vec<OvertimeLine>,
    /// Sum of the overtime lines.
    pub total_primes_hs: Decimal,

    /// Cotisable rubriques, overtime excluded.
    pub primes_cotisables: Decimal,
    /// Cotisable gross: CNAS base.
    pub salaire_poste: Decimal,
    /// Employee CNAS contribution.
    pub cnas: Decimal,
    /// Non-cotisable but imposable rubriques.
    pub primes_imposables: Decimal,
    /// IRG base before rounding.
    pub base_imposable: Decimal,
    /// IRG base rounded down to the nearest ten.
    pub base_imposable_arrondie: Decimal,
    /// Income tax withheld.
    pub irg: Decimal,
    /// Rubriques that are neither cotisable nor imposable.
    pub primes_net: Decimal,

    /// Approved loan installments.
    pub retenues_prets: Decimal,
    /// Manual deduction rubriques.
    pub autres_retenues: Decimal,
    /// cnas + irg + loans + other deductions.
    pub total_retenues: Decimal,

    /// Gross for display, with the absence deduction added back.
    pub gains_totaux: Decimal,
    /// Net payable.
    pub net: Decimal,

    /// Audit trace of every rule applied.
    pub audit_trace: AuditTrace,
}
