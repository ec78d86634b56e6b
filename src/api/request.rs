//! Request types for the payroll API.
//!
//! Employee rubriques are sent as catalog references (`{id, value}`); the
//! labels and payroll flags always come from the server's catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{OvertimeConfig, RubriqueCatalog};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Employee, Loan};

/// Request body for `POST /payroll/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The employee to pay.
    pub employee: EmployeeRequest,
    /// Attendance records; entries for other employees or months are ignored.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// The period, `YYYY-MM`.
    pub period: String,
}

/// Request body for `POST /payroll/batch` and `POST /declarations/g50`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// The employees to pay.
    pub employees: Vec<EmployeeRequest>,
    /// Attendance records for all employees.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// The period, `YYYY-MM`.
    pub period: String,
}

/// Employee information in a payroll request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Maximum monthly presence bonus.
    #[serde(default)]
    pub presence_bonus: Decimal,
    /// Whether the employee is declared to CNAS.
    #[serde(default = "default_true")]
    pub is_socially_insured: bool,
    /// Whether IRG is withheld.
    #[serde(default = "default_true")]
    pub is_taxable: bool,
    /// Rubriques by catalog id.
    #[serde(default)]
    pub rubriques: Vec<RubriqueRequest>,
    /// Loans granted to the employee.
    #[serde(default)]
    pub loans: Vec<Loan>,
}

fn default_true() -> bool {
    true
}

/// A rubrique reference in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RubriqueRequest {
    /// Catalog id (e.g., "IEP", "HS50").
    pub id: String,
    /// Amount, or hours for overtime rubriques.
    pub value: Decimal,
}

/// Largest amount accepted for any salary, rubrique value or loan figure.
///
/// Keeps every product and sum the engine forms well inside `Decimal`'s range.
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Largest overtime hour count accepted for one rubrique (hours in a 31-day month).
pub const MAX_OVERTIME_HOURS: i64 = 744;

impl EmployeeRequest {
    /// Resolves the request against the catalog.
    ///
    /// Overtime rubriques in `overtime` hold hours rather than amounts.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidEmployee`] for an empty id, or an amount that
    ///   is negative or above [`MAX_AMOUNT`] ([`MAX_OVERTIME_HOURS`] for hours)
    /// - [`EngineError::RubriqueNotFound`] for an id missing from the catalog
    pub fn into_employee(
        self,
        catalog: &RubriqueCatalog,
        overtime: &OvertimeConfig,
    ) -> EngineResult<Employee> {
        if self.id.trim().is_empty() {
            return Err(invalid_employee("id", "must not be empty"));
        }
        check_amount("base_salary", self.base_salary, MAX_AMOUNT)?;
        check_amount("presence_bonus", self.presence_bonus, MAX_AMOUNT)?;

        for (i, rubrique) in self.rubriques.iter().enumerate() {
            let max = if overtime.is_overtime(&rubrique.id) {
                MAX_OVERTIME_HOURS
            } else {
                MAX_AMOUNT
            };
            check_amount(&format!("rubriques[{}].value", i), rubrique.value, max)?;
        }
        for (i, loan) in self.loans.iter().enumerate() {
            check_amount(&format!("loans[{}].amount", i), loan.amount, MAX_AMOUNT)?;
            check_amount(
                &format!("loans[{}].monthly_payment", i),
                loan.monthly_payment,
                MAX_AMOUNT,
            )?;
        }

        let rubriques = self
            .rubriques
            .into_iter()
            .map(|r| catalog.instantiate(&r.id, r.value))
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Employee {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            position: self.position,
            base_salary: self.base_salary,
            presence_bonus: self.presence_bonus,
            is_socially_insured: self.is_socially_insured,
            is_taxable: self.is_taxable,
            rubriques,
            loans: self.loans,
        })
    }
}

fn check_amount(field: &str, value: Decimal, max: i64) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid_employee(field, "must not be negative"));
    }
    if value > Decimal::from(max) {
        return Err(invalid_employee(field, &format!("must not exceed {}", max)));
    }
    Ok(())
}

fn invalid_employee(field: &str, message: &str) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RubriqueDefinition, StatutoryRates};
    use crate::models::{AttendanceStatus, RubriqueType};

    fn catalog() -> RubriqueCatalog {
        RubriqueCatalog {
            rubriques: vec![RubriqueDefinition {
                id: "PANIER".to_string(),
                label: "Prime de panier".to_string(),
                is_cotisable: false,
                is_imposable: true,
                rubrique_type: RubriqueType::Fixed,
                is_deduction: false,
            }],
        }
    }

    fn overtime() -> OvertimeConfig {
        StatutoryRates::default().overtime
    }

    fn employee_request(json: &str) -> EmployeeRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_deserialize_payroll_request() {
        let json = r#"{
            "employee": {
                "id": "emp_001",
                "base_salary": "50000",
                "rubriques": [{"id": "PANIER", "value": "3000"}]
            },
            "attendance": [
                {"employee_id": "emp_001", "date": "2025-03-04", "status": "absent"}
            ],
            "period": "2025-03"
        }"#;

        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee.id, "emp_001");
        assert!(request.employee.is_socially_insured);
        assert!(request.employee.is_taxable);
        assert_eq!(request.attendance[0].status, AttendanceStatus::Absent);
        assert_eq!(request.period, "2025-03");
    }

    #[test]
    fn test_attendance_defaults_to_empty() {
        let json = r#"{"employees": [], "period": "2025-03"}"#;
        let request: BatchRequest = serde_json::from_str(json).unwrap();
        assert!(request.attendance.is_empty());
    }

    #[test]
    fn test_employee_conversion_copies_catalog_flags() {
        let request = EmployeeRequest {
            id: "emp_001".to_string(),
            first_name: "Amina".to_string(),
            last_name: "Belkacem".to_string(),
            position: String::new(),
            base_salary: Decimal::from(50000),
            presence_bonus: Decimal::ZERO,
            is_socially_insured: true,
            is_taxable: false,
            rubriques: vec![RubriqueRequest {
                id: "PANIER".to_string(),
                value: Decimal::from(3000),
            }],
            loans: vec![],
        };

        let employee = request.into_employee(&catalog(), &overtime()).unwrap();
        assert_eq!(employee.rubriques[0].label, "Prime de panier");
        assert!(employee.rubriques[0].is_imposable);
        assert!(!employee.rubriques[0].is_cotisable);
        assert!(!employee.is_taxable);
    }

    #[test]
    fn test_unknown_rubrique_rejected() {
        let json = r#"{"id": "emp_001", "base_salary": "1", "rubriques": [{"id": "NOPE", "value": "1"}]}"#;
        let request: EmployeeRequest = serde_json::from_str(json).unwrap();

        let err = request.into_employee(&catalog(), &overtime()).unwrap_err();
        assert!(matches!(err, EngineError::RubriqueNotFound { id } if id == "NOPE"));
    }

    #[test]
    fn test_negative_salary_rejected() {
        let json = r#"{"id": "emp_001", "base_salary": "-1"}"#;
        let request: EmployeeRequest = serde_json::from_str(json).unwrap();

        let err = request.into_employee(&catalog(), &overtime()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidEmployee { field, .. } if field == "base_salary"));
    }

    #[test]
    fn test_amount_above_limit_rejected() {
        let request = employee_request(
            r#"{"id": "emp_001", "base_salary": "50000000000000000000000000000", "presence_bonus": "1"}"#,
        );

        let err = request.into_employee(&catalog(), &overtime()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidEmployee { field, .. } if field == "base_salary"));
    }

    #[test]
    fn test_amount_at_limit_accepted() {
        let request = employee_request(
            r#"{"id": "emp_001", "base_salary": "1000000000", "presence_bonus": "1000000000"}"#,
        );

        let employee = request.into_employee(&catalog(), &overtime()).unwrap();
        assert_eq!(employee.base_salary, Decimal::from(MAX_AMOUNT));
    }

    #[test]
    fn test_oversized_rubrique_and_loan_rejected() {
        let rubrique = employee_request(
            r#"{"id": "emp_001", "base_salary": "1", "rubriques": [{"id": "PANIER", "value": "1000000001"}]}"#,
        );
        let err = rubrique.into_employee(&catalog(), &overtime()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidEmployee { field, .. } if field == "rubriques[0].value"));

        let loan = employee_request(
            r#"{"id": "emp_001", "base_salary": "1", "loans": [{
                "id": "L1", "amount": "10000", "monthly_payment": "2000000000",
                "date": "2025-01-01", "status": "approved"
            }]}"#,
        );
        let err = loan.into_employee(&catalog(), &overtime()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidEmployee { field, .. } if field == "loans[0].monthly_payment"));
    }

    #[test]
    fn test_overtime_hours_capped_per_month() {
        let request = employee_request(
            r#"{"id": "emp_001", "base_salary": "1", "rubriques": [{"id": "HS50", "value": "745"}]}"#,
        );

        // checked before the catalog lookup, so HS50 need not be in this catalog
        let err = request.into_employee(&catalog(), &overtime()).unwrap_err();
        match err {
            EngineError::InvalidEmployee { field, message } => {
                assert_eq!(field, "rubriques[0].value");
                assert_eq!(message, "must not exceed 744");
            }
            other => panic!("Expected InvalidEmployee, got {:?}", other),
        }
    }
}
