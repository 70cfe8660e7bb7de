//! Service catalog: the registry of verification check definitions.
//!
//! The catalog is read-only configuration fixed at startup. Lookups never
//! fail hard: a selected id that is no longer in the catalog is treated as
//! a skip by every caller, so a stale selection cannot crash a dispatch
//! loop.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Category of a verification check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Employment,
    Gstin,
    Vehicle,
    Financial,
    Healthcare,
    Education,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Employment => "employment",
            Category::Gstin => "gstin",
            Category::Vehicle => "vehicle",
            Category::Financial => "financial",
            Category::Healthcare => "healthcare",
            Category::Education => "education",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employment" => Ok(Category::Employment),
            "gstin" => Ok(Category::Gstin),
            "vehicle" => Ok(Category::Vehicle),
            "financial" => Ok(Category::Financial),
            "healthcare" => Ok(Category::Healthcare),
            "education" => Ok(Category::Education),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// One verification check: what it is called and which raw fields its
/// downstream payload requires.
///
/// `raw_fields` is ordered and includes the system-injected identity
/// fields; those are filtered out of every operator-facing projection and
/// populated from fixed constants at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDefinition {
    pub id: String,
    pub category: Category,
    pub display_name: String,
    pub description: String,
    pub raw_fields: Vec<String>,
}

/// Ordered, id-unique collection of check definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    checks: Vec<CheckDefinition>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(checks: Vec<CheckDefinition>) -> Result<Self, CoreError> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for check in &checks {
            if !seen.insert(check.id.as_str()) {
                return Err(CoreError::DuplicateCheckId {
                    id: check.id.clone(),
                });
            }
        }
        Ok(Self { checks })
    }

    /// The built-in catalog of downstream provider checks.
    pub fn builtin() -> Self {
        Self {
            checks: builtin_checks(),
        }
    }

    pub fn list(&self) -> &[CheckDefinition] {
        &self.checks
    }

    pub fn find(&self, id: &str) -> Option<&CheckDefinition> {
        self.checks.iter().find(|check| check.id == id)
    }

    /// Filter by category and/or a case-insensitive substring over name,
    /// description, and category. `None` means no constraint.
    pub fn filter(&self, category: Option<Category>, query: Option<&str>) -> Vec<&CheckDefinition> {
        let needle = query.map(str::to_lowercase);
        self.checks
            .iter()
            .filter(|check| category.is_none_or(|wanted| check.category == wanted))
            .filter(|check| {
                let Some(needle) = needle.as_deref() else {
                    return true;
                };
                check.display_name.to_lowercase().contains(needle)
                    || check.description.to_lowercase().contains(needle)
                    || check.category.as_str().contains(needle)
            })
            .collect()
    }
}

fn check(
    id: &str,
    category: Category,
    display_name: &str,
    description: &str,
    raw_fields: &[&str],
) -> CheckDefinition {
    CheckDefinition {
        id: id.to_string(),
        category,
        display_name: display_name.to_string(),
        description: description.to_string(),
        raw_fields: raw_fields.iter().map(|field| field.to_string()).collect(),
    }
}

fn builtin_checks() -> Vec<CheckDefinition> {
    use Category::*;
    vec![
        check(
            "pan",
            Employment,
            "PAN Verification",
            "Verify PAN card details",
            &["pan_number", "name", "dob", "initiator_id", "user_code"],
        ),
        check(
            "aadhaar",
            Employment,
            "Aadhaar Verification",
            "Verify Aadhaar card details",
            &["aadhaar_number", "name", "initiator_id", "user_code"],
        ),
        check(
            "bank-account",
            Employment,
            "Bank Account Verification",
            "Verify bank account details",
            &["account_number", "ifsc_code", "name", "initiator_id", "user_code"],
        ),
        check(
            "mobile-otp",
            Employment,
            "Mobile OTP Verification",
            "Send OTP to mobile number",
            &["mobile_number", "initiator_id", "user_code"],
        ),
        check(
            "digilocker",
            Employment,
            "Digilocker Access",
            "Access Digilocker documents",
            &["digilocker_id", "initiator_id", "user_code"],
        ),
        check(
            "voter-id",
            Employment,
            "Voter ID Verification",
            "Verify voter ID details",
            &["voter_id", "name", "initiator_id", "user_code"],
        ),
        check(
            "passport",
            Employment,
            "Passport Verification",
            "Verify passport details",
            &["passport_number", "name", "initiator_id", "user_code"],
        ),
        check(
            "employee-details",
            Employment,
            "Employee Verification",
            "Verify employee details",
            &["employee_id", "company_name", "initiator_id", "user_code"],
        ),
        check(
            "name-match",
            Employment,
            "Name Matching",
            "Match names across documents",
            &["name1", "name2", "initiator_id", "user_code"],
        ),
        check(
            "gstin",
            Gstin,
            "GSTIN Verification",
            "Verify GSTIN registration",
            &["gstin_number", "business_name", "initiator_id", "user_code"],
        ),
        check(
            "vehicle-rc",
            Vehicle,
            "Vehicle RC Verification",
            "Verify vehicle registration certificate",
            &["registration_number", "owner_name", "initiator_id", "user_code"],
        ),
        check(
            "driving-licence",
            Vehicle,
            "Driving Licence Verification",
            "Verify driving licence details",
            &["licence_number", "holder_name", "date_of_birth", "initiator_id", "user_code"],
        ),
        check(
            "credit-score",
            Financial,
            "Credit Score Check",
            "Check credit score and history",
            &["pan_number", "mobile_number", "initiator_id", "user_code"],
        ),
        check(
            "bank-statement",
            Financial,
            "Bank Statement Analysis",
            "Analyze bank statement",
            &["account_number", "bank_name", "statement_period", "initiator_id", "user_code"],
        ),
        check(
            "income-verification",
            Financial,
            "Income Verification",
            "Verify income details",
            &["pan_number", "employer_name", "salary_account", "initiator_id", "user_code"],
        ),
        check(
            "loan-eligibility",
            Financial,
            "Loan Eligibility Check",
            "Check loan eligibility",
            &["pan_number", "monthly_income", "loan_amount", "initiator_id", "user_code"],
        ),
        check(
            "medical-license",
            Healthcare,
            "Medical License Verification",
            "Verify medical practitioner license",
            &["license_number", "doctor_name", "specialization", "initiator_id", "user_code"],
        ),
        check(
            "insurance-policy",
            Healthcare,
            "Insurance Policy Verification",
            "Verify insurance policy details",
            &["policy_number", "insurer_name", "policy_holder", "initiator_id", "user_code"],
        ),
        check(
            "pharmacy-license",
            Healthcare,
            "Pharmacy License Verification",
            "Verify pharmacy license",
            &["license_number", "pharmacy_name", "permit_type", "initiator_id", "user_code"],
        ),
        check(
            "degree-verification",
            Education,
            "Degree Verification",
            "Verify educational degrees",
            &[
                "degree_number",
                "university_name",
                "student_name",
                "graduation_year",
                "initiator_id",
                "user_code",
            ],
        ),
        check(
            "professional-certification",
            Education,
            "Professional Certification",
            "Verify professional certifications",
            &["certificate_number", "certifying_body", "certificate_holder", "initiator_id", "user_code"],
        ),
        check(
            "regulatory-compliance",
            Education,
            "Regulatory Compliance Check",
            "Check regulatory compliance",
            &[
                "license_number",
                "regulatory_body",
                "license_holder",
                "license_type",
                "initiator_id",
                "user_code",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_passes_validation() {
        let catalog = Catalog::new(builtin_checks()).expect("builtin ids should be unique");
        assert_eq!(catalog.list().len(), 22);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut checks = builtin_checks();
        checks.push(checks[0].clone());
        let err = Catalog::new(checks).expect_err("duplicate id should be rejected");
        assert!(matches!(err, CoreError::DuplicateCheckId { ref id } if id == "pan"));
    }

    #[test]
    fn find_miss_is_none_not_panic() {
        let catalog = Catalog::builtin();
        assert!(catalog.find("no-such-check").is_none());
        assert_eq!(catalog.find("pan").map(|c| c.display_name.as_str()), Some("PAN Verification"));
    }

    #[test]
    fn filter_by_category_and_query() {
        let catalog = Catalog::builtin();
        let vehicle = catalog.filter(Some(Category::Vehicle), None);
        assert_eq!(
            vehicle.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["vehicle-rc", "driving-licence"]
        );

        let licence = catalog.filter(None, Some("LICENSE"));
        assert!(licence.iter().any(|c| c.id == "medical-license"));
        assert!(!licence.iter().any(|c| c.id == "pan"));

        let both = catalog.filter(Some(Category::Healthcare), Some("pharmacy"));
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, "pharmacy-license");
    }

    #[test]
    fn category_round_trips_through_str() {
        for category in [
            Category::Employment,
            Category::Gstin,
            Category::Vehicle,
            Category::Financial,
            Category::Healthcare,
            Category::Education,
        ] {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("payments".parse::<Category>().is_err());
    }
}
