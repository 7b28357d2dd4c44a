use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Form field names as posted to `/intake`
pub mod fields {
    pub const STUDENT_NAME: &str = "student_name";
    pub const STUDENT_EMAIL: &str = "student_email";
    pub const STUDENT_PHONE: &str = "student_phone";
    pub const CITIZENSHIP: &str = "citizenship";
    pub const PARENT_EMAIL: &str = "parent_email";
    pub const PARENT_PHONE: &str = "parent_phone";
    pub const HIGH_SCHOOL: &str = "high_school";
    pub const GRADUATION_YEAR: &str = "graduation_year";
    pub const GPA: &str = "gpa";
    pub const AP_COURSES: &str = "ap_courses";
    pub const PSAT_SCORE: &str = "psat_score";
    pub const SAT_SCORE: &str = "sat_score";
    pub const ACT_SCORE: &str = "act_score";
    pub const ENGLISH_EXAM_TYPE: &str = "english_exam_type";
    pub const ENGLISH_EXAM_SCORE: &str = "english_exam_score";
    pub const DEGREE: &str = "degree";
    pub const COUNTRIES: &str = "countries";
    pub const INTENDED_SCHOOLS: &str = "intended_schools";
    pub const INTENDED_MAJOR: &str = "intended_major";
    pub const MAJOR_REASON: &str = "major_reason";
    pub const BUDGET: &str = "budget";
    pub const TARGET_INTAKE: &str = "target_intake";
    pub const EXTRACURRICULARS: &str = "extracurriculars";
    pub const HOW_DID_YOU_KNOW: &str = "how_did_you_know_pano";

    /// Fields that must be non-empty, in form order
    pub const REQUIRED: &[&str] = &[
        STUDENT_NAME,
        STUDENT_EMAIL,
        CITIZENSHIP,
        HIGH_SCHOOL,
        GRADUATION_YEAR,
        GPA,
        ENGLISH_EXAM_TYPE,
        DEGREE,
        INTENDED_MAJOR,
        MAJOR_REASON,
        BUDGET,
        TARGET_INTAKE,
        EXTRACURRICULARS,
        HOW_DID_YOU_KNOW,
    ];

    /// Fields that may be left blank and are sent as `null`
    pub const OPTIONAL: &[&str] = &[
        STUDENT_PHONE,
        PARENT_EMAIL,
        PARENT_PHONE,
        AP_COURSES,
        PSAT_SCORE,
        SAT_SCORE,
        ACT_SCORE,
        ENGLISH_EXAM_SCORE,
        INTENDED_SCHOOLS,
    ];
}

/// Raw setup-form input before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub values: BTreeMap<String, String>,
    /// Selected country chips in selection order
    #[serde(default)]
    pub countries: Vec<String>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Trimmed value of a field; blank counts as absent
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Flip a country chip between selected and unselected
    pub fn toggle_country(&mut self, code: &str) {
        let code = code.trim();
        if code.is_empty() {
            return;
        }
        if let Some(pos) = self.countries.iter().position(|c| c == code) {
            self.countries.remove(pos);
        } else {
            self.countries.push(code.to_string());
        }
    }

    pub fn with_country(mut self, code: &str) -> Self {
        if !self.countries.iter().any(|c| c == code) {
            self.toggle_country(code);
        }
        self
    }

    /// First required field that is still blank, if any
    pub fn first_missing(&self) -> Option<&'static str> {
        fields::REQUIRED.iter().copied().find(|f| self.get(f).is_none())
    }
}

/// Student intake record, immutable once submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    // Student
    pub student_name: String,
    pub student_email: String,
    pub student_phone: Option<String>,
    pub citizenship: String,

    // Parent contact
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,

    // Academics
    pub high_school: String,
    pub graduation_year: i32,
    pub gpa: f64,
    pub ap_courses: Option<String>,

    // Test scores
    pub psat_score: Option<String>,
    pub sat_score: Option<String>,
    pub act_score: Option<String>,
    pub english_exam_type: String,
    pub english_exam_score: Option<String>,

    // Preferences
    pub degree: String,
    pub countries: Vec<String>,
    pub intended_schools: Option<String>,
    pub intended_major: String,
    pub major_reason: String,
    pub budget: i64,
    pub target_intake: String,

    pub extracurriculars: String,
    pub how_did_you_know_pano: String,
}

impl Profile {
    /// Validate a submitted form and build the record sent to `/intake`
    pub fn from_form(form: &ProfileForm) -> Result<Self, ValidationError> {
        if let Some(field) = form.first_missing() {
            return Err(ValidationError::MissingField(field));
        }
        if form.countries.is_empty() {
            return Err(ValidationError::NoCountrySelected);
        }

        let required = |field: &'static str| -> Result<String, ValidationError> {
            form.get(field)
                .map(str::to_string)
                .ok_or(ValidationError::MissingField(field))
        };
        let optional = |field: &str| form.get(field).map(str::to_string);

        let student_email = required(fields::STUDENT_EMAIL)?;
        check_email(fields::STUDENT_EMAIL, &student_email)?;
        let parent_email = optional(fields::PARENT_EMAIL);
        if let Some(email) = &parent_email {
            check_email(fields::PARENT_EMAIL, email)?;
        }

        let target_intake = required(fields::TARGET_INTAKE)?;
        check_intake(&target_intake)?;

        Ok(Self {
            student_name: required(fields::STUDENT_NAME)?,
            student_email,
            student_phone: optional(fields::STUDENT_PHONE),
            citizenship: required(fields::CITIZENSHIP)?,
            parent_email,
            parent_phone: optional(fields::PARENT_PHONE),
            high_school: required(fields::HIGH_SCHOOL)?,
            graduation_year: parse_number(fields::GRADUATION_YEAR, &required(fields::GRADUATION_YEAR)?)?,
            gpa: parse_gpa(&required(fields::GPA)?)?,
            ap_courses: optional(fields::AP_COURSES),
            psat_score: optional(fields::PSAT_SCORE),
            sat_score: optional(fields::SAT_SCORE),
            act_score: optional(fields::ACT_SCORE),
            english_exam_type: required(fields::ENGLISH_EXAM_TYPE)?,
            english_exam_score: optional(fields::ENGLISH_EXAM_SCORE),
            degree: required(fields::DEGREE)?,
            countries: form.countries.clone(),
            intended_schools: optional(fields::INTENDED_SCHOOLS),
            intended_major: required(fields::INTENDED_MAJOR)?,
            major_reason: required(fields::MAJOR_REASON)?,
            budget: parse_number(fields::BUDGET, &required(fields::BUDGET)?)?,
            target_intake,
            extracurriculars: required(fields::EXTRACURRICULARS)?,
            how_did_you_know_pano: required(fields::HOW_DID_YOU_KNOW)?,
        })
    }
}

/// Intake month twelve months after `today`, as `YYYY-MM`
pub fn default_target_intake(today: NaiveDate) -> String {
    format!("{:04}-{:02}", today.year() + 1, today.month())
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ValidationError> {
    value.parse::<T>().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_gpa(value: &str) -> Result<f64, ValidationError> {
    let gpa: f64 = parse_number(fields::GPA, value)?;
    if gpa.is_finite() && gpa >= 0.0 {
        Ok(gpa)
    } else {
        Err(ValidationError::InvalidNumber {
            field: fields::GPA,
            value: value.to_string(),
        })
    }
}

fn check_email(field: &'static str, email: &str) -> Result<(), ValidationError> {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid e-mail pattern")
    });
    if re.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail { field })
    }
}

fn check_intake(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidIntake(value.to_string()))
}
