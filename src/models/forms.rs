//! Typed form state for create/update screens.
//!
//! Each resource kind has its own form struct; [`ResourceForm`] tags them by
//! kind. Forms are validated at the submission boundary, before any request
//! reaches the backend.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::models::ResourceKind;

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9][0-9 ()-]{5,19}$").expect("phone pattern is valid")
});

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid"));

/// Whether a form is submitted to create a new row or to update an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

fn validate_date(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<jiff::civil::Date>()
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("date").with_message("must be a date in YYYY-MM-DD format".into())
        })
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("is required".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VacancyStatus {
    Draft,
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_salary_range", skip_on_field_errors = false))]
pub struct VacancyForm {
    #[validate(length(min = 1, max = 150), custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(range(min = 1, message = "must reference a company"))]
    pub company_id: u64,
    pub category_id: Option<u64>,
    #[validate(length(max = 120))]
    pub location: Option<String>,
    pub salary_from: Option<u32>,
    pub salary_to: Option<u32>,
    #[validate(custom(function = "validate_date"))]
    pub deadline: Option<String>,
    pub status: Option<VacancyStatus>,
}

fn validate_salary_range(form: &VacancyForm) -> Result<(), ValidationError> {
    if let (Some(from), Some(to)) = (form.salary_from, form.salary_to)
        && from > to
    {
        return Err(ValidationError::new("salary_range")
            .with_message("salary from must not exceed salary to".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Applied,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    #[validate(range(min = 1, message = "must reference a vacancy"))]
    pub vacancy_id: u64,
    #[validate(range(min = 1, message = "must reference a candidate"))]
    pub candidate_id: u64,
    pub status: ApplicationStatus,
    #[validate(length(max = 5000))]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CandidateForm {
    #[validate(length(min = 1, max = 120), custom(function = "not_blank"))]
    pub full_name: String,
    #[validate(email(message = "must be a valid e-mail"))]
    pub email: String,
    #[validate(regex(path = *PHONE_RE, message = "must be a valid phone number"))]
    pub phone: Option<String>,
    pub city: Option<String>,
    #[validate(custom(function = "validate_date"))]
    pub birth_date: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForm {
    #[validate(length(min = 1, max = 150), custom(function = "not_blank"))]
    pub name: String,
    #[validate(email(message = "must be a valid e-mail"))]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "must be a valid phone number"))]
    pub phone: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub website: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlogForm {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    pub category_id: Option<u64>,
    #[serde(default)]
    pub tag_ids: Vec<u64>,
    #[serde(default)]
    pub published: bool,
}

/// Shared by blog categories and blog tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyForm {
    #[validate(length(min = 1, max = 80), custom(function = "not_blank"))]
    pub name: String,
    #[validate(regex(path = *SLUG_RE, message = "must be lowercase words joined by '-'"))]
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentaryForm {
    #[validate(range(min = 1, message = "must reference a blog"))]
    pub blog_id: u64,
    #[validate(length(min = 1, max = 80))]
    pub author: String,
    #[validate(length(min = 1, max = 2000), custom(function = "not_blank"))]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    #[validate(length(min = 1, max = 80), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Recruiter,
    Editor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_password_confirmation"))]
pub struct UserForm {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email(message = "must be a valid e-mail"))]
    pub email: String,
    pub role: UserRole,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: Option<String>,
    /// Only compared against `password`, never sent.
    #[serde(default, skip_serializing)]
    pub confirm_password: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

fn validate_password_confirmation(form: &UserForm) -> Result<(), ValidationError> {
    if form.password.is_some() && form.password != form.confirm_password {
        return Err(ValidationError::new("password_mismatch")
            .with_message("passwords do not match".into()));
    }
    Ok(())
}

/// A typed, per-kind form.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceForm {
    Vacancy(VacancyForm),
    Application(ApplicationForm),
    Candidate(CandidateForm),
    Company(CompanyForm),
    Blog(BlogForm),
    BlogCategory(TaxonomyForm),
    BlogTag(TaxonomyForm),
    Commentary(CommentaryForm),
    Category(CategoryForm),
    User(UserForm),
}

impl ResourceForm {
    /// Decode a raw JSON object into the form of `kind`.
    pub fn parse(kind: ResourceKind, value: Value) -> AppResult<Self> {
        let form = match kind {
            ResourceKind::Vacancies => ResourceForm::Vacancy(serde_json::from_value(value)?),
            ResourceKind::Applications => ResourceForm::Application(serde_json::from_value(value)?),
            ResourceKind::Candidates => ResourceForm::Candidate(serde_json::from_value(value)?),
            ResourceKind::Companies => ResourceForm::Company(serde_json::from_value(value)?),
            ResourceKind::Blogs => ResourceForm::Blog(serde_json::from_value(value)?),
            ResourceKind::BlogCategories => {
                ResourceForm::BlogCategory(serde_json::from_value(value)?)
            }
            ResourceKind::BlogTags => ResourceForm::BlogTag(serde_json::from_value(value)?),
            ResourceKind::Commentaries => ResourceForm::Commentary(serde_json::from_value(value)?),
            ResourceKind::Categories => ResourceForm::Category(serde_json::from_value(value)?),
            ResourceKind::Users => ResourceForm::User(serde_json::from_value(value)?),
        };
        Ok(form)
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceForm::Vacancy(_) => ResourceKind::Vacancies,
            ResourceForm::Application(_) => ResourceKind::Applications,
            ResourceForm::Candidate(_) => ResourceKind::Candidates,
            ResourceForm::Company(_) => ResourceKind::Companies,
            ResourceForm::Blog(_) => ResourceKind::Blogs,
            ResourceForm::BlogCategory(_) => ResourceKind::BlogCategories,
            ResourceForm::BlogTag(_) => ResourceKind::BlogTags,
            ResourceForm::Commentary(_) => ResourceKind::Commentaries,
            ResourceForm::Category(_) => ResourceKind::Categories,
            ResourceForm::User(_) => ResourceKind::Users,
        }
    }

    /// Run the field rules of the form.
    ///
    /// New users additionally need a password.
    pub fn validate(&self, mode: FormMode) -> AppResult<()> {
        match self {
            ResourceForm::Vacancy(f) => f.validate()?,
            ResourceForm::Application(f) => f.validate()?,
            ResourceForm::Candidate(f) => f.validate()?,
            ResourceForm::Company(f) => f.validate()?,
            ResourceForm::Blog(f) => f.validate()?,
            ResourceForm::BlogCategory(f) | ResourceForm::BlogTag(f) => f.validate()?,
            ResourceForm::Commentary(f) => f.validate()?,
            ResourceForm::Category(f) => f.validate()?,
            ResourceForm::User(f) => {
                f.validate()?;
                if mode == FormMode::Create && f.password.is_none() {
                    return Err(AppError::Validation {
                        field: "password".to_string(),
                        reason: "is required for new users".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Request body sent to the backend.
    pub fn to_payload(&self) -> AppResult<Value> {
        let value = match self {
            ResourceForm::Vacancy(f) => serde_json::to_value(f),
            ResourceForm::Application(f) => serde_json::to_value(f),
            ResourceForm::Candidate(f) => serde_json::to_value(f),
            ResourceForm::Company(f) => serde_json::to_value(f),
            ResourceForm::Blog(f) => serde_json::to_value(f),
            ResourceForm::BlogCategory(f) | ResourceForm::BlogTag(f) => serde_json::to_value(f),
            ResourceForm::Commentary(f) => serde_json::to_value(f),
            ResourceForm::Category(f) => serde_json::to_value(f),
            ResourceForm::User(f) => serde_json::to_value(f),
        };
        Ok(value?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid_fields(result: AppResult<()>) -> Vec<String> {
        match result {
            Err(AppError::InvalidForm { errors }) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected InvalidForm, got {other:?}"),
        }
    }

    fn vacancy() -> Value {
        json!({
            "title": "Rust Engineer",
            "description": "Build the hiring platform",
            "companyId": 4,
            "salaryFrom": 4000,
            "salaryTo": 6000,
            "deadline": "2026-12-31",
            "status": "OPEN"
        })
    }

    #[test]
    fn test_valid_vacancy() {
        let form = ResourceForm::parse(ResourceKind::Vacancies, vacancy()).unwrap();
        assert_eq!(form.kind(), ResourceKind::Vacancies);
        assert!(form.validate(FormMode::Create).is_ok());
    }

    #[test]
    fn test_vacancy_salary_range_and_date() {
        let mut raw = vacancy();
        raw["salaryFrom"] = json!(9000);
        raw["deadline"] = json!("31/12/2026");
        let form = ResourceForm::parse(ResourceKind::Vacancies, raw).unwrap();
        assert_eq!(
            invalid_fields(form.validate(FormMode::Update)),
            vec!["deadline", "form"]
        );
    }

    #[test]
    fn test_blank_title_is_required() {
        let mut raw = vacancy();
        raw["title"] = json!("   ");
        let form = ResourceForm::parse(ResourceKind::Vacancies, raw).unwrap();
        assert_eq!(invalid_fields(form.validate(FormMode::Create)), vec!["title"]);
    }

    #[test]
    fn test_missing_required_field_is_a_bad_request() {
        let result = ResourceForm::parse(ResourceKind::Candidates, json!({"fullName": "Ann"}));
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn test_candidate_contact_rules() {
        let form = ResourceForm::parse(
            ResourceKind::Candidates,
            json!({
                "fullName": "Ann Lee",
                "email": "ann.example.com",
                "phone": "call me",
                "resumeUrl": "not a url"
            }),
        )
        .unwrap();
        // validator reports Rust field names
        assert_eq!(
            invalid_fields(form.validate(FormMode::Create)),
            vec!["email", "phone", "resume_url"]
        );
    }

    #[test]
    fn test_user_password_confirmation() {
        let form = ResourceForm::parse(
            ResourceKind::Users,
            json!({
                "username": "hr-lead",
                "email": "lead@example.com",
                "role": "RECRUITER",
                "password": "s3cret-pass",
                "confirmPassword": "s3cret-pasz"
            }),
        )
        .unwrap();
        assert_eq!(invalid_fields(form.validate(FormMode::Create)), vec!["form"]);
    }

    #[test]
    fn test_new_user_needs_password_but_update_does_not() {
        let form = ResourceForm::parse(
            ResourceKind::Users,
            json!({"username": "hr-lead", "email": "lead@example.com", "role": "ADMIN"}),
        )
        .unwrap();
        assert!(matches!(
            form.validate(FormMode::Create),
            Err(AppError::Validation { field, .. }) if field == "password"
        ));
        assert!(form.validate(FormMode::Update).is_ok());
    }

    #[test]
    fn test_user_payload_omits_confirmation() {
        let form = ResourceForm::parse(
            ResourceKind::Users,
            json!({
                "username": "hr-lead",
                "email": "lead@example.com",
                "role": "EDITOR",
                "password": "s3cret-pass",
                "confirmPassword": "s3cret-pass"
            }),
        )
        .unwrap();
        let payload = form.to_payload().unwrap();
        assert_eq!(payload["password"], "s3cret-pass");
        assert_eq!(payload["active"], true);
        assert!(payload.get("confirmPassword").is_none());
    }

    #[test]
    fn test_taxonomy_slug_rule_applies_to_tags_and_categories() {
        for kind in [ResourceKind::BlogTags, ResourceKind::BlogCategories] {
            let form =
                ResourceForm::parse(kind, json!({"name": "Remote Work", "slug": "Remote Work"}))
                    .unwrap();
            assert_eq!(form.kind(), kind);
            assert_eq!(invalid_fields(form.validate(FormMode::Create)), vec!["slug"]);
        }
    }
}
