mod forms;
mod resource;

pub use forms::{
    ApplicationForm, ApplicationStatus, BlogForm, CandidateForm, CategoryForm, CommentaryForm,
    CompanyForm, FormMode, ResourceForm, TaxonomyForm, UserForm, UserRole, VacancyForm,
    VacancyStatus,
};
pub use resource::{Column, ResourceKind};
