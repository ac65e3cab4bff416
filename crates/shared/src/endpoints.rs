//! Backend endpoint paths and client-side navigation targets.

use crate::domain::CareerId;

pub const SUBMIT_ASSESSMENT: &str = "/submit_assessment";
pub const PROCESS_RESUME: &str = "/process_resume";
pub const USER_DATA: &str = "/api/user_data";
pub const SKILLS_AUTOCOMPLETE: &str = "/api/skills_autocomplete";

pub const HOME: &str = "/";
pub const DASHBOARD: &str = "/dashboard";
pub const UPLOAD_RESUME: &str = "/upload_resume";
pub const GET_RECOMMENDATIONS: &str = "/get_recommendations";
pub const ASSESSMENT: &str = "/assessment";

/// Pages that need an authenticated session to render anything useful.
pub const PROTECTED_PAGES: [&str; 2] = [DASHBOARD, GET_RECOMMENDATIONS];

pub fn career_details(career_id: CareerId) -> String {
    format!("/api/career_details/{}", career_id.0)
}

pub fn is_protected(path: &str) -> bool {
    PROTECTED_PAGES.contains(&path)
}
