use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Employer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Employer => "employer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "candidate" => Ok(Role::Candidate),
            "employer" => Ok(Role::Employer),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}' (candidate, employer, admin)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Approved,
    Rejected,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Approved => "approved",
            JobStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(JobStatus::Pending),
            "approved" => Ok(JobStatus::Approved),
            "rejected" => Ok(JobStatus::Rejected),
            other => Err(format!("unknown status '{}' (pending, approved, rejected)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub location: String,
    pub category: String,
    pub salary: String, // display label, e.g. "2,000,000-3,500,000₮"
    pub salary_min: i64,
    pub salary_max: i64,
    pub experience: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub posted_date: NaiveDate,
    pub employer_id: String,
    pub status: JobStatus,
    pub applicants: Vec<String>,
}

impl Job {
    pub fn has_applicant(&self, user_id: &str) -> bool {
        self.applicants.iter().any(|a| a == user_id)
    }
}

/// Fields an employer supplies when posting. Id, posting date, status and
/// applicants are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub logo: Option<String>,
    pub location: String,
    pub category: String,
    pub salary: String,
    pub salary_min: i64,
    pub salary_max: i64,
    pub experience: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub employer_id: String,
}

/// Partial update merged into an existing job; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub company: Option<String>,
    pub logo: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub salary: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub experience: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub responsibilities: Option<Vec<String>>,
    pub status: Option<JobStatus>,
}

impl JobUpdate {
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(self, job: &mut Job) {
        if let Some(v) = self.title {
            job.title = v;
        }
        if let Some(v) = self.company {
            job.company = v;
        }
        if let Some(v) = self.logo {
            job.logo = Some(v);
        }
        if let Some(v) = self.location {
            job.location = v;
        }
        if let Some(v) = self.category {
            job.category = v;
        }
        if let Some(v) = self.salary {
            job.salary = v;
        }
        if let Some(v) = self.salary_min {
            job.salary_min = v;
        }
        if let Some(v) = self.salary_max {
            job.salary_max = v;
        }
        if let Some(v) = self.experience {
            job.experience = v;
        }
        if let Some(v) = self.description {
            job.description = v;
        }
        if let Some(v) = self.requirements {
            job.requirements = v;
        }
        if let Some(v) = self.responsibilities {
            job.responsibilities = v;
        }
        if let Some(v) = self.status {
            job.status = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPlan {
    pub name: String,
    pub price: String,
    pub period: String,
    pub description: String,
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
}

impl PricingPlan {
    pub fn is_popular(&self) -> bool {
        self.popular.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> Job {
        Job {
            id: "j1".to_string(),
            title: "HR Менежер".to_string(),
            company: "Таван Богд".to_string(),
            logo: None,
            location: "Улаанбаатар".to_string(),
            category: "HR".to_string(),
            salary: "2,000,000-3,500,000₮".to_string(),
            salary_min: 2_000_000,
            salary_max: 3_500_000,
            experience: "Дунд түвшин".to_string(),
            description: "HR менежер хайж байна.".to_string(),
            requirements: vec!["Recruitment".to_string()],
            responsibilities: vec!["Сургалт".to_string()],
            posted_date: NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
            employer_id: "emp3".to_string(),
            status: JobStatus::Approved,
            applicants: vec![],
        }
    }

    #[test]
    fn test_job_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_job()).unwrap();
        assert_eq!(json["salaryMin"], 2_000_000);
        assert_eq!(json["salaryMax"], 3_500_000);
        assert_eq!(json["postedDate"], "2025-01-08");
        assert_eq!(json["employerId"], "emp3");
        assert_eq!(json["status"], "approved");
        assert!(json.get("logo").is_none());
    }

    #[test]
    fn test_user_company_name_omitted_when_absent() {
        let user = User {
            id: "u1".to_string(),
            email: "bat@example.mn".to_string(),
            name: "bat".to_string(),
            role: Role::Candidate,
            company_name: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("companyName"));
        assert!(json.contains("\"role\":\"candidate\""));
    }

    #[test]
    fn test_role_and_status_parse_case_insensitively() {
        assert_eq!("Employer".parse::<Role>(), Ok(Role::Employer));
        assert_eq!("REJECTED".parse::<JobStatus>(), Ok(JobStatus::Rejected));
        assert!("owner".parse::<Role>().is_err());
        assert!("closed".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_job_update_merges_only_present_fields() {
        let mut job = sample_job();
        let update = JobUpdate {
            title: Some("Senior HR".to_string()),
            salary_max: Some(4_000_000),
            ..Default::default()
        };
        update.apply_to(&mut job);

        assert_eq!(job.title, "Senior HR");
        assert_eq!(job.salary_max, 4_000_000);
        assert_eq!(job.salary_min, 2_000_000);
        assert_eq!(job.company, "Таван Богд");
        assert_eq!(job.status, JobStatus::Approved);
    }

    #[test]
    fn test_job_update_status_helper() {
        let update = JobUpdate::status(JobStatus::Rejected);
        assert!(!update.is_empty());
        assert!(JobUpdate::default().is_empty());

        let mut job = sample_job();
        update.apply_to(&mut job);
        assert_eq!(job.status, JobStatus::Rejected);
    }
}
