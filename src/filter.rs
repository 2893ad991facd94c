use std::str::FromStr;

use crate::models::{Job, JobStatus};

/// Sentinel selection that disables the city/category/experience filters.
pub const ALL: &str = "all";

pub const DEFAULT_SALARY_FLOOR: i64 = 0;
pub const DEFAULT_SALARY_CEILING: i64 = 10_000_000;

/// How a job's salary bounds are compared with the query range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SalaryMatch {
    /// The job's whole range must sit inside the query range.
    #[default]
    Containment,
    /// Any overlap between the two ranges is enough.
    Overlap,
}

impl FromStr for SalaryMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "containment" | "contain" => Ok(SalaryMatch::Containment),
            "overlap" => Ok(SalaryMatch::Overlap),
            other => Err(format!("unknown salary match '{}' (containment, overlap)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryRange {
    pub floor: i64,
    pub ceiling: i64,
}

impl Default for SalaryRange {
    fn default() -> Self {
        Self {
            floor: DEFAULT_SALARY_FLOOR,
            ceiling: DEFAULT_SALARY_CEILING,
        }
    }
}

impl SalaryRange {
    pub fn matches(&self, job: &Job, mode: SalaryMatch) -> bool {
        match mode {
            SalaryMatch::Containment => job.salary_min >= self.floor && job.salary_max <= self.ceiling,
            SalaryMatch::Overlap => job.salary_min <= self.ceiling && job.salary_max >= self.floor,
        }
    }
}

/// Public listing filter. Only approved jobs ever pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFilter {
    pub keyword: String,
    pub city: String,
    pub category: String,
    pub experience: String,
    pub salary: SalaryRange,
    pub salary_match: SalaryMatch,
}

impl Default for JobFilter {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            city: ALL.to_string(),
            category: ALL.to_string(),
            experience: ALL.to_string(),
            salary: SalaryRange::default(),
            salary_match: SalaryMatch::default(),
        }
    }
}

fn selected(selection: &str, value: &str) -> bool {
    selection == ALL || selection == value
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        job.status == JobStatus::Approved
            && self.matches_keyword(job)
            && selected(&self.city, &job.location)
            && selected(&self.category, &job.category)
            && selected(&self.experience, &job.experience)
            && self.salary.matches(job, self.salary_match)
    }

    fn matches_keyword(&self, job: &Job) -> bool {
        if self.keyword.is_empty() {
            return true;
        }
        let needle = self.keyword.to_lowercase();
        job.title.to_lowercase().contains(&needle)
            || job.company.to_lowercase().contains(&needle)
            || job.description.to_lowercase().contains(&needle)
    }

    /// Applies the filter, keeping store order.
    pub fn apply<'a>(&self, jobs: &'a [Job]) -> Vec<&'a Job> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_jobs;

    fn job_with_salary(id: &str, min: i64, max: i64) -> Job {
        let mut job = seed_jobs().remove(0);
        job.id = id.to_string();
        job.salary_min = min;
        job.salary_max = max;
        job
    }

    fn ids(jobs: &[&Job]) -> Vec<String> {
        jobs.iter().map(|j| j.id.clone()).collect()
    }

    #[test]
    fn test_default_filter_lists_all_seed_jobs_in_order() {
        let jobs = seed_jobs();
        let result = JobFilter::default().apply(&jobs);
        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn test_pending_and_rejected_jobs_are_never_listed() {
        let mut jobs = seed_jobs();
        jobs[0].status = JobStatus::Pending;
        jobs[1].status = JobStatus::Rejected;

        let result = JobFilter::default().apply(&jobs);
        assert!(result.iter().all(|j| j.status == JobStatus::Approved));
        assert_eq!(result.len(), 5);

        let overlap = JobFilter {
            salary_match: SalaryMatch::Overlap,
            ..Default::default()
        };
        assert!(overlap.apply(&jobs).iter().all(|j| j.status == JobStatus::Approved));
    }

    #[test]
    fn test_keyword_matches_title_company_or_description_case_insensitively() {
        let jobs = seed_jobs();

        let by_title = JobFilter {
            keyword: "devops".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&by_title.apply(&jobs)), vec!["7"]);

        let by_company = JobFilter {
            keyword: "LENDMN".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&by_company.apply(&jobs)), vec!["1", "6"]);

        let by_description = JobFilter {
            keyword: "web application".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&by_description.apply(&jobs)), vec!["4"]);
    }

    #[test]
    fn test_city_category_experience_are_exact_matches() {
        let jobs = seed_jobs();

        let darkhan = JobFilter {
            city: "Дархан".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&darkhan.apply(&jobs)), vec!["7"]);

        let it_senior = JobFilter {
            category: "IT".to_string(),
            experience: "Ахлах".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&it_senior.apply(&jobs)), vec!["1", "7"]);

        // Substrings do not count for selections
        let partial = JobFilter {
            category: "I".to_string(),
            ..Default::default()
        };
        assert!(partial.apply(&jobs).is_empty());
    }

    #[test]
    fn test_salary_containment_excludes_partial_overlap() {
        let jobs = vec![job_with_salary("a", 2_000_000, 4_000_000)];
        let filter = JobFilter {
            salary: SalaryRange {
                floor: 0,
                ceiling: 3_000_000,
            },
            ..Default::default()
        };
        assert!(filter.apply(&jobs).is_empty());
    }

    #[test]
    fn test_salary_overlap_mode_includes_partial_overlap() {
        let jobs = vec![
            job_with_salary("a", 2_000_000, 4_000_000),
            job_with_salary("b", 3_500_000, 5_000_000),
        ];
        let filter = JobFilter {
            salary: SalaryRange {
                floor: 0,
                ceiling: 3_000_000,
            },
            salary_match: SalaryMatch::Overlap,
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&jobs)), vec!["a"]);
    }

    #[test]
    fn test_salary_bounds_are_inclusive() {
        let jobs = vec![job_with_salary("a", 1_000_000, 3_000_000)];
        let filter = JobFilter {
            salary: SalaryRange {
                floor: 1_000_000,
                ceiling: 3_000_000,
            },
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&jobs)), vec!["a"]);
    }

    #[test]
    fn test_salary_match_parses() {
        assert_eq!("Overlap".parse::<SalaryMatch>(), Ok(SalaryMatch::Overlap));
        assert_eq!("containment".parse::<SalaryMatch>(), Ok(SalaryMatch::Containment));
        assert!("any".parse::<SalaryMatch>().is_err());
    }
}
