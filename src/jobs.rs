//! Job store: the ordered posting collection persisted under `jobportal_jobs`.
//!
//! The store is the only writer of the collection. Every mutation rewrites the
//! whole collection to storage before returning.

use std::rc::Rc;
use tracing::{debug, info};

use crate::error::{require, PortalError, PortalResult};
use crate::ids::generate_unique_id;
use crate::models::{Job, JobStatus, JobUpdate, NewJob, PricingPlan, User};
use crate::pricing::pricing_plans;
use crate::seed::seed_jobs;
use crate::storage::{Storage, JOBS_KEY};

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total_applicants: usize,
    pub top_job_id: Option<String>,
}

pub struct JobStore<S: Storage> {
    storage: Rc<S>,
    jobs: Vec<Job>,
    plans: Vec<PricingPlan>,
}

impl<S: Storage> JobStore<S> {
    /// Loads the persisted collection, seeding storage on first use.
    pub fn new(storage: Rc<S>) -> PortalResult<Self> {
        let jobs = match storage.get_item(JOBS_KEY)? {
            Some(raw) => {
                let jobs: Vec<Job> = serde_json::from_str(&raw)?;
                debug!(count = jobs.len(), "Loaded jobs from storage");
                jobs
            }
            None => {
                let jobs = seed_jobs();
                storage.set_item(JOBS_KEY, &serde_json::to_string(&jobs)?)?;
                info!(count = jobs.len(), "Seeded job store with example postings");
                jobs
            }
        };
        Ok(Self {
            storage,
            jobs,
            plans: pricing_plans(),
        })
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn pricing_plans(&self) -> &[PricingPlan] {
        &self.plans
    }

    pub fn get_job_by_id(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn add_job(&mut self, fields: NewJob) -> PortalResult<Job> {
        require("title", &fields.title)?;
        require("company", &fields.company)?;
        require("description", &fields.description)?;

        let id = generate_unique_id(|candidate| self.get_job_by_id(candidate).is_some());
        let job = Job {
            id,
            title: fields.title,
            company: fields.company,
            logo: fields.logo,
            location: fields.location,
            category: fields.category,
            salary: fields.salary,
            salary_min: fields.salary_min,
            salary_max: fields.salary_max,
            experience: fields.experience,
            description: fields.description,
            requirements: fields.requirements,
            responsibilities: fields.responsibilities,
            posted_date: chrono::Local::now().date_naive(),
            employer_id: fields.employer_id,
            status: JobStatus::Pending,
            applicants: Vec::new(),
        };

        let mut next = self.jobs.clone();
        next.insert(0, job.clone());
        self.commit(next)?;
        info!(job_id = %job.id, employer_id = %job.employer_id, "Added job");
        Ok(job)
    }

    pub fn update_job(&mut self, id: &str, update: JobUpdate) -> PortalResult<Job> {
        let index = self.position(id)?;
        let mut next = self.jobs.clone();
        update.apply_to(&mut next[index]);
        let job = next[index].clone();
        self.commit(next)?;
        debug!(job_id = %id, status = %job.status, "Updated job");
        Ok(job)
    }

    pub fn delete_job(&mut self, id: &str) -> PortalResult<Job> {
        let index = self.position(id)?;
        let mut next = self.jobs.clone();
        let job = next.remove(index);
        self.commit(next)?;
        info!(job_id = %id, "Deleted job");
        Ok(job)
    }

    /// Records an application. Returns `false` when the user had already
    /// applied, leaving the job untouched.
    pub fn apply_to_job(&mut self, job_id: &str, user_id: &str) -> PortalResult<bool> {
        require("user id", user_id)?;
        let index = self.position(job_id)?;
        if self.jobs[index].has_applicant(user_id) {
            debug!(job_id = %job_id, user_id = %user_id, "Duplicate application ignored");
            return Ok(false);
        }
        let mut next = self.jobs.clone();
        next[index].applicants.push(user_id.to_string());
        self.commit(next)?;
        info!(job_id = %job_id, user_id = %user_id, "Application recorded");
        Ok(true)
    }

    pub fn approve_job(&mut self, id: &str) -> PortalResult<Job> {
        self.update_job(id, JobUpdate::status(JobStatus::Approved))
    }

    pub fn reject_job(&mut self, id: &str) -> PortalResult<Job> {
        self.update_job(id, JobUpdate::status(JobStatus::Rejected))
    }

    // --- Dashboard queries ---

    pub fn jobs_with_status(&self, status: JobStatus) -> Vec<&Job> {
        self.jobs.iter().filter(|job| job.status == status).collect()
    }

    /// Jobs owned by an employer, matched by id or by company name.
    pub fn jobs_for_employer(&self, user: &User) -> Vec<&Job> {
        self.jobs
            .iter()
            .filter(|job| {
                job.employer_id == user.id
                    || user.company_name.as_deref() == Some(job.company.as_str())
            })
            .collect()
    }

    pub fn applied_jobs(&self, user_id: &str) -> Vec<&Job> {
        self.jobs
            .iter()
            .filter(|job| job.has_applicant(user_id))
            .collect()
    }

    pub fn latest_approved(&self, limit: usize) -> Vec<&Job> {
        self.jobs_with_status(JobStatus::Approved)
            .into_iter()
            .take(limit)
            .collect()
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        let count = |status: JobStatus| self.jobs.iter().filter(|j| j.status == status).count();

        // First job with the strictly largest applicant count wins ties
        let mut top: Option<&Job> = None;
        for job in &self.jobs {
            match top {
                Some(best) if job.applicants.len() <= best.applicants.len() => {}
                _ => top = Some(job),
            }
        }

        DashboardStats {
            total: self.jobs.len(),
            pending: count(JobStatus::Pending),
            approved: count(JobStatus::Approved),
            rejected: count(JobStatus::Rejected),
            total_applicants: self.jobs.iter().map(|j| j.applicants.len()).sum(),
            top_job_id: top.map(|j| j.id.clone()),
        }
    }

    fn position(&self, id: &str) -> PortalResult<usize> {
        self.jobs
            .iter()
            .position(|job| job.id == id)
            .ok_or_else(|| PortalError::NotFound(id.to_string()))
    }

    /// Writes the new snapshot, then swaps it in. A failed write leaves the
    /// in-memory collection as it was.
    fn commit(&mut self, next: Vec<Job>) -> PortalResult<()> {
        self.storage
            .set_item(JOBS_KEY, &serde_json::to_string(&next)?)?;
        self.jobs = next;
        Ok(())
    }
}
