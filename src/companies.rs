use crate::models::{Job, JobStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySummary {
    pub name: String,
    pub logo: String,
    pub location: String,
    pub job_count: usize,
    pub categories: Vec<String>,
}

fn avatar_url(company: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random&color=fff",
        company.replace(' ', "+")
    )
}

/// Lowercase name with whitespace runs replaced by `-`, used in profile URLs.
pub fn company_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

/// One entry per company with approved postings, in first-seen order.
pub fn company_directory(jobs: &[Job]) -> Vec<CompanySummary> {
    let mut companies: Vec<CompanySummary> = Vec::new();

    for job in jobs.iter().filter(|j| j.status == JobStatus::Approved) {
        if let Some(existing) = companies.iter_mut().find(|c| c.name == job.company) {
            existing.job_count += 1;
            if !existing.categories.contains(&job.category) {
                existing.categories.push(job.category.clone());
            }
            continue;
        }
        companies.push(CompanySummary {
            name: job.company.clone(),
            logo: job.logo.clone().unwrap_or_else(|| avatar_url(&job.company)),
            location: job.location.clone(),
            job_count: 1,
            categories: vec![job.category.clone()],
        });
    }

    companies
}

pub fn search_companies<'a>(companies: &'a [CompanySummary], query: &str) -> Vec<&'a CompanySummary> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return companies.iter().collect();
    }
    companies
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&query)
                || c.location.to_lowercase().contains(&query)
                || c.categories.iter().any(|cat| cat.to_lowercase().contains(&query))
        })
        .collect()
}

/// Every posting for the company behind `slug`, whatever its status.
pub fn jobs_for_company<'a>(jobs: &'a [Job], slug: &str) -> Vec<&'a Job> {
    let slug = company_slug(slug);
    jobs.iter()
        .filter(|job| company_slug(&job.company) == slug)
        .collect()
}
