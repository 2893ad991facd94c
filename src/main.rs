mod companies;
mod config;
mod error;
mod filter;
mod ids;
mod jobs;
mod models;
mod posting;
mod pricing;
mod profiles;
mod seed;
mod session;
mod storage;
mod tui;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use companies::{company_directory, company_slug, jobs_for_company, search_companies};
use config::PortalConfig;
use filter::{JobFilter, SalaryMatch, SalaryRange, ALL, DEFAULT_SALARY_CEILING, DEFAULT_SALARY_FLOOR};
use jobs::JobStore;
use models::{Job, JobStatus, JobUpdate, Role, User};
use posting::{salary_label, split_lines, JobForm};
use profiles::{company_profile, CompanyProfile};
use session::{hash_password, SessionStore, DEFAULT_COMPANY_NAME};
use storage::{SqliteStorage, Storage, JOBS_KEY};
use tui::truncate_chars;

#[derive(Parser)]
#[command(name = "jobportal")]
#[command(about = "Job board - browse, post, review, and apply to job postings")]
struct Cli {
    /// Path to the local storage database
    #[arg(long, global = true, env = "JOBPORTAL_DB")]
    db: Option<PathBuf>,

    /// Email that unlocks the admin role at login
    #[arg(long, global = true, env = "JOBPORTAL_ADMIN_EMAIL", hide = true)]
    admin_email: Option<String>,

    /// Argon2 hash of the admin password (see `hash-password`)
    #[arg(long, global = true, env = "JOBPORTAL_ADMIN_HASH", hide = true)]
    admin_hash: Option<String>,

    /// Default salary comparison for listings (containment, overlap)
    #[arg(long, global = true, env = "JOBPORTAL_SALARY_MATCH", hide = true)]
    default_salary_match: Option<SalaryMatch>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct FilterArgs {
    /// Keyword matched against title, company, and description
    #[arg(short, long, default_value = "")]
    search: String,

    /// City, or "all"
    #[arg(long, default_value = ALL)]
    city: String,

    /// Category, or "all"
    #[arg(long, default_value = ALL)]
    category: String,

    /// Experience level, or "all"
    #[arg(long, default_value = ALL)]
    experience: String,

    /// Lowest acceptable salary
    #[arg(long, default_value_t = DEFAULT_SALARY_FLOOR)]
    salary_min: i64,

    /// Highest acceptable salary
    #[arg(long, default_value_t = DEFAULT_SALARY_CEILING)]
    salary_max: i64,

    /// How salaries are compared (containment, overlap)
    #[arg(long)]
    salary_match: Option<SalaryMatch>,
}

impl FilterArgs {
    fn into_filter(self, default_match: SalaryMatch) -> JobFilter {
        JobFilter {
            keyword: self.search,
            city: self.city,
            category: self.category,
            experience: self.experience,
            salary: SalaryRange {
                floor: self.salary_min,
                ceiling: self.salary_max,
            },
            salary_match: self.salary_match.unwrap_or(default_match),
        }
    }
}

#[derive(Args)]
struct PostArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// Defaults to Улаанбаатар
    #[arg(long)]
    location: Option<String>,
    /// Defaults to IT
    #[arg(long)]
    category: Option<String>,
    /// Defaults to "Дунд түвшин"
    #[arg(long)]
    experience: Option<String>,
    /// Defaults to 1,000,000
    #[arg(long)]
    salary_min: Option<i64>,
    /// Defaults to 2,000,000
    #[arg(long)]
    salary_max: Option<i64>,
    /// One requirement per line
    #[arg(long, default_value = "")]
    requirements: String,
    /// One responsibility per line
    #[arg(long, default_value = "")]
    responsibilities: String,
    #[arg(long)]
    logo: Option<String>,
}

impl PostArgs {
    fn into_form(self) -> JobForm {
        let defaults = JobForm::default();
        JobForm {
            title: self.title,
            description: self.description,
            location: self.location.unwrap_or(defaults.location),
            category: self.category.unwrap_or(defaults.category),
            experience: self.experience.unwrap_or(defaults.experience),
            salary_min: self.salary_min.unwrap_or(defaults.salary_min),
            salary_max: self.salary_max.unwrap_or(defaults.salary_max),
            requirements: self.requirements,
            responsibilities: self.responsibilities,
            logo: self.logo,
        }
    }
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    experience: Option<String>,
    #[arg(long)]
    salary_min: Option<i64>,
    #[arg(long)]
    salary_max: Option<i64>,
    /// One requirement per line
    #[arg(long)]
    requirements: Option<String>,
    /// One responsibility per line
    #[arg(long)]
    responsibilities: Option<String>,
    #[arg(long)]
    logo: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in (admin role is granted only for the admin credential)
    Login {
        email: String,
        password: String,
        /// candidate or employer
        #[arg(short, long, default_value = "candidate")]
        role: Role,
    },

    /// Create an account and log in
    Signup {
        email: String,
        password: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// candidate or employer
        #[arg(short, long, default_value = "candidate")]
        role: Role,
        /// Company name (employers only)
        #[arg(short, long)]
        company: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show the current session
    Whoami,

    /// Show where state is stored
    Info,

    /// List approved jobs
    Jobs {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show job details
    Show {
        /// Job ID
        id: String,
    },

    /// Newest approved jobs
    Latest {
        #[arg(short, long, default_value = "6")]
        limit: usize,
    },

    /// Post a job (employer)
    Post {
        #[command(flatten)]
        form: PostArgs,
    },

    /// Edit one of your postings (employer or admin)
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },

    /// Delete a posting (owner or admin)
    Delete { id: String },

    /// Apply to a job
    Apply { id: String },

    /// Approve a pending posting (admin)
    Approve { id: String },

    /// Reject a posting (admin)
    Reject { id: String },

    /// List postings by review status (admin)
    Review {
        #[arg(short, long, default_value = "pending")]
        status: JobStatus,
    },

    /// Dashboard counters (admin)
    Stats,

    /// Your postings (employer)
    Mine,

    /// Jobs you applied to
    Applied,

    /// Company directory
    Companies {
        /// Filter by name, location, or category
        query: Option<String>,
    },

    /// Company profile, reviews, and postings
    Company {
        /// Company name or slug, e.g. and-systems
        slug: String,
    },

    /// Posting packages
    Pricing,

    /// Interactive browser
    Browse {
        /// Browse the pending review queue instead (admin)
        #[arg(long)]
        pending: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print an Argon2 hash for JOBPORTAL_ADMIN_HASH
    HashPassword { password: String },

    /// Discard stored postings so the example postings are restored
    Reset {
        /// Also end the current session
        #[arg(long)]
        all: bool,
    },
}

struct Portal<S: Storage> {
    storage: Rc<S>,
    session: SessionStore<S>,
    jobs: JobStore<S>,
    config: PortalConfig,
}

impl Portal<SqliteStorage> {
    fn open(config: PortalConfig) -> Result<Self> {
        let storage = SqliteStorage::open(&config.db_path)
            .with_context(|| format!("Failed to open storage at {}", config.db_path.display()))?;
        Self::new(Rc::new(storage), config)
    }
}

impl<S: Storage> Portal<S> {
    fn new(storage: Rc<S>, config: PortalConfig) -> Result<Self> {
        let admin = config.admin_credential()?;
        let session = SessionStore::new(Rc::clone(&storage), admin)?;
        let jobs = JobStore::new(Rc::clone(&storage)).with_context(|| {
            format!(
                "Failed to load '{}' from storage. Run 'jobportal reset' to restore the example postings.",
                JOBS_KEY
            )
        })?;
        Ok(Self {
            storage,
            session,
            jobs,
            config,
        })
    }

    fn user(&self) -> Result<User> {
        self.session
            .current_user()
            .cloned()
            .ok_or_else(|| anyhow!("Not logged in. Run 'jobportal login' first."))
    }

    fn user_with_role(&self, roles: &[Role]) -> Result<User> {
        let user = self.user()?;
        if !roles.contains(&user.role) {
            let allowed: Vec<&str> = roles.iter().map(Role::as_str).collect();
            bail!(
                "This command requires the {} role (logged in as {}).",
                allowed.join(" or "),
                user.role
            );
        }
        Ok(user)
    }

    /// Owners may change their postings; admins may change any.
    fn owned_job(&self, id: &str, user: &User) -> Result<Job> {
        let job = self
            .jobs
            .get_job_by_id(id)
            .cloned()
            .ok_or_else(|| anyhow!("Job #{} not found.", id))?;
        let owns = self.jobs.jobs_for_employer(user).iter().any(|j| j.id == job.id);
        if user.role != Role::Admin && !owns {
            bail!("Job #{} does not belong to you.", id);
        }
        Ok(job)
    }

    fn post_job(&mut self, form: JobForm) -> Result<Job> {
        let user = self.user_with_role(&[Role::Employer, Role::Admin])?;
        let company = posting_company(&user);
        Ok(self.jobs.add_job(form.into_new_job(&company, &user.id))?)
    }

    /// Returns `None` when the update carries no changes.
    fn edit_job(&mut self, id: &str, mut update: JobUpdate) -> Result<Option<Job>> {
        let user = self.user_with_role(&[Role::Employer, Role::Admin])?;
        let job = self.owned_job(id, &user)?;
        if update.salary_min.is_some() || update.salary_max.is_some() {
            update.salary = Some(salary_label(
                update.salary_min.unwrap_or(job.salary_min),
                update.salary_max.unwrap_or(job.salary_max),
            ));
        }
        if update.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.jobs.update_job(id, update)?))
    }

    fn delete_job(&mut self, id: &str) -> Result<Job> {
        let user = self.user_with_role(&[Role::Employer, Role::Admin])?;
        self.owned_job(id, &user)?;
        Ok(self.jobs.delete_job(id)?)
    }

    fn approve_job(&mut self, id: &str) -> Result<Job> {
        self.user_with_role(&[Role::Admin])?;
        Ok(self.jobs.approve_job(id)?)
    }

    fn reject_job(&mut self, id: &str) -> Result<Job> {
        self.user_with_role(&[Role::Admin])?;
        Ok(self.jobs.reject_job(id)?)
    }
}

/// Company a new posting is listed under.
fn posting_company(user: &User) -> String {
    user.company_name
        .clone()
        .unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string())
}

fn init_tracing() {
    Registry::default()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("jobportal=warn")))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let config = PortalConfig::new()
        .with_db_path(cli.db)
        .with_admin_email(cli.admin_email)
        .with_admin_password_hash(cli.admin_hash)
        .with_salary_match(cli.default_salary_match.unwrap_or_default());

    // Neither needs a loadable job collection or a valid admin credential
    match &cli.command {
        Commands::HashPassword { password } => {
            println!("{}", hash_password(password)?);
            return Ok(());
        }
        Commands::Reset { all } => {
            let db = SqliteStorage::open(&config.db_path)
                .with_context(|| format!("Failed to open storage at {}", config.db_path.display()))?;
            storage::reset(&db, *all)?;
            println!("Stored postings cleared; example postings restore on next start.");
            if *all {
                println!("Logged out.");
            }
            return Ok(());
        }
        _ => {}
    }

    let mut portal = Portal::open(config)?;

    match cli.command {
        Commands::HashPassword { .. } | Commands::Reset { .. } => {}

        Commands::Login {
            email,
            password,
            role,
        } => {
            let user = portal.session.login(&email, &password, role)?;
            println!("Logged in as {} ({}).", user.name, user.role);
        }

        Commands::Signup {
            email,
            password,
            name,
            role,
            company,
        } => {
            let user = portal
                .session
                .signup(&email, &password, &name, role, company.as_deref())?;
            println!("Welcome, {}! Signed up as {}.", user.name, user.role);
        }

        Commands::Logout => {
            portal.session.logout()?;
            println!("Logged out.");
        }

        Commands::Whoami => match portal.session.current_user() {
            Some(user) => {
                println!("{} <{}>", user.name, user.email);
                println!("Role: {}", user.role);
                println!("ID: {}", user.id);
                if let Some(company) = &user.company_name {
                    println!("Company: {}", company);
                }
            }
            None => println!("Not logged in."),
        },

        Commands::Info => {
            println!("Storage: {}", portal.storage.path().display());
            for key in portal.storage.keys()? {
                println!("  {}", key);
            }
            println!("Jobs: {}", portal.jobs.jobs().len());
            println!(
                "Logged in: {}",
                if portal.session.is_authenticated() { "yes" } else { "no" }
            );
        }

        Commands::Jobs { filter } => {
            let filter = filter.into_filter(portal.config.salary_match);
            let jobs = filter.apply(portal.jobs.jobs());
            println!("{} job(s) found.", jobs.len());
            print_job_table(&jobs);
        }

        Commands::Show { id } => match portal.jobs.get_job_by_id(&id) {
            Some(job) => {
                let user = portal.session.current_user();
                print_job_details(job, user);
            }
            None => {
                println!("Job #{} not found.", id);
            }
        },

        Commands::Latest { limit } => {
            print_job_table(&portal.jobs.latest_approved(limit));
        }

        Commands::Post { form } => {
            let job = portal.post_job(form.into_form())?;
            println!("Added job #{} for {}. It will be listed once an admin approves it.", job.id, job.company);
        }

        Commands::Edit { id, fields } => {
            let update = JobUpdate {
                title: fields.title,
                description: fields.description,
                location: fields.location,
                category: fields.category,
                experience: fields.experience,
                salary_min: fields.salary_min,
                salary_max: fields.salary_max,
                requirements: fields.requirements.as_deref().map(split_lines),
                responsibilities: fields.responsibilities.as_deref().map(split_lines),
                logo: fields.logo,
                ..Default::default()
            };
            match portal.edit_job(&id, update)? {
                Some(job) => println!("Updated job #{}.", job.id),
                None => println!("Nothing to change."),
            }
        }

        Commands::Delete { id } => {
            let job = portal.delete_job(&id)?;
            println!("Deleted job #{} ({}).", job.id, job.title);
        }

        Commands::Apply { id } => {
            let user = portal.user()?;
            if portal.jobs.apply_to_job(&id, &user.id)? {
                println!("Applied to job #{}.", id);
            } else {
                println!("You have already applied to job #{}.", id);
            }
        }

        Commands::Approve { id } => {
            let job = portal.approve_job(&id)?;
            println!("Approved job #{} ({}).", job.id, job.title);
        }

        Commands::Reject { id } => {
            let job = portal.reject_job(&id)?;
            println!("Rejected job #{} ({}).", job.id, job.title);
        }

        Commands::Review { status } => {
            portal.user_with_role(&[Role::Admin])?;
            let jobs = portal.jobs.jobs_with_status(status);
            println!("{} {} job(s).", jobs.len(), status);
            print_job_table(&jobs);
        }

        Commands::Stats => {
            portal.user_with_role(&[Role::Admin])?;
            let stats = portal.jobs.dashboard_stats();
            println!("Total jobs:       {}", stats.total);
            println!("  Approved:       {}", stats.approved);
            println!("  Pending:        {}", stats.pending);
            println!("  Rejected:       {}", stats.rejected);
            println!("Total applicants: {}", stats.total_applicants);
            if let Some(job) = stats
                .top_job_id
                .as_deref()
                .and_then(|id| portal.jobs.get_job_by_id(id))
            {
                println!(
                    "Most applied:     #{} {} ({} applicant(s))",
                    job.id,
                    job.title,
                    job.applicants.len()
                );
            }
        }

        Commands::Mine => {
            let user = portal.user_with_role(&[Role::Employer])?;
            let jobs = portal.jobs.jobs_for_employer(&user);
            if jobs.is_empty() {
                println!("You have not posted any jobs yet.");
            } else {
                println!("{:<10} {:<10} {:<30} {:>10}", "ID", "STATUS", "TITLE", "APPLICANTS");
                println!("{}", "-".repeat(63));
                for job in jobs {
                    println!(
                        "{:<10} {:<10} {:<30} {:>10}",
                        job.id,
                        job.status,
                        truncate_chars(&job.title, 28),
                        job.applicants.len()
                    );
                }
            }
        }

        Commands::Applied => {
            let user = portal.user()?;
            let jobs = portal.jobs.applied_jobs(&user.id);
            if jobs.is_empty() {
                println!("You have not applied to any jobs yet.");
            } else {
                print_job_table(&jobs);
            }
        }

        Commands::Companies { query } => {
            let directory = company_directory(portal.jobs.jobs());
            let companies = search_companies(&directory, query.as_deref().unwrap_or(""));
            if companies.is_empty() {
                println!("No companies found.");
            } else {
                println!("{:<20} {:<16} {:>5}  {}", "COMPANY", "LOCATION", "JOBS", "CATEGORIES");
                println!("{}", "-".repeat(70));
                for company in companies {
                    println!(
                        "{:<20} {:<16} {:>5}  {}",
                        truncate_chars(&company.name, 18),
                        truncate_chars(&company.location, 14),
                        company.job_count,
                        company.categories.join(", ")
                    );
                }
            }
        }

        Commands::Company { slug } => {
            let slug = company_slug(&slug);
            match company_profile(&slug) {
                Some(profile) => {
                    let jobs = jobs_for_company(portal.jobs.jobs(), &slug);
                    print_company_profile(profile, jobs.len());
                    println!("\nJobs ({}):", jobs.len());
                    print_job_table(&jobs);
                }
                None => println!("Company '{}' not found.", slug),
            }
        }

        Commands::Pricing => {
            for plan in portal.jobs.pricing_plans() {
                let badge = if plan.is_popular() { "  [popular]" } else { "" };
                println!("{} - {} / {}{}", plan.name, plan.price, plan.period, badge);
                println!("  {}", plan.description);
                for feature in &plan.features {
                    println!("  + {}", feature);
                }
                println!();
            }
        }

        Commands::Browse { pending, filter } => {
            let user = portal.session.current_user().cloned();
            let ids: Vec<String> = if pending {
                portal.user_with_role(&[Role::Admin])?;
                portal
                    .jobs
                    .jobs_with_status(JobStatus::Pending)
                    .iter()
                    .map(|j| j.id.clone())
                    .collect()
            } else {
                filter
                    .into_filter(portal.config.salary_match)
                    .apply(portal.jobs.jobs())
                    .iter()
                    .map(|j| j.id.clone())
                    .collect()
            };
            tui::run_browse(&mut portal.jobs, ids, user.as_ref())?;
        }
    }

    Ok(())
}

fn print_job_table(jobs: &[&Job]) {
    if jobs.is_empty() {
        println!("No jobs found.");
        return;
    }
    println!(
        "{:<10} {:<30} {:<16} {:<12} {:>22}",
        "ID", "TITLE", "COMPANY", "CITY", "SALARY"
    );
    println!("{}", "-".repeat(94));
    for job in jobs {
        println!(
            "{:<10} {:<30} {:<16} {:<12} {:>22}",
            job.id,
            truncate_chars(&job.title, 28),
            truncate_chars(&job.company, 14),
            truncate_chars(&job.location, 12),
            job.salary
        );
    }
}

fn print_company_profile(profile: &CompanyProfile, job_count: usize) {
    println!("[{}] {}", profile.initials, profile.name);
    println!(
        "Rating: {:.1} ({} reviews)  Industry: {}",
        profile.rating, profile.total_reviews, profile.industry
    );
    println!("Location: {}", profile.location);
    println!("Size: {}", profile.size);
    println!("Founded: {}", profile.founded);
    println!("Website: https://{}", profile.website);
    println!("Open positions: {}", job_count);
    println!("\n{}", textwrap::fill(profile.description, 72));
    println!("\nCulture:\n{}", textwrap::fill(profile.culture, 72));

    println!("\nBenefits:");
    for benefit in profile.benefits {
        println!("  + {}", benefit);
    }

    println!("\nRatings:");
    for (stars, percent, count) in profile.rating_distribution() {
        println!("  {} {:<20} {:>3}", stars, "*".repeat(percent as usize / 5), count);
    }

    for review in profile.reviews {
        println!(
            "\n{}{} {} ({}), {}",
            "*".repeat(review.rating as usize),
            " ".repeat(5 - review.rating.min(5) as usize),
            review.author,
            review.role,
            review.date
        );
        println!("  {}", review.title);
        println!("  + {}", review.pros);
        println!("  - {}", review.cons);
        println!("  {} found this helpful", review.helpful);
    }
}

fn print_job_details(job: &Job, user: Option<&User>) {
    println!("Job #{}", job.id);
    println!("Title: {}", job.title);
    println!("Company: {}", job.company);
    println!("Location: {}", job.location);
    println!("Category: {}", job.category);
    println!("Experience: {}", job.experience);
    println!("Salary: {}", job.salary);
    println!("Posted: {}", job.posted_date);
    println!("Status: {}", job.status);
    println!("Applicants: {}", job.applicants.len());
    if user.is_some_and(|u| job.has_applicant(&u.id)) {
        println!("You have applied to this job.");
    }
    println!("\n{}", textwrap::fill(&job.description, 72));
    if !job.requirements.is_empty() {
        println!("\nRequirements:");
        for item in &job.requirements {
            println!("  - {}", item);
        }
    }
    if !job.responsibilities.is_empty() {
        println!("\nResponsibilities:");
        for item in &job.responsibilities {
            println!("  - {}", item);
        }
    }
}
