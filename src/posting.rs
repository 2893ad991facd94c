use crate::models::NewJob;

pub const DEFAULT_LOCATION: &str = "Улаанбаатар";
pub const DEFAULT_CATEGORY: &str = "IT";
pub const DEFAULT_EXPERIENCE: &str = "Дунд түвшин";
pub const DEFAULT_SALARY_MIN: i64 = 1_000_000;
pub const DEFAULT_SALARY_MAX: i64 = 2_000_000;

/// Millions with one decimal, exact halves rounded away from zero.
fn millions(amount: i64) -> String {
    let tenths = (amount.unsigned_abs() + 50_000) / 100_000;
    let sign = if amount < 0 && tenths > 0 { "-" } else { "" };
    format!("{}{}.{}", sign, tenths / 10, tenths % 10)
}

/// Display label for a salary range in millions, e.g. `2.5-4.0М₮`.
pub fn salary_label(min: i64, max: i64) -> String {
    format!("{}-{}М₮", millions(min), millions(max))
}

/// Splits multi-line form input into items, dropping blank lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Employer-facing posting form as entered, before it becomes a `NewJob`.
#[derive(Debug, Clone)]
pub struct JobForm {
    pub title: String,
    pub location: String,
    pub category: String,
    pub salary_min: i64,
    pub salary_max: i64,
    pub experience: String,
    pub description: String,
    pub requirements: String,
    pub responsibilities: String,
    pub logo: Option<String>,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            location: DEFAULT_LOCATION.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            salary_min: DEFAULT_SALARY_MIN,
            salary_max: DEFAULT_SALARY_MAX,
            experience: DEFAULT_EXPERIENCE.to_string(),
            description: String::new(),
            requirements: String::new(),
            responsibilities: String::new(),
            logo: None,
        }
    }
}

impl JobForm {
    pub fn into_new_job(self, company: &str, employer_id: &str) -> NewJob {
        NewJob {
            salary: salary_label(self.salary_min, self.salary_max),
            title: self.title,
            company: company.to_string(),
            logo: self.logo,
            location: self.location,
            category: self.category,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            experience: self.experience,
            description: self.description,
            requirements: split_lines(&self.requirements),
            responsibilities: split_lines(&self.responsibilities),
            employer_id: employer_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_label() {
        assert_eq!(salary_label(1_000_000, 2_000_000), "1.0-2.0М₮");
        assert_eq!(salary_label(2_500_000, 4_000_000), "2.5-4.0М₮");
        assert_eq!(salary_label(0, 750_000), "0.0-0.8М₮");
    }

    #[test]
    fn test_salary_label_rounds_halves_up() {
        assert_eq!(salary_label(1_250_000, 2_250_000), "1.3-2.3М₮");
        assert_eq!(salary_label(1_249_999, 3_050_000), "1.2-3.1М₮");
        assert_eq!(salary_label(12_345_678, 9_950_000), "12.3-10.0М₮");
    }

    #[test]
    fn test_split_lines_drops_blanks() {
        let items = split_lines("Rust 3+ жил\n\n  PostgreSQL  \n   \nGit");
        assert_eq!(items, vec!["Rust 3+ жил", "PostgreSQL", "Git"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_form_defaults_and_conversion() {
        let form = JobForm {
            title: "Rust Engineer".to_string(),
            description: "Systems work".to_string(),
            requirements: "Rust\nTokio".to_string(),
            ..Default::default()
        };
        let job = form.into_new_job("AND Systems", "emp4");

        assert_eq!(job.company, "AND Systems");
        assert_eq!(job.employer_id, "emp4");
        assert_eq!(job.location, DEFAULT_LOCATION);
        assert_eq!(job.category, DEFAULT_CATEGORY);
        assert_eq!(job.experience, DEFAULT_EXPERIENCE);
        assert_eq!(job.salary, "1.0-2.0М₮");
        assert_eq!(job.requirements, vec!["Rust", "Tokio"]);
        assert!(job.responsibilities.is_empty());
    }
}
