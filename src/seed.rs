use chrono::NaiveDate;

use crate::models::{Job, JobStatus};

struct SeedJob<'a> {
    id: &'a str,
    title: &'a str,
    company: &'a str,
    location: &'a str,
    category: &'a str,
    salary: &'a str,
    salary_min: i64,
    salary_max: i64,
    experience: &'a str,
    description: &'a str,
    requirements: [&'a str; 4],
    responsibilities: [&'a str; 4],
    posted: (i32, u32, u32),
    employer_id: &'a str,
}

impl SeedJob<'_> {
    fn build(&self) -> Option<Job> {
        let (y, m, d) = self.posted;
        Some(Job {
            id: self.id.to_string(),
            title: self.title.to_string(),
            company: self.company.to_string(),
            logo: None,
            location: self.location.to_string(),
            category: self.category.to_string(),
            salary: self.salary.to_string(),
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            experience: self.experience.to_string(),
            description: self.description.to_string(),
            requirements: self.requirements.iter().map(|s| s.to_string()).collect(),
            responsibilities: self.responsibilities.iter().map(|s| s.to_string()).collect(),
            posted_date: NaiveDate::from_ymd_opt(y, m, d)?,
            employer_id: self.employer_id.to_string(),
            status: JobStatus::Approved,
            applicants: Vec::new(),
        })
    }
}

const SEED: [SeedJob<'static>; 7] = [
    SeedJob {
        id: "1",
        title: "Ахлах Backend хөгжүүлэгч",
        company: "LendMN",
        location: "Улаанбаатар",
        category: "IT",
        salary: "4,000,000-7,000,000₮",
        salary_min: 4_000_000,
        salary_max: 7_000_000,
        experience: "Ахлах",
        description: "LendMN нь санхүүгийн салбарт тэргүүлэгч компани бөгөөд бид ахлах backend хөгжүүлэгч хайж байна.",
        requirements: ["Python, Django 5+ жил", "PostgreSQL, Redis", "Microservices архитектур", "Docker, Kubernetes"],
        responsibilities: ["Backend API хөгжүүлэх", "Database design хийх", "Баг удирдах", "Code review хийх"],
        posted: (2025, 1, 10),
        employer_id: "emp1",
    },
    SeedJob {
        id: "2",
        title: "Маркетинг мэргэжилтэн",
        company: "Tiger Finance",
        location: "Улаанбаатар",
        category: "Маркетинг",
        salary: "1,800,000-2,500,000₮",
        salary_min: 1_800_000,
        salary_max: 2_500_000,
        experience: "Дунд түвшин",
        description: "Tiger Finance компани digital маркетингийн мэргэжилтэн авна.",
        requirements: ["Digital marketing 3+ жил", "Social media management", "Content creation", "Analytics"],
        responsibilities: ["Маркетинг стратеги боловсруулах", "Social media удирдах", "Агуулга бэлтгэх", "Кампанит ажил явуулах"],
        posted: (2025, 1, 12),
        employer_id: "emp2",
    },
    SeedJob {
        id: "3",
        title: "HR Менежер",
        company: "Таван Богд",
        location: "Улаанбаатар",
        category: "HR",
        salary: "2,000,000-3,500,000₮",
        salary_min: 2_000_000,
        salary_max: 3_500_000,
        experience: "Дунд түвшин",
        description: "Таван Богд групп HR менежер хайж байна.",
        requirements: ["HR менежмент 3-5 жил", "Recruitment туршлага", "Харилцааны ур чадвар", "MS Office"],
        responsibilities: ["Сонгон шалгаруулалт явуулах", "Ажилтнуудыг удирдах", "Сургалт зохион байгуулах", "Performance үнэлгээ хийх"],
        posted: (2025, 1, 8),
        employer_id: "emp3",
    },
    SeedJob {
        id: "4",
        title: "Frontend Developer (React)",
        company: "AND Systems",
        location: "Улаанбаатар",
        category: "IT",
        salary: "2,500,000-4,000,000₮",
        salary_min: 2_500_000,
        salary_max: 4_000_000,
        experience: "Дунд түвшин",
        description: "React ашиглан web application хөгжүүлэх ажилд урьж байна.",
        requirements: ["React, TypeScript 2-4 жил", "Tailwind CSS", "REST API", "Git"],
        responsibilities: ["UI компонент хөгжүүлэх", "Backend-тэй холбох", "Responsive design", "Код сайжруулах"],
        posted: (2025, 1, 15),
        employer_id: "emp4",
    },
    SeedJob {
        id: "5",
        title: "Харилцагчийн үйлчилгээний ажилтан",
        company: "G-Mobile",
        location: "Улаанбаатар",
        category: "Үйлчилгээ",
        salary: "1,000,000-1,500,000₮",
        salary_min: 1_000_000,
        salary_max: 1_500_000,
        experience: "Шинэ төгсөгч",
        description: "G-Mobile компанид харилцагчийн үйлчилгээний ажилтан шаардлагатай байна.",
        requirements: ["Харилцааны ур чадвар", "Монгол, англи хэл", "Computer ур чадвар", "Тэвчээртэй"],
        responsibilities: ["Харилцагчдад үйлчлэх", "Гомдол шийдвэрлэх", "Борлуулалт хийх", "Тайлан бэлтгэх"],
        posted: (2025, 1, 14),
        employer_id: "emp5",
    },
    SeedJob {
        id: "6",
        title: "Санхүүгийн анализч",
        company: "LendMN",
        location: "Улаанбаатар",
        category: "Санхүү",
        salary: "2,200,000-3,800,000₮",
        salary_min: 2_200_000,
        salary_max: 3_800_000,
        experience: "Дунд түвшин",
        description: "Санхүүгийн анализ, тайлан бэлтгэх ажил.",
        requirements: ["Санхүү, эдийн засаг боловсрол", "Excel, PowerBI", "2-4 жил туршлага", "Англи хэл"],
        responsibilities: ["Санхүүгийн анализ", "Тайлан бэлтгэх", "Budget төлөвлөх", "Зөвлөгөө өгөх"],
        posted: (2025, 1, 11),
        employer_id: "emp1",
    },
    SeedJob {
        id: "7",
        title: "DevOps Engineer",
        company: "AND Systems",
        location: "Дархан",
        category: "IT",
        salary: "3,500,000-5,500,000₮",
        salary_min: 3_500_000,
        salary_max: 5_500_000,
        experience: "Ахлах",
        description: "DevOps engineer CI/CD, cloud infrastructure удирдах.",
        requirements: ["Linux системд чөлөөтэй", "Docker, Kubernetes", "AWS/GCP", "Terraform, Ansible"],
        responsibilities: ["Infrastructure удирдах", "CI/CD pipeline", "Monitoring хийх", "Security хангах"],
        posted: (2025, 1, 9),
        employer_id: "emp4",
    },
];

/// Example postings written to an empty store on first start.
pub fn seed_jobs() -> Vec<Job> {
    SEED.iter().filter_map(SeedJob::build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_seven_approved_jobs() {
        let jobs = seed_jobs();
        assert_eq!(jobs.len(), 7);
        assert!(jobs.iter().all(|j| j.status == JobStatus::Approved));
        assert!(jobs.iter().all(|j| j.applicants.is_empty()));
    }

    #[test]
    fn test_seed_ids_are_unique_and_ordered() {
        let ids: Vec<String> = seed_jobs().into_iter().map(|j| j.id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn test_seed_salary_bounds_are_consistent() {
        for job in seed_jobs() {
            assert!(job.salary_min <= job.salary_max, "job {} has inverted salary", job.id);
        }
    }
}
