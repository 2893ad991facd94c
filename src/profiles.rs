use crate::companies::company_slug;

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyReview {
    pub author: &'static str,
    pub role: &'static str,
    pub rating: u8,
    pub date: &'static str,
    pub title: &'static str,
    pub pros: &'static str,
    pub cons: &'static str,
    pub helpful: u32,
}

/// Reference data shown on a company's profile page.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyProfile {
    pub slug: &'static str,
    pub name: &'static str,
    pub initials: &'static str,
    pub description: &'static str,
    pub industry: &'static str,
    pub size: &'static str,
    pub location: &'static str,
    pub website: &'static str,
    pub founded: &'static str,
    pub rating: f32,
    pub total_reviews: u32,
    pub benefits: &'static [&'static str],
    pub culture: &'static str,
    pub reviews: &'static [CompanyReview],
}

impl CompanyProfile {
    /// Star buckets (5 down to 1) with their share and estimated review count.
    pub fn rating_distribution(&self) -> [(u8, u32, u32); 5] {
        let count = |percent: u32| self.total_reviews * percent / 100;
        [
            (5, 40, count(40)),
            (4, 35, count(35)),
            (3, 15, count(15)),
            (2, 7, count(7)),
            (1, 3, count(3)),
        ]
    }
}

/// Looks up a profile by company name or slug.
pub fn company_profile(name_or_slug: &str) -> Option<&'static CompanyProfile> {
    let slug = company_slug(name_or_slug);
    PROFILES.iter().find(|profile| profile.slug == slug)
}

static PROFILES: [CompanyProfile; 5] = [
    CompanyProfile {
        slug: "lendmn",
        name: "LendMN",
        initials: "LM",
        description: "LendMN нь Монголын санхүүгийн салбарын тэргүүлэгч компани бөгөөд олон нийтэд зээл, санхүүгийн үйлчилгээ үзүүлдэг. Бид технологи, инновацид тулгуурласан шийдлүүдээр хэрэглэгчдэд хялбар, найдвартай үйлчилгээ санал болгодог.",
        industry: "Санхүү/Зээл",
        size: "100-200 ажилтан",
        location: "Улаанбаатар, Монгол",
        website: "www.lendmn.mn",
        founded: "2015",
        rating: 4.5,
        total_reviews: 47,
        benefits: &[
            "Эрүүл мэндийн даатгал",
            "Урамшуулал, шагнал",
            "Гадаад сургалт",
            "Уян хатан цагийн хуваарь",
            "Хамт олны арга хэмжээ",
        ],
        culture: "Бид залуу, эрч хүчтэй баг бөгөөд инновацид нээлттэй орчинг бүрдүүлдэг. Ажилтан бүрийн санаа бодлыг үнэлж, хамтын ажиллагааг дэмждэг.",
        reviews: &[
            CompanyReview {
                author: "Б.Болд",
                role: "Senior Developer",
                rating: 5,
                date: "2025-01-05",
                title: "Маш сайн ажлын орчин",
                pros: "Технологийн чиглэлээр маш сайн ажиллаж байгаа компани. Багийнхан туслалцаа, дэмжлэг үзүүлдэг. Цалин, нөхцөл сайн.",
                cons: "Заримдаа ажлын ачаалал их байдаг.",
                helpful: 12,
            },
            CompanyReview {
                author: "Э.Сарангэрэл",
                role: "Product Manager",
                rating: 4,
                date: "2024-12-20",
                title: "Хөгжлийн боломжтой",
                pros: "Мэргэжлийн хөгжлийн маш их боломж. Менежмент сайн.",
                cons: "Процесс заримдаа удаан байдаг.",
                helpful: 8,
            },
        ],
    },
    CompanyProfile {
        slug: "tiger-finance",
        name: "Tiger Finance",
        initials: "TF",
        description: "Tiger Finance нь санхүүгийн зөвлөгөө, хөрөнгө оруулалтын үйлчилгээ үзүүлдэг байгууллага юм. Бид хувь хүн болон байгууллагуудад мэргэжлийн санхүүгийн шийдэл санал болгодог.",
        industry: "Санхүү/Хөрөнгө оруулалт",
        size: "50-100 ажилтан",
        location: "Улаанбаатар, Монгол",
        website: "www.tigerfinance.mn",
        founded: "2018",
        rating: 4.2,
        total_reviews: 32,
        benefits: &[
            "Эрүүл мэндийн даатгал",
            "Ажлын гүйцэтгэлийн урамшуулал",
            "Мэргэжлийн хөгжил",
            "Амралтын нэмэгдэл өдөр",
        ],
        culture: "Бид мэргэжлийн, найрсаг орчинг бүрдүүлж, ажилтан бүрийн хувийн хөгжилд анхаарч ажилладаг.",
        reviews: &[CompanyReview {
            author: "Д.Мөнхбат",
            role: "Financial Analyst",
            rating: 4,
            date: "2025-01-10",
            title: "Мэргэжлийн баг",
            pros: "Мэргэжлийн боловсон хүчин. Сайн сургалт, хөгжил.",
            cons: "Ажлын даралт заримдаа их.",
            helpful: 6,
        }],
    },
    CompanyProfile {
        slug: "таван-богд",
        name: "Таван Богд",
        initials: "ТБ",
        description: "Таван Богд групп нь үл хөдлөх хөрөнгө, барилга, зочид буудлын чиглэлээр үйл ажиллагаа явуулдаг томоохон групп компани юм.",
        industry: "Үл хөдлөх хөрөнгө/Барилга",
        size: "200+ ажилтан",
        location: "Улаанбаатар, Монгол",
        website: "www.tavanbogd.mn",
        founded: "2005",
        rating: 4.3,
        total_reviews: 68,
        benefits: &[
            "Эрүүл мэндийн даатгал",
            "Тээврийн зардал",
            "Сургалт хөгжил",
            "Амралтын байр",
            "Урамшуулалын систем",
        ],
        culture: "Тогтвортой хөгжилд чиглэсэн, ажилтнуудаа хөгжүүлэхэд анхаардаг, уламжлалт үнэт зүйлтэй компани.",
        reviews: &[CompanyReview {
            author: "Ц.Оюунаа",
            role: "HR Specialist",
            rating: 4,
            date: "2024-12-28",
            title: "Тогтвортой компани",
            pros: "Тогтвортой, урт хугацааны ажлын байр. Олон давуу тал.",
            cons: "Шинэчлэл удаан.",
            helpful: 10,
        }],
    },
    CompanyProfile {
        slug: "and-systems",
        name: "AND Systems",
        initials: "AS",
        description: "AND Systems нь програм хангамж хөгжүүлэлт, системийн интеграци, IT зөвлөгөө үзүүлдэг технологийн компани юм. Бид олон улсын жишгийн шийдлүүдийг санал болгодог.",
        industry: "IT/Програм хангамж",
        size: "50-100 ажилтан",
        location: "Улаанбаатар, Монгол",
        website: "www.andsystems.mn",
        founded: "2012",
        rating: 4.6,
        total_reviews: 54,
        benefits: &[
            "Уян хатан цагийн хуваарь",
            "Гэрээс ажиллах",
            "Технологийн сургалт",
            "Гадаад командировк",
            "Эрүүл мэндийн даатгал",
        ],
        culture: "Технологи, инновацид дурлах багийнхан. Суралцах, туршиж үзэх, өөрийгөө хөгжүүлэх боломжоор дүүрэн.",
        reviews: &[CompanyReview {
            author: "Г.Батбаяр",
            role: "Frontend Developer",
            rating: 5,
            date: "2025-01-08",
            title: "IT-д сайн компани",
            pros: "Шинэ технологи, суралцах боломж их. Уян хатан цагийн хуваарь.",
            cons: "Ажлын орон зай жижиг.",
            helpful: 15,
        }],
    },
    CompanyProfile {
        slug: "g-mobile",
        name: "G-Mobile",
        initials: "GM",
        description: "G-Mobile нь Монголын тэргүүлэгч утасны операторын компани бөгөөд олон сая хэрэглэгчдэд үйлчилгээ үзүүлж байна.",
        industry: "Телекомуникаци",
        size: "500+ ажилтан",
        location: "Улаанбаатар, Монгол",
        website: "www.gmobile.mn",
        founded: "2006",
        rating: 4.1,
        total_reviews: 89,
        benefits: &[
            "Эрүүл мэндийн даатгал",
            "Утасны хөнгөлөлт",
            "Сургалт",
            "Амралтын нэмэгдэл",
            "Урамшуулал",
        ],
        culture: "Том байгууллагын тогтвортой, найдвартай орчин. Карьерын өсөлтийн олон боломжтой.",
        reviews: &[CompanyReview {
            author: "П.Ганзориг",
            role: "Customer Service",
            rating: 4,
            date: "2024-12-15",
            title: "Том компанийн туршлага",
            pros: "Том компанийн найдвартай орчин. Давуу тал их.",
            cons: "Хурдан өсөх боломж багатай.",
            helpful: 7,
        }],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_lookup_by_slug_and_name() {
        let by_slug = company_profile("and-systems").unwrap();
        assert_eq!(by_slug.name, "AND Systems");
        assert_eq!(by_slug.founded, "2012");

        let by_name = company_profile("Tiger Finance").unwrap();
        assert_eq!(by_name.slug, "tiger-finance");
        assert_eq!(by_name.reviews.len(), 1);

        let cyrillic = company_profile("Таван Богд").unwrap();
        assert_eq!(cyrillic.initials, "ТБ");
    }

    #[test]
    fn test_unknown_company_has_no_profile() {
        assert!(company_profile("acme-corp").is_none());
        assert!(company_profile("").is_none());
    }

    #[test]
    fn test_every_profile_slug_matches_its_name() {
        for profile in &PROFILES {
            assert_eq!(company_slug(profile.name), profile.slug);
            assert!(profile.reviews.iter().all(|r| (1..=5).contains(&r.rating)));
        }
    }

    #[test]
    fn test_rating_distribution() {
        let profile = company_profile("lendmn").unwrap();
        let buckets = profile.rating_distribution();
        assert_eq!(buckets[0], (5, 40, 18));
        assert_eq!(buckets[1], (4, 35, 16));
        assert_eq!(buckets[4], (1, 3, 1));
    }
}
