use crate::models::PricingPlan;

fn plan(
    name: &str,
    price: &str,
    description: &str,
    features: &[&str],
    popular: Option<bool>,
) -> PricingPlan {
    PricingPlan {
        name: name.to_string(),
        price: price.to_string(),
        period: "сард".to_string(),
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        popular,
    }
}

/// The employer posting packages shown on the pricing page.
pub fn pricing_plans() -> Vec<PricingPlan> {
    vec![
        plan(
            "Үнэгүй",
            "0₮",
            "Жижиг компаниудад",
            &[
                "1 ажлын зар",
                "30 хоног идэвхтэй",
                "Энгийн жагсаалтад гарах",
                "Өргөдлүүдийг харах",
            ],
            None,
        ),
        plan(
            "Стандарт",
            "150,000₮",
            "Дунд компаниудад",
            &[
                "10 ажлын зар",
                "60 хоног идэвхтэй",
                "Жагсаалтын дээд хэсэгт гарах",
                "Өргөдлүүдийг харах",
                "Компанийн профайл холбоос",
                "И-мэйл дэмжлэг",
            ],
            Some(true),
        ),
        plan(
            "Boost",
            "300,000₮",
            "Том компаниудад",
            &[
                "Хязгааргүй ажлын зар",
                "90 хоног идэвхтэй",
                "Голд badge",
                "Нүүр хуудсанд онцлох",
                "Өргөдлүүдийг нэн даруй харах",
                "Олон компанийн профайл",
                "Приоритет дэмжлэг",
                "Статистик тайлан",
            ],
            None,
        ),
    ]
}
