use std::collections::BTreeMap;

/// A group class offered by the studio
#[derive(Debug, Clone)]
pub struct StudioClass {
    pub title: &'static str,
    pub description: &'static str,
    /// The content key holding the class image
    pub image_key: &'static str,
}

/// A single slot in the weekly schedule
#[derive(Debug, Clone)]
pub struct ScheduledClass {
    pub time: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone)]
pub struct ScheduleDay {
    pub day: &'static str,
    pub events: Vec<ScheduledClass>,
}

/// A membership plan as shown on the pricing table
#[derive(Debug, Clone)]
pub struct MembershipPlan {
    pub name: &'static str,
    /// The content key holding the monthly price
    pub price_key: &'static str,
    pub price: String,
    pub billing_note: Option<&'static str>,
    pub perks: Vec<&'static str>,
    pub highlighted: bool,
}

pub fn classes() -> Vec<StudioClass> {
    vec![
        StudioClass {
            title: "Mat Pilates",
            description: "Fortalecimento do core e flexibilidade através de movimentos controlados no solo.",
            image_key: "class-img-0",
        },
        StudioClass {
            title: "Spinning",
            description: "Pedale com alta intensidade ao som de músicas motivadoras.",
            image_key: "class-img-1",
        },
        StudioClass {
            title: "Jump",
            description: "Aula aeróbica divertida e intensa utilizando mini trampolins.",
            image_key: "class-img-2",
        },
        StudioClass {
            title: "Stepdance",
            description: "Coreografias rítmicas utilizando o step para queimar calorias e tonificar.",
            image_key: "class-img-3",
        },
    ]
}

pub fn schedule() -> Vec<ScheduleDay> {
    let weekday = |day: &'static str, events: &[(&'static str, &'static str)]| ScheduleDay {
        day,
        events: events
            .iter()
            .map(|&(time, name)| ScheduledClass { time, name })
            .collect(),
    };

    let alternating = [
        ("08:00", "Spinning"),
        ("16:00", "Mat Pilates"),
        ("19:00", "Spinning"),
        ("20:00", "Mat Pilates"),
    ];

    let dance_nights = [
        ("18:00", "Jump"),
        ("19:30", "Stepdance"),
        ("20:30", "Mat Pilates"),
    ];

    vec![
        weekday(
            "Segunda-Feira",
            &[
                ("07:00", "Mat Pilates"),
                ("16:00", "Mat Pilates"),
                ("19:00", "Spinning"),
                ("20:00", "Mat Pilates"),
            ],
        ),
        weekday(
            "Terça-Feira",
            &[
                ("07:00", "Spinning"),
                dance_nights[0],
                dance_nights[1],
                dance_nights[2],
            ],
        ),
        weekday("Quarta-Feira", &alternating),
        weekday(
            "Quinta-Feira",
            &[
                ("08:00", "Spinning"),
                dance_nights[0],
                dance_nights[1],
                dance_nights[2],
            ],
        ),
        weekday("Sexta-Feira", &alternating),
    ]
}

/// Returns the membership plans, with prices taken from the editable content.
pub fn membership_plans(content: &BTreeMap<String, String>) -> Vec<MembershipPlan> {
    let price = |key: &str| content.get(key).cloned().unwrap_or_default();

    vec![
        MembershipPlan {
            name: "Mensal",
            price_key: "price-monthly",
            price: price("price-monthly"),
            billing_note: None,
            perks: vec![
                "Acesso 1x ao dia",
                "Todas as Aulas em Grupo",
                "1 Consultoria de Treino",
                "Sem fidelidade",
            ],
            highlighted: false,
        },
        MembershipPlan {
            name: "Recorrente",
            price_key: "price-recurrent",
            price: price("price-recurrent"),
            billing_note: Some("Cobrança automática no cartão"),
            perks: vec![
                "Acesso Ilimitado (Várias vezes ao dia)",
                "Todas as Aulas em Grupo",
                "1 Consultoria de Treino",
                "Renovação Automática",
            ],
            highlighted: false,
        },
        MembershipPlan {
            name: "Anual",
            price_key: "price-annual",
            price: price("price-annual"),
            billing_note: Some("12x no cartão"),
            perks: vec![
                "4 Avaliações Físicas Gratuitas",
                "Acesso Total e Ilimitado",
                "Todas as Aulas em Grupo",
                "Acesso ao Personal IA",
            ],
            highlighted: true,
        },
    ]
}
