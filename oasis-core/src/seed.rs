//! Data the site ships with before any admin edits.

use std::collections::BTreeMap;

use crate::WorkoutPlan;

const TEMPLATES: &str = include_str!("../seed/templates.json");

/// Text, image and price fields of the site, keyed by the identifier the markup uses.
const CONTENT: [(&str, &str); 21] = [
    ("hero-title", "Centro de \nTreinamento"),
    ("hero-subtitle", "Pilates, Spinning, Jump e Dança. Foco total em atendimento personalizado para transformar corpo e mente."),
    ("hero-bg", "https://images.unsplash.com/photo-1534438327276-14e5300c3a48?q=80&w=2070&auto=format&fit=crop"),
    ("class-img-0", "https://images.unsplash.com/photo-1518611012118-696072aa579a?q=80&w=2070&auto=format&fit=crop"),
    ("class-img-1", "https://images.unsplash.com/photo-1534438327276-14e5300c3a48?q=80&w=2070&auto=format&fit=crop"),
    ("class-img-2", "https://images.unsplash.com/photo-1517931524326-bdd55a541177?q=80&w=2070&auto=format&fit=crop"),
    ("class-img-3", "https://images.unsplash.com/photo-1535525266638-c5f718b58256?q=80&w=1767&auto=format&fit=crop"),
    ("price-monthly", "149,90"),
    ("price-recurrent", "149,90"),
    ("price-annual", "119,90"),
    ("news-title", "EM BREVE: NOVO ESPAÇO OASIS"),
    ("news-subtitle", "Estamos expandindo! Confira o que vem por aí no nosso novo complexo esportivo."),
    ("news-img-swim", "https://images.unsplash.com/photo-1530549387789-4c1017266635?q=80&w=2070&auto=format&fit=crop"),
    ("news-desc-swim", "Piscinas aquecidas para Hidroginástica e metodologia lúdica exclusiva para Natação Kids."),
    ("news-list-swim", "• Natação Kids\n• Natação Bebê\n• Hidroginástica\n• Hidro Power"),
    ("news-img-fight", "https://images.unsplash.com/photo-1599058945522-28d584b6f0ff?q=80&w=2069&auto=format&fit=crop"),
    ("news-desc-fight", "Novo dojo profissional equipado para alta performance."),
    ("news-list-fight", "• Jiu-Jitsu\n• Muay Thai\n• Boxe\n• Defesa Pessoal"),
    ("news-img-dance", "https://images.unsplash.com/photo-1508700929628-666bc8bd84ea?q=80&w=2070&auto=format&fit=crop"),
    ("news-desc-dance", "Salas amplas com piso flutuante para diversas modalidades."),
    ("news-list-dance", "• Ballet Clássico\n• Jazz\n• Danças Urbanas\n• Fit Dance"),
];

/// The curated template bank bundled with the binary.
pub fn default_templates() -> Result<Vec<WorkoutPlan>, serde_json::Error> {
    serde_json::from_str(TEMPLATES)
}

/// The default value of every editable content field.
pub fn default_content() -> BTreeMap<String, String> {
    CONTENT
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
