pub struct CategoryInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

/// Closed set of artwork categories as exposed to the host page.
pub const CATEGORY_MAP: &[CategoryInfo] = &[
    CategoryInfo {
        id: "sculpture",
        label: "Sculpture",
        icon: "🗿",
    },
    CategoryInfo {
        id: "painting",
        label: "Painting",
        icon: "🖼️",
    },
    CategoryInfo {
        id: "digital",
        label: "Digital art",
        icon: "💻",
    },
];

pub fn get_category_label(id: &str) -> String {
    CATEGORY_MAP
        .iter()
        .find(|c| c.id == id)
        .map_or("unknown", |c| c.label)
        .to_string()
}

pub fn get_category_icon(id: &str) -> &'static str {
    CATEGORY_MAP
        .iter()
        .find(|c| c.id == id)
        .map_or("🎨", |c| c.icon)
}
