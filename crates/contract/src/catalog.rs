//! Static variable catalog
//!
//! Two vocabularies are kept deliberately separate. The display catalog is
//! the legacy flat-name vocabulary, grouped by category for menus and
//! authoring help. The substitution-supported set adds the dot-qualified
//! modern vocabulary on top. Templates from either generation keep working;
//! the tables must not be merged without checking every deployed template.

use serde::Serialize;

/// Display grouping for catalog entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Payer,
    Agreement,
    Land,
    Company,
}

/// Typed formatter a variable's value is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Area,
    Money,
    MoneyWords,
    Share,
    Date,
}

/// One display-catalog row
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub category: Category,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ValueKind,
}

/// Legacy flat-name vocabulary, grouped for display
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        category: Category::Payer,
        name: "payer_full_name",
        description: "Повне ім'я орендодавця",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Payer,
        name: "payer_tax_id",
        description: "Податковий номер (РНОКПП)",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Payer,
        name: "payer_address",
        description: "Адреса реєстрації",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Payer,
        name: "payer_passport",
        description: "Паспортні дані",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Payer,
        name: "payer_birth_date",
        description: "Дата народження",
        kind: ValueKind::Date,
    },
    CatalogEntry {
        category: Category::Payer,
        name: "payer_phone",
        description: "Контактний телефон",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Agreement,
        name: "contract_number",
        description: "Номер договору",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Agreement,
        name: "contract_date",
        description: "Дата укладення",
        kind: ValueKind::Date,
    },
    CatalogEntry {
        category: Category::Agreement,
        name: "contract_term",
        description: "Строк дії, років",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Agreement,
        name: "contract_end_date",
        description: "Дата закінчення",
        kind: ValueKind::Date,
    },
    CatalogEntry {
        category: Category::Agreement,
        name: "rent_amount",
        description: "Орендна плата за рік",
        kind: ValueKind::Money,
    },
    CatalogEntry {
        category: Category::Agreement,
        name: "rent_amount_words",
        description: "Орендна плата прописом",
        kind: ValueKind::MoneyWords,
    },
    CatalogEntry {
        category: Category::Agreement,
        name: "payment_deadline",
        description: "Кінцевий строк оплати",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Agreement,
        name: "signing_place",
        description: "Місце укладення",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Land,
        name: "cadastre_number",
        description: "Кадастровий номер ділянки",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Land,
        name: "land_area",
        description: "Площа ділянки, га",
        kind: ValueKind::Area,
    },
    CatalogEntry {
        category: Category::Land,
        name: "land_share",
        description: "Частка у праві власності",
        kind: ValueKind::Share,
    },
    CatalogEntry {
        category: Category::Land,
        name: "land_location",
        description: "Місцезнаходження ділянки",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Land,
        name: "land_purpose",
        description: "Цільове призначення",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Land,
        name: "normative_value",
        description: "Нормативна грошова оцінка",
        kind: ValueKind::Money,
    },
    CatalogEntry {
        category: Category::Company,
        name: "company_name",
        description: "Назва орендаря",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Company,
        name: "company_edrpou",
        description: "Код ЄДРПОУ",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Company,
        name: "company_address",
        description: "Юридична адреса",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Company,
        name: "company_director",
        description: "Керівник",
        kind: ValueKind::Text,
    },
    CatalogEntry {
        category: Category::Company,
        name: "company_bank_details",
        description: "Банківські реквізити",
        kind: ValueKind::Text,
    },
];

/// Dot-qualified modern vocabulary, supported for substitution only
const MODERN_NAMES: &[(&str, ValueKind)] = &[
    ("payer.full_name", ValueKind::Text),
    ("payer.tax_id", ValueKind::Text),
    ("payer.address", ValueKind::Text),
    ("payer.birth_date", ValueKind::Date),
    ("agreement.number", ValueKind::Text),
    ("agreement.date", ValueKind::Date),
    ("agreement.end_date", ValueKind::Date),
    ("agreement.rent", ValueKind::Money),
    ("agreement.rent_words", ValueKind::MoneyWords),
    ("land.cadastre", ValueKind::Text),
    ("land.area", ValueKind::Area),
    ("land.share", ValueKind::Share),
    ("land.location", ValueKind::Text),
    ("company.name", ValueKind::Text),
    ("company.edrpou", ValueKind::Text),
    ("company.director", ValueKind::Text),
];

/// Names of the display catalog (the legacy vocabulary)
pub fn allowed_names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|entry| entry.name)
}

/// Human-readable description of a display-catalog variable
pub fn describe(name: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.description)
}

/// Display-catalog rows of one category, in table order
pub fn entries_for(category: Category) -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().filter(move |entry| entry.category == category)
}

/// Formatter kind for a name from either vocabulary
pub fn kind_of(name: &str) -> Option<ValueKind> {
    CATALOG
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.kind)
        .or_else(|| {
            MODERN_NAMES
                .iter()
                .find(|(modern, _)| *modern == name)
                .map(|(_, kind)| *kind)
        })
}

/// Whether a name may receive a business value during substitution
pub fn is_supported(name: &str) -> bool {
    kind_of(name).is_some()
}
