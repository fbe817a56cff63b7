use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Localization scenario. Picks the instruction template sent to the model.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scenario {
    #[default]
    SeoTitle,
    ProductDetail,
    CustomerService,
    Marketing,
}

impl Scenario {
    pub const ALL: [Scenario; 4] =
        [Self::SeoTitle, Self::ProductDetail, Self::CustomerService, Self::Marketing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SeoTitle => "SEO_TITLE",
            Self::ProductDetail => "PRODUCT_DETAIL",
            Self::CustomerService => "CUSTOMER_SERVICE",
            Self::Marketing => "MARKETING",
        }
    }

    /// Key prefix of this scenario in the locale tables.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Self::SeoTitle => "seo",
            Self::ProductDetail => "product",
            Self::CustomerService => "cs",
            Self::Marketing => "marketing",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scenario catalog entry with localized UI text
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct ScenarioInfo {
    pub id: Scenario,
    pub label: String,
    pub description: String,
    pub placeholder: String,
}
