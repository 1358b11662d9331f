use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(CreatorId);
id_newtype!(BrandId);

/// Label the backend and the operator use for "no platform filter".
pub const ALL_PLATFORMS: &str = "所有平台";

pub const CONTENT_PLATFORMS: [&str; 4] = ["抖音", "小红书", "B站", "快手"];

pub const MATCHING_PLATFORMS: [&str; 6] = [ALL_PLATFORMS, "抖音", "小红书", "B站", "快手", "微博"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Title,
    Script,
    Description,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Title => "title",
            ContentType::Script => "script",
            ContentType::Description => "description",
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(ContentType::Title),
            "script" => Ok(ContentType::Script),
            "description" => Ok(ContentType::Description),
            other => Err(format!("unknown content type '{other}'")),
        }
    }
}

/// Platform narrowing for brand matching. `All` is sent as an omitted field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(String),
}

impl PlatformFilter {
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label == ALL_PLATFORMS {
            PlatformFilter::All
        } else {
            PlatformFilter::Only(label.to_string())
        }
    }

    pub fn as_platform(&self) -> Option<&str> {
        match self {
            PlatformFilter::All => None,
            PlatformFilter::Only(platform) => Some(platform.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        self.as_platform().unwrap_or(ALL_PLATFORMS)
    }
}

/// A brand as offered for selection and sent verbatim as `brand_requirements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub budget: u64,
    pub target_audience: String,
    pub campaign_type: String,
    pub products_services: String,
    pub requirements: String,
}
