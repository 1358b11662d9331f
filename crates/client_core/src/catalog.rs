//! Locally held brand catalog offered as matching input.

use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;
use shared::domain::{Brand, BrandId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read brand catalog {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid brand catalog {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("brand catalog is empty")]
    Empty,
    #[error("duplicate brand id {0}")]
    DuplicateId(BrandId),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    brands: Vec<Brand>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrandCatalog {
    brands: Vec<Brand>,
}

impl BrandCatalog {
    pub fn from_brands(brands: Vec<Brand>) -> Result<Self, CatalogError> {
        if brands.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for brand in &brands {
            if !seen.insert(brand.id) {
                return Err(CatalogError::DuplicateId(brand.id));
            }
        }
        Ok(Self { brands })
    }

    /// Reads `[[brands]]` tables from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let file: CatalogFile = toml::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_brands(file.brands)
    }

    pub fn builtin() -> Self {
        Self {
            brands: builtin_brands(),
        }
    }

    pub fn get(&self, id: BrandId) -> Option<&Brand> {
        self.brands.iter().find(|brand| brand.id == id)
    }

    pub fn first(&self) -> Option<&Brand> {
        self.brands.first()
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }
}

#[allow(clippy::too_many_arguments)]
fn brand(
    id: i64,
    name: &str,
    category: &str,
    description: &str,
    budget: u64,
    target_audience: &str,
    campaign_type: &str,
    products_services: &str,
    requirements: &str,
) -> Brand {
    Brand {
        id: BrandId(id),
        name: name.into(),
        category: category.into(),
        description: description.into(),
        budget,
        target_audience: target_audience.into(),
        campaign_type: campaign_type.into(),
        products_services: products_services.into(),
        requirements: requirements.into(),
    }
}

fn builtin_brands() -> Vec<Brand> {
    vec![
        brand(
            1,
            "时尚品牌A",
            "时尚",
            "专注于年轻潮流服饰。",
            500000,
            "18-35岁女性，追求时尚与个性",
            "品牌推广",
            "时尚服饰、潮流配饰",
            "粉丝量10万+，互动率5%+，时尚穿搭类创作者",
        ),
        brand(
            2,
            "科技公司B",
            "科技",
            "领先的智能硬件和软件解决方案提供商。",
            800000,
            "25-40岁男性，关注前沿科技",
            "产品发布",
            "智能手机、笔记本电脑、智能家居",
            "科技垂直领域，粉丝量5万+，能进行专业评测和深度解读",
        ),
        brand(
            3,
            "美妆品牌C",
            "美妆",
            "提供高端护肤品和彩妆产品。",
            600000,
            "20-45岁女性，注重护肤和彩妆品质",
            "新品上市",
            "精华液、口红、粉底",
            "美妆垂类，粉丝量8万+，内容精致，有产品深度评测能力",
        ),
        brand(
            4,
            "旅游服务商D",
            "旅行",
            "专注于全球特色旅行线路和定制服务。",
            400000,
            "25-50岁，热爱旅行，追求独特体验的人群",
            "目的地推广",
            "欧洲游、海岛度假、定制小团",
            "旅行博主，粉丝量15万+，vlog制作精良，善于分享旅行体验",
        ),
        brand(
            5,
            "宠物用品E",
            "萌宠",
            "生产高品质宠物食品和玩具。",
            300000,
            "养猫狗的年轻家庭，关注宠物健康和生活品质",
            "品牌曝光",
            "猫粮、狗粮、智能喂食器、宠物玩具",
            "萌宠博主，粉丝量5万+，内容有趣，善于与宠物互动",
        ),
        brand(
            6,
            "健康食品F",
            "健康",
            "提供天然有机健康食品。",
            350000,
            "关注健康、健身、有机生活的人群",
            "产品试用",
            "蛋白粉、坚果、燕麦片",
            "健康/健身博主，粉丝量6万+，分享健康食谱或健身日常",
        ),
    ]
}
