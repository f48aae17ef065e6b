//! Built-in, in-memory villa catalog.

use async_trait::async_trait;

use crate::domain::entities::Villa;
use crate::domain::repositories::VillaRepository;
use crate::error::AppError;

/// Catalog backed by a fixed list of villas.
///
/// [`StaticVillaRepository::default`] carries the property's own villas;
/// [`StaticVillaRepository::new`] accepts any list, which tests use to
/// exercise empty or single-entry catalogs.
pub struct StaticVillaRepository {
    villas: Vec<Villa>,
}

impl StaticVillaRepository {
    pub fn new(villas: Vec<Villa>) -> Self {
        Self { villas }
    }

    /// The property's villas in display order.
    pub fn builtin() -> Vec<Villa> {
        vec![
            Villa::new(
                1,
                "Villa Aurora",
                "A cliffside retreat facing the sunrise, with an infinity pool that \
                 spills toward the sea and terraces on every level.",
                "€1,450 / night",
                6,
                3,
                "/images/villas/aurora.jpg",
            )
            .with_amenities(&[
                "Infinity pool",
                "Private chef on request",
                "Outdoor kitchen",
                "Wi-Fi",
                "Air conditioning",
            ])
            .with_features(&["Sea view", "Three en-suite bedrooms", "Sunrise terrace"]),
            Villa::new(
                2,
                "Villa Olivia",
                "A restored stone farmhouse among century-old olive trees, a short \
                 walk from the village square.",
                "€980 / night",
                4,
                2,
                "/images/villas/olivia.jpg",
            )
            .with_amenities(&[
                "Heated pool",
                "Wood-fired oven",
                "Bicycles",
                "Wi-Fi",
            ])
            .with_features(&["Olive grove", "Original stonework", "Shaded pergola"]),
            Villa::new(
                3,
                "Villa Marea",
                "A beachfront pavilion with floor-to-ceiling glass, direct sand \
                 access and a rooftop lounge for long evenings.",
                "€2,100 / night",
                8,
                4,
                "/images/villas/marea.jpg",
            )
            .with_amenities(&[
                "Beach access",
                "Rooftop lounge",
                "Spa bath",
                "Daily housekeeping",
                "Wi-Fi",
                "Air conditioning",
            ])
            .with_features(&["Beachfront", "Four bedrooms", "Sunset rooftop"]),
        ]
    }
}

impl Default for StaticVillaRepository {
    fn default() -> Self {
        Self::new(Self::builtin())
    }
}

#[async_trait]
impl VillaRepository for StaticVillaRepository {
    async fn list(&self) -> Result<Vec<Villa>, AppError> {
        Ok(self.villas.clone())
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Villa>, AppError> {
        Ok(self.villas.iter().find(|v| v.id == id).cloned())
    }
}
