//! Villa entity from the read-only catalog.

use serde::Serialize;

/// A bookable villa.
///
/// Catalog data is immutable; sessions hold a clone of the selected villa.
/// `price` is a display string and is never used in arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Villa {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub max_guests: u8,
    pub bedrooms: u8,
    pub image: String,
    pub amenities: Vec<String>,
    pub features: Vec<String>,
}

impl Villa {
    /// Creates a villa with empty amenity and feature lists.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let villa = Villa::new(1, "Villa Aurora", "Cliffside suite", "€1,450 / night", 6, 3, "/img/aurora.jpg")
    ///     .with_amenities(&["Infinity pool", "Chef on request"]);
    /// ```
    pub fn new(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
        max_guests: u8,
        bedrooms: u8,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price: price.into(),
            max_guests,
            bedrooms,
            image: image.into(),
            amenities: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn with_amenities(mut self, amenities: &[&str]) -> Self {
        self.amenities = amenities.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_features(mut self, features: &[&str]) -> Self {
        self.features = features.iter().map(|s| s.to_string()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_villa_builder() {
        let villa = Villa::new(
            3,
            "Villa Test",
            "A test villa",
            "€900 / night",
            4,
            2,
            "/img/test.jpg",
        )
        .with_amenities(&["Pool"])
        .with_features(&["Sea view", "Garden"]);

        assert_eq!(villa.id, 3);
        assert_eq!(villa.amenities, vec!["Pool".to_string()]);
        assert_eq!(villa.features.len(), 2);
    }

    #[test]
    fn test_villa_serializes_camel_case() {
        let villa = Villa::new(1, "A", "B", "C", 6, 3, "/img/a.jpg");
        let json = serde_json::to_value(&villa).unwrap();

        assert_eq!(json["maxGuests"], 6);
        assert_eq!(json["bedrooms"], 3);
        assert!(json.get("max_guests").is_none());
    }
}
