// 🍣 Plate Type Entity - A priced plate category shared by all participants

use serde::{Deserialize, Serialize};

/// A priced category of plate (e.g. a colored sushi plate).
///
/// Identity: integer id, unique within one session, assigned by the session
/// as `max(existing ids) + 1` (or 1 for an empty registry).
/// Values: display name (at most 20 code points, non-empty after trimming)
/// and unit price in whole yen (at most 100_000).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateType {
    pub id: u32,
    pub name: String,
    pub unit_price: u32,
}

impl PlateType {
    pub fn new(id: u32, name: impl Into<String>, unit_price: u32) -> Self {
        PlateType {
            id,
            name: name.into(),
            unit_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plate_type_construction() {
        let plate = PlateType::new(1, "赤皿", 100);
        assert_eq!(plate.id, 1);
        assert_eq!(plate.name, "赤皿");
        assert_eq!(plate.unit_price, 100);
    }
}
