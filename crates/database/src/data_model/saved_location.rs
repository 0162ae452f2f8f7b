use chrono::{DateTime, Utc};
use model::location::SavedLocation;
use sqlx::prelude::FromRow;
use utility::id::Id;

#[derive(Debug, Clone, FromRow)]
pub struct SavedLocationRow {
    pub id: i32,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub created_at: DateTime<Utc>,
}

impl SavedLocationRow {
    pub fn to_model(self) -> SavedLocation {
        SavedLocation {
            id: Id::new(self.id),
            name: self.name,
            x: self.x,
            y: self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_keeps_latitude_in_x() {
        let saved = SavedLocationRow {
            id: 3,
            name: "Harbour".to_owned(),
            x: 54.32,
            y: 10.14,
            created_at: Utc::now(),
        }
        .to_model();
        assert_eq!(saved.id, Id::new(3));
        let coordinate = saved.coordinate().unwrap();
        assert_eq!((coordinate.latitude(), coordinate.longitude()), (54.32, 10.14));
    }
}
