use serde::{Deserialize, Serialize};

/// Physical state of a structure on the nine-step Ross-Heidecke scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionRating {
    Excellent,
    VeryGood,
    Good,
    Fair,
    MinorRepairs,
    MajorRepairs,
    VeryPoor,
    Demolition,
    Worthless,
}

impl ConditionRating {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Excellent,
            Self::VeryGood,
            Self::Good,
            Self::Fair,
            Self::MinorRepairs,
            Self::MajorRepairs,
            Self::VeryPoor,
            Self::Demolition,
            Self::Worthless,
        ]
    }

    /// Maps a 1-9 rating to its variant; anything outside the scale is `None`.
    pub fn from_rating(rating: i64) -> Option<Self> {
        usize::try_from(rating)
            .ok()
            .and_then(|value| value.checked_sub(1))
            .and_then(|index| Self::ordered().get(index).copied())
    }

    pub const fn rating(self) -> u8 {
        self.column() as u8 + 1
    }

    /// Zero-based column of the coefficient table.
    pub const fn column(self) -> usize {
        match self {
            Self::Excellent => 0,
            Self::VeryGood => 1,
            Self::Good => 2,
            Self::Fair => 3,
            Self::MinorRepairs => 4,
            Self::MajorRepairs => 5,
            Self::VeryPoor => 6,
            Self::Demolition => 7,
            Self::Worthless => 8,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::MinorRepairs => "Needs Minor Repairs",
            Self::MajorRepairs => "Needs Major Repairs",
            Self::VeryPoor => "Very Poor",
            Self::Demolition => "Demolition",
            Self::Worthless => "Worthless",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_map_onto_table_columns() {
        for (index, condition) in ConditionRating::ordered().into_iter().enumerate() {
            assert_eq!(condition.column(), index);
            assert_eq!(condition.rating() as usize, index + 1);
            assert_eq!(
                ConditionRating::from_rating(condition.rating() as i64),
                Some(condition)
            );
        }
    }

    #[test]
    fn ratings_outside_the_scale_are_rejected() {
        assert_eq!(ConditionRating::from_rating(0), None);
        assert_eq!(ConditionRating::from_rating(10), None);
        assert_eq!(ConditionRating::from_rating(-3), None);
    }
}
