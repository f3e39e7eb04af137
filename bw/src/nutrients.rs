use crate::basic_models::NutrientMap;

/// Whole-recipe total divided by the serving count, rounded down. Zero servings count as one.
pub fn per_serving(total: f64, servings: u32) -> u64 {
    // `as` saturates, so NaN and negative totals land on 0
    (total / f64::from(servings.max(1))).floor() as u64
}

/// Per-serving values for all four nutrients. The stored totals are left untouched.
pub fn project(totals: &NutrientMap<f64>, servings: u32) -> NutrientMap<u64> {
    totals.map(|_, total| per_serving(*total, servings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(900.0, 2, 450; "even split")]
    #[test_case(100.0, 3, 33; "floors")]
    #[test_case(25.5, 2, 12; "fractional total")]
    #[test_case(0.0, 4, 0; "nothing")]
    #[test_case(7.0, 1, 7; "single serving")]
    fn divides_and_floors(total: f64, servings: u32, expected: u64) {
        assert_eq!(per_serving(total, servings), expected);
    }

    #[test]
    fn zero_servings_counts_as_one() {
        assert_eq!(per_serving(250.0, 0), per_serving(250.0, 1));
    }

    #[test]
    fn projects_every_key() {
        let totals = NutrientMap {
            kcal: 900.0,
            protein: 31.0,
            carbs: 120.0,
            fat: 25.5,
        };
        let projected = project(&totals, 2);
        assert_eq!(
            projected,
            NutrientMap {
                kcal: 450,
                protein: 15,
                carbs: 60,
                fat: 12
            }
        );
        assert_eq!(totals.kcal, 900.0);
    }
}
