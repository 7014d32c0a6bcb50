//! Food-group gap analysis
//!
//! Classifies a day's meals into food groups by name and scores how complete
//! the day was. Matching is by keyword, so a meal can count toward several
//! groups ("chicken salad" is protein and vegetables).

use serde::Serialize;

use super::constants::{
    DAIRY_MAX_POINTS, FRUITS_MAX_POINTS, GRAINS_MAX_POINTS, MAX_COMPLETENESS_SCORE,
    MIN_PROTEIN_SERVINGS, MIN_VEGETABLE_SERVINGS, POINTS_PER_SERVING, PROTEIN_MAX_POINTS,
    VEGETABLES_MAX_POINTS, WATER_MAX_POINTS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodGroup {
    Protein,
    Vegetables,
    Fruits,
    Grains,
    Dairy,
    Water,
}

impl FoodGroup {
    pub const ALL: [FoodGroup; 6] = [
        FoodGroup::Protein,
        FoodGroup::Vegetables,
        FoodGroup::Fruits,
        FoodGroup::Grains,
        FoodGroup::Dairy,
        FoodGroup::Water,
    ];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            FoodGroup::Protein => &["chicken", "fish", "egg", "beans", "beef", "turkey", "tofu", "lentil", "salmon", "tuna"],
            FoodGroup::Vegetables => &["salad", "vegetable", "broccoli", "spinach", "carrot", "kale"],
            FoodGroup::Fruits => &["fruit", "apple", "banana", "orange", "berry", "berries", "mango"],
            FoodGroup::Grains => &["rice", "bread", "oat", "pasta", "quinoa", "cereal"],
            FoodGroup::Dairy => &["milk", "yogurt", "yoghurt", "cheese"],
            FoodGroup::Water => &["water"],
        }
    }

    /// Points available to this group in the completeness score
    pub fn max_points(&self) -> u32 {
        match self {
            FoodGroup::Protein => PROTEIN_MAX_POINTS,
            FoodGroup::Vegetables => VEGETABLES_MAX_POINTS,
            FoodGroup::Fruits => FRUITS_MAX_POINTS,
            FoodGroup::Grains => GRAINS_MAX_POINTS,
            FoodGroup::Dairy => DAIRY_MAX_POINTS,
            FoodGroup::Water => WATER_MAX_POINTS,
        }
    }

    pub fn matches(&self, meal_name: &str) -> bool {
        let name = meal_name.to_lowercase();
        self.keywords().iter().any(|k| name.contains(k))
    }
}

/// Number of meals that hit each group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FoodGroupCounts {
    pub protein: u32,
    pub vegetables: u32,
    pub fruits: u32,
    pub grains: u32,
    pub dairy: u32,
    pub water: u32,
}

impl FoodGroupCounts {
    pub fn get(&self, group: FoodGroup) -> u32 {
        match group {
            FoodGroup::Protein => self.protein,
            FoodGroup::Vegetables => self.vegetables,
            FoodGroup::Fruits => self.fruits,
            FoodGroup::Grains => self.grains,
            FoodGroup::Dairy => self.dairy,
            FoodGroup::Water => self.water,
        }
    }

    fn bump(&mut self, group: FoodGroup) {
        let slot = match group {
            FoodGroup::Protein => &mut self.protein,
            FoodGroup::Vegetables => &mut self.vegetables,
            FoodGroup::Fruits => &mut self.fruits,
            FoodGroup::Grains => &mut self.grains,
            FoodGroup::Dairy => &mut self.dairy,
            FoodGroup::Water => &mut self.water,
        };
        *slot += 1;
    }

    /// Tally meal names
    pub fn from_meals<'a, I>(meal_names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = Self::default();
        for name in meal_names {
            for group in FoodGroup::ALL {
                if group.matches(name) {
                    counts.bump(group);
                }
            }
        }
        counts
    }

    /// 0-100; each serving earns points up to the group's cap
    pub fn completeness_score(&self) -> u32 {
        let total: u32 = FoodGroup::ALL
            .iter()
            .map(|g| (self.get(*g) * POINTS_PER_SERVING).min(g.max_points()))
            .sum();
        total.min(MAX_COMPLETENESS_SCORE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapAnalysis {
    pub food_groups: FoodGroupCounts,
    pub score: u32,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<&'static str>,
}

/// Analyze a day's meals for food-group gaps
pub fn analyze_gaps<'a, I>(meal_names: I) -> GapAnalysis
where
    I: IntoIterator<Item = &'a str>,
{
    let food_groups = FoodGroupCounts::from_meals(meal_names);

    let mut recommendations = Vec::new();
    if food_groups.protein < MIN_PROTEIN_SERVINGS {
        recommendations.push("Add more protein sources - aim for protein at each meal");
    }
    if food_groups.vegetables < MIN_VEGETABLE_SERVINGS {
        recommendations.push("Increase vegetable intake - aim for 5 servings daily");
    }

    let risk_level = if recommendations.is_empty() {
        recommendations.push("Great nutritional balance! Keep up the excellent work!");
        RiskLevel::Low
    } else {
        RiskLevel::Medium
    };

    GapAnalysis {
        score: food_groups.completeness_score(),
        food_groups,
        risk_level,
        recommendations,
    }
}
