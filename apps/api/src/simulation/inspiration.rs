//! Example scenarios offered per category as inspiration.

use crate::models::Category;

const CAREER: [&str; 3] = [
    "What if I quit my corporate job to become a professional photographer?",
    "What if I transition from marketing to software development?",
    "What if I take a sabbatical year to explore different career paths?",
];

const BUSINESS: [&str; 3] = [
    "What if I start a food truck business in my city?",
    "What if I launch an online course teaching my hobby skills?",
    "What if I open a coworking space in my neighborhood?",
];

const EDUCATION: [&str; 3] = [
    "What if I go back to school for a master's degree in a different field?",
    "What if I learn a new language and move to a country where it's spoken?",
    "What if I take a year off to focus on self-education and skill building?",
];

const TRAVEL: [&str; 3] = [
    "What if I become a digital nomad and travel while working remotely?",
    "What if I move to a different country for a year?",
    "What if I sell my house and live in an RV traveling across the country?",
];

const LIFESTYLE: [&str; 3] = [
    "What if I downsize to a tiny house and embrace minimalism?",
    "What if I move from the city to a rural homestead?",
    "What if I adopt a zero-waste lifestyle and start a sustainability blog?",
];

const OTHER: [&str; 3] = [
    "What if I dedicate a year to volunteering for different causes?",
    "What if I pursue my childhood dream that I never followed?",
    "What if I completely reinvent myself at this stage in my life?",
];

pub fn examples_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Career => &CAREER,
        Category::Business => &BUSINESS,
        Category::Education => &EDUCATION,
        Category::Travel => &TRAVEL,
        Category::Lifestyle => &LIFESTYLE,
        Category::Other => &OTHER,
    }
}

/// Unknown or missing categories get the `other` list.
pub fn examples_for_raw(category: Option<&str>) -> (Category, &'static [&'static str]) {
    let category = category.and_then(Category::parse).unwrap_or(Category::Other);
    (category, examples_for(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_three_valid_examples() {
        for category in Category::ALL {
            let examples = examples_for(category);
            assert_eq!(examples.len(), 3);
            // Every example must itself pass the form's 10-character rule.
            assert!(examples.iter().all(|e| e.chars().count() >= 10));
        }
    }

    #[test]
    fn test_unknown_category_falls_back_to_other() {
        let (category, examples) = examples_for_raw(Some("astronomy"));
        assert_eq!(category, Category::Other);
        assert_eq!(examples, &OTHER);

        let (category, _) = examples_for_raw(None);
        assert_eq!(category, Category::Other);

        let (category, examples) = examples_for_raw(Some("travel"));
        assert_eq!(category, Category::Travel);
        assert!(examples[0].contains("digital nomad"));
    }
}
