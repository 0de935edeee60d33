//! The built-in German lesson catalog.
//!
//! Stands in for a data-loading collaborator until lessons come from a file
//! or a backend; the rest of the system only ever sees `Catalog`.

use lingua_core::Error;
use lingua_core::model::{
    Catalog, Category, Difficulty, LessonDetail, LessonId, LessonSummary, Step,
};

fn summary(
    id: u64,
    title: &str,
    description: &str,
    difficulty: Difficulty,
    category: Category,
    duration_minutes: u32,
    tags: &[&str],
    popularity: u32,
) -> Result<LessonSummary, Error> {
    Ok(LessonSummary::new(
        LessonId::new(id),
        title,
        description,
        difficulty,
        category,
        duration_minutes,
        tags.iter().map(|t| (*t).to_string()).collect(),
        popularity,
    )?)
}

#[allow(clippy::too_many_lines)]
fn build() -> Result<Catalog, Error> {
    let summaries = vec![
        summary(
            1,
            "Basic Greetings",
            "Learn how to greet people in German and introduce yourself.",
            Difficulty::Easy,
            Category::Beginner,
            15,
            &["vocabulary", "conversation"],
            95,
        )?,
        summary(
            2,
            "Numbers and Counting",
            "Master numbers from 1-100 and basic counting in German.",
            Difficulty::Easy,
            Category::Beginner,
            20,
            &["vocabulary", "numbers"],
            90,
        )?,
        summary(
            3,
            "Common Phrases",
            "Essential phrases for everyday conversations in German.",
            Difficulty::Easy,
            Category::Beginner,
            25,
            &["vocabulary", "conversation", "phrases"],
            88,
        )?,
        summary(
            4,
            "Present Tense Verbs",
            "Learn how to conjugate regular and irregular verbs in the present tense.",
            Difficulty::Medium,
            Category::Intermediate,
            30,
            &["grammar", "verbs"],
            85,
        )?,
        summary(
            5,
            "Food and Dining",
            "Vocabulary and phrases for ordering food and dining out.",
            Difficulty::Medium,
            Category::Intermediate,
            25,
            &["vocabulary", "conversation", "food"],
            82,
        )?,
        summary(
            6,
            "Past Tense",
            "Master the past tense forms in German.",
            Difficulty::Hard,
            Category::Advanced,
            40,
            &["grammar", "verbs", "tenses"],
            78,
        )?,
        summary(
            7,
            "Family Members",
            "Learn vocabulary for family relationships and discussing your family.",
            Difficulty::Easy,
            Category::Beginner,
            20,
            &["vocabulary", "family"],
            86,
        )?,
        summary(
            8,
            "Weather and Seasons",
            "Vocabulary and phrases to discuss weather and seasons in German.",
            Difficulty::Easy,
            Category::Beginner,
            25,
            &["vocabulary", "weather"],
            80,
        )?,
        summary(
            9,
            "Modal Verbs",
            "Learn how to use modal verbs to express ability, permission, and obligation.",
            Difficulty::Medium,
            Category::Intermediate,
            35,
            &["grammar", "verbs", "modal"],
            75,
        )?,
        summary(
            10,
            "Dative Case",
            "Master the dative case and its applications in German sentences.",
            Difficulty::Hard,
            Category::Advanced,
            45,
            &["grammar", "cases"],
            70,
        )?,
        summary(
            11,
            "Travel Vocabulary",
            "Essential words and phrases for traveling in German-speaking countries.",
            Difficulty::Medium,
            Category::Intermediate,
            30,
            &["vocabulary", "travel"],
            88,
        )?,
        summary(
            12,
            "Subjunctive Mood",
            "Learn how to express hypothetical situations and wishes in German.",
            Difficulty::Hard,
            Category::Advanced,
            50,
            &["grammar", "advanced"],
            65,
        )?,
    ];

    let greetings = LessonDetail::new(
        LessonId::new(1),
        "Basic Greetings",
        "Learn how to greet people in German and introduce yourself.",
        Difficulty::Easy,
        vec![
            Step::learn(
                "Common Greetings",
                "In German, 'Hello' is 'Hallo' and 'Good morning' is 'Guten Morgen'. \
                 'Good afternoon' is 'Guten Tag' and 'Good evening' is 'Guten Abend'.",
            )?,
            Step::quiz(
                "Practice: Greetings",
                "Choose the correct translation for 'Good morning':",
                vec![
                    "Guten Abend".into(),
                    "Guten Tag".into(),
                    "Guten Morgen".into(),
                    "Hallo".into(),
                ],
                "Guten Morgen",
            )?,
            Step::learn(
                "Introducing Yourself",
                "To say 'My name is...' in German, you say 'Ich heiße...' or 'Mein Name ist...'",
            )?,
            Step::text(
                "Practice: Introductions",
                "How would you say 'My name is John' in German?",
                "Ich heiße John",
            )?,
            Step::learn(
                "Asking Questions",
                "To ask 'What is your name?' in German, you say 'Wie heißt du?' (informal) \
                 or 'Wie heißen Sie?' (formal).",
            )?,
        ],
    )?;

    let numbers = LessonDetail::new(
        LessonId::new(2),
        "Numbers and Counting",
        "Master numbers from 1-100 and basic counting in German.",
        Difficulty::Easy,
        vec![
            Step::learn(
                "Numbers 1-10",
                "1 - eins, 2 - zwei, 3 - drei, 4 - vier, 5 - fünf, 6 - sechs, 7 - sieben, \
                 8 - acht, 9 - neun, 10 - zehn",
            )?,
            Step::quiz(
                "Practice: Numbers 1-10",
                "What is the German word for the number 7?",
                vec![
                    "sechs".into(),
                    "sieben".into(),
                    "acht".into(),
                    "neun".into(),
                ],
                "sieben",
            )?,
        ],
    )?;

    Ok(Catalog::new(summaries, vec![greetings, numbers])?)
}

/// The catalog every service and test starts from.
///
/// # Panics
///
/// Panics only if the compiled-in lesson data is internally inconsistent,
/// which is a programming error caught by the tests below.
#[must_use]
pub fn builtin_catalog() -> Catalog {
    build().expect("built-in catalog should be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), 12);
    }

    #[test]
    fn details_exist_for_authored_lessons() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.detail(LessonId::new(1)).map(LessonDetail::step_count), Some(5));
        assert_eq!(catalog.detail(LessonId::new(2)).map(LessonDetail::step_count), Some(2));
        assert!(catalog.detail(LessonId::new(3)).is_none());
    }

    #[test]
    fn tag_pool_covers_the_filter_ui() {
        let tags = builtin_catalog().all_tags();
        assert!(tags.contains(&"grammar".to_string()));
        assert!(tags.contains(&"vocabulary".to_string()));
        assert!(tags.windows(2).all(|w| w[0] < w[1]));
    }
}
