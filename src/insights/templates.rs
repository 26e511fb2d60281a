//! Suggestion templates

/// Shown above the suggestions when the overall mood is positive
pub const BROADEN_BUILD_NOTE: &str = "The Broaden & Build theory suggests that positive emotions \
expand our awareness and help us build long-term personal resources. We provide special \
suggestions when your mood is positive to help you capitalize on these effects.";

/// Positive-mood suggestions; one is picked at random
pub const BROADEN_BUILD_SUGGESTIONS: [&str; 5] = [
    "Your positive mood can help you think more creatively. Consider brainstorming solutions to a challenge you've been facing.",
    "Positive emotions build resilience. Take a moment to appreciate how you've overcome challenges in the past.",
    "When feeling positive, we're more open to new experiences. Try something new or reach out to someone you'd like to know better.",
    "Positive emotions can strengthen relationships. Share your positive feelings with others and express appreciation to someone important.",
    "Build on your positive mood by engaging in an activity that brings you joy and helps others, creating an upward spiral of well-being.",
];

/// General wellness suggestions; one is always picked at random
pub const GENERAL_SUGGESTIONS: [&str; 7] = [
    "Take short breaks for a cup of chai or a brief walk during your workday.",
    "Spend 10 minutes in the morning to practice mindful breathing or yoga.",
    "Connect with family members or close friends at least once a day.",
    "Listen to your favorite ragas or music during stressful periods.",
    "Practice gratitude by noting three positive experiences each day.",
    "Incorporate a short evening walk after dinner for physical and mental well-being.",
    "Set aside time to engage in a creative hobby or activity you enjoy.",
];

pub const DECLINING_SUGGESTION: &str = "Your mood has been declining. Consider practicing 5 minutes \
of deep breathing or meditation in the morning.";

pub const HIGH_VARIABILITY_SUGGESTION: &str = "Your mood varies significantly. Establishing a \
consistent daily routine might help stabilize your emotional well-being.";

/// Suggestion for the weekday with the lowest mood
pub fn lowest_day_suggestion(day_name: &str) -> String {
    format!(
        "Plan something special for {}s like a short chai break with colleagues or a call with family.",
        day_name
    )
}
