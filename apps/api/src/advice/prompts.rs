/// Personal-trainer instruction wrapped around the user's profile text.
/// `{context}` is replaced with the profile string before sending.
pub const FITNESS_ADVICE_TEMPLATE: &str = "I want you to act as a personal trainer. \
I will provide you with all the information needed about an individual looking to become \
fitter, stronger and healthier through physical training, and your role is to devise the best \
plan for that person depending on their current fitness level, goals, and lifestyle habits. \
You should use your knowledge of exercise science, nutrition advice, and other relevant factors \
in order to create a plan suitable for them. Based on the details below, create one diet and \
one exercise plan:\n    {context}\n    ";

pub const CONTEXT_PLACEHOLDER: &str = "{context}";

/// Substitutes the profile text into the template's single placeholder.
///
/// Uses `replacen` so a profile that itself contains `{context}` is not expanded again.
pub fn build_prompt(profile: &str) -> String {
    FITNESS_ADVICE_TEMPLATE.replacen(CONTEXT_PLACEHOLDER, profile, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_exactly_one_placeholder() {
        assert_eq!(FITNESS_ADVICE_TEMPLATE.matches(CONTEXT_PLACEHOLDER).count(), 1);
    }

    #[test]
    fn test_profile_sits_on_its_own_indented_line() {
        let prompt = build_prompt("Name: Bob");
        assert!(prompt.ends_with("one exercise plan:\n    Name: Bob\n    "));
    }

    #[test]
    fn test_build_prompt_substitutes_profile() {
        let prompt = build_prompt("Name: Bob");
        let (before, after) = FITNESS_ADVICE_TEMPLATE.split_once(CONTEXT_PLACEHOLDER).unwrap();
        assert_eq!(prompt, format!("{before}Name: Bob{after}"));
        assert!(!prompt.contains(CONTEXT_PLACEHOLDER));
    }

    #[test]
    fn test_placeholder_inside_profile_is_left_alone() {
        let prompt = build_prompt("Food Preference: {context}");
        assert!(prompt.ends_with("Food Preference: {context}\n    "));
    }
}
