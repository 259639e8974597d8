//! Built-in fallback prompts for sample groups without an authored
//! `text_prompt.txt`, keyed by acoustic-scale category.

#[derive(Debug, Clone, Copy)]
pub struct PromptSet {
    pub category: &'static str,
    pub prompts: &'static [&'static str],
}

const SMALL_PROMPTS: &[&str] = &[
    "A small tiled bathroom with hard surfaces and minimal absorption",
    "A compact bedroom with carpet flooring and soft furnishings",
];
const MEDIUM_PROMPTS: &[&str] = &[
    "A medium-sized classroom with concrete walls and large windows",
    "A living room with wooden floors and moderate furnishing",
];
const LARGE_PROMPTS: &[&str] = &[
    "A large cathedral with stone walls and high vaulted ceilings",
    "A spacious concert hall with acoustic treatment panels",
];
const OUTDOOR_PROMPTS: &[&str] = &[
    "An open field with no nearby reflective surfaces",
    "A desert landscape with distant rock formations",
];

const BUILTIN_PROMPTS: &[PromptSet] = &[
    PromptSet {
        category: "small",
        prompts: SMALL_PROMPTS,
    },
    PromptSet {
        category: "medium",
        prompts: MEDIUM_PROMPTS,
    },
    PromptSet {
        category: "large",
        prompts: LARGE_PROMPTS,
    },
    PromptSet {
        category: "outdoor",
        prompts: OUTDOOR_PROMPTS,
    },
];

pub fn builtin_prompts() -> &'static [PromptSet] {
    BUILTIN_PROMPTS
}

/// Default prompt for a (category, position) pair. Positions past the end of
/// a category's list fall back to its first prompt; unknown categories get a
/// generic "{category} space" phrase.
pub fn default_prompt(category: &str, position: usize) -> String {
    for set in BUILTIN_PROMPTS {
        if set.category == category {
            let prompt = set.prompts.get(position).unwrap_or(&set.prompts[0]);
            return (*prompt).to_string();
        }
    }
    format!("A {category} space")
}
