//! Prompt templates for each generated artifact

use super::{Language, Problem};

/// System message sent ahead of every prompt
pub const SYSTEM_PROMPT: &str = "You are a patient competitive-programming tutor. \
Answer precisely and only about the problem you are given.";

/// The kind of artifact requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Explanation,
    Pseudocode,
    Code(Language),
}

impl Artifact {
    pub fn label(&self) -> &'static str {
        match self {
            Artifact::Explanation => "explanation",
            Artifact::Pseudocode => "pseudocode",
            Artifact::Code(_) => "code",
        }
    }
}

fn problem_context(problem: &Problem) -> String {
    let mut context = format!("Problem: {}\n", problem.name);
    if let Some(slug) = &problem.slug {
        context.push_str(&format!("Slug: {}\n", slug));
    }
    if let Some(url) = &problem.url {
        context.push_str(&format!("URL: {}\n", url));
    }
    if let Some(description) = &problem.description {
        context.push_str(&format!("\nDescription:\n{}\n", description));
    }
    context
}

/// Render the user prompt for `artifact`
pub fn render(problem: &Problem, artifact: Artifact) -> String {
    let context = problem_context(problem);

    match artifact {
        Artifact::Explanation => format!(
            "{context}
Explain how to solve this problem. Cover:
1. What the problem is really asking, in plain words.
2. The key insight and the approach that follows from it.
3. A short walk-through on a small example.
4. Time and space complexity.
5. Edge cases worth testing.

Do not write code. Use short paragraphs and markdown headings."
        ),
        Artifact::Pseudocode => format!(
            "{context}
Write clear, language-agnostic pseudocode for an optimal solution.
Use indentation for blocks and UPPERCASE keywords (FUNCTION, IF, ELSE, FOR, WHILE, RETURN).
Add a one-line comment for each non-obvious step.
Finish with one line stating the time and space complexity.
Return only the pseudocode."
        ),
        Artifact::Code(language) => format!(
            "{context}
Write an accepted, optimal solution in {name}.
Use the standard class/function signature the judge expects for {name}.
Include brief comments on the key steps.
Return a single ```{tag} code block and nothing else.",
            name = language.display_name(),
            tag = language.as_str(),
        ),
    }
}

/// Strip one surrounding markdown fence from model output, if present.
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // Drop the info string on the opening fence
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);

    body.trim_end().to_string()
}
