//! LLM prompts for document extraction.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::types::document::Category;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{(kind|file_name|content)\}").unwrap();
}

/// Prompt for RFI / RFQ correspondence.
pub const CORRESPONDENCE_PROMPT: &str = r#"You are assisting a construction project manager. Analyze this {kind} document.

Extract:
1. The key messages: questions asked, answers given, requested items or quotes
2. Risks to schedule, cost, scope or safety raised by the document
3. Status updates, decisions and deadlines
4. A one or two sentence insight for the project manager

Output JSON only:
{
    "messages": ["key message", "..."],
    "risks": ["risk", "..."],
    "updates": ["update", "..."],
    "insight": "short insight"
}

Use empty arrays when nothing applies. Do not invent facts.

File name: {file_name}
Document text:
{content}"#;

/// Prompt for budget and financial documents.
pub const BUDGET_PROMPT: &str = r#"You are assisting a construction project manager. Analyze this budget or financial document.

Extract:
1. The amount of the budget used (spent or committed) so far
2. The amount of the budget remaining
3. Financial risks: overruns, pending change orders, contingency drawdown
4. Updates: recent approvals, payments, revised forecasts
5. A one or two sentence insight for the project manager

Output JSON only:
{
    "metrics": {"used": 0, "remaining": 0},
    "risks": ["risk", "..."],
    "updates": ["update", "..."],
    "insight": "short insight"
}

Report amounts as plain numbers in the document's currency. Use null for an
amount the document does not state. Do not invent figures.

File name: {file_name}
Document text:
{content}"#;

/// Human-readable document kind used in the correspondence prompt.
fn correspondence_kind(category: Category) -> &'static str {
    match category {
        Category::Rfq => "RFQ (request for quotation)",
        _ => "RFI (request for information)",
    }
}

/// Fill `{kind}`, `{file_name}` and `{content}` in one pass. Substituted
/// values are never rescanned, so braces in file names or document text
/// survive verbatim.
fn fill(template: &str, kind: &str, file_name: &str, content: &str) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "kind" => kind.to_string(),
            "file_name" => file_name.to_string(),
            _ => content.to_string(),
        })
        .into_owned()
}

/// Format the correspondence prompt.
pub fn format_correspondence_prompt(category: Category, file_name: &str, content: &str) -> String {
    fill(CORRESPONDENCE_PROMPT, correspondence_kind(category), file_name, content)
}

/// Format the budget prompt.
pub fn format_budget_prompt(file_name: &str, content: &str) -> String {
    fill(BUDGET_PROMPT, "", file_name, content)
}
