//! AI extraction results for individual documents.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::document::Category;

/// Insight used when a document could not be processed.
pub const FAILED_INSIGHT: &str = "❌ Failed to parse";

/// File name used for the synthesized budget placeholder.
pub const BUDGET_NOT_FOUND_FILE: &str = "Budget not found";

/// Insight used for the synthesized budget placeholder.
pub const BUDGET_NOT_FOUND_INSIGHT: &str = "No budget or financial document found";

/// Insight used when a PDF yields no text.
pub const NO_TEXT_INSIGHT: &str = "No readable text could be extracted from this document";

/// Outcome of best-effort JSON recovery from model output.
///
/// Model output is free-form text; when no valid object can be recovered
/// the raw text is kept so the caller can still show something readable.
#[derive(Debug, Clone, PartialEq)]
pub enum AiParse<T> {
    Structured(T),
    Fallback(String),
}

/// How an extraction result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtractionStatus {
    /// Model output parsed into the expected structure
    Parsed,
    /// Model output (or an explanation) kept as plain text
    Fallback,
    /// Download, extraction or AI call failed
    Failed,
    /// Synthesized placeholder for a missing document
    NotFound,
}

/// Budget figures reported by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetMetrics {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub used: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub remaining: Option<f64>,
}

impl BudgetMetrics {
    pub fn is_empty(&self) -> bool {
        self.used.is_none() && self.remaining.is_none()
    }
}

/// Structured fields requested for RFI/RFQ correspondence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CorrespondenceFields {
    #[serde(deserialize_with = "lenient_list")]
    pub messages: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub risks: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub updates: Vec<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub insight: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub summary: Option<String>,
}

/// Structured fields requested for budget documents.
///
/// Models put the figures either under `metrics` or at the top level;
/// both shapes are accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BudgetFields {
    pub metrics: Option<BudgetMetrics>,
    #[serde(deserialize_with = "lenient_amount")]
    pub used: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub remaining: Option<f64>,
    #[serde(deserialize_with = "lenient_list")]
    pub risks: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub updates: Vec<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub insight: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub summary: Option<String>,
}

impl BudgetFields {
    fn into_metrics(self) -> BudgetMetrics {
        let nested = self.metrics.unwrap_or_default();
        BudgetMetrics {
            used: nested.used.or(self.used),
            remaining: nested.remaining.or(self.remaining),
        }
    }
}

/// The AI-derived record for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub file_name: String,
    pub category: Category,
    pub status: ExtractionStatus,

    /// Key messages (RFI/RFQ only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<String>>,

    /// Budget figures (budget documents only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BudgetMetrics>,

    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub updates: Vec<String>,
    #[serde(default)]
    pub insight: String,
}

impl ExtractionResult {
    fn empty(file_name: impl Into<String>, category: Category, status: ExtractionStatus) -> Self {
        let messages = matches!(category, Category::Rfi | Category::Rfq).then(Vec::new);
        let metrics = (category == Category::Budget).then(BudgetMetrics::default);
        Self {
            file_name: file_name.into(),
            category,
            status,
            messages,
            metrics,
            risks: Vec::new(),
            updates: Vec::new(),
            insight: String::new(),
        }
    }

    /// Build a correspondence (RFI/RFQ) result from parsed model output.
    pub fn from_correspondence(
        file_name: impl Into<String>,
        category: Category,
        parsed: AiParse<CorrespondenceFields>,
    ) -> Self {
        match parsed {
            AiParse::Structured(fields) => Self {
                messages: Some(fields.messages),
                risks: fields.risks,
                updates: fields.updates,
                insight: fields.insight.or(fields.summary).unwrap_or_default(),
                ..Self::empty(file_name, category, ExtractionStatus::Parsed)
            },
            AiParse::Fallback(raw) => Self::fallback(file_name, category, raw),
        }
    }

    /// Build a budget result from parsed model output.
    pub fn from_budget(file_name: impl Into<String>, parsed: AiParse<BudgetFields>) -> Self {
        match parsed {
            AiParse::Structured(fields) => {
                let risks = fields.risks.clone();
                let updates = fields.updates.clone();
                let insight = fields
                    .insight
                    .clone()
                    .or_else(|| fields.summary.clone())
                    .unwrap_or_default();
                Self {
                    metrics: Some(fields.into_metrics()),
                    risks,
                    updates,
                    insight,
                    ..Self::empty(file_name, Category::Budget, ExtractionStatus::Parsed)
                }
            }
            AiParse::Fallback(raw) => Self::fallback(file_name, Category::Budget, raw),
        }
    }

    /// Raw model text kept verbatim as the insight.
    pub fn fallback(file_name: impl Into<String>, category: Category, raw: impl Into<String>) -> Self {
        Self {
            insight: raw.into(),
            ..Self::empty(file_name, category, ExtractionStatus::Fallback)
        }
    }

    /// Placeholder for a document whose processing failed.
    pub fn failed(file_name: impl Into<String>, category: Category) -> Self {
        Self {
            insight: FAILED_INSIGHT.to_string(),
            ..Self::empty(file_name, category, ExtractionStatus::Failed)
        }
    }

    /// Result for a PDF that yielded no text; no AI call is made for it.
    pub fn no_text(file_name: impl Into<String>, category: Category) -> Self {
        Self::fallback(file_name, category, NO_TEXT_INSIGHT)
    }

    /// Synthesized entry used when a folder has no budget-like document.
    pub fn budget_not_found() -> Self {
        Self {
            insight: BUDGET_NOT_FOUND_INSIGHT.to_string(),
            ..Self::empty(BUDGET_NOT_FOUND_FILE, Category::Budget, ExtractionStatus::NotFound)
        }
    }
}

// =============================================================================
// Lenient field decoding
// =============================================================================

/// Accept a list of strings, a single string, or arbitrary JSON values
/// (stringified). Blank entries are dropped.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.into_iter().filter_map(value_to_text).collect(),
        Some(other) => value_to_text(other).into_iter().collect(),
    })
}

/// Accept a string or any JSON value (stringified).
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

/// Accept a number or a currency string such as `"$1,250,000"` or `"1.2M"`.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_amount(&s),
        _ => None,
    })
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        other => Some(other.to_string()),
    }
}

/// Parse a human-formatted money amount.
pub fn parse_amount(input: &str) -> Option<f64> {
    let lower = input.trim().to_lowercase();
    let (body, multiplier) = if let Some(rest) = lower.strip_suffix("million") {
        (rest, 1_000_000.0)
    } else if let Some(rest) = lower.strip_suffix("mm") {
        (rest, 1_000_000.0)
    } else if let Some(rest) = lower.strip_suffix('m') {
        (rest, 1_000_000.0)
    } else if let Some(rest) = lower.strip_suffix('k') {
        (rest, 1_000.0)
    } else if let Some(rest) = lower.strip_suffix('b') {
        (rest, 1_000_000_000.0)
    } else {
        (lower.as_str(), 1.0)
    };

    let negative = body.contains('-') || (body.contains('(') && body.contains(')'));
    let digits: String = body
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }

    let amount = digits.parse::<f64>().ok()? * multiplier;
    Some(if negative { -amount } else { amount })
}
