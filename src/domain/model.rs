use crate::utils::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SLOTS_PER_CATEGORY: usize = 12;
pub const CATEGORY_COUNT: usize = 8;
pub const TOTAL_FIELDS: usize = SLOTS_PER_CATEGORY * CATEGORY_COUNT;

pub type CategoryFields = [String; SLOTS_PER_CATEGORY];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Identity,
    Purpose,
    Capabilities,
    Knowledge,
    Tools,
    Behavior,
    Constraints,
    SuccessCriteria,
}

impl Category {
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Identity,
        Category::Purpose,
        Category::Capabilities,
        Category::Knowledge,
        Category::Tools,
        Category::Behavior,
        Category::Constraints,
        Category::SuccessCriteria,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Identity => "identity",
            Category::Purpose => "purpose",
            Category::Capabilities => "capabilities",
            Category::Knowledge => "knowledge",
            Category::Tools => "tools",
            Category::Behavior => "behavior",
            Category::Constraints => "constraints",
            Category::SuccessCriteria => "success_criteria",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Identity => "Identity & Role",
            Category::Purpose => "Purpose & Goals",
            Category::Capabilities => "Core Capabilities",
            Category::Knowledge => "Domain Knowledge",
            Category::Tools => "Tools & Integrations",
            Category::Behavior => "Behavior & Communication",
            Category::Constraints => "Constraints & Boundaries",
            Category::SuccessCriteria => "Success Criteria",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The 96 template fields, 12 slots for each of the 8 categories.
///
/// Slot arrays are fixed-size, so a template file with a category holding
/// more or fewer than 12 entries fails to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateData {
    pub identity: CategoryFields,
    pub purpose: CategoryFields,
    pub capabilities: CategoryFields,
    pub knowledge: CategoryFields,
    pub tools: CategoryFields,
    pub behavior: CategoryFields,
    pub constraints: CategoryFields,
    pub success_criteria: CategoryFields,
}

impl TemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> &CategoryFields {
        match category {
            Category::Identity => &self.identity,
            Category::Purpose => &self.purpose,
            Category::Capabilities => &self.capabilities,
            Category::Knowledge => &self.knowledge,
            Category::Tools => &self.tools,
            Category::Behavior => &self.behavior,
            Category::Constraints => &self.constraints,
            Category::SuccessCriteria => &self.success_criteria,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut CategoryFields {
        match category {
            Category::Identity => &mut self.identity,
            Category::Purpose => &mut self.purpose,
            Category::Capabilities => &mut self.capabilities,
            Category::Knowledge => &mut self.knowledge,
            Category::Tools => &mut self.tools,
            Category::Behavior => &mut self.behavior,
            Category::Constraints => &mut self.constraints,
            Category::SuccessCriteria => &mut self.success_criteria,
        }
    }

    pub fn set(&mut self, category: Category, slot: usize, value: impl Into<String>) -> Result<()> {
        let fields = self.get_mut(category);
        let field = fields.get_mut(slot).ok_or_else(|| {
            AppError::validation(
                format!("{}[{}]", category.key(), slot),
                format!("slot must be below {}", SLOTS_PER_CATEGORY),
            )
        })?;
        *field = value.into();
        Ok(())
    }

    /// Filled fields in category order, then slot order.
    pub fn iter_filled(&self) -> impl Iterator<Item = (Category, usize, &str)> + '_ {
        Category::ALL.into_iter().flat_map(move |category| {
            self.get(category)
                .iter()
                .enumerate()
                .filter(|(_, value)| !value.trim().is_empty())
                .map(move |(slot, value)| (category, slot, value.as_str()))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.iter_filled().count()
    }

    pub fn filled_in(&self, category: Category) -> usize {
        self.get(category)
            .iter()
            .filter(|value| !value.trim().is_empty())
            .count()
    }

    pub fn agent_name(&self) -> Option<&str> {
        let name = self.identity[0].trim();
        (!name.is_empty()).then_some(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    Simple,
    Moderate,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentComplexity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ComplexityTier::Simple => "simple",
            ComplexityTier::Moderate => "moderate",
            ComplexityTier::Complex => "complex",
        })
    }
}

impl std::fmt::Display for DocumentComplexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DocumentComplexity::Low => "low",
            DocumentComplexity::Medium => "medium",
            DocumentComplexity::High => "high",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfStats {
    pub words: usize,
    pub lines: usize,
    pub headings: usize,
    pub bullet_items: usize,
    pub urls: usize,
    pub emails: usize,
    pub code_lines: usize,
    pub table_rows: usize,
    pub pattern_count: usize,
    pub complexity: DocumentComplexity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub file_name: String,
    pub size_bytes: u64,
    pub text: String,
    pub truncated: bool,
    pub stats: PdfStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantSuggestion {
    pub name: String,
    pub available: bool,
    pub matched_keywords: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationInput {
    pub template: TemplateData,
    pub documents: Vec<ExtractedDocument>,
}

#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub title: String,
    pub markdown: String,
    pub complexity: ComplexityTier,
    pub filled_fields: usize,
    pub document_count: usize,
    pub consultants: Vec<ConsultantSuggestion>,
    pub generated_at: DateTime<Utc>,
}
