/*!
 * Completion candidates
 */

/// One completion candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    /// Text inserted in place of the partial word.
    pub text: String,
    pub category: SuggestionCategory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionCategory {
    Table,
    Column,
    Keyword,
}

impl Suggestion {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            text: name.into(),
            category: SuggestionCategory::Table,
        }
    }

    pub fn column(name: impl Into<String>) -> Self {
        Self {
            text: name.into(),
            category: SuggestionCategory::Column,
        }
    }

    pub fn keyword(word: impl Into<String>) -> Self {
        Self {
            text: word.into(),
            category: SuggestionCategory::Keyword,
        }
    }

    /// Candidate as handed to the line editor, with one trailing space.
    pub fn replacement(&self) -> String {
        format!("{} ", self.text)
    }

    /// Display text with the category icon.
    pub fn format_display(&self) -> String {
        format!("{} {}", self.category.icon(), self.text)
    }
}

impl SuggestionCategory {
    pub fn icon(&self) -> &'static str {
        match self {
            SuggestionCategory::Table => "📊",
            SuggestionCategory::Column => "📋",
            SuggestionCategory::Keyword => "🔵",
        }
    }
}
