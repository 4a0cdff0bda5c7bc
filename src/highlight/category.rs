//! Style categories assigned to highlighted spans

use serde::{Deserialize, Serialize};
use std::fmt;

/// The style class a span of text belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Keyword,
    FunctionName,
    ClassName,
    String,
    Comment,
    MagicMethod,
    Number,
    SelfReference,
    Bracket,
    Normal,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Keyword => "keyword",
            Category::FunctionName => "function",
            Category::ClassName => "class",
            Category::String => "string",
            Category::Comment => "comment",
            Category::MagicMethod => "magic",
            Category::Number => "number",
            Category::SelfReference => "self",
            Category::Bracket => "bracket",
            Category::Normal => "normal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names() {
        assert_eq!(Category::Keyword.as_str(), "keyword");
        assert_eq!(Category::SelfReference.as_str(), "self");
        assert_eq!(format!("{}", Category::MagicMethod), "magic");
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::FunctionName).unwrap();
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::FunctionName);
    }
}
