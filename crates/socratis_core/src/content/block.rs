use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum InlineSpan {
    Plain(String),
    Bold(String),
    InlineCode(String),
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        InlineSpan::Plain(text.into())
    }

    pub fn bold(text: impl Into<String>) -> Self {
        InlineSpan::Bold(text.into())
    }

    pub fn code(text: impl Into<String>) -> Self {
        InlineSpan::InlineCode(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            InlineSpan::Plain(s) | InlineSpan::Bold(s) | InlineSpan::InlineCode(s) => s,
        }
    }
}

/// A renderable unit of message text. Recomputed from the raw text on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    TextRun {
        spans: Vec<InlineSpan>,
    },
    CodeBlock {
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        content: String,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl ContentBlock {
    pub fn text_run(spans: Vec<InlineSpan>) -> Self {
        ContentBlock::TextRun { spans }
    }

    pub fn code(language: Option<String>, content: impl Into<String>) -> Self {
        ContentBlock::CodeBlock {
            language,
            content: content.into(),
        }
    }

    pub fn table(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        ContentBlock::Table { headers, rows }
    }

    /// Literal content with markup removed. Table cells are tab separated.
    pub fn literal_text(&self) -> String {
        match self {
            ContentBlock::TextRun { spans } => spans.iter().map(InlineSpan::text).collect(),
            ContentBlock::CodeBlock { content, .. } => content.clone(),
            ContentBlock::Table { headers, rows } => std::iter::once(headers)
                .chain(rows.iter())
                .map(|cells| cells.join("\t"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_serialization() {
        let block = ContentBlock::text_run(vec![InlineSpan::bold("Debit")]);
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(
            json,
            r#"{"type":"text_run","spans":[{"kind":"bold","text":"Debit"}]}"#
        );
    }

    #[test]
    fn test_code_block_omits_missing_language() {
        let json = serde_json::to_string(&ContentBlock::code(None, "x")).unwrap();
        assert!(!json.contains("language"));
    }

    #[test]
    fn test_table_literal_text() {
        let block = ContentBlock::table(
            vec!["Dr".into(), "Cr".into()],
            vec![vec!["Cash".into(), "Capital".into()]],
        );
        assert_eq!(block.literal_text(), "Dr\tCr\nCash\tCapital");
    }
}
