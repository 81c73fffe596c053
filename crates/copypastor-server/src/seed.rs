//! Example snippets inserted into an empty database on first start.

use copypastor_core::snippet::SnippetFields;

pub fn demo_snippets() -> Vec<SnippetFields> {
  vec![
    SnippetFields::new(
      "Production API Key",
      r#"{"key": "sk-production-2025", "exp": "2025-12-31"}"#,
    )
    .with_category("Work")
    .with_tags("api-key react-hooks production"),
    SnippetFields::new(
      "Daily Standup Template",
      "*Yesterday: ... \n*Today: ... \nBlocked: ...",
    )
    .with_category("Work")
    .with_tags("email-templates"),
    SnippetFields::new(
      "React useEffect Hook",
      "useEffect(() => {\n  // effect\n  return () => {\n    // cleanup\n  };\n}, [input]);",
    )
    .with_category("Dev")
    .with_tags("react-hooks"),
    SnippetFields::new(
      "Project Alpha Figma Link",
      "https://figma.com/project-alpha-design-specs",
    )
    .with_category("Dev")
    .with_tags("urls"),
  ]
}
