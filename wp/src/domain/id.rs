//! Task ID generation
//!
//! IDs use the format: `{6-char-hex}-{kind}-{slug}`
//! Example: `019872-task-index-rebuild`

/// Generate an ID from kind and title
pub fn generate_id(kind: &str, title: &str) -> String {
    let uuid = uuid::Uuid::now_v7();
    let hex_prefix = &uuid.to_string()[..6];
    let slug = slugify(title);
    format!("{}-{}-{}", hex_prefix, kind, slug)
}

/// Slugify a title for use in IDs
fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let id = generate_id("task", "Rebuild Search Index");
        assert!(id.len() > 10);
        assert!(id.contains("-task-"));
        assert!(id.ends_with("rebuild-search-index"));
    }

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id("task", "same title");
        let b = generate_id("task", "same title");
        assert_ne!(a, b);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("trailing! punctuation?"), "trailing-punctuation");
    }
}
