use crate::html::MetaTag;
use std::collections::HashMap;

/// Build a page's metadata map from its meta tags.
///
/// Names are lower-cased, and a missing name or content becomes `""`.
/// Later tags overwrite earlier ones with the same name.
pub fn extract_metadata<'a, I>(tags: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = &'a MetaTag>,
{
    let mut metadata = HashMap::new();
    for tag in tags {
        let name = tag.name.as_deref().unwrap_or_default().to_lowercase();
        let content = tag.content.clone().unwrap_or_default();
        metadata.insert(name, content);
    }
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: Option<&str>, content: Option<&str>) -> MetaTag {
        MetaTag {
            name: name.map(str::to_string),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn test_names_are_lowercased() {
        let tags = [tag(Some("Description"), Some("hello")), tag(Some("KEYWORDS"), Some("a,b"))];
        let metadata = extract_metadata(&tags);

        assert_eq!(metadata.get("description").map(String::as_str), Some("hello"));
        assert_eq!(metadata.get("keywords").map(String::as_str), Some("a,b"));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let tags = [
            tag(Some("robots"), Some("index")),
            tag(Some("Robots"), Some("noindex")),
        ];
        let metadata = extract_metadata(&tags);

        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata["robots"], "noindex");
    }

    #[test]
    fn test_missing_name_uses_empty_key() {
        let tags = [tag(None, None), tag(None, Some("second"))];
        let metadata = extract_metadata(&tags);

        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata[""], "second");
    }

    #[test]
    fn test_no_tags() {
        assert!(extract_metadata(&Vec::<MetaTag>::new()).is_empty());
    }
}
