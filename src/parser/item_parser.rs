// Provider-specific dataset items to RawJobItem
use crate::config::Provider;
use crate::model::{ParserError, RawJobItem};
use crate::utils::html_to_text;
use serde_json::{Map, Value};

pub trait Parser {
    fn parse(&self, item: &Value) -> Result<RawJobItem, ParserError>;
}

/// Field names a provider uses for each part of a posting.
struct FieldMap {
    title: &'static str,
    company: &'static str,
    url: &'static str,
    posted: &'static [&'static str],
}

const INDEED: FieldMap = FieldMap {
    title: "positionName",
    company: "company",
    url: "url",
    posted: &["postingDateParsed", "postedAt"],
};

const LINKEDIN: FieldMap = FieldMap {
    title: "title",
    company: "companyName",
    url: "jobUrl",
    posted: &["publishedAt"],
};

const HTML_DESCRIPTION_KEYS: &[&str] = &["descriptionHtml", "descriptionHTML"];

pub struct ItemParser {
    provider: Provider,
}

impl ItemParser {
    pub fn new(provider: Provider) -> Self {
        Self { provider }
    }

    fn fields(&self) -> &'static FieldMap {
        match self.provider {
            Provider::Indeed => &INDEED,
            Provider::LinkedIn => &LINKEDIN,
        }
    }
}

impl Parser for ItemParser {
    fn parse(&self, item: &Value) -> Result<RawJobItem, ParserError> {
        let obj = item.as_object().ok_or(ParserError::NotAnObject)?;
        let fields = self.fields();

        let description = text_field(obj, "description").or_else(|| {
            HTML_DESCRIPTION_KEYS
                .iter()
                .find_map(|key| text_field(obj, key))
                .map(|html| html_to_text(&html))
        });

        Ok(RawJobItem {
            title: text_field(obj, fields.title),
            description,
            location: text_field(obj, "location"),
            company: text_field(obj, fields.company),
            posted: fields.posted.iter().find_map(|key| text_field(obj, key)),
            salary: text_field(obj, "salary"),
            url: text_field(obj, fields.url),
        })
    }
}

/// Non-empty string (or number) value under `key`.
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_indeed_item() {
        let item = json!({
            "positionName": "Data Scientist",
            "company": "Initech",
            "location": "Austin, TX",
            "salary": "$60 - $70 an hour",
            "url": "https://indeed.example/1",
            "postingDateParsed": "2025-04-02T10:00:00.000Z",
            "postedAt": "3 days ago",
            "description": "Python and SQL"
        });
        let raw = ItemParser::new(Provider::Indeed).parse(&item).unwrap();
        assert_eq!(raw.title.as_deref(), Some("Data Scientist"));
        assert_eq!(raw.company.as_deref(), Some("Initech"));
        assert_eq!(raw.posted.as_deref(), Some("2025-04-02T10:00:00.000Z"));
        assert_eq!(raw.url.as_deref(), Some("https://indeed.example/1"));
    }

    #[test]
    fn indeed_falls_back_to_posted_at() {
        let item = json!({"positionName": "x", "postingDateParsed": null, "postedAt": "2025-04-01"});
        let raw = ItemParser::new(Provider::Indeed).parse(&item).unwrap();
        assert_eq!(raw.posted.as_deref(), Some("2025-04-01"));
    }

    #[test]
    fn maps_linkedin_item_with_html_description() {
        let item = json!({
            "title": "ML Engineer",
            "companyName": "Globex",
            "jobUrl": "https://linkedin.example/9",
            "publishedAt": "2025-01-15",
            "salary": "",
            "descriptionHtml": "<p>Experience with <strong>PyTorch</strong></p>"
        });
        let raw = ItemParser::new(Provider::LinkedIn).parse(&item).unwrap();
        assert_eq!(raw.title.as_deref(), Some("ML Engineer"));
        assert_eq!(raw.company.as_deref(), Some("Globex"));
        assert_eq!(raw.description.as_deref(), Some("Experience with PyTorch"));
        assert_eq!(raw.salary, None);
        assert_eq!(raw.location, None);
    }

    #[test]
    fn rejects_non_objects() {
        let parser = ItemParser::new(Provider::Indeed);
        assert!(matches!(parser.parse(&json!(["a"])), Err(ParserError::NotAnObject)));
    }
}
