use super::market_indicators::{Count, rank, skill_tally, tally};
use crate::model::JobRecord;

pub const OTHER_FAMILY: &str = "Other";

/// Buckets a free-form job title into a role family. First match wins.
pub fn normalize_title(title: &str) -> &'static str {
    let t = title.trim().to_lowercase();
    let has = |needle: &str| t.contains(needle);

    if has("data analyst") {
        if has("senior") {
            "Senior Data Analyst"
        } else if has("lead") {
            "Lead Data Analyst"
        } else {
            "Data Analyst"
        }
    } else if has("data engineer") {
        if has("senior") {
            "Senior Data Engineer"
        } else if has("lead") {
            "Lead Data Engineer"
        } else {
            "Data Engineer"
        }
    } else if has("machine learning") || has("ml engineer") {
        "Machine Learning Engineer"
    } else if has("data scientist") {
        if has("senior") { "Senior Data Scientist" } else { "Data Scientist" }
    } else if has("business analyst") {
        "Business Analyst"
    } else if has("cloud engineer") {
        "Cloud Engineer"
    } else if has("software engineer") {
        "Software Engineer"
    } else if has("database administrator") {
        "Database Administrator"
    } else {
        OTHER_FAMILY
    }
}

/// Most common role families among postings with extracted skills, `Other` excluded.
pub fn top_families(jobs: &[JobRecord], limit: usize) -> Vec<Count> {
    let keys = jobs
        .iter()
        .filter(|j| !j.title.trim().is_empty() && !j.skills.is_empty())
        .map(|j| normalize_title(&j.title))
        .filter(|f| *f != OTHER_FAMILY)
        .map(String::from);
    rank(tally(keys), Some(limit))
}

/// Skill distribution among postings of one role family.
pub fn skills_for_title(jobs: &[JobRecord], family: &str, limit: usize) -> Vec<Count> {
    let matching = jobs
        .iter()
        .filter(|j| !j.title.trim().is_empty() && !j.skills.is_empty())
        .filter(|j| normalize_title(&j.title) == family);
    rank(skill_tally(matching), Some(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, skills: &[&str]) -> JobRecord {
        JobRecord {
            title: title.into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn buckets_titles_into_families() {
        assert_eq!(normalize_title("Senior Data Analyst (Remote)"), "Senior Data Analyst");
        assert_eq!(normalize_title("Lead Data Engineer"), "Lead Data Engineer");
        assert_eq!(normalize_title("Data Engineer II"), "Data Engineer");
        assert_eq!(normalize_title("Senior Machine Learning Scientist"), "Machine Learning Engineer");
        assert_eq!(normalize_title("ML Engineer, NLP"), "Machine Learning Engineer");
        assert_eq!(normalize_title("Senior Data Scientist"), "Senior Data Scientist");
        assert_eq!(normalize_title("Lead Data Scientist"), "Data Scientist");
        assert_eq!(normalize_title("Cloud Engineer - AWS"), "Cloud Engineer");
        assert_eq!(normalize_title("Barista"), "Other");
    }

    #[test]
    fn families_exclude_other() {
        let jobs = vec![
            job("Data Analyst", &["SQL"]),
            job("Junior Data Analyst", &["Excel"]),
            job("Chef", &["Cooking"]),
            job("Data Scientist", &["Python"]),
        ];
        let families = top_families(&jobs, 20);
        assert_eq!(families[0], Count { key: "Data Analyst".into(), count: 2 });
        assert_eq!(families.len(), 2);
    }

    #[test]
    fn families_only_count_postings_with_skills() {
        let jobs = vec![
            job("Data Engineer", &[]),
            job("Data Engineer", &[]),
            job("Data Engineer", &[]),
            job("Data Analyst", &["SQL"]),
        ];
        let families = top_families(&jobs, 20);
        assert_eq!(families, vec![Count { key: "Data Analyst".into(), count: 1 }]);
    }

    #[test]
    fn skill_distribution_for_one_family() {
        let jobs = vec![
            job("Data Engineer", &["Spark", "SQL"]),
            job("Senior Data Engineer", &["Airflow"]),
            job("data engineer", &["spark", "Kafka"]),
            job("Data Analyst", &["Excel"]),
        ];
        let skills = skills_for_title(&jobs, "Data Engineer", 15);
        let keys: Vec<(&str, usize)> = skills.iter().map(|c| (c.key.as_str(), c.count)).collect();
        assert_eq!(keys, vec![("spark", 2), ("kafka", 1), ("sql", 1)]);
    }
}
