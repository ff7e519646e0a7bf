// Analyzer module: aggregates submodules for different views over stored postings.

pub mod market_indicators;
pub mod salary_analysis;
pub mod titles;

pub use market_indicators::{Count, MarketAnalyzer};
pub use salary_analysis::{SalaryAnalyzer, SalaryReport};

use crate::model::JobRecord;
use serde::Serialize;

/// Skills shown per role family.
pub const SKILLS_PER_FAMILY: usize = 15;

#[derive(Debug, Clone, Serialize)]
pub struct FamilySkills {
    pub family: String,
    pub skills: Vec<Count>,
}

/// Every analytical view, ready to be serialized for a dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub total_jobs: usize,
    pub jobs_by_country: Vec<Count>,
    pub jobs_by_month: Vec<Count>,
    pub top_companies: Vec<Count>,
    pub top_titles: Vec<Count>,
    pub top_skills: Vec<Count>,
    pub skills_by_family: Vec<FamilySkills>,
    pub salary: SalaryReport,
}

pub fn build_report(jobs: &[JobRecord], limit: usize) -> Report {
    let skills_by_family = titles::top_families(jobs, limit)
        .into_iter()
        .map(|f| FamilySkills {
            skills: titles::skills_for_title(jobs, &f.key, SKILLS_PER_FAMILY),
            family: f.key,
        })
        .collect();

    Report {
        total_jobs: jobs.len(),
        jobs_by_country: MarketAnalyzer::jobs_by_country(jobs),
        jobs_by_month: MarketAnalyzer::jobs_by_month(jobs),
        top_companies: MarketAnalyzer::top_companies(jobs, limit),
        top_titles: MarketAnalyzer::top_titles(jobs, limit),
        top_skills: MarketAnalyzer::top_skills(jobs, limit),
        skills_by_family,
        salary: SalaryAnalyzer::analyze(jobs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_covers_every_view() {
        let jobs = vec![
            JobRecord {
                title: "Data Engineer".into(),
                company: "Acme".into(),
                country: "France".into(),
                salary_annual: Some(60_000),
                skills: vec!["Spark".into()],
                ..Default::default()
            },
            JobRecord {
                title: "Florist".into(),
                country: "Unknown".into(),
                ..Default::default()
            },
        ];

        let report = build_report(&jobs, 20);
        assert_eq!(report.total_jobs, 2);
        assert_eq!(report.jobs_by_country.len(), 2);
        assert_eq!(report.skills_by_family.len(), 1);
        assert_eq!(report.skills_by_family[0].family, "Data Engineer");
        assert_eq!(report.skills_by_family[0].skills[0].key, "spark");
        assert_eq!(report.salary.overall.as_ref().map(|s| s.count), Some(1));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["top_companies"][0]["key"], "Acme");
    }
}
