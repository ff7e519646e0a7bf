use crate::model::JobRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary statistics over annual salaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryReport {
    pub overall: Option<SalaryStats>,
    pub by_country: BTreeMap<String, SalaryStats>,
}

pub struct SalaryAnalyzer;

impl SalaryAnalyzer {
    /// Mean, median and population standard deviation; `None` for an empty slice.
    pub fn calculate_stats(salaries: &[u64]) -> Option<SalaryStats> {
        if salaries.is_empty() {
            return None;
        }

        let count = salaries.len() as f64;
        let mean = salaries.iter().map(|&s| s as f64).sum::<f64>() / count;
        let std_dev = (salaries
            .iter()
            .map(|&s| (s as f64 - mean).powi(2))
            .sum::<f64>()
            / count)
            .sqrt();

        let mut sorted = salaries.to_vec();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
        } else {
            sorted[mid] as f64
        };

        Some(SalaryStats {
            count: salaries.len(),
            mean,
            median,
            std_dev,
        })
    }

    /// Statistics over every record that carries a salary, overall and per country.
    pub fn analyze(jobs: &[JobRecord]) -> SalaryReport {
        let mut per_country: BTreeMap<String, Vec<u64>> = BTreeMap::new();
        let mut all = Vec::new();

        for job in jobs {
            if let Some(salary) = job.salary_annual {
                all.push(salary);
                per_country.entry(job.country.clone()).or_default().push(salary);
            }
        }

        SalaryReport {
            overall: Self::calculate_stats(&all),
            by_country: per_country
                .into_iter()
                .filter_map(|(country, salaries)| Self::calculate_stats(&salaries).map(|s| (country, s)))
                .collect(),
        }
    }
}
