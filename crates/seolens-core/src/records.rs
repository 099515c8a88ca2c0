//! Persisted analysis rows
//!
//! One row per analysis, written to the `seo_analyses` table. The `results`
//! column is typed by `analysis_type` instead of holding free-form JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::simulated::{KeywordAnalysis, SimulatedAnalysis, keyword_score};
use crate::types::Report;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub domain: String,
    pub project_id: Option<String>,
    pub score: Option<u8>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: AnalysisPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "analysis_type", content = "results", rename_all = "snake_case")]
pub enum AnalysisPayload {
    SeoReport(Report),
    Technical(SimulatedAnalysis),
    Keyword(KeywordAnalysis),
}

impl AnalysisPayload {
    pub fn analysis_type(&self) -> &'static str {
        match self {
            Self::SeoReport(_) => "seo_report",
            Self::Technical(_) => "technical",
            Self::Keyword(_) => "keyword",
        }
    }
}

impl AnalysisRecord {
    fn new(
        domain: &str,
        project_id: Option<String>,
        score: Option<u8>,
        payload: AnalysisPayload,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            domain: domain.to_string(),
            project_id,
            score,
            created_at: Utc::now(),
            payload,
        }
    }

    /// Row for a fetched-page report; scored by the content audit
    pub fn seo_report(report: Report, project_id: Option<String>) -> Self {
        let score = Some(report.content.score);
        let domain = report.domain.clone();
        Self::new(&domain, project_id, score, AnalysisPayload::SeoReport(report))
    }

    /// Row for a simulated analysis; scored by its overall SEO score
    pub fn technical(analysis: SimulatedAnalysis, project_id: Option<String>) -> Self {
        let score = Some(analysis.seo_score.overall);
        let domain = analysis.domain.clone();
        Self::new(&domain, project_id, score, AnalysisPayload::Technical(analysis))
    }

    pub fn keyword(domain: &str, analysis: KeywordAnalysis, project_id: Option<String>) -> Self {
        let score = Some(keyword_score(&analysis.keywords));
        Self::new(domain, project_id, score, AnalysisPayload::Keyword(analysis))
    }
}
