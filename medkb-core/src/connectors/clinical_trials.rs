//! ClinicalTrials.gov v2 API - first phase 3 diabetes study

use async_trait::async_trait;
use serde_json::Value;

use super::connector::Connector;
use super::report::Report;
use super::types::Fetched;
use crate::error::FetchError;
use crate::text::{join, truncate};
use crate::transport::{get_json, Transport};
use crate::tree::{self, ABSENT};

pub const KEY: &str = "ClinicalTrials.gov v2 API（美国 NLM）";

const QUERY_URL: &str = "https://clinicaltrials.gov/api/v2/studies?query.term=diabetes&filter.phase=PHASE3&pageSize=1&fields=NCTId,BriefTitle,OfficialTitle,OverallStatus,StartDate,CompletionDate,EnrollmentCount,Condition,Intervention,LeadSponsorName,BriefSummary";

const SUMMARY_BUDGET: usize = 400;

pub struct ClinicalTrials;

#[async_trait]
impl Connector for ClinicalTrials {
    fn key(&self) -> &'static str {
        KEY
    }

    fn slug(&self) -> &'static str {
        "clinicaltrials"
    }

    async fn fetch(&self, http: &dyn Transport) -> Result<Fetched, FetchError> {
        let data = get_json(http, QUERY_URL).await?;
        Ok(render(&data))
    }
}

fn render(data: &Value) -> Fetched {
    let Some(study) = tree::first(data, "/studies") else {
        return Fetched::NoData;
    };
    let protocol = tree::node(study, "/protocolSection");
    let field = |pointer: &str| tree::text(protocol, pointer);

    let nct_id = field("/identificationModule/nctId");
    let summary = match tree::opt_text(protocol, "/descriptionModule/briefSummary") {
        Some(text) => truncate(&text, SUMMARY_BUDGET),
        None => ABSENT.to_string(),
    };
    let conditions = tree::strings(protocol, "/conditionsModule/conditions", None, 3);
    let interventions = tree::strings(
        protocol,
        "/armsInterventionsModule/interventions",
        Some("name"),
        3,
    );

    let report = Report::new("ClinicalTrials.gov Study")
        .field("NCT ID", nct_id.clone())
        .field("Brief title", field("/identificationModule/briefTitle"))
        .field("Official title", field("/identificationModule/officialTitle"))
        .field("Status", field("/statusModule/overallStatus"))
        .field(
            "Dates",
            format!(
                "{} - {}",
                field("/statusModule/startDateStruct/date"),
                field("/statusModule/completionDateStruct/date")
            ),
        )
        .field("Enrollment", field("/designModule/enrollmentInfo/count"))
        .field("Conditions", join(&conditions))
        .field("Interventions", join(&interventions))
        .field("Lead sponsor", field("/sponsorCollaboratorsModule/leadSponsor/name"))
        .field("Summary", summary)
        .field("Link", format!("https://clinicaltrials.gov/study/{nct_id}"));

    Fetched::Report(report.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_study() {
        let data = json!({
            "studies": [{
                "protocolSection": {
                    "identificationModule": {
                        "nctId": "NCT01234567",
                        "briefTitle": "Insulin Study",
                        "officialTitle": "A Phase 3 Study of Insulin"
                    },
                    "statusModule": {
                        "overallStatus": "COMPLETED",
                        "startDateStruct": {"date": "2019-01"},
                        "completionDateStruct": {"date": "2021-06"}
                    },
                    "designModule": {"enrollmentInfo": {"count": 412}},
                    "descriptionModule": {"briefSummary": "x".repeat(450)},
                    "sponsorCollaboratorsModule": {"leadSponsor": {"name": "Novo Nordisk A/S"}},
                    "conditionsModule": {"conditions": ["Diabetes Mellitus, Type 2", "Obesity"]},
                    "armsInterventionsModule": {"interventions": [
                        {"name": "Insulin icodec"}, {"name": "Insulin glargine"}
                    ]}
                }
            }]
        });

        let Fetched::Report(text) = render(&data) else {
            panic!("expected a report");
        };
        assert!(text.contains("NCT ID: NCT01234567"));
        assert!(text.contains("Dates: 2019-01 - 2021-06"));
        assert!(text.contains("Enrollment: 412"));
        assert!(text.contains("Conditions: Diabetes Mellitus, Type 2, Obesity"));
        assert!(text.contains("Interventions: Insulin icodec, Insulin glargine"));
        assert!(text.contains(&format!("Summary: {}...", "x".repeat(400))));
        assert!(text.ends_with("Link: https://clinicaltrials.gov/study/NCT01234567"));
    }

    #[test]
    fn test_study_without_protocol() {
        let Fetched::Report(text) = render(&json!({"studies": [{}]})) else {
            panic!("expected a report");
        };
        assert!(text.contains("NCT ID: N/A"));
        assert!(text.contains("Summary: N/A"));
        assert!(text.contains("Conditions: \n"));
    }

    #[test]
    fn test_no_studies() {
        assert_eq!(render(&json!({"studies": []})), Fetched::NoData);
    }
}
