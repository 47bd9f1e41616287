//! Every registered connector must turn any transport outcome into text.
//!
//! Each test drives the full standard registry through one scripted
//! failure mode and checks the classification of every example.

mod common;

use common::{init_test_logging, Reply, ScriptedTransport};
use medkb_core::connectors::{
    invoke, ConnectorKind, Outcome, Registry, FAILURE_MARKER, NO_DATA,
};
use medkb_core::transport::Transport;

async fn run_all(http: &dyn Transport) -> Vec<(ConnectorKind, &'static str, Outcome, String)> {
    let registry = Registry::standard();
    let mut results = Vec::new();
    for connector in registry.iter() {
        let example = invoke(connector, http).await;
        results.push((connector.kind(), connector.slug(), example.outcome, example.text));
    }
    results
}

fn assert_static_untouched(results: &[(ConnectorKind, &'static str, Outcome, String)]) {
    for (kind, slug, outcome, text) in results {
        if *kind == ConnectorKind::Static {
            assert_eq!(*outcome, Outcome::Static, "{slug}");
            assert!(text.starts_with('['), "{slug}: {text}");
        }
    }
}

// ============================================================================
// Failure Modes
// ============================================================================

#[tokio::test]
async fn test_timeout_becomes_failure_text() {
    init_test_logging();
    let http = ScriptedTransport::always(Reply::Timeout);
    let results = run_all(&http).await;

    for (kind, slug, outcome, text) in &results {
        if *kind == ConnectorKind::Api {
            assert_eq!(*outcome, Outcome::Failed, "{slug}");
            assert!(text.starts_with(&format!("{FAILURE_MARKER}: ")), "{slug}: {text}");
            assert!(text.contains("timed out"), "{slug}: {text}");
        }
    }
    assert_static_untouched(&results);
}

#[tokio::test]
async fn test_server_error_becomes_failure_text() {
    init_test_logging();
    let http = ScriptedTransport::status(500);
    let results = run_all(&http).await;

    for (kind, slug, outcome, text) in &results {
        if *kind == ConnectorKind::Api {
            assert_eq!(*outcome, Outcome::Failed, "{slug}");
            assert!(text.contains("HTTP 500"), "{slug}: {text}");
        }
    }
    assert_static_untouched(&results);
}

#[tokio::test]
async fn test_truncated_json_becomes_failure_text() {
    init_test_logging();
    let http = ScriptedTransport::body("{\"results\": [{\"id\": ");
    let results = run_all(&http).await;

    for (kind, slug, outcome, text) in &results {
        if *kind == ConnectorKind::Api {
            assert_eq!(*outcome, Outcome::Failed, "{slug}");
            assert!(text.starts_with(FAILURE_MARKER), "{slug}: {text}");
        }
    }
}

#[tokio::test]
async fn test_connection_refused_becomes_failure_text() {
    let http = ScriptedTransport::always(Reply::Refused);
    let results = run_all(&http).await;

    let failed = results
        .iter()
        .filter(|(_, _, outcome, _)| *outcome == Outcome::Failed)
        .count();
    let api = results
        .iter()
        .filter(|(kind, _, _, _)| *kind == ConnectorKind::Api)
        .count();
    assert_eq!(failed, api);
    assert_eq!(api, 7);
}

// ============================================================================
// Empty Results
// ============================================================================

#[tokio::test]
async fn test_empty_object_is_no_data() {
    let http = ScriptedTransport::body("{}");
    let results = run_all(&http).await;

    for (kind, slug, outcome, text) in &results {
        if *kind == ConnectorKind::Api {
            assert_eq!(*outcome, Outcome::Empty, "{slug}");
            assert_eq!(text, NO_DATA, "{slug}");
        }
    }
}

#[tokio::test]
async fn test_empty_result_lists_are_no_data() {
    let http = ScriptedTransport::status(404)
        .ok("http://apps.who.int", r#"{"fact": []}"#)
        .ok("https://eutils.ncbi.nlm.nih.gov", r#"{"esearchresult": {"count": "0", "idlist": []}}"#)
        .ok("https://clinicaltrials.gov", r#"{"studies": []}"#)
        .ok("https://api.fda.gov", r#"{"meta": {}, "results": []}"#)
        .ok("https://www.ebi.ac.uk", r#"{"hitCount": 0, "resultList": {"result": []}}"#)
        .ok("https://pubchem.ncbi.nlm.nih.gov", r#"{"PropertyTable": {"Properties": []}}"#)
        .ok("https://www.disease-ontology.org", "{}");

    let results = run_all(&http).await;
    for (kind, slug, outcome, _) in &results {
        if *kind == ConnectorKind::Api {
            assert_eq!(*outcome, Outcome::Empty, "{slug}");
        }
    }
}

// ============================================================================
// Dependent Requests
// ============================================================================

const EFETCH: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
 <PubmedArticle>
  <MedlineCitation>
   <Article>
    <Journal>
     <JournalIssue><PubDate><Year>2024</Year></PubDate></JournalIssue>
     <Title>Diabetes Care</Title>
    </Journal>
    <ArticleTitle>Tirzepatide &amp; glycaemic control.</ArticleTitle>
    <Abstract><AbstractText>Short abstract.</AbstractText></Abstract>
    <AuthorList>
     <Author><LastName>Rossi</LastName><ForeName>Anna</ForeName></Author>
    </AuthorList>
   </Article>
  </MedlineCitation>
 </PubmedArticle>
</PubmedArticleSet>"#;

#[tokio::test]
async fn test_pubmed_search_then_fetch() {
    let http = ScriptedTransport::status(404)
        .ok(
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi",
            r#"{"esearchresult": {"idlist": ["39000042"]}}"#,
        )
        .ok("https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi", EFETCH);

    let registry = Registry::standard();
    let example = registry.lookup("PubMed", &http).await;

    assert_eq!(example.outcome, Outcome::Fetched);
    assert!(example.text.starts_with("[PubMed Literature]"));
    assert!(example.text.contains("PMID: 39000042"));
    assert!(example.text.contains("Title: Tirzepatide & glycaemic control."));
    assert!(example.text.contains("Authors: Rossi Anna\n"));

    let requests = http.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].contains("id=39000042"));
}

#[tokio::test]
async fn test_pubmed_fetch_failure_after_search() {
    let http = ScriptedTransport::always(Reply::Timeout).ok(
        "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi",
        r#"{"esearchresult": {"idlist": ["1"]}}"#,
    );

    let example = Registry::standard().lookup("PubMed", &http).await;
    assert_eq!(example.outcome, Outcome::Failed);
    assert!(example.text.contains("timed out"));
}

#[tokio::test]
async fn test_pubchem_synonyms_failure_is_absorbed() {
    let http = ScriptedTransport::status(503).ok(
        "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/name/aspirin",
        r#"{"PropertyTable": {"Properties": [{"CID": 2244, "MolecularFormula": "C9H8O4"}]}}"#,
    );

    let example = Registry::standard().lookup("PubChem", &http).await;
    assert_eq!(example.outcome, Outcome::Fetched);
    assert!(example.text.contains("CID: 2244"));
    assert!(example.text.contains("Synonyms: \n"));
    assert!(http.requests()[1].ends_with("/cid/2244/synonyms/JSON"));
}
