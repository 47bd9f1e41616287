//! PubChem PUG REST - aspirin properties plus synonyms
//!
//! The synonyms lookup depends on the CID from the first response. It is
//! best effort: if it fails the report is still produced with an empty
//! synonyms line.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::connector::Connector;
use super::report::Report;
use super::types::Fetched;
use crate::error::FetchError;
use crate::text::join;
use crate::transport::{get_json, Transport};
use crate::tree;

pub const KEY: &str = "NCBI BLAST URL API & PubChem PUG（补充）";

const PROPERTIES_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/name/aspirin/property/MolecularFormula,MolecularWeight,IUPACName,CanonicalSMILES,InChI/JSON";
const COMPOUND_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/cid";

const MAX_SYNONYMS: usize = 5;

pub struct PubChem;

#[async_trait]
impl Connector for PubChem {
    fn key(&self) -> &'static str {
        KEY
    }

    fn slug(&self) -> &'static str {
        "pubchem"
    }

    async fn fetch(&self, http: &dyn Transport) -> Result<Fetched, FetchError> {
        let data = get_json(http, PROPERTIES_URL).await?;
        let Some(props) = tree::first(&data, "/PropertyTable/Properties") else {
            return Ok(Fetched::NoData);
        };

        let synonyms = match tree::opt_text(props, "/CID") {
            Some(cid) => {
                let url = format!("{COMPOUND_URL}/{cid}/synonyms/JSON");
                match get_json(http, &url).await {
                    Ok(body) => synonyms(&body),
                    Err(e) => {
                        debug!("PubChem synonyms lookup failed for CID {}: {}", cid, e);
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };

        Ok(Fetched::Report(render(props, &synonyms)))
    }
}

fn synonyms(body: &Value) -> Vec<String> {
    let info = tree::first(body, "/InformationList/Information");
    info.map(|info| tree::strings(info, "/Synonym", None, MAX_SYNONYMS))
        .unwrap_or_default()
}

fn render(props: &Value, synonyms: &[String]) -> String {
    let cid = tree::text(props, "/CID");
    // PubChem has renamed CanonicalSMILES in newer responses
    let smiles = ["/CanonicalSMILES", "/ConnectivitySMILES", "/SMILES"]
        .iter()
        .find_map(|p| tree::opt_text(props, p))
        .unwrap_or_else(|| tree::ABSENT.to_string());

    Report::new("PubChem Compound")
        .field("Compound", "Aspirin")
        .field("CID", cid.clone())
        .field("Molecular formula", tree::text(props, "/MolecularFormula"))
        .field("Molecular weight", format!("{} g/mol", tree::text(props, "/MolecularWeight")))
        .field("IUPAC name", tree::text(props, "/IUPACName"))
        .field("SMILES", smiles)
        .field("InChI", tree::text(props, "/InChI"))
        .field("Synonyms", join(synonyms))
        .field("Pharmacology", "NSAID; inhibits cyclooxygenase (COX)")
        .field("Clinical use", "Analgesic, antipyretic, antiplatelet")
        .field("Link", format!("https://pubchem.ncbi.nlm.nih.gov/compound/{cid}"))
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::connector::invoke;
    use crate::testing::{Reply, ScriptedTransport};
    use crate::connectors::types::Outcome;

    const PROPERTIES: &str = r#"{"PropertyTable": {"Properties": [{
        "CID": 2244,
        "MolecularFormula": "C9H8O4",
        "MolecularWeight": "180.16",
        "IUPACName": "2-acetyloxybenzoic acid",
        "ConnectivitySMILES": "CC(=O)OC1=CC=CC=C1C(=O)O",
        "InChI": "InChI=1S/C9H8O4/c1-6(10)13-8-5-3-2-4-7(8)9(11)12/h2-5H,1H3,(H,11,12)"
    }]}}"#;

    const SYNONYMS: &str = r#"{"InformationList": {"Information": [{
        "CID": 2244,
        "Synonym": ["aspirin", "ACETYLSALICYLIC ACID", "50-78-2", "2-Acetoxybenzoic acid", "Acetylsalicylate", "Polopiryna"]
    }]}}"#;

    #[tokio::test]
    async fn test_fetch_with_synonyms() {
        let http = ScriptedTransport::new()
            .ok("https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/name/", PROPERTIES)
            .ok("https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/cid/2244/", SYNONYMS);

        let example = invoke(&PubChem, &http).await;
        assert_eq!(example.outcome, Outcome::Fetched);
        assert!(example.text.contains("CID: 2244"));
        assert!(example.text.contains("Molecular weight: 180.16 g/mol"));
        assert!(example.text.contains("SMILES: CC(=O)OC1=CC=CC=C1C(=O)O"));
        assert!(example.text.contains(
            "Synonyms: aspirin, ACETYLSALICYLIC ACID, 50-78-2, 2-Acetoxybenzoic acid, Acetylsalicylate\n"
        ));
    }

    #[tokio::test]
    async fn test_synonym_failure_is_absorbed() {
        let http = ScriptedTransport::new()
            .ok("https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/name/", PROPERTIES)
            .route(
                "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/cid/",
                Reply::status(404, "{}"),
            );

        let example = invoke(&PubChem, &http).await;
        assert_eq!(example.outcome, Outcome::Fetched);
        assert!(example.text.contains("Synonyms: \n"));
    }

    #[tokio::test]
    async fn test_primary_not_found_fails() {
        let http = ScriptedTransport::new().route(
            "https://pubchem.ncbi.nlm.nih.gov/",
            Reply::status(404, r#"{"Fault": {"Code": "PUGREST.NotFound"}}"#),
        );

        let example = invoke(&PubChem, &http).await;
        assert_eq!(example.outcome, Outcome::Failed);
        assert!(example.text.contains("HTTP 404"));
    }

    #[test]
    fn test_empty_property_table() {
        assert!(synonyms(&serde_json::json!({})).is_empty());
    }
}
