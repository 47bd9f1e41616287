//! Connector registry
//!
//! An ordered list of connectors keyed by canonical source name.
//! Resolution is a bidirectional substring test and the **first** entry
//! in registration order wins, so the order in [`Registry::standard`]
//! is part of the behaviour: when two keys both match a short name, the
//! earlier one is chosen.

use tracing::debug;

use super::advisory;
use super::clinical_trials::ClinicalTrials;
use super::connector::{invoke, Connector};
use super::disease_ontology::DiseaseOntology;
use super::europe_pmc::EuropePmc;
use super::openfda::OpenFda;
use super::pubchem::PubChem;
use super::pubmed::PubMed;
use super::types::KnowledgeExample;
use super::who_gho::WhoGho;
use crate::transport::Transport;

/// Immutable, ordered set of connectors
pub struct Registry {
    connectors: Vec<Box<dyn Connector>>,
}

impl Registry {
    /// Build a registry from connectors in resolution order
    pub fn from_connectors(connectors: Vec<Box<dyn Connector>>) -> Self {
        Self { connectors }
    }

    /// The full catalog of known sources, in catalog order
    pub fn standard() -> Self {
        Self::from_connectors(vec![
            Box::new(WhoGho),
            Box::new(PubMed),
            Box::new(ClinicalTrials),
            Box::new(OpenFda),
            Box::new(advisory::BIOPORTAL),
            Box::new(advisory::MEDQA),
            Box::new(EuropePmc),
            Box::new(advisory::EMA),
            Box::new(advisory::NHS),
            Box::new(PubChem),
            Box::new(advisory::NHC),
            Box::new(advisory::NMPA),
            Box::new(advisory::NMPA_UDI),
            Box::new(advisory::CHICTR),
            Box::new(advisory::CMA_GUIDELINES),
            Box::new(advisory::CNKI),
            Box::new(advisory::WANFANG),
            Box::new(advisory::HUATUO_26M),
            Box::new(advisory::HUATUO_KGQA),
            Box::new(DiseaseOntology),
            Box::new(advisory::ORPHANET),
            Box::new(advisory::DRUGCENTRAL),
            Box::new(advisory::PRIMEKG),
            Box::new(advisory::UMLS),
            Box::new(advisory::CMEKG),
            Box::new(advisory::PUMCH_CMEKG),
            Box::new(advisory::CMKG),
        ])
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Connectors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Connector> {
        self.connectors.iter().map(|c| c.as_ref())
    }

    /// Resolve a catalog name to its connector.
    ///
    /// A key matches when it contains the name or the name contains it.
    /// Blank names never match: the empty string is a substring of every key.
    pub fn resolve(&self, name: &str) -> Option<&dyn Connector> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut matches = self
            .iter()
            .filter(|c| c.key().contains(name) || name.contains(c.key()));
        let chosen = matches.next()?;

        let others: Vec<&str> = matches.map(|c| c.slug()).collect();
        if !others.is_empty() {
            debug!(
                "Name '{}' is ambiguous; using '{}' over {:?}",
                name,
                chosen.slug(),
                others
            );
        }
        Some(chosen)
    }

    /// Look up a connector by its short CLI identifier
    pub fn by_slug(&self, slug: &str) -> Option<&dyn Connector> {
        self.iter().find(|c| c.slug().eq_ignore_ascii_case(slug))
    }

    /// Resolve and invoke; an unknown name yields the unresolved placeholder
    pub async fn lookup(&self, name: &str, http: &dyn Transport) -> KnowledgeExample {
        match self.resolve(name) {
            Some(connector) => invoke(connector, http).await,
            None => {
                debug!("No connector matches '{}'", name);
                KnowledgeExample::unresolved()
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
