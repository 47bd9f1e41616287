//! Static connectors for sources without a public API
//!
//! Regulators, licensed terminologies and self-hosted knowledge graphs
//! cannot be queried anonymously. Their connectors make no request and
//! return a hand-written advisory: how access works, and a worked
//! example of the data shape.

use async_trait::async_trait;

use super::connector::Connector;
use super::types::{ConnectorKind, Fetched};
use crate::error::FetchError;
use crate::transport::Transport;

/// A connector whose example is a fixed advisory text
pub struct StaticConnector {
    key: &'static str,
    slug: &'static str,
    text: &'static str,
}

impl StaticConnector {
    pub const fn new(key: &'static str, slug: &'static str, text: &'static str) -> Self {
        Self { key, slug, text }
    }

    pub fn text(&self) -> &'static str {
        self.text
    }
}

#[async_trait]
impl Connector for StaticConnector {
    fn key(&self) -> &'static str {
        self.key
    }

    fn slug(&self) -> &'static str {
        self.slug
    }

    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Static
    }

    async fn fetch(&self, _http: &dyn Transport) -> Result<Fetched, FetchError> {
        Ok(Fetched::Report(self.text.to_string()))
    }
}

pub const BIOPORTAL: StaticConnector = StaticConnector::new(
    "BioPortal REST API（美国 NCBO）",
    "bioportal",
    "[BioPortal Biomedical Ontologies]
Access: requires a free API key
Scope: SNOMED CT, ICD-10, MeSH, LOINC and other terminologies
Example: mappings of \"diabetes mellitus\" across coding systems
- SNOMED CT: 73211009 (Diabetes mellitus)
- ICD-10: E10-E14 (Diabetes mellitus)
- MeSH: D003920 (Diabetes Mellitus)
Sign up: https://bioportal.bioontology.org/account",
);

pub const MEDQA: StaticConnector = StaticConnector::new(
    "MedQA（USMLE 风格问答）/ BigBio",
    "medqa",
    "[MedQA Medical QA Dataset]
Source: Hugging Face Datasets (bigbio/med_qa)
Size: about 12,723 USMLE-style questions

Example:
Question: A 45-year-old man presents with persistent chest pain. ECG shows ST elevation and troponin I is raised. What is the most likely diagnosis?
A. Unstable angina
B. Stable angina
C. Acute myocardial infarction
D. Pericarditis
Answer: C. Acute myocardial infarction
Explanation: ST elevation with raised cardiac markers (troponin) is the classic picture of STEMI.

Dataset: https://huggingface.co/datasets/bigbio/med_qa
Loading: load_dataset(\"bigbio/med_qa\") with the Hugging Face datasets library",
);

pub const EMA: StaticConnector = StaticConnector::new(
    "European Medicines Agency（EMA）Open Data / API（欧盟）",
    "ema",
    "[European Medicines Agency (EMA)]
Access: request access through the EU API Store
Content:
- Marketing authorisation information
- European public assessment reports (EPAR)
- Pharmacovigilance data
- Clinical trial results

Example record (available from the data downloads):
Product: Keytruda (pembrolizumab)
Indications: melanoma, non-small cell lung cancer and others
Authorised: 2015-07-17
Applicant: Merck Sharp & Dohme B.V.
Apply: https://api.store/eu-institutions-api/european-medicines-agency-api",
);

pub const NHS: StaticConnector = StaticConnector::new(
    "NHS England APIs / NHS website developer portal（英国 NHS）",
    "nhs",
    "[NHS England APIs]
Access: register an NHS developer account and request an API key
Services:
1. NHS Service Search API - locate NHS services
2. NHS Conditions API - conditions and symptoms
3. NHS Medicines API - medicines information
4. NHS Organisation Data API - care organisations

Example (NHS Conditions content):
Condition: Type 2 diabetes
Symptoms: frequent urination, thirst, tiredness, blurred vision
Treatment: diet, exercise, medicines such as metformin
Prevention: healthy diet, regular exercise, healthy weight

Apply: https://developer.api.nhs.uk/nhs-api",
);

pub const NHC: StaticConnector = StaticConnector::new(
    "国家卫生健康委（NHC）及卫生健康标准网",
    "nhc",
    "[National Health Commission of China (NHC)]
Access: no public API; content must be collected from the websites

Available content:
1. Diagnosis and treatment protocols
   Example: COVID-19 diagnosis and treatment protocol
   Covers: aetiology, epidemiology, clinical features, diagnostic criteria, treatment
2. Health standards
   Example: WS/T 666-2019 assessment of population folate status
   Covers: test methods, reference ranges, quality control
3. Regulations
   Example: Regulations on the Administration of Medical Institutions

Sources:
- http://www.nhc.gov.cn
- https://wsbz.nhc.gov.cn",
);

pub const NMPA: StaticConnector = StaticConnector::new(
    "国家药品监督管理局（NMPA）及相关政务服务平台",
    "nmpa",
    "[National Medical Products Administration (NMPA)]
Access: no unified public API; query through the web portal

Example queries:
1. Drug registration
   Approval number: H20000542
   Product: aspirin enteric-coated tablets
   Company: Bayer Healthcare Co., Ltd.
   Strength: 100mg
2. Medical device registration
   Certificate: 20153460xxx
   Product: sterile single-use syringe
3. Adverse drug reaction bulletins
4. Recall notices

Portal: https://www.nmpa.gov.cn/datasearch/",
);

pub const NMPA_UDI: StaticConnector = StaticConnector::new(
    "国家药监局 NMPA：医疗器械唯一标识（UDI）管理信息系统 数据共享 API",
    "nmpa-udi",
    "[NMPA Unique Device Identification (UDI) System]
Access: requires an access token

API:
- Endpoint: https://udi.nmpa.gov.cn/api/beta/v3/sharing
- Authentication: accessToken request header

Example record:
Device identifier (DI): 06972832530xxx
Product: single-use infusion set
Manufacturer: xxx Medical Devices Co., Ltd.
Registration: 20203662xxx
Model: 20 drops/ml
Packaging: 50 units/box

Apply: https://udi.nmpa.gov.cn/showListInterr.html",
);

pub const CHICTR: StaticConnector = StaticConnector::new(
    "中国临床试验注册中心（ChiCTR）",
    "chictr",
    "[Chinese Clinical Trial Registry (ChiCTR)]
Access: no public REST API; query through the website

Example registration:
Registration number: ChiCTR2000029308
Title: Randomised controlled trial of remdesivir for COVID-19
Objective: evaluate efficacy and safety of remdesivir
Study type: interventional
Design: randomised, double-blind, placebo-controlled
Inclusion: confirmed COVID-19 within 12 days of onset
Primary outcome: time to clinical improvement
Sample size: 453
Status: completed

Search: https://www.chictr.org.cn/searchproj.html",
);

pub const CMA_GUIDELINES: StaticConnector = StaticConnector::new(
    "中华医学会及相关指南/共识（通过医学网站聚合发布）",
    "cma-guidelines",
    "[Chinese Medical Association Guidelines]
Access: no unified API; guidelines are published as PDFs

Example guideline:
Guideline for the prevention and treatment of type 2 diabetes in China (2020)
Publisher: Chinese Diabetes Society

Key content:
1. Diagnostic criteria
   - fasting plasma glucose >= 7.0 mmol/L
   - or 2h OGTT glucose >= 11.1 mmol/L
   - or HbA1c >= 6.5%
2. Treatment pathway
   First-line drug: metformin
   Glycaemic target: HbA1c < 7.0%
3. Complication screening
   - annual fundus examination
   - annual urine microalbumin

Channels: https://www.cma.org.cn, medlive.cn, dxy.cn",
);

pub const CNKI: StaticConnector = StaticConnector::new(
    "中国知网（CNKI，China National Knowledge Infrastructure）",
    "cnki",
    "[China National Knowledge Infrastructure (CNKI)]
Access: no public API; institutional account required

Searchable content:
1. Journal articles
   Example: Meta-analysis of metformin for type 2 diabetes
   Source: Chinese Journal of Endocrinology and Metabolism
2. Theses
   Example: Deep learning for medical image analysis
   Institution: Tsinghua University
3. Conference papers, patents, standards

Third-party wrapper:
- MagicCNKI: https://github.com/1049451037/MagicCNKI
- search only, no full-text download",
);

pub const WANFANG: StaticConnector = StaticConnector::new(
    "万方数据（Wanfang Data）",
    "wanfang",
    "[Wanfang Data Open Platform]
Access: register on the Wanfang open platform and create an application

API examples:
1. Literature search
   Endpoint: /api/search/literature
   Parameters: keyword, type, page, size
2. Literature detail
   Endpoint: /api/literature/detail
   Parameters: id, type

Example record:
Title: Advances in the diagnosis and treatment of COVID-19 pneumonia
Authors: Zhang San, Li Si
Source: National Medical Journal of China
Year: 2020
Keywords: COVID-19, diagnosis, treatment

Apply: https://apps.wanfangdata.com.cn/open/",
);

pub const HUATUO_26M: StaticConnector = StaticConnector::new(
    "Huatuo-26M / 深圳市大数据研究院、FreedomIntelligence",
    "huatuo-26m",
    "[Huatuo-26M Chinese Medical QA Dataset]
Size: about 26 million question-answer pairs
Source: Shenzhen Research Institute of Big Data / FreedomIntelligence

Examples:
Q: What are the symptoms of hypertension?
A: Common symptoms include:
1. Headache, usually occipital or temporal
2. Dizziness, especially on changing posture
3. Palpitations
4. Tinnitus
5. Blurred vision
6. Neck stiffness
Note: early hypertension may have no symptoms; measure blood pressure regularly

Q: Which fruits can people with diabetes eat?
A: Prefer low-GI fruit:
1. Apple (GI=36)
2. Pear (GI=36)
3. Cherry (GI=22)
4. Strawberry (GI=29)
5. Pomelo (GI=25)
About 100-150g per serving, not on an empty stomach

Download: https://github.com/FreedomIntelligence/Huatuo-26M",
);

pub const HUATUO_KGQA: StaticConnector = StaticConnector::new(
    "huatuo_knowledge_graph_qa / FreedomIntelligenc",
    "huatuo-kgqa",
    "[Huatuo Knowledge Graph QA Dataset]
Size: about 798,000 question-answer pairs
Feature: generated automatically from a medical knowledge graph

Examples:
Q: What are the common symptoms of pneumonia?
A: Fever, cough, sputum, chest pain, dyspnoea, fatigue

Q: What can amoxicillin treat?
A: Upper respiratory tract infection, otitis media, sinusitis, pharyngitis, tonsillitis, acute bronchitis, pneumonia, urinary tract infection, skin and soft tissue infection

Q: Which foods should people with hypertension avoid?
A: High-salt food, pickled food, high-fat food, fried food, alcohol, strong tea, coffee

Download: https://huggingface.co/datasets/FreedomIntelligence/huatuo_knowledge_graph_qa",
);

pub const ORPHANET: StaticConnector = StaticConnector::new(
    "Orphanet Rare Diseases Ontology（ORDO）",
    "orphanet",
    "[Orphanet Rare Diseases Ontology (ORDO)]
Access: SPARQL endpoint or the OLS API

Example rare disease:
Orphanet code: ORPHA:558
Name: Marfan syndrome
Prevalence: 1-5/10000
Inheritance: autosomal dominant
Gene: FBN1 (fibrillin-1)
Clinical features:
- Skeletal: tall slender build, arachnodactyly, pectus excavatum or carinatum
- Cardiovascular: aortic root dilatation, mitral valve prolapse
- Ocular: ectopia lentis, myopia

SPARQL: https://www.ebi.ac.uk/rdf/services/sparql
OLS: https://www.ebi.ac.uk/ols4/ontologies/ordo",
);

pub const DRUGCENTRAL: StaticConnector = StaticConnector::new(
    "DrugCentral",
    "drugcentral",
    "[DrugCentral Drug Database]
Access: download the database dump and host it yourself

Example (metformin):
Drug ID: 1202
Generic name: Metformin
Brand names: Glucophage, Fortamet, Glumetza
Formula: C4H11N5
Molecular weight: 129.16 g/mol
Mechanism: activates AMPK, suppresses hepatic gluconeogenesis, increases peripheral glucose uptake
Indication: type 2 diabetes
Targets: PRKAA1, PRKAA2 (AMP-activated protein kinase)
Adverse effects: gastrointestinal upset, lactic acidosis (rare)
Interactions: iodinated contrast may raise the risk of lactic acidosis

Download: https://drugcentral.org/download",
);

pub const PRIMEKG: StaticConnector = StaticConnector::new(
    "PrimeKG（Precision Medicine Knowledge Graph）",
    "primekg",
    "[PrimeKG Precision Medicine Knowledge Graph]
Access: download the data and host a SPARQL endpoint yourself

Graph statistics:
- Nodes: ~129,000
- Edges: ~8,000,000
- Diseases: ~17,000
- Drugs: ~7,900
- Genes/proteins: ~27,000
- Phenotypes: ~15,000

Relation examples:
1. Disease-gene
   lung cancer - associated_with - EGFR, KRAS, ALK, TP53
2. Drug-target
   gefitinib - targets - EGFR
3. Drug-indication
   osimertinib - indication - EGFR-mutant non-small cell lung cancer

Sources: integrates DrugBank, DisGeNET, CTD, SIDER and 20+ databases
Download: https://github.com/mims-harvard/PrimeKG",
);

pub const UMLS: StaticConnector = StaticConnector::new(
    "UMLS Terminology Services（UTS）/ FHIR UMLS API",
    "umls",
    "[UMLS Unified Medical Language System]
Access: requires a UMLS licence and API key

Mapping example (diabetes mellitus):
UMLS CUI: C0011849
Concept: Diabetes Mellitus

Code mappings:
- SNOMED CT: 73211009
- ICD-10-CM: E08-E13
- MeSH: D003920
- LOINC: LP32697-2
- RxNorm: (related to antidiabetic drugs)

Semantic type: Disease or Syndrome
Definition: A metabolic disorder characterized by abnormally high blood sugar levels

FHIR operations:
- CodeSystem/$lookup: code details
- ValueSet/$expand: expand a value set
- ConceptMap/$translate: translate between terminologies

Sign up: https://uts.nlm.nih.gov/uts/signup-login",
);

pub const CMEKG: StaticConnector = StaticConnector::new(
    "CMeKG（中文医学知识图谱）/ 北京大学、郑州大学等学术团队",
    "cmekg",
    "[CMeKG Chinese Medical Knowledge Graph]
Access: download and import into a graph database such as Neo4j

Graph statistics:
- Entities: ~1 million
- Relations: ~5 million
- Entity types: disease, symptom, drug, examination, procedure

Triple examples:
1. (diabetes, clinical feature, polydipsia)
2. (diabetes, clinical feature, polyuria)
3. (diabetes, clinical feature, polyphagia)
4. (diabetes, drug, metformin)
5. (diabetes, complication, diabetic retinopathy)
6. (metformin, contraindication, renal insufficiency)
7. (hypertension, examination, blood pressure measurement)

Tools: https://github.com/king-yyf/CMeKG_tools
Data: https://tianchi.aliyun.com/dataset/81506",
);

pub const PUMCH_CMEKG: StaticConnector = StaticConnector::new(
    "医学知识图谱数据集（协和医院 + CMeKG）/ 国家科学数据中心等",
    "pumch-cmekg",
    "[PUMCH + CMeKG Knowledge Graph]
Access: apply through the National Basic Science Data Center; research use only

Features:
- built on real electronic health records from Peking Union Medical College Hospital
- overlaid with the CMeKG knowledge graph
- clinical entities and relations

Examples:
1. Disease-examination
   pneumonia -> recommended examination -> chest CT, complete blood count, C-reactive protein
2. Disease-drug
   community-acquired pneumonia -> first-line treatment -> amoxicillin/clavulanate
3. Symptom-disease
   fever + cough + dyspnoea -> possible diseases -> pneumonia, bronchitis

Apply: https://nbsdc.cn/general/dataDetail?id=666067f0195d266d328f21ce",
);

pub const CMKG: StaticConnector = StaticConnector::new(
    "CMKG（The first Chinese Medical Knowledge Graph）/ GitHub 开源项目",
    "cmkg",
    "[CMKG Chinese Medical Knowledge Graph]
Source: open-source GitHub project
Feature: multimodal, built from public medical web pages

Entity types: disease, drug, symptom, examination, department

Disease card (hypertension):
{
  \"name\": \"hypertension\",
  \"aliases\": [\"essential hypertension\", \"high blood pressure\"],
  \"department\": \"cardiology\",
  \"symptoms\": [\"headache\", \"dizziness\", \"palpitations\", \"tinnitus\"],
  \"diagnosis\": \"systolic >= 140mmHg and/or diastolic >= 90mmHg\",
  \"treatment\": [\"lifestyle intervention\", \"medication\"],
  \"drugs\": [\"amlodipine\", \"valsartan\", \"hydrochlorothiazide\"],
  \"complications\": [\"coronary heart disease\", \"stroke\", \"kidney disease\"],
  \"prevention\": [\"low-salt diet\", \"weight control\", \"no smoking, limited alcohol\"]
}

Project: https://github.com/WENGSYX/CMKG",
);

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [&StaticConnector; 20] = [
        &BIOPORTAL,
        &MEDQA,
        &EMA,
        &NHS,
        &NHC,
        &NMPA,
        &NMPA_UDI,
        &CHICTR,
        &CMA_GUIDELINES,
        &CNKI,
        &WANFANG,
        &HUATUO_26M,
        &HUATUO_KGQA,
        &ORPHANET,
        &DRUGCENTRAL,
        &PRIMEKG,
        &UMLS,
        &CMEKG,
        &PUMCH_CMEKG,
        &CMKG,
    ];

    #[test]
    fn test_advisories_use_labeled_block_shape() {
        for connector in ALL {
            let text = connector.text();
            assert!(text.starts_with('['), "{} lacks a header", connector.slug);
            assert!(text.lines().count() > 3, "{} is too short", connector.slug);
        }
    }

    #[test]
    fn test_advisories_name_an_access_route() {
        for connector in ALL {
            assert!(connector.text().contains("http"), "{} has no link", connector.slug);
        }
    }

    #[tokio::test]
    async fn test_static_fetch_ignores_transport() {
        let text = DRUGCENTRAL
            .fetch(&crate::transport::OfflineTransport)
            .await
            .unwrap();
        assert_eq!(text, Fetched::Report(DRUGCENTRAL.text().to_string()));
        assert_eq!(DRUGCENTRAL.kind(), ConnectorKind::Static);
    }
}
