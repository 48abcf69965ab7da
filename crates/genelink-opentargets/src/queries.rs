//! GraphQL documents sent to the Open Targets platform API.
//!
//! The search documents request a single ranked hit; the first hit always
//! wins, with no fuzzy matching or disambiguation.

pub const GENE_SEARCH: &str = r#"
    query findTarget($queryString: String!) {
      search(queryString: $queryString, entityNames: ["target"], page: { index: 0, size: 1 }) {
        hits { id }
      }
    }
    "#;

pub const DISEASE_SEARCH: &str = r#"
    query findDisease($queryString: String!) {
      search(queryString: $queryString, entityNames: ["disease"], page: { index: 0, size: 1 }) {
        hits { id }
      }
    }
    "#;

pub const TARGET_DISEASE_EVIDENCE: &str = r#"
    query targetDiseaseEvidence($diseaseId: String!, $geneId: String!) {
      disease(efoId: $diseaseId) {
        id
        name
        evidences(ensemblIds: [$geneId]) {
          count
          rows {
            disease { id name }
            diseaseFromSource
            target { id approvedSymbol }
            mutatedSamples {
              functionalConsequence { id label }
              numberSamplesTested
              numberMutatedSamples
            }
            resourceScore
            significantDriverMethods
            cohortId
            cohortShortName
            cohortDescription
          }
        }
      }
    }
    "#;
