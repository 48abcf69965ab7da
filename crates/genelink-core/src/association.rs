//! AssociationRecord and the lookup-provider seam.

use std::future::Future;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::LookupError;

/// The knowledge-graph service's answer describing how a gene and a
/// disease are evidentially linked.
///
/// The payload is schema-less and kept verbatim in `raw`. Only the
/// optional top-level `gene`/`disease` string keys are lifted into typed
/// fields; everything else passes through opaquely, so no unknown fields
/// are ever dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRecord {
  pub gene:    Option<String>,
  pub disease: Option<String>,
  pub raw:     Value,
}

impl AssociationRecord {
  pub fn from_value(raw: Value) -> Self {
    let gene = raw.get("gene").and_then(Value::as_str).map(str::to_owned);
    let disease = raw
      .get("disease")
      .and_then(Value::as_str)
      .map(str::to_owned);
    Self { gene, disease, raw }
  }
}

// Wire form is the raw payload itself; `gene`/`disease` are re-derived on
// deserialization.

impl Serialize for AssociationRecord {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.raw.serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for AssociationRecord {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Value::deserialize(deserializer).map(Self::from_value)
  }
}

/// Abstraction over a gene-disease association provider.
///
/// Implemented by `genelink-opentargets`; substituted with stubs in tests
/// so the pipeline can run without network access.
pub trait AssociationSource: Send + Sync {
  /// Resolve both names and fetch the association record between them.
  fn fetch_association<'a>(
    &'a self,
    gene_name: &'a str,
    disease_name: &'a str,
  ) -> impl Future<Output = Result<AssociationRecord, LookupError>> + Send + 'a;
}
