//! The institution parser protocol.

use chargemaster_ingest::ArtifactSet;
use chargemaster_model::ChargeMasterEntry;

use crate::error::Result;

/// Records produced on demand as the caller advances; abandoning the
/// iterator before exhaustion is safe (the parser holds no resources beyond
/// the artifact inputs it consumed).
pub type RecordIter = Box<dyn Iterator<Item = Result<ChargeMasterEntry>>>;

/// One institution's normalization strategy.
///
/// Implementations are stateless unit structs identified by a unique,
/// case-insensitively matched institution name. Each documents the source
/// artifacts it expects via [`artifact_urls`](Self::artifact_urls); callers
/// fetch those URLs themselves and supply the opened results in an
/// [`ArtifactSet`].
///
/// Row-level failures surface as `Err` items of the returned iterator;
/// failures that prevent any parsing at all (a missing artifact, an
/// undecodable document) surface from `parse_artifacts` itself.
pub trait ChargeMasterParser: Send + Sync + std::fmt::Debug {
    /// Display name of the institution, unique across the registry.
    fn institution_name(&self) -> &'static str;

    /// Source artifact identifiers this parser knows how to read.
    fn artifact_urls(&self) -> &'static [&'static str];

    /// Transforms raw artifacts into a lazy sequence of canonical records.
    /// Output order is whatever the source row order implies; callers
    /// needing deterministic comparison sort by the record's total order.
    fn parse_artifacts(&self, artifacts: ArtifactSet) -> Result<RecordIter>;
}
