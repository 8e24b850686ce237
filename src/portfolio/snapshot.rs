//! Checksummed JSON packaging of portfolio reports.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::trace;

use super::aggregator::PortfolioReport;
use super::error::PortfolioError;

/// Format version used for checksum-enabled portfolio reports.
pub const PORTFOLIO_REPORT_FORMAT_VERSION: u32 = 1;

/// Wrapper that provides checksum validation for [`PortfolioReport`]s.
///
/// Identical inputs evaluated on the same date produce identical
/// checksums, which makes the package a cheap reproducibility check
/// between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioReportPackage {
    /// Version of the report schema for forward compatibility.
    pub version: u32,
    /// Report payload.
    pub report: PortfolioReport,
    /// Hex-encoded SHA-256 of the serialized report.
    pub checksum: String,
}

impl PortfolioReportPackage {
    /// Creates a new package computing the checksum of the report contents.
    ///
    /// # Errors
    /// [`PortfolioError::SerializationError`] if the report cannot be serialized.
    pub fn new(report: PortfolioReport) -> Result<Self, PortfolioError> {
        let checksum = Self::compute_checksum(&report)?;

        Ok(Self {
            version: PORTFOLIO_REPORT_FORMAT_VERSION,
            report,
            checksum,
        })
    }

    /// Serializes the package to JSON.
    ///
    /// # Errors
    /// [`PortfolioError::SerializationError`] on serializer failure.
    pub fn to_json(&self) -> Result<String, PortfolioError> {
        serde_json::to_string(self).map_err(|error| PortfolioError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes the package from JSON.
    ///
    /// # Errors
    /// [`PortfolioError::DeserializationError`] on malformed input.
    pub fn from_json(data: &str) -> Result<Self, PortfolioError> {
        serde_json::from_str(data).map_err(|error| PortfolioError::DeserializationError {
            message: error.to_string(),
        })
    }

    /// Validates the checksum and version.
    ///
    /// # Errors
    /// [`PortfolioError::InvalidOperation`] for an unknown version,
    /// [`PortfolioError::ChecksumMismatch`] if the contents were altered.
    pub fn validate(&self) -> Result<(), PortfolioError> {
        if self.version != PORTFOLIO_REPORT_FORMAT_VERSION {
            return Err(PortfolioError::InvalidOperation {
                message: format!(
                    "Unsupported report version: {} (expected {})",
                    self.version, PORTFOLIO_REPORT_FORMAT_VERSION
                ),
            });
        }

        let computed = Self::compute_checksum(&self.report)?;
        if computed != self.checksum {
            return Err(PortfolioError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual: computed,
            });
        }

        Ok(())
    }

    /// Consumes the package and returns the validated report.
    ///
    /// # Errors
    /// See [`validate`](Self::validate).
    pub fn into_report(self) -> Result<PortfolioReport, PortfolioError> {
        self.validate()?;
        Ok(self.report)
    }

    fn compute_checksum(report: &PortfolioReport) -> Result<String, PortfolioError> {
        let payload =
            serde_json::to_vec(report).map_err(|error| PortfolioError::SerializationError {
                message: error.to_string(),
            })?;

        let mut hasher = Sha256::new();
        hasher.update(payload);

        let checksum = format!("{:x}", hasher.finalize());
        trace!("report checksum: {checksum}");
        Ok(checksum)
    }
}
