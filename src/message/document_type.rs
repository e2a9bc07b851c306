use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::MessageCategory;
use crate::error::ParseError;

/// Kind of business document an outgoing message becomes part of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentType {
    NotifyAggregatedMeasureData,
    RejectRequestAggregatedMeasureData,
    NotifyWholesaleServices,
    RejectRequestWholesaleSettlement,
    ConfirmRequestChangeOfSupplier,
    RejectRequestChangeOfSupplier,
    AccountingPointCharacteristics,
}

impl DocumentType {
    pub const ALL: [DocumentType; 7] = [
        DocumentType::NotifyAggregatedMeasureData,
        DocumentType::RejectRequestAggregatedMeasureData,
        DocumentType::NotifyWholesaleServices,
        DocumentType::RejectRequestWholesaleSettlement,
        DocumentType::ConfirmRequestChangeOfSupplier,
        DocumentType::RejectRequestChangeOfSupplier,
        DocumentType::AccountingPointCharacteristics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DocumentType::NotifyAggregatedMeasureData => "NotifyAggregatedMeasureData",
            DocumentType::RejectRequestAggregatedMeasureData => {
                "RejectRequestAggregatedMeasureData"
            }
            DocumentType::NotifyWholesaleServices => "NotifyWholesaleServices",
            DocumentType::RejectRequestWholesaleSettlement => "RejectRequestWholesaleSettlement",
            DocumentType::ConfirmRequestChangeOfSupplier => "ConfirmRequestChangeOfSupplier",
            DocumentType::RejectRequestChangeOfSupplier => "RejectRequestChangeOfSupplier",
            DocumentType::AccountingPointCharacteristics => "AccountingPointCharacteristics",
        }
    }

    /// Queue partition this document type is bundled in.
    pub fn category(&self) -> MessageCategory {
        match self {
            DocumentType::NotifyAggregatedMeasureData
            | DocumentType::RejectRequestAggregatedMeasureData => MessageCategory::Aggregations,
            DocumentType::NotifyWholesaleServices
            | DocumentType::RejectRequestWholesaleSettlement => MessageCategory::WholesaleResults,
            DocumentType::ConfirmRequestChangeOfSupplier
            | DocumentType::RejectRequestChangeOfSupplier
            | DocumentType::AccountingPointCharacteristics => MessageCategory::MasterData,
        }
    }

    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseError::DocumentType(value.to_string()))
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DocumentType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BusinessReason {
    PreliminaryAggregation,
    BalanceFixing,
    WholesaleFixing,
    Correction,
    ChangeOfSupplier,
    MoveIn,
}

impl BusinessReason {
    pub const ALL: [BusinessReason; 6] = [
        BusinessReason::PreliminaryAggregation,
        BusinessReason::BalanceFixing,
        BusinessReason::WholesaleFixing,
        BusinessReason::Correction,
        BusinessReason::ChangeOfSupplier,
        BusinessReason::MoveIn,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            BusinessReason::PreliminaryAggregation => "D03",
            BusinessReason::BalanceFixing => "D04",
            BusinessReason::WholesaleFixing => "D05",
            BusinessReason::Correction => "D32",
            BusinessReason::ChangeOfSupplier => "E03",
            BusinessReason::MoveIn => "E65",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseError::BusinessReason(value.to_string()))
    }
}

impl fmt::Display for BusinessReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Wire format requested by the polling actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    Xml,
    Json,
    Ebix,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 3] =
        [DocumentFormat::Xml, DocumentFormat::Json, DocumentFormat::Ebix];

    pub fn name(&self) -> &'static str {
        match self {
            DocumentFormat::Xml => "Xml",
            DocumentFormat::Json => "Json",
            DocumentFormat::Ebix => "Ebix",
        }
    }

    /// The legacy ebIX protocol peeks the whole queue regardless of category.
    pub fn ignores_category(&self) -> bool {
        matches!(self, DocumentFormat::Ebix)
    }

    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseError::DocumentFormat(value.to_string()))
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DocumentFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
