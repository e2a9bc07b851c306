use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Role an actor plays in the market. A single actor number may hold several
/// roles, each with its own queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarketRole {
    EnergySupplier,
    GridAccessProvider,
    BalanceResponsibleParty,
    MeteredDataResponsible,
    MeteringPointAdministrator,
    SystemOperator,
    DataHubAdministrator,
}

impl MarketRole {
    pub const ALL: [MarketRole; 7] = [
        MarketRole::EnergySupplier,
        MarketRole::GridAccessProvider,
        MarketRole::BalanceResponsibleParty,
        MarketRole::MeteredDataResponsible,
        MarketRole::MeteringPointAdministrator,
        MarketRole::SystemOperator,
        MarketRole::DataHubAdministrator,
    ];

    /// Role code used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            MarketRole::EnergySupplier => "DDQ",
            MarketRole::GridAccessProvider => "DDM",
            MarketRole::BalanceResponsibleParty => "DDK",
            MarketRole::MeteredDataResponsible => "MDR",
            MarketRole::MeteringPointAdministrator => "DDZ",
            MarketRole::SystemOperator => "EZ",
            MarketRole::DataHubAdministrator => "DGL",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarketRole::EnergySupplier => "EnergySupplier",
            MarketRole::GridAccessProvider => "GridAccessProvider",
            MarketRole::BalanceResponsibleParty => "BalanceResponsibleParty",
            MarketRole::MeteredDataResponsible => "MeteredDataResponsible",
            MarketRole::MeteringPointAdministrator => "MeteringPointAdministrator",
            MarketRole::SystemOperator => "SystemOperator",
            MarketRole::DataHubAdministrator => "DataHubAdministrator",
        }
    }

    /// Accepts either the wire code or the role name, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|role| {
                role.code().eq_ignore_ascii_case(value) || role.name().eq_ignore_ascii_case(value)
            })
            .ok_or_else(|| ParseError::MarketRole(value.to_string()))
    }
}

impl fmt::Display for MarketRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MarketRole {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
