//! Market participant identity. A queue belongs to exactly one `Actor`.

mod actor_number;
mod market_role;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use actor_number::ActorNumber;
pub use market_role::MarketRole;

/// An actor number acting in one market role.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Actor {
    pub number: ActorNumber,
    pub role: MarketRole,
}

impl Actor {
    pub fn new(number: ActorNumber, role: MarketRole) -> Self {
        Actor { number, role }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.number, self.role)
    }
}
