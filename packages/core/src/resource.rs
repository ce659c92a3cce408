// ABOUTME: Catalogue of the backend resources exposed through Persona
// ABOUTME: Paths and human-readable labels shared by the proxy and the client

use std::fmt;

/// The resource collections Persona lists and creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Agents,
    Campaigns,
    MlEngines,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Agents,
        ResourceKind::Campaigns,
        ResourceKind::MlEngines,
    ];

    /// Collection path, identical on the proxy and on the backend
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Agents => "/api/agents",
            ResourceKind::Campaigns => "/api/campaigns",
            ResourceKind::MlEngines => "/api/ml-engines",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Agents => "agent",
            ResourceKind::Campaigns => "campaign",
            ResourceKind::MlEngines => "ML engine",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Agents => "agents",
            ResourceKind::Campaigns => "campaigns",
            ResourceKind::MlEngines => "ML engines",
        }
    }

    /// Generic message reported when listing fails
    pub fn list_failure(&self) -> String {
        format!("Failed to fetch {}", self.plural())
    }

    /// Fallback message reported when creation fails without a usable cause
    pub fn create_failure(&self) -> String {
        format!("Failed to create {}", self.singular())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(ResourceKind::Agents.path(), "/api/agents");
        assert_eq!(ResourceKind::Campaigns.path(), "/api/campaigns");
        assert_eq!(ResourceKind::MlEngines.path(), "/api/ml-engines");
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(ResourceKind::Agents.list_failure(), "Failed to fetch agents");
        assert_eq!(
            ResourceKind::MlEngines.list_failure(),
            "Failed to fetch ML engines"
        );
        assert_eq!(
            ResourceKind::Campaigns.create_failure(),
            "Failed to create campaign"
        );
    }
}
