//! Action types for network substrate preparation

use serde::{Deserialize, Serialize};

/// Kind of resource an action applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Network,
    Subnet,
    SecurityGroup,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Network => write!(f, "vpc"),
            ResourceKind::Subnet => write!(f, "subnet"),
            ResourceKind::SecurityGroup => write!(f, "security-group"),
        }
    }
}

/// Represents a planned or performed action on one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Type of action
    pub action_type: ActionType,

    pub resource_kind: ResourceKind,

    /// Provider ID when the resource exists, otherwise the desired name
    pub resource_id: String,

    /// Description of the action
    pub description: String,
}

impl Action {
    pub fn reuse(kind: ResourceKind, id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            action_type: ActionType::Reuse,
            resource_kind: kind,
            resource_id: id.into(),
            description: description.into(),
        }
    }

    pub fn create(kind: ResourceKind, id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            action_type: ActionType::Create,
            resource_kind: kind,
            resource_id: id.into(),
            description: description.into(),
        }
    }
}

/// Type of action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Create a new resource
    Create,
    /// Use an existing resource as is
    Reuse,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Create => write!(f, "create"),
            ActionType::Reuse => write!(f, "reuse"),
        }
    }
}

/// Plan containing all actions, in execution order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    pub actions: Vec<Action>,
}

impl Plan {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Whether applying the plan would create anything
    pub fn has_changes(&self) -> bool {
        self.actions
            .iter()
            .any(|a| a.action_type == ActionType::Create)
    }

    /// Get actions by type
    pub fn actions_by_type(&self, action_type: ActionType) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.action_type == action_type)
            .collect()
    }

    /// Summary of the plan
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            create: self.actions_by_type(ActionType::Create).len(),
            reuse: self.actions_by_type(ActionType::Reuse).len(),
        }
    }
}

/// Summary of planned actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSummary {
    pub create: usize,
    pub reuse: usize,
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to create, {} to reuse", self.create, self.reuse)
    }
}
