//! Build-script names that get special treatment.
//!
//! The DSL does not reserve any of these; the table is a heuristic allowlist
//! of the blocks editors care about. New entries only need a variant here
//! plus its rows in the accessors below.

/// Completion strategy selected by an enclosing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockScope {
    Project,
    Dependencies,
    Repositories,
    Task,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DslKeyword {
    Dependencies,
    Repositories,
    Apply,
    Configurations,
    Task,
    AllProjects,
    SubProjects,
    Project,
    Configure,
}

impl DslKeyword {
    pub const ALL: [DslKeyword; 9] = [
        DslKeyword::Dependencies,
        DslKeyword::Repositories,
        DslKeyword::Apply,
        DslKeyword::Configurations,
        DslKeyword::Task,
        DslKeyword::AllProjects,
        DslKeyword::SubProjects,
        DslKeyword::Project,
        DslKeyword::Configure,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            DslKeyword::Dependencies => "dependencies",
            DslKeyword::Repositories => "repositories",
            DslKeyword::Apply => "apply",
            DslKeyword::Configurations => "configurations",
            DslKeyword::Task => "task",
            DslKeyword::AllProjects => "allprojects",
            DslKeyword::SubProjects => "subprojects",
            DslKeyword::Project => "project",
            DslKeyword::Configure => "configure",
        }
    }

    /// Highlighted with the `defaultLibrary` modifier.
    pub fn is_default_library(self) -> bool {
        matches!(
            self,
            DslKeyword::Dependencies
                | DslKeyword::Repositories
                | DslKeyword::Apply
                | DslKeyword::Configurations
                | DslKeyword::Task
        )
    }

    pub fn scope(self) -> Option<BlockScope> {
        match self {
            DslKeyword::Dependencies => Some(BlockScope::Dependencies),
            DslKeyword::Repositories => Some(BlockScope::Repositories),
            DslKeyword::Task => Some(BlockScope::Task),
            DslKeyword::AllProjects | DslKeyword::SubProjects | DslKeyword::Project | DslKeyword::Configure => {
                Some(BlockScope::Project)
            }
            DslKeyword::Apply | DslKeyword::Configurations => None,
        }
    }
}

pub fn is_default_library(name: &str) -> bool {
    DslKeyword::from_name(name).is_some_and(DslKeyword::is_default_library)
}
