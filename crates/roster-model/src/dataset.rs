use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell::Row;

/// Column names shared by the dataset schemas and the validation pipelines.
pub mod columns {
    pub const CLIENT_ID: &str = "ClientID";
    pub const CLIENT_NAME: &str = "ClientName";
    pub const PRIORITY_LEVEL: &str = "PriorityLevel";
    pub const REQUESTED_TASK_IDS: &str = "RequestedTaskIDs";
    pub const GROUP_TAG: &str = "GroupTag";
    pub const ATTRIBUTES_JSON: &str = "AttributesJSON";

    pub const WORKER_ID: &str = "WorkerID";
    pub const WORKER_NAME: &str = "WorkerName";
    pub const SKILLS: &str = "Skills";
    pub const AVAILABLE_SLOTS: &str = "AvailableSlots";
    pub const MAX_LOAD_PER_PHASE: &str = "MaxLoadPerPhase";
    pub const WORKER_GROUP: &str = "WorkerGroup";
    pub const QUALIFICATION_LEVEL: &str = "QualificationLevel";

    pub const TASK_ID: &str = "TaskID";
    pub const TASK_NAME: &str = "TaskName";
    pub const CATEGORY: &str = "Category";
    pub const DURATION: &str = "Duration";
    pub const REQUIRED_SKILLS: &str = "RequiredSkills";
    pub const PREFERRED_PHASES: &str = "PreferredPhases";
    pub const MAX_CONCURRENT: &str = "MaxConcurrent";
}

use columns::{
    ATTRIBUTES_JSON, AVAILABLE_SLOTS, CATEGORY, CLIENT_ID, CLIENT_NAME, DURATION, GROUP_TAG,
    MAX_CONCURRENT, MAX_LOAD_PER_PHASE, PREFERRED_PHASES, PRIORITY_LEVEL, QUALIFICATION_LEVEL,
    REQUESTED_TASK_IDS, REQUIRED_SKILLS, SKILLS, TASK_ID, TASK_NAME, WORKER_GROUP, WORKER_ID,
    WORKER_NAME,
};

pub const CLIENT_COLUMNS: &[&str] = &[
    CLIENT_ID,
    CLIENT_NAME,
    PRIORITY_LEVEL,
    REQUESTED_TASK_IDS,
    GROUP_TAG,
    ATTRIBUTES_JSON,
];

pub const WORKER_COLUMNS: &[&str] = &[
    WORKER_ID,
    WORKER_NAME,
    SKILLS,
    AVAILABLE_SLOTS,
    MAX_LOAD_PER_PHASE,
    WORKER_GROUP,
    QUALIFICATION_LEVEL,
];

pub const TASK_COLUMNS: &[&str] = &[
    TASK_ID,
    TASK_NAME,
    CATEGORY,
    DURATION,
    REQUIRED_SKILLS,
    PREFERRED_PHASES,
    MAX_CONCURRENT,
];

/// The three datasets a scheduling session works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Clients,
    Workers,
    Tasks,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [Self::Clients, Self::Workers, Self::Tasks];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Workers => "workers",
            Self::Tasks => "tasks",
        }
    }

    /// Display label used in reports.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clients => "Clients",
            Self::Workers => "Workers",
            Self::Tasks => "Tasks",
        }
    }

    /// Column that must be unique across the dataset's rows.
    pub const fn id_column(&self) -> &'static str {
        match self {
            Self::Clients => CLIENT_ID,
            Self::Workers => WORKER_ID,
            Self::Tasks => TASK_ID,
        }
    }

    pub const fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Clients => CLIENT_COLUMNS,
            Self::Workers => WORKER_COLUMNS,
            Self::Tasks => TASK_COLUMNS,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    /// Accepts singular and plural names in any case ("Client", "tasks").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" | "clients" => Ok(Self::Clients),
            "worker" | "workers" => Ok(Self::Workers),
            "task" | "tasks" => Ok(Self::Tasks),
            other => Err(format!("unknown dataset: {other}")),
        }
    }
}

/// The clients, workers and tasks row sets validated together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSet {
    #[serde(default)]
    pub clients: Vec<Row>,
    #[serde(default)]
    pub workers: Vec<Row>,
    #[serde(default)]
    pub tasks: Vec<Row>,
}

impl DatasetSet {
    pub fn new(clients: Vec<Row>, workers: Vec<Row>, tasks: Vec<Row>) -> Self {
        Self {
            clients,
            workers,
            tasks,
        }
    }

    pub fn rows(&self, kind: DatasetKind) -> &[Row] {
        match kind {
            DatasetKind::Clients => &self.clients,
            DatasetKind::Workers => &self.workers,
            DatasetKind::Tasks => &self.tasks,
        }
    }

    pub fn set_rows(&mut self, kind: DatasetKind, rows: Vec<Row>) {
        match kind {
            DatasetKind::Clients => self.clients = rows,
            DatasetKind::Workers => self.workers = rows,
            DatasetKind::Tasks => self.tasks = rows,
        }
    }

    /// True when all three datasets hold at least one row.
    pub fn is_complete(&self) -> bool {
        DatasetKind::ALL
            .iter()
            .all(|kind| !self.rows(*kind).is_empty())
    }

    /// Datasets that are still empty.
    pub fn missing(&self) -> Vec<DatasetKind> {
        DatasetKind::ALL
            .into_iter()
            .filter(|kind| self.rows(*kind).is_empty())
            .collect()
    }
}
