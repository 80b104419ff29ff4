use std::fmt;

use serde::{Deserialize, Serialize};

/// The eight canonical stages of a vehicle service job.
///
/// Each job flows through:
/// RECEPTION → ESTIMATION → WORK_ASSIGNMENT → WIP → QC → INVOICING → DELIVERY → CLOSED
///
/// The ordering is total (derived `Ord`), forward-only, and no stage may be
/// skipped. `CLOSED` is terminal. Front-end views use coarser groupings; the
/// explicit mappings live in [`Stage::board_column`] and
/// [`Stage::workflow_step`] — this enum is the single source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Reception,
    Estimation,
    WorkAssignment,
    Wip,
    Qc,
    Invoicing,
    Delivery,
    Closed,
}

impl Stage {
    /// All stages in lifecycle order.
    pub const ALL: [Stage; 8] = [
        Stage::Reception,
        Stage::Estimation,
        Stage::WorkAssignment,
        Stage::Wip,
        Stage::Qc,
        Stage::Invoicing,
        Stage::Delivery,
        Stage::Closed,
    ];

    /// The stage that follows this one, or `None` from `Closed`.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Reception => Some(Stage::Estimation),
            Stage::Estimation => Some(Stage::WorkAssignment),
            Stage::WorkAssignment => Some(Stage::Wip),
            Stage::Wip => Some(Stage::Qc),
            Stage::Qc => Some(Stage::Invoicing),
            Stage::Invoicing => Some(Stage::Delivery),
            Stage::Delivery => Some(Stage::Closed),
            Stage::Closed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Closed
    }

    /// Column label for the four-column board view.
    pub fn board_column(self) -> &'static str {
        match self {
            Stage::Reception | Stage::Estimation => "Intake",
            Stage::WorkAssignment | Stage::Wip => "In Progress",
            Stage::Qc | Stage::Invoicing => "Review",
            Stage::Delivery | Stage::Closed => "Done",
        }
    }

    /// Step number (1–5) for the five-step workflow widget.
    pub fn workflow_step(self) -> u8 {
        match self {
            Stage::Reception | Stage::Estimation => 1,
            Stage::WorkAssignment => 2,
            Stage::Wip => 3,
            Stage::Qc | Stage::Invoicing => 4,
            Stage::Delivery | Stage::Closed => 5,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Reception => write!(f, "RECEPTION"),
            Stage::Estimation => write!(f, "ESTIMATION"),
            Stage::WorkAssignment => write!(f, "WORK_ASSIGNMENT"),
            Stage::Wip => write!(f, "WIP"),
            Stage::Qc => write!(f, "QC"),
            Stage::Invoicing => write!(f, "INVOICING"),
            Stage::Delivery => write!(f, "DELIVERY"),
            Stage::Closed => write!(f, "CLOSED"),
        }
    }
}
