//! Prelude module for convenient imports.
//!
//! Re-exports the client, the task types and the filters tasks are built
//! from, so one `use` covers a typical caller:
//!
//! ```
//! use telemars_api::prelude::*;
//! ```

// Client
pub use crate::client::MediascopeClient;

// Error types
pub use crate::error::{ApiError, Error, Result, TaskError};

// Tasks and results
pub use crate::result::{Table, TaskId, TaskResult, TaskState, TaskStatus};
pub use crate::task::{
    IssueType, Slice, SortOrder, Statistic, Task, TaskBuilder, TaskKind, TaskOptions,
};

// Filters
pub use telemars_filters::filters::{
    AdFilter, BreakFilter, CompanyFilter, DateFilter, DaytypeFilter, DemographicFilter,
    LocationFilter, PlatformFilter, PlaybackTypeFilter, WeekdayFilter,
};
pub use telemars_filters::{Expression, FilterError};
