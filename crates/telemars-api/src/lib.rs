//! Task client for the Mediascope TV Index API.
//!
//! Builds tasks from validated filters, submits them, waits for the service
//! to compute them and flattens the result into a single table.
//!
//! # Quick Start
//!
//! ```no_run
//! use telemars_api::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let task = Task::builder(TaskKind::Simple, DateFilter::parse("2025-05-12", "2025-05-12")?)
//!     .audience("All 25-50".parse()?)
//!     .slice("researchDate")
//!     .slice("adSpotId")
//!     .statistic("RtgPer")
//!     .build()?;
//!
//! let client = MediascopeClient::new("token");
//! let table = client.execute(&task).await?;
//! println!("{:?}", table.columns);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod prelude;
pub mod result;
pub mod task;
