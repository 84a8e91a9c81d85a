mod browser;
mod csv_store;
mod data;
mod engine;
mod guard;
mod matcher;
mod mem_store;
mod store;

pub use browser::{BrowseStep, Browser, Navigation, NavigationError};
pub use csv_store::CsvStore;
pub use data::{parse_duration, parse_name, Task, TaskDate, ValidationError, NO_NOTES};
pub use engine::{new, WorkLog, WorkLogError, WorkLogImpl};
pub use guard::is_duplicate;
pub use matcher::{distinct_dates, filter, DateRange, Query};
pub use mem_store::MemStore;
pub use store::{Store, StoreError};
