pub mod domain;
pub mod error;
pub mod order;

pub use domain::{Category, Journey, OrderId, Priority, ProjectProgression, ServiceId};
pub use error::{DashboardError, ErrorCode, ErrorReport};
pub use order::{Order, OrderSection, OrderSubcategory};
