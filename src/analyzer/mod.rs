pub mod aggregate;
pub mod charts;
pub mod dashboard;
pub mod stats;
pub mod window;

pub use aggregate::{aggregate, filter_tickets, AggregateResult};
pub use charts::{build_charts, ChartData};
pub use dashboard::{render_dashboard, DashboardData};
pub use window::{resolve_window, DateWindow};
