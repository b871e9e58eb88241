pub mod columns;
pub mod deserializers;
pub mod pipeline;
pub mod types;

pub use pipeline::{load_tickets, load_tickets_reader, LoadOutput};
pub use types::Ticket;
