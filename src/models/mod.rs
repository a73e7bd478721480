//! Typed mirrors of the Clockodo API resources and request parameters.

mod entities;
mod params;
mod responses;

pub use entities::{Billable, Customer, Project, Service, TimeEntry, User};
pub use params::{
    wire_fields, wire_query_pairs, CreateEntryParams, EditEntryParams, ListEntriesParams,
    ListProjectsParams, StartClockParams,
};
pub use responses::{
    ClockResponse, ClockStartResponse, ClockStop, CustomersResponse, DeleteResponse,
    EntriesPage, EntryResponse, ProjectsResponse, ServicesResponse, UsersResponse,
};
