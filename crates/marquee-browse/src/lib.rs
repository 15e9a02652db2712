//! List paging and movie detail loading for marquee.
//!
//! Builds the incremental list-loading state machine and the concurrent
//! detail aggregation on top of `marquee-api`.

/// Concurrent detail/credits/videos aggregation.
pub mod detail;
/// Async pager driving a `ListState` against a catalog client.
pub mod pager;
/// List sources (categories and search) and page fetching.
pub mod source;
/// Sans-IO list paging state machine.
pub mod state;

#[cfg(test)]
mod testing;
