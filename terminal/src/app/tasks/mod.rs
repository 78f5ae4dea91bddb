//! Async tasks
//!
//! Background tasks that do network I/O and report back via [`AppEvent`](crate::app::AppEvent).

pub(crate) mod completion;
pub(crate) mod realtime;
