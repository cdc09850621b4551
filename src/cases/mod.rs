//! # Case Chain
//!
//! Every resolved request is classified by walking a fixed, ordered list of
//! cases and acting on the first one whose test matches:
//!
//! | # | Case                 | Matches when the canonical path...                  |
//! |---|----------------------|-----------------------------------------------------|
//! | 1 | `NoResource`         | does not exist                                      |
//! | 2 | `Script`             | is a regular file with the script extension         |
//! | 3 | `RegularFile`        | is any other regular file                           |
//! | 4 | `DirectoryWithIndex` | is a directory containing the index file            |
//! | 5 | `DirectoryListing`   | is a directory without the index file               |
//! | 6 | `Fallback`           | always                                              |
//!
//! `Script` must precede `RegularFile`, otherwise script sources would be
//! served as static content. The two directory cases are mutually exclusive.
//! Cases 1–5 cover every path that exists as a file or directory, so reaching
//! `Fallback` (a socket, a device node, a race) yields
//! [`ServeError::UnclassifiedRequest`](crate::error::ServeError::UnclassifiedRequest)
//! rather than a silent default.
//!
//! The chain holds no per-request state and is shared read-only by all
//! connections. Failures from a case's action are returned, not handled; the
//! caller reports them.

mod chain;


pub use chain::{Case, CaseChain};
