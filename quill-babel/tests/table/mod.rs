//! Table sub-codec tests

mod codec;
mod properties;
