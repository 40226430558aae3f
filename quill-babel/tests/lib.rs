// This file is required to make `cargo test` discover tests in subdirectories.

#[cfg(test)]
mod common;

#[cfg(test)]
mod render;

#[cfg(test)]
mod serialize;

#[cfg(test)]
mod table;
