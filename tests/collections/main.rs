//! Collection layer integration tests over a JSON file on disk.

mod support;
mod crud;
