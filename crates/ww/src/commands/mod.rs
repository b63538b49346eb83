//! CLI command implementations.

pub(crate) mod convert;

pub(crate) use convert::ConvertArgs;
