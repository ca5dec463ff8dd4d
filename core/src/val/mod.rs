mod values;

#[cfg(test)]
mod val_test;

pub use values::{Value, ValueKind};
