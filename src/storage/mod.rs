mod counter_store;

#[cfg(test)]
mod counter_store_test;

#[doc(hidden)]
pub use counter_store::*;
