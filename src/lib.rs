pub mod heap;

pub use heap::{Drain, HeapPQ};
