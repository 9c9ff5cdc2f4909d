pub mod queue;

pub use queue::LinkedQueue;
