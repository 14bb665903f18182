mod ram;

pub use ram::{StorageError, RAM};
