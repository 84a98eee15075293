mod executable;

pub use executable::Executable;
