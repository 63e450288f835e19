pub mod codec;
pub mod hadamard;
pub mod pad;
pub mod record;

pub use codec::*;
pub use hadamard::*;
pub use pad::*;
pub use record::*;
