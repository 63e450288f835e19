pub mod decrypt;
pub mod encrypt;
pub mod info;
pub mod keygen;

pub use decrypt::*;
pub use encrypt::*;
pub use info::*;
pub use keygen::*;
