mod name;
mod rrset;
mod zone;

pub use name::*;
pub use rrset::*;
pub use zone::*;
