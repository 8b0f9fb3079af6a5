//! Items referenced by the code generated in
//! [`describe_derive`](crate::derive). Not part of the public API; anything
//! here may change without notice.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    pub use crate::registry::AutoRegistration;
}
