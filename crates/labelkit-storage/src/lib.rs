#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod fs_store;
mod key;
mod s3_store;
mod signer;

pub use fs_store::FsObjectStore;
pub use key::validate_key;
pub use s3_store::S3LikeStore;
pub use signer::{OBJECTS_ROUTE, SignatureError, UrlSigner};

