//! Infrastructure layer for the configuration editor.
//!
//! Contains OS-facing adapters: configuration file persistence, the
//! `mkpasswd` hasher process, the privileged puavo helper tools, and the
//! license catalog scanner.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `plc_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod hasher;
pub mod licenses;
pub mod storage;
pub mod tools;
