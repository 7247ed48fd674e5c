//! # Architecture Abstraction Layer
//!
//! Hardware boundary of the kernel. The core never touches a register:
//! it sees time through [`crate::platform::Platform`] and the TWI wire
//! through [`crate::twi::TwiBus`], and each port implements those for
//! its silicon. Currently implements the Cortex-M port; extensible to
//! other architectures by adding sibling modules.

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub mod cortex_m;
