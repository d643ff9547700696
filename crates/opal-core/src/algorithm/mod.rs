//! Selectable algorithms and the registry that names them.
//!
//! # Architecture
//!
//! ```text
//! opal-dispatch <module> <class> ...
//!     |
//!     v
//! AlgorithmRegistry --resolve(module, class)--> Box<dyn Algorithm>
//!     |                                               |
//!     |                           AlgorithmRunner::new(instance)
//!     |                                               |
//!     |                 run(data_dir, parameters, threads, results)
//!     |                                               |
//!     |                                  Algorithm::execute(&RunRequest)
//! ```

pub mod builtin;
pub mod registry;
pub mod trait_def;

pub use builtin::Echo;
pub use registry::{AlgorithmFactory, AlgorithmRegistry, ResolveError};
pub use trait_def::Algorithm;
