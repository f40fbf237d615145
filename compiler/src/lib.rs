//! amzn-gen
//!
//! The traversal and dispatch core of `protoc-gen-amzn`:
//!  1) `Parameters`, the immutable option bag parsed from the host's option string,
//!  2) a `TemplateResolver` that maps each node `Category` to a render function
//!     (handlebars templates by default, overridable per category),
//!  3) the `Dispatcher`, which classifies schema nodes (including a method's
//!     streaming shape) and walks each file pre-order,
//!  4) `emit`, which renders one file into a fresh buffer and derives its
//!     `.amzn.go` output path,
//!  5) the append-only `ArtifactRegistry` and the `Generator` tying it together.

pub mod error;
pub mod types;
pub mod utils;
pub mod params;
pub mod verifier;
pub mod traits;
pub mod templates;
pub mod visitor;
pub mod emit;
pub mod registry;
pub mod generator;

pub use emit::{emit, output_path, OUTPUT_EXTENSION};
pub use error::{GenError, Result};
pub use generator::{generate, Generator, MODULE_NAME};
pub use params::Parameters;
pub use registry::ArtifactRegistry;
pub use templates::{DispatchTable, HandlebarsResolver};
pub use traits::{RenderFn, TemplateResolver};
pub use types::{Artifact, Category, Node, OutputBuffer};
pub use visitor::{classify, Dispatcher};
