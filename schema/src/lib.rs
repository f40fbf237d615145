//! Read-only protobuf schema tree handed to the amzn generator.
//!
//! A host (usually a `protoc` plugin shim) builds these values from its own
//! descriptor model, or deserializes them from JSON, and passes whole
//! [`File`] trees to the generator. Nothing in the generator mutates them.
//!
//! ```
//! use amzn_schema::*;
//!
//! let file = File::new("greet.proto", "greet")
//!     .with_service(Service::new("Greeter").with_method(
//!         Method::new("SayHello", "HelloRequest", "HelloReply"),
//!     ))
//!     .with_message(Message::new("HelloRequest").with_field(
//!         Field::new("name", 1, "string"),
//!     ));
//!
//! assert_eq!(file.services[0].methods[0].shape(), StreamingShape::Unary);
//! assert_eq!(file.messages[0].fields[0].number, 1);
//! ```

pub mod tree;

pub use tree::*;
