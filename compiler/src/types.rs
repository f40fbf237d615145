use std::fmt;

use amzn_schema::{File, Message, Method, Service};
use serde::{Serialize, Serializer};

/// The six node classifications a render function is selected by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    File,
    Service,
    MethodUnary,
    MethodServerStreaming,
    MethodClientStreaming,
    Message,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::File,
        Category::Service,
        Category::MethodUnary,
        Category::MethodServerStreaming,
        Category::MethodClientStreaming,
        Category::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::File                  => "file",
            Category::Service               => "service",
            Category::MethodUnary           => "method_unary",
            Category::MethodServerStreaming => "method_server_streaming",
            Category::MethodClientStreaming => "method_client_streaming",
            Category::Message               => "message",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// File name looked up inside a `templates=<dir>` override directory.
    pub fn template_file_name(self) -> String {
        format!("{}.tmpl", self.as_str())
    }

    /// Parameter key overriding this category's template source.
    pub fn override_key(self) -> String {
        format!("{}_template", self.as_str())
    }

    pub fn from_override_key(key: &str) -> Option<Category> {
        let name = key.strip_suffix("_template")?;
        Category::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schema node together with the ancestors templates may refer to.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    File(&'a File),
    Service {
        file:    &'a File,
        service: &'a Service,
    },
    Method {
        file:    &'a File,
        service: &'a Service,
        method:  &'a Method,
    },
    Message {
        file:    &'a File,
        message: &'a Message,
    },
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::File(_)         => "file",
            Node::Service { .. }  => "service",
            Node::Method { .. }   => "method",
            Node::Message { .. }  => "message",
        }
    }

    pub fn name(&self) -> &'a str {
        match *self {
            Node::File(file)              => &file.name,
            Node::Service { service, .. } => &service.name,
            Node::Method { method, .. }   => &method.name,
            Node::Message { message, .. } => &message.name,
        }
    }

    pub fn file(&self) -> &'a File {
        match *self {
            Node::File(file)
            | Node::Service { file, .. }
            | Node::Method { file, .. }
            | Node::Message { file, .. } => file,
        }
    }

    /// Human-readable identity for diagnostics, e.g. `method Greeter.SayHello`.
    pub fn describe(&self) -> String {
        match self {
            Node::Method { service, method, .. } => {
                format!("method {}.{}", service.name, method.name)
            }
            other => format!("{} {}", other.kind(), other.name()),
        }
    }
}

/// Non-file nodes are rendered against their own fields plus the owning
/// file's path and package, and for methods the owning service's name.
#[derive(Serialize)]
struct Scoped<'a, T> {
    #[serde(flatten)]
    node:    &'a T,
    file:    &'a str,
    package: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    service: Option<&'a str>,
}

impl<'a, T> Scoped<'a, T> {
    fn new(node: &'a T, file: &'a File, service: Option<&'a Service>) -> Self {
        Scoped {
            node,
            file:    &file.name,
            package: &file.package,
            service: service.map(|s| s.name.as_str()),
        }
    }
}

impl Serialize for Node<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Node::File(file) => file.serialize(serializer),
            Node::Service { file, service } => {
                Scoped::new(service, file, None).serialize(serializer)
            }
            Node::Method { file, service, method } => {
                Scoped::new(method, file, Some(service)).serialize(serializer)
            }
            Node::Message { file, message } => {
                Scoped::new(message, file, None).serialize(serializer)
            }
        }
    }
}

/// One generated file: the derived output path and its full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    path:    String,
    content: String,
}

impl Artifact {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Artifact { path: path.into(), content: content.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Append-only text sink a render function writes into.
///
/// Render functions only ever see `&mut OutputBuffer`, so they can add text
/// at the end but can neither truncate nor read what earlier nodes wrote.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    text: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        OutputBuffer::default()
    }

    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Write for OutputBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s);
        Ok(())
    }
}
