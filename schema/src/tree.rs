use serde::{Deserialize, Serialize};

/// A compilation unit. `name` is the input path as the host knows it,
/// e.g. `foo/bar/greet.proto`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub name:       String,
    pub package:    String,
    /// The file's `go_package` option, e.g. `example.com/greet;greetpb`.
    #[serde(default)]
    pub go_package: Option<String>,
    #[serde(default)]
    pub services:   Vec<Service>,
    #[serde(default)]
    pub messages:   Vec<Message>,
    #[serde(default)]
    pub enums:      Vec<Enum>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name:    String,
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name:             String,
    pub input_type:       String,
    pub output_type:      String,
    #[serde(default)]
    pub client_streaming: bool,
    #[serde(default)]
    pub server_streaming: bool,
}

/// The four combinations of a method's streaming flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamingShape {
    Unary,
    ServerStreaming,
    ClientStreaming,
    Bidirectional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub name:     String,
    #[serde(default)]
    pub fields:   Vec<Field>,
    /// Nested message declarations, in declaration order.
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub enums:    Vec<Enum>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name:      String,
    pub number:    i32,
    pub type_name: String,
    #[serde(default)]
    pub repeated:  bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub name:   String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name:   String,
    pub number: i32,
}

impl File {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        File {
            name:       name.into(),
            package:    package.into(),
            go_package: None,
            services:   Vec::new(),
            messages:   Vec::new(),
            enums:      Vec::new(),
        }
    }

    pub fn with_go_package(mut self, go_package: impl Into<String>) -> Self {
        self.go_package = Some(go_package.into());
        self
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_enum(mut self, e: Enum) -> Self {
        self.enums.push(e);
        self
    }
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Service { name: name.into(), methods: Vec::new() }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }
}

impl Method {
    pub fn new(
        name: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
    ) -> Self {
        Method {
            name:             name.into(),
            input_type:       input_type.into(),
            output_type:      output_type.into(),
            client_streaming: false,
            server_streaming: false,
        }
    }

    pub fn server_streaming(mut self) -> Self {
        self.server_streaming = true;
        self
    }

    pub fn client_streaming(mut self) -> Self {
        self.client_streaming = true;
        self
    }

    pub fn shape(&self) -> StreamingShape {
        match (self.server_streaming, self.client_streaming) {
            (false, false) => StreamingShape::Unary,
            (true, false)  => StreamingShape::ServerStreaming,
            (false, true)  => StreamingShape::ClientStreaming,
            (true, true)   => StreamingShape::Bidirectional,
        }
    }
}

impl Message {
    pub fn new(name: impl Into<String>) -> Self {
        Message {
            name:     name.into(),
            fields:   Vec::new(),
            messages: Vec::new(),
            enums:    Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_nested(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

impl Field {
    pub fn new(name: impl Into<String>, number: i32, type_name: impl Into<String>) -> Self {
        Field {
            name:      name.into(),
            number,
            type_name: type_name.into(),
            repeated:  false,
        }
    }

    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Enum { name: name.into(), values: Vec::new() }
    }

    pub fn with_value(mut self, name: impl Into<String>, number: i32) -> Self {
        self.values.push(EnumValue { name: name.into(), number });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_covers_all_flag_combinations() {
        let m = Method::new("M", "In", "Out");
        assert_eq!(m.shape(), StreamingShape::Unary);
        assert_eq!(m.clone().server_streaming().shape(), StreamingShape::ServerStreaming);
        assert_eq!(m.clone().client_streaming().shape(), StreamingShape::ClientStreaming);
        assert_eq!(
            m.server_streaming().client_streaming().shape(),
            StreamingShape::Bidirectional
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "name": "greet.proto",
            "package": "greet",
            "services": [
                { "name": "Greeter", "methods": [
                    { "name": "SayHello", "input_type": "HelloRequest",
                      "output_type": "HelloReply", "server_streaming": true }
                ] }
            ],
            "messages": [ { "name": "HelloRequest" } ]
        }"#;

        let file: File = serde_json::from_str(json).expect("valid file json");
        assert_eq!(file.go_package, None);
        assert!(file.enums.is_empty());
        let method = &file.services[0].methods[0];
        assert!(method.server_streaming);
        assert!(!method.client_streaming);
        assert!(file.messages[0].fields.is_empty());
    }
}
