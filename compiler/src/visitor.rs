use amzn_schema::{File, Service};

use crate::{
    error::Result,
    templates::DispatchTable,
    types::{Category, Node, OutputBuffer},
};

/// Picks the category a node is rendered with.
///
/// Server streaming is checked before client streaming, so a bidirectional
/// method renders with the server-streaming template.
pub fn classify(node: &Node<'_>) -> Category {
    match node {
        Node::File(_)         => Category::File,
        Node::Service { .. }  => Category::Service,
        Node::Message { .. }  => Category::Message,
        Node::Method { method, .. } => {
            if method.server_streaming {
                Category::MethodServerStreaming
            } else if method.client_streaming {
                Category::MethodClientStreaming
            } else {
                Category::MethodUnary
            }
        }
    }
}

/// Walks one file tree pre-order, depth-first, rendering every node into
/// the same sink: the file, then each service followed by its methods, then
/// each top-level message. Nested messages are left to the message template.
///
/// The first error stops the walk.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'t> {
    table: &'t DispatchTable,
}

impl<'t> Dispatcher<'t> {
    pub fn new(table: &'t DispatchTable) -> Self {
        Dispatcher { table }
    }

    pub fn walk_file(&self, file: &File, out: &mut OutputBuffer) -> Result<()> {
        self.visit(Node::File(file), out)?;
        for service in &file.services {
            self.walk_service(file, service, out)?;
        }
        for message in &file.messages {
            self.visit(Node::Message { file, message }, out)?;
        }
        Ok(())
    }

    fn walk_service(&self, file: &File, service: &Service, out: &mut OutputBuffer) -> Result<()> {
        self.visit(Node::Service { file, service }, out)?;
        for method in &service.methods {
            self.visit(Node::Method { file, service, method }, out)?;
        }
        Ok(())
    }

    fn visit(&self, node: Node<'_>, out: &mut OutputBuffer) -> Result<()> {
        self.table.render(node, out).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amzn_schema::Method;

    fn category_of(method: Method) -> Category {
        let service = Service::new("S").with_method(method.clone());
        let file = File::new("f.proto", "f");
        classify(&Node::Method { file: &file, service: &service, method: &method })
    }

    #[test]
    fn classifies_streaming_shapes() {
        let m = Method::new("M", "In", "Out");
        assert_eq!(category_of(m.clone()), Category::MethodUnary);
        assert_eq!(category_of(m.clone().server_streaming()), Category::MethodServerStreaming);
        assert_eq!(category_of(m.clone().client_streaming()), Category::MethodClientStreaming);
    }

    #[test]
    fn bidirectional_classifies_as_server_streaming() {
        let m = Method::new("Chat", "In", "Out").client_streaming().server_streaming();
        assert_eq!(category_of(m), Category::MethodServerStreaming);
    }

    #[test]
    fn classifies_other_nodes() {
        let file = File::new("f.proto", "f");
        let service = Service::new("S");
        let message = amzn_schema::Message::new("M");
        assert_eq!(classify(&Node::File(&file)), Category::File);
        assert_eq!(classify(&Node::Service { file: &file, service: &service }), Category::Service);
        assert_eq!(classify(&Node::Message { file: &file, message: &message }), Category::Message);
    }
}
